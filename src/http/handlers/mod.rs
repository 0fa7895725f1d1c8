//! Response handlers, one per response mode.
//!
//! Success responses leave `Content-Type` unset so header injection can
//! apply the configured default. Error responses are plain text.

pub mod file;
pub mod sha;
pub mod status;
pub mod time;
pub mod upload;

use std::net::SocketAddr;

use axum::extract::{ConnectInfo, Request};

/// Peer address for log lines, when the server recorded it.
pub(crate) fn peer(request: &Request) -> String {
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
