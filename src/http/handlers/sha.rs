//! SHA mode.

use std::time::{SystemTime, UNIX_EPOCH};

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header::CONTENT_LENGTH, HeaderValue},
    response::Response,
};
use sha2::{Digest, Sha256};

use crate::http::handlers::peer;
use crate::http::server::AppState;

/// Length of a hex encoded SHA-256 digest.
pub const DIGEST_HEX_LEN: usize = 64;

/// Lowercase hex SHA-256 of the decimal rendering of `nanos`.
pub fn digest_of(nanos: u128) -> String {
    hex::encode(Sha256::digest(nanos.to_string().as_bytes()))
}

pub fn unix_nanos() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0)
}

pub async fn serve_sha(State(state): State<AppState>, request: Request) -> Response {
    let nanos = unix_nanos();
    tracing::debug!("Serving SHA256 of {} to {}", nanos, peer(&request));

    let mut response = Response::new(Body::from(digest_of(nanos)));
    if state.config.content_length {
        response
            .headers_mut()
            .insert(CONTENT_LENGTH, HeaderValue::from(DIGEST_HEX_LEN));
    }
    response
}
