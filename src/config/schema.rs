//! Configuration schema definitions.
//!
//! This module defines the resolved, immutable configuration of a mock
//! instance. Raw command-line options live in [`crate::config::cli`].

use std::path::PathBuf;
use std::time::Duration;

use axum::http::{HeaderName, HeaderValue, StatusCode};
use serde::Serialize;

/// Buffer size used when streaming the served file (10 MiB).
pub const FILE_BUFFER_SIZE: usize = 10 * 1024 * 1024;

/// Root configuration for a mock instance.
///
/// Built once by [`crate::config::Cli::resolve`] before any listener is
/// bound, then shared read-only through `Arc`.
#[derive(Debug, Clone, Serialize)]
pub struct ServerConfig {
    /// Port to listen on.
    pub port: u16,

    /// File served in file mode. Empty when unset.
    pub file: PathBuf,

    /// Default `Content-Type` for every decorated response.
    pub content_type: String,

    /// Parsed form of `content_type`.
    #[serde(skip)]
    pub content_type_header: HeaderValue,

    /// Raw `Name:Value,Name:Value` header list as given on the command line.
    pub headers: String,

    /// Parsed form of `headers`.
    #[serde(skip)]
    pub header_pairs: Vec<HeaderPair>,

    /// Artificial delay before any response bytes.
    pub delay: Duration,

    /// Optional TLS configuration (cert and key are always set together).
    pub tls: Option<TlsConfig>,

    /// Log serving notices at debug level.
    pub verbose: bool,

    /// Dump every inbound request to the log.
    pub dump_request: bool,

    /// Populate `Content-Length` before streaming.
    pub content_length: bool,

    /// Log the request rate every minute.
    pub print_rps: bool,

    /// Disable HTTP keep-alive on served connections.
    pub no_keep_alive: bool,

    /// Write header names as stored instead of in canonical Title-Case.
    pub keep_case: bool,

    /// Tracing collector address, if any.
    pub otel_endpoint: Option<String>,

    /// Service identity attached to request spans.
    pub service_name: String,

    /// The single response behaviour of this instance.
    pub mode: ResponseMode,
}

impl ServerConfig {
    /// Whether TLS is configured.
    pub fn is_tls(&self) -> bool {
        self.tls.is_some()
    }

    /// Whether the instance speaks WebSocket instead of plain HTTP.
    pub fn is_websocket(&self) -> bool {
        matches!(self.mode, ResponseMode::WebSocket { .. })
    }
}

/// TLS certificate/key pair (PEM files).
#[derive(Debug, Clone, Serialize)]
pub struct TlsConfig {
    /// Path to certificate file (PEM).
    pub cert_path: PathBuf,

    /// Path to private key file (PEM).
    pub key_path: PathBuf,
}

/// A response header injected into every decorated response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderPair {
    pub name: HeaderName,
    pub value: HeaderValue,
}

/// The response behaviour selected at startup.
///
/// Precedence when several switches are given:
/// WebSocket > Time > Sha > FixedStatus > Upload > File.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResponseMode {
    /// Upgrade to WebSocket and echo, or flood timestamps.
    WebSocket { flood: bool },
    /// Reply with the current timestamp.
    Time,
    /// Reply with the SHA-256 of the current Unix nanosecond timestamp.
    Sha,
    /// Reply with a fixed status code and an empty body.
    FixedStatus {
        #[serde(serialize_with = "serialize_status")]
        status: StatusCode,
    },
    /// Accept multipart uploads into the working directory.
    Upload,
    /// Stream the contents of a file.
    File { path: PathBuf },
}

impl ResponseMode {
    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            ResponseMode::WebSocket { flood: true } => "websocket-flood",
            ResponseMode::WebSocket { flood: false } => "websocket-echo",
            ResponseMode::Time => "time",
            ResponseMode::Sha => "sha",
            ResponseMode::FixedStatus { .. } => "fixed-status",
            ResponseMode::Upload => "upload",
            ResponseMode::File { .. } => "file",
        }
    }
}

fn serialize_status<S: serde::Serializer>(status: &StatusCode, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u16(status.as_u16())
}
