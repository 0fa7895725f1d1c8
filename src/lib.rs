//! Configurable mock microservice library.
//!
//! One instance serves one response mode, chosen at startup from the
//! command line: file contents, timestamp, SHA-256 of the timestamp, a
//! fixed status code, file upload, or WebSocket echo/flood.

pub mod config;
pub mod http;
pub mod net;
pub mod lifecycle;
pub mod observability;

pub use config::{Cli, ConfigError, ResponseMode, ServerConfig};
pub use http::{MockServer, ServeError};
pub use lifecycle::Shutdown;
