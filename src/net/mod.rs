//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! --port
//!     → listener.rs (bind 0.0.0.0:<port>)
//!     → tls.rs (optional rustls acceptor from the PEM pair)
//!     → interfaces.rs (startup banner, one line per local IPv4 address)
//!     → Hand off to HTTP layer
//! ```
//!
//! # Design Decisions
//! - The listener is bound before serving so bind errors surface at startup
//! - TLS is optional and handled transparently by axum-server

pub mod interfaces;
pub mod listener;
pub mod tls;

pub use interfaces::Scheme;
pub use listener::ListenerError;
