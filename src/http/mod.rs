//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP/TLS connection
//!     → server.rs (Axum setup, single catch-all route)
//!     → middleware/ (dump → delay → headers → rps), skipped for WebSocket
//!     → handlers/ (file, upload, time, sha, fixed status)
//!       or websocket.rs (echo / flood sessions)
//!     → Send to client
//! ```

pub mod handlers;
pub mod middleware;
pub mod server;
pub mod websocket;

pub use server::{AppState, MockServer, ServeError};
