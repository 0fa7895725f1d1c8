//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events)
//!     → spans.rs (one span per request, tagged with the service name)
//!     → rps.rs (request rate, logged once a minute)
//!
//! Consumers:
//!     → stdout via the fmt subscriber
//! ```
//!
//! # Design Decisions
//! - RUST_LOG always wins over the verbose switch
//! - The request counter is the only mutable state shared across requests

pub mod logging;
pub mod rps;
pub mod spans;

pub use rps::RequestCounter;
