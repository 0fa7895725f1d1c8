//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! command line
//!     → cli.rs (clap parse, raw option values)
//!     → validation.rs (pairing, duration, headers, status, mode precedence)
//!     → ServerConfig (validated, immutable)
//!     → shared via Arc with every handler
//! ```
//!
//! # Design Decisions
//! - Config is resolved fully before any listener is bound
//! - Exactly one `ResponseMode` per instance, chosen once
//! - No reload: changing behaviour requires a restart

pub mod cli;
pub mod schema;
pub mod validation;

pub use cli::Cli;
pub use schema::{HeaderPair, ResponseMode, ServerConfig, TlsConfig, FILE_BUFFER_SIZE};
pub use validation::ConfigError;
