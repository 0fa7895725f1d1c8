//! Mock microservice (v1)
//!
//! A single-binary HTTP(S)/WebSocket stub built with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌────────────────────────────────────────────────┐
//!                      │                   MOCK-MS                       │
//!                      │                                                 │
//!   command line ──────┼─▶ config ──▶ ResponseMode (chosen once)         │
//!                      │                    │                            │
//!   Client Request     │  ┌─────────┐   ┌───▼─────┐   ┌────────────────┐ │
//!   ───────────────────┼─▶│   net   │──▶│  http   │──▶│   decorators   │ │
//!                      │  │listener │   │ server  │   │ dump/delay/    │ │
//!                      │  └─────────┘   └────┬────┘   │ headers/rps    │ │
//!                      │                     │        └───────┬────────┘ │
//!                      │                     ▼                ▼          │
//!   Client Response    │              ┌────────────┐   ┌────────────┐    │
//!   ◀──────────────────┼──────────────│ websocket  │   │  handler   │    │
//!                      │              │ echo/flood │   │ file/time/ │    │
//!                      │              └────────────┘   │ sha/status/│    │
//!                      │                               │ upload     │    │
//!                      │                               └────────────┘    │
//!                      └────────────────────────────────────────────────┘
//! ```

use std::process::ExitCode;

use clap::{CommandFactory, Parser};

use mock_ms::config::{Cli, ConfigError};
use mock_ms::lifecycle::{signals, Shutdown};
use mock_ms::net::{self, Scheme};
use mock_ms::observability::{logging, spans};
use mock_ms::MockServer;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("mock-ms v{} starting", env!("CARGO_PKG_VERSION"));

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(ConfigError::NoMode) => {
            eprintln!("{}", Cli::command().render_help());
            return Err(ConfigError::NoMode.into());
        }
        Err(e) => return Err(e.into()),
    };

    tracing::debug!(config = %serde_json::to_string(&config)?, "Configuration resolved");
    spans::announce(config.otel_endpoint.as_deref(), &config.service_name);

    if !config.is_websocket() {
        if config.no_keep_alive {
            tracing::info!("Keep-alives disabled");
        } else {
            tracing::debug!("Keep-alives enabled (default)");
        }
    }

    let listener = net::listener::bind(config.port)?;
    let scheme = Scheme::new(config.is_tls(), config.is_websocket());
    net::interfaces::print_listen_info(scheme, config.port)?;

    let shutdown = Shutdown::new();
    tokio::spawn(signals::shutdown_on_signal(shutdown.clone()));

    let server = MockServer::new(config, shutdown);
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
