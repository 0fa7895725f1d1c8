//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router for the single configured mode
//! - Wire up the decorator stack (skipped for WebSocket)
//! - Configure HTTP/1 keep-alive and header case
//! - Serve plain HTTP or TLS on a pre-bound listener
//! - Drain in-flight requests on shutdown

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, Request},
    routing::{any, MethodRouter},
    Router,
};
use axum_server::Handle;
use thiserror::Error;

use crate::config::{ResponseMode, ServerConfig};
use crate::http::handlers::{file, sha, status, time, upload};
use crate::http::{middleware, websocket};
use crate::lifecycle::{shutdown::DRAIN_TIMEOUT, Shutdown};
use crate::net::tls::{load_tls_config, LoggingAcceptor};
use crate::observability::{spans, RequestCounter};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub counter: Arc<RequestCounter>,
    pub shutdown: Shutdown,
}

/// Fatal transport errors.
#[derive(Debug, Error)]
pub enum ServeError {
    #[error("unable to load TLS certificate/key: {0}")]
    Tls(#[source] std::io::Error),

    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

/// HTTP server for the mock.
pub struct MockServer {
    router: Router,
    state: AppState,
}

impl MockServer {
    /// Create a new server with the given configuration.
    pub fn new(config: ServerConfig, shutdown: Shutdown) -> Self {
        let state = AppState {
            config: Arc::new(config),
            counter: Arc::new(RequestCounter::new()),
            shutdown,
        };
        let router = Self::build_router(state.clone());
        Self { router, state }
    }

    /// Build the router: one handler behind `/` and every other path.
    fn build_router(state: AppState) -> Router {
        let config = state.config.clone();
        let handler: MethodRouter<AppState> = match &config.mode {
            ResponseMode::WebSocket { .. } => any(websocket::upgrade),
            ResponseMode::Time => any(time::serve_time),
            ResponseMode::Sha => any(sha::serve_sha),
            ResponseMode::FixedStatus { status } => {
                let status = *status;
                any(move |request: Request| status::serve_status(status, request))
            }
            ResponseMode::Upload => any(upload::accept_upload).layer(DefaultBodyLimit::disable()),
            ResponseMode::File { .. } => any(file::serve_file),
        };

        let router = Router::new()
            .route("/", handler.clone())
            .route("/{*path}", handler)
            .with_state(state.clone());

        let router = if config.is_websocket() {
            router
        } else {
            middleware::decorate(router, middleware::stack(&config, &state.counter))
        };

        router.layer(spans::trace_layer(config.service_name.clone()))
    }

    /// The fully layered router.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Run the server on `listener` until shutdown is triggered.
    pub async fn run(self, listener: std::net::TcpListener) -> Result<(), ServeError> {
        let config = self.state.config.clone();
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            mode = config.mode.name(),
            tls = config.is_tls(),
            "HTTP server starting"
        );

        let handle = Handle::new();
        let mut shutdown = self.state.shutdown.subscribe();
        let drain = handle.clone();
        tokio::spawn(async move {
            let _ = shutdown.recv().await;
            drain.graceful_shutdown(Some(DRAIN_TIMEOUT));
        });

        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();

        match &config.tls {
            Some(tls) => {
                let rustls = load_tls_config(tls).await.map_err(ServeError::Tls)?;
                let mut server =
                    axum_server::from_tcp(listener).acceptor(LoggingAcceptor::new(rustls));
                tune_http(&mut server, &config);
                server.handle(handle).serve(app).await?;
            }
            None => {
                let mut server = axum_server::from_tcp(listener);
                tune_http(&mut server, &config);
                server.handle(handle).serve(app).await?;
            }
        }

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

fn tune_http<A>(server: &mut axum_server::Server<A>, config: &ServerConfig) {
    server
        .http_builder()
        .http1()
        .keep_alive(!config.no_keep_alive)
        .title_case_headers(!config.keep_case);
}
