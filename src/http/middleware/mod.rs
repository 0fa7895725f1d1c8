//! Request decorators.
//!
//! # Order (outermost first)
//! ```text
//! dump request → delay → header injection → rps accounting → handler
//! ```
//!
//! Only the decorators the configuration enables are layered in; header
//! injection is always present because it applies the default
//! `Content-Type`. The WebSocket route is never decorated.

pub mod delay;
pub mod dump;
pub mod headers;
pub mod rps;

use std::sync::Arc;
use std::time::Duration;

use axum::{middleware, Router};

use crate::config::ServerConfig;
use crate::observability::RequestCounter;

pub use headers::ResponseHeaders;

/// A cross-cutting behaviour wrapped around every non-WebSocket handler.
#[derive(Debug, Clone)]
pub enum Decorator {
    DumpRequest,
    Delay(Duration),
    Headers(Arc<ResponseHeaders>),
    CountRequests(Arc<RequestCounter>),
}

impl Decorator {
    /// Wrap `router` so this decorator runs before whatever it already has.
    pub fn wrap(self, router: Router) -> Router {
        match self {
            Decorator::DumpRequest => router.layer(middleware::from_fn(dump::dump_request)),
            Decorator::Delay(duration) => {
                router.layer(middleware::from_fn_with_state(duration, delay::delay_reply))
            }
            Decorator::Headers(set) => {
                router.layer(middleware::from_fn_with_state(set, headers::add_headers))
            }
            Decorator::CountRequests(counter) => {
                router.layer(middleware::from_fn_with_state(counter, rps::count_requests))
            }
        }
    }
}

/// The decorators enabled by `config`, outermost first.
pub fn stack(config: &ServerConfig, counter: &Arc<RequestCounter>) -> Vec<Decorator> {
    let mut decorators = Vec::new();
    if config.dump_request {
        decorators.push(Decorator::DumpRequest);
    }
    if !config.delay.is_zero() {
        decorators.push(Decorator::Delay(config.delay));
    }
    decorators.push(Decorator::Headers(Arc::new(ResponseHeaders::from_config(config))));
    if config.print_rps {
        decorators.push(Decorator::CountRequests(counter.clone()));
    }
    decorators
}

/// Apply `decorators` so the first one is the outermost layer.
pub fn decorate(router: Router, decorators: Vec<Decorator>) -> Router {
    decorators
        .into_iter()
        .rev()
        .fold(router, |router, decorator| decorator.wrap(router))
}
