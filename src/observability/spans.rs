//! Request spans.
//!
//! Every request runs inside an `http_request` span tagged with the
//! configured service name. Spans are consumed by the log subscriber;
//! there is no OTLP exporter in this binary.

use axum::{body::Body, http::Request};
use tower_http::{
    classify::{ServerErrorsAsFailures, SharedClassifier},
    trace::TraceLayer,
};
use tracing::Span;

/// Build the trace layer for the given service name.
pub fn trace_layer(
    service_name: String,
) -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>, impl Fn(&Request<Body>) -> Span + Clone> {
    TraceLayer::new_for_http().make_span_with(move |request: &Request<Body>| {
        tracing::info_span!(
            "http_request",
            service = %service_name,
            method = %request.method(),
            uri = %request.uri(),
        )
    })
}

/// Note the collector endpoint at startup.
pub fn announce(endpoint: Option<&str>, service_name: &str) {
    if let Some(endpoint) = endpoint {
        tracing::info!(
            endpoint = %endpoint,
            service = %service_name,
            "Tracing endpoint configured; request spans are written to the log"
        );
    }
}
