//! Request rate accounting.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::observability::RequestCounter;

/// Count the request once the handler has produced its response.
pub async fn count_requests(
    State(counter): State<Arc<RequestCounter>>,
    request: Request,
    next: Next,
) -> Response {
    let response = next.run(request).await;
    if let Some(rate) = counter.record() {
        tracing::info!(
            rps = rate.requests_per_second,
            window_secs = rate.elapsed_secs,
            "RPS: {}",
            rate.requests_per_second
        );
    }
    response
}
