//! Artificial reply delay.
//!
//! Sleeps on the timer so only this request's task is suspended.

use std::time::Duration;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

pub async fn delay_reply(State(delay): State<Duration>, request: Request, next: Next) -> Response {
    tracing::debug!(delay = ?delay, "Waiting");
    tokio::time::sleep(delay).await;
    tracing::debug!("Waiting over");
    next.run(request).await
}
