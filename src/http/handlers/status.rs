//! Fixed status mode.

use axum::{body::Body, extract::Request, http::StatusCode, response::Response};

use crate::http::handlers::peer;

/// Reply with `status` and an empty body.
pub async fn serve_status(status: StatusCode, request: Request) -> Response {
    tracing::debug!("Serving http code: {} to {}", status.as_u16(), peer(&request));

    let mut response = Response::new(Body::empty());
    *response.status_mut() = status;
    response
}
