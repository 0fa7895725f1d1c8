//! Time mode.

use axum::{
    body::Body,
    extract::{Request, State},
    http::{
        header::{CONTENT_LENGTH, X_XSS_PROTECTION},
        HeaderValue,
    },
    response::Response,
};
use chrono::{DateTime, Local, TimeZone};

use crate::http::handlers::peer;
use crate::http::server::AppState;

/// `Jan _2 15:04:05.000000`: month, space padded day, microseconds.
pub const STAMP_MICRO: &str = "%b %e %H:%M:%S%.6f";

pub fn stamp_micro<Tz: TimeZone>(instant: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    instant.format(STAMP_MICRO).to_string()
}

/// The current local time as a microsecond stamp.
pub fn now_stamp() -> String {
    stamp_micro(&Local::now())
}

pub async fn serve_time(State(state): State<AppState>, request: Request) -> Response {
    tracing::debug!("Serving Time to {}", peer(&request));

    let body = format!("{}\n", now_stamp());
    let length = body.len();

    let mut response = Response::new(Body::from(body));
    let headers = response.headers_mut();
    headers.insert(X_XSS_PROTECTION, HeaderValue::from_static("1; mode=block"));
    if state.config.content_length {
        headers.insert(CONTENT_LENGTH, HeaderValue::from(length));
    }
    response
}
