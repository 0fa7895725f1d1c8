//! Request dump.
//!
//! Logs the request line, headers and body, then hands the request on
//! with the buffered body. A body that cannot be read is logged and
//! replaced by an empty one; the request is never rejected here.

use axum::{
    body::{Body, Bytes},
    extract::Request,
    http::request::Parts,
    middleware::Next,
    response::Response,
};

pub async fn dump_request(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let body = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(error = %e, "Error dumping request");
            Bytes::new()
        }
    };

    tracing::info!("{}", render(&parts, &body));
    next.run(Request::from_parts(parts, Body::from(body))).await
}

/// Wire-like rendering of a request.
pub fn render(parts: &Parts, body: &[u8]) -> String {
    let target = parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");

    let mut out = format!("{} {} {:?}\r\n", parts.method, target, parts.version);
    for (name, value) in &parts.headers {
        out.push_str(name.as_str());
        out.push_str(": ");
        out.push_str(&String::from_utf8_lossy(value.as_bytes()));
        out.push_str("\r\n");
    }
    out.push_str("\r\n");
    out.push_str(&String::from_utf8_lossy(body));
    out
}
