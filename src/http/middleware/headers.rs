//! Response header injection.
//!
//! Configured pairs never replace a header the handler set itself, and a
//! later pair with the same name replaces an earlier one. `Content-Type`
//! falls back to the configured default when nothing else provided it.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};

use crate::config::{HeaderPair, ServerConfig};

#[derive(Debug, Clone)]
pub struct ResponseHeaders {
    pairs: Vec<HeaderPair>,
    content_type: HeaderValue,
}

impl ResponseHeaders {
    pub fn new(pairs: Vec<HeaderPair>, content_type: HeaderValue) -> Self {
        Self { pairs, content_type }
    }

    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(config.header_pairs.clone(), config.content_type_header.clone())
    }

    pub fn apply(&self, headers: &mut HeaderMap) {
        let preset: Vec<HeaderName> = headers.keys().cloned().collect();
        for pair in &self.pairs {
            if !preset.contains(&pair.name) {
                headers.insert(pair.name.clone(), pair.value.clone());
            }
        }
        if !headers.contains_key(CONTENT_TYPE) {
            headers.insert(CONTENT_TYPE, self.content_type.clone());
        }
    }
}

pub async fn add_headers(
    State(set): State<Arc<ResponseHeaders>>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;
    set.apply(response.headers_mut());
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::validation::parse_headers;

    fn set(raw: &str) -> ResponseHeaders {
        ResponseHeaders::new(parse_headers(raw).unwrap(), HeaderValue::from_static("text/plain"))
    }

    #[test]
    fn default_content_type_applied() {
        let mut headers = HeaderMap::new();
        set("X-A: 1").apply(&mut headers);
        assert_eq!(headers["x-a"], "1");
        assert_eq!(headers[CONTENT_TYPE], "text/plain");
    }

    #[test]
    fn configured_content_type_wins_over_default() {
        let mut headers = HeaderMap::new();
        set("content-TYPE: application/json").apply(&mut headers);
        assert_eq!(headers[CONTENT_TYPE], "application/json");
        assert_eq!(headers.get_all(CONTENT_TYPE).iter().count(), 1);
    }

    #[test]
    fn handler_headers_are_kept() {
        let mut headers = HeaderMap::new();
        headers.insert("x-xss-protection", HeaderValue::from_static("1; mode=block"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/plain; charset=utf-8"));
        set("X-XSS-Protection: 0, Content-Type: text/html").apply(&mut headers);
        assert_eq!(headers["x-xss-protection"], "1; mode=block");
        assert_eq!(headers[CONTENT_TYPE], "text/plain; charset=utf-8");
    }

    #[test]
    fn last_duplicate_wins() {
        let mut headers = HeaderMap::new();
        set("X-A: 1, X-A: 2").apply(&mut headers);
        assert_eq!(headers["x-a"], "2");
        assert_eq!(headers.get_all("x-a").iter().count(), 1);
    }
}
