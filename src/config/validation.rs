//! Configuration validation.
//!
//! # Responsibilities
//! - Enforce the cert/key pairing
//! - Parse the delay duration and the header list
//! - Check the fixed status code range
//! - Pick the single response mode by precedence
//!
//! # Design Decisions
//! - Every check is a pure function of raw option values
//! - Runs before any listener is bound; the first failure is fatal

use std::path::{Path, PathBuf};
use std::time::Duration;

use axum::http::{HeaderName, HeaderValue, StatusCode};
use thiserror::Error;

use crate::config::schema::{HeaderPair, ResponseMode, TlsConfig};

/// Error type for configuration resolution.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("either cert and key should both be given or neither")]
    TlsPairing,

    #[error("invalid delay {input:?}: {source}")]
    Delay {
        input: String,
        #[source]
        source: humantime::DurationError,
    },

    #[error("invalid port {0:?}")]
    Port(String),

    #[error("header {0:?} is not of the form Name:Value")]
    HeaderFormat(String),

    #[error("invalid header name {0:?}")]
    HeaderName(String),

    #[error("invalid value for header {0:?}")]
    HeaderValue(String),

    #[error("HttpCode {0} is outside 100..=599")]
    StatusCode(i64),

    #[error("no response mode selected: give --file, --time, --SHA, --HttpCode, --uploadFile or --websocket")]
    NoMode,
}

/// Mode switches as given on the command line.
#[derive(Debug, Clone, Default)]
pub struct ModeSwitches {
    pub websocket: bool,
    pub flood: bool,
    pub time: bool,
    pub sha: bool,
    pub http_code: Option<StatusCode>,
    pub upload: bool,
    pub file: PathBuf,
}

/// Cert and key must be both set or both empty.
pub fn validate_tls(cert: &str, key: &str) -> Result<Option<TlsConfig>, ConfigError> {
    match (cert.is_empty(), key.is_empty()) {
        (true, true) => Ok(None),
        (false, false) => Ok(Some(TlsConfig {
            cert_path: PathBuf::from(cert),
            key_path: PathBuf::from(key),
        })),
        _ => Err(ConfigError::TlsPairing),
    }
}

pub fn parse_port(port: &str) -> Result<u16, ConfigError> {
    port.trim()
        .parse()
        .map_err(|_| ConfigError::Port(port.to_string()))
}

pub fn parse_delay(input: &str) -> Result<Duration, ConfigError> {
    humantime::parse_duration(input.trim()).map_err(|source| ConfigError::Delay {
        input: input.to_string(),
        source,
    })
}

/// Parse a comma separated `Name:Value` list.
///
/// Each pair is split on its first colon, so values may contain colons
/// (`Authorization: Bearer a:b`). Names and values are trimmed. Blank
/// segments are skipped; any other segment without a colon is rejected.
pub fn parse_headers(raw: &str) -> Result<Vec<HeaderPair>, ConfigError> {
    let mut pairs = Vec::new();
    for segment in raw.split(',') {
        if segment.trim().is_empty() {
            continue;
        }
        let (name, value) = segment
            .split_once(':')
            .ok_or_else(|| ConfigError::HeaderFormat(segment.to_string()))?;
        let (name, value) = (name.trim(), value.trim());

        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| ConfigError::HeaderName(name.to_string()))?;
        let value = HeaderValue::from_str(value)
            .map_err(|_| ConfigError::HeaderValue(name.to_string()))?;
        pairs.push(HeaderPair { name, value });
    }
    Ok(pairs)
}

pub fn parse_content_type(content_type: &str) -> Result<HeaderValue, ConfigError> {
    HeaderValue::from_str(content_type.trim())
        .map_err(|_| ConfigError::HeaderValue("content-type".to_string()))
}

/// 0 disables fixed-status mode.
pub fn validate_status(code: i64) -> Result<Option<StatusCode>, ConfigError> {
    if code == 0 {
        return Ok(None);
    }
    if !(100..=599).contains(&code) {
        return Err(ConfigError::StatusCode(code));
    }
    StatusCode::from_u16(code as u16)
        .map(Some)
        .map_err(|_| ConfigError::StatusCode(code))
}

/// Select the single active mode.
///
/// Flood implies WebSocket. Precedence: WebSocket > Time > Sha >
/// FixedStatus > Upload > File.
pub fn select_mode(switches: &ModeSwitches) -> Result<ResponseMode, ConfigError> {
    if switches.websocket || switches.flood {
        return Ok(ResponseMode::WebSocket {
            flood: switches.flood,
        });
    }
    if switches.time {
        return Ok(ResponseMode::Time);
    }
    if switches.sha {
        return Ok(ResponseMode::Sha);
    }
    if let Some(status) = switches.http_code {
        return Ok(ResponseMode::FixedStatus { status });
    }
    if switches.upload {
        return Ok(ResponseMode::Upload);
    }
    if !is_blank(&switches.file) {
        return Ok(ResponseMode::File {
            path: switches.file.clone(),
        });
    }
    Err(ConfigError::NoMode)
}

fn is_blank(path: &Path) -> bool {
    path.as_os_str().is_empty()
}
