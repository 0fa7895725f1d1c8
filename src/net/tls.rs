//! TLS configuration, certificate loading and the handshake logging acceptor.

use std::io;
use std::path::Path;

use axum_server::accept::Accept;
use axum_server::tls_rustls::{RustlsAcceptor, RustlsConfig};
use futures_util::future::BoxFuture;
use tokio_rustls::rustls::{crypto::aws_lc_rs, ServerConnection};
use tokio_rustls::server::TlsStream;

use crate::config::TlsConfig;

/// Load TLS configuration from certificate and key files.
pub async fn load_tls_config(tls: &TlsConfig) -> Result<RustlsConfig, io::Error> {
    ensure_exists(&tls.cert_path, "Certificate")?;
    ensure_exists(&tls.key_path, "Private key")?;

    // More than one rustls provider may be linked; fix the process default.
    let _ = aws_lc_rs::default_provider().install_default();

    RustlsConfig::from_pem_file(&tls.cert_path, &tls.key_path).await
}

fn ensure_exists(path: &Path, what: &str) -> Result<(), io::Error> {
    if path.exists() {
        return Ok(());
    }
    Err(io::Error::new(
        io::ErrorKind::NotFound,
        format!("{} file not found: {:?}", what, path),
    ))
}

/// Rustls acceptor that logs cipher suite, version and ALPN protocol of
/// every completed handshake.
#[derive(Clone)]
pub struct LoggingAcceptor {
    inner: RustlsAcceptor,
}

impl LoggingAcceptor {
    pub fn new(config: RustlsConfig) -> Self {
        Self {
            inner: RustlsAcceptor::new(config),
        }
    }
}

impl<I, S> Accept<I, S> for LoggingAcceptor
where
    RustlsAcceptor: Accept<I, S, Stream = TlsStream<I>, Service = S>,
    <RustlsAcceptor as Accept<I, S>>::Future: Send + 'static,
    I: Send + 'static,
    S: Send + 'static,
{
    type Stream = TlsStream<I>;
    type Service = S;
    type Future = BoxFuture<'static, io::Result<(TlsStream<I>, S)>>;

    fn accept(&self, stream: I, service: S) -> Self::Future {
        let handshake = self.inner.accept(stream, service);
        Box::pin(async move {
            let (stream, service) = handshake
                .await
                .inspect_err(|e| tracing::debug!(error = %e, "TLS handshake failed"))?;
            let (_, connection) = stream.get_ref();
            log_handshake(&HandshakeInfo::of(connection));
            Ok((stream, service))
        })
    }
}

/// Negotiated parameters of a TLS session, rendered for the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandshakeInfo {
    pub cipher: String,
    pub version: String,
    pub protocol: String,
}

impl HandshakeInfo {
    pub fn of(connection: &ServerConnection) -> Self {
        Self {
            cipher: connection
                .negotiated_cipher_suite()
                .map(|suite| format!("{:?}", suite.suite()))
                .unwrap_or_else(|| "none".to_string()),
            version: connection
                .protocol_version()
                .map(|version| format!("{:?}", version))
                .unwrap_or_else(|| "unknown".to_string()),
            protocol: connection
                .alpn_protocol()
                .map(|p| String::from_utf8_lossy(p).into_owned())
                .unwrap_or_default(),
        }
    }
}

fn log_handshake(info: &HandshakeInfo) {
    tracing::info!("TLS Connection established with cipher: {}", info.cipher);
    tracing::info!("TLS Version: {}", info.version);
    tracing::info!("TLS Protocol: {}", info.protocol);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[tokio::test]
    async fn missing_files_are_reported() {
        let tls = TlsConfig {
            cert_path: PathBuf::from("/nonexistent/cert.pem"),
            key_path: PathBuf::from("/nonexistent/key.pem"),
        };
        let err = load_tls_config(&tls).await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert!(err.to_string().contains("Certificate"));
    }

    #[tokio::test]
    async fn garbage_pem_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let cert = dir.path().join("cert.pem");
        let key = dir.path().join("key.pem");
        std::fs::write(&cert, "not a certificate").unwrap();
        std::fs::write(&key, "not a key").unwrap();

        let tls = TlsConfig { cert_path: cert, key_path: key };
        assert!(load_tls_config(&tls).await.is_err());
    }

    #[tokio::test]
    async fn self_signed_pair_loads() {
        let rcgen::CertifiedKey { cert, signing_key } =
            rcgen::generate_simple_self_signed(vec!["localhost".to_string()]).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let tls = TlsConfig {
            cert_path: dir.path().join("cert.pem"),
            key_path: dir.path().join("key.pem"),
        };
        std::fs::write(&tls.cert_path, cert.pem()).unwrap();
        std::fs::write(&tls.key_path, signing_key.serialize_pem()).unwrap();

        assert!(load_tls_config(&tls).await.is_ok());
    }
}
