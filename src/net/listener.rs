//! TCP listener binding.

use std::net::{Ipv4Addr, SocketAddr, TcpListener};

use thiserror::Error;

/// Error type for listener operations.
#[derive(Debug, Error)]
pub enum ListenerError {
    /// Failed to bind to address.
    #[error("unable to serve on port {port}: {source}")]
    Bind {
        port: u16,
        #[source]
        source: std::io::Error,
    },
}

/// Bind `0.0.0.0:<port>`. Port 0 picks an ephemeral port.
pub fn bind(port: u16) -> Result<TcpListener, ListenerError> {
    bind_addr(SocketAddr::from((Ipv4Addr::UNSPECIFIED, port)))
}

/// Bind an explicit address.
pub fn bind_addr(addr: SocketAddr) -> Result<TcpListener, ListenerError> {
    let to_err = |source| ListenerError::Bind {
        port: addr.port(),
        source,
    };
    let listener = TcpListener::bind(addr).map_err(to_err)?;
    listener.set_nonblocking(true).map_err(to_err)?;

    let local_addr = listener.local_addr().map_err(to_err)?;
    tracing::debug!(address = %local_addr, "Listener bound");
    Ok(listener)
}
