//! Startup banner.
//!
//! One `Listening on <scheme>://<ip>:<port>` line per local IPv4
//! interface address, loopback included.

use std::fmt;
use std::net::{Ipv4Addr, SocketAddrV4};

/// URL scheme advertised in the banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Http,
    Https,
    Ws,
    Wss,
}

impl Scheme {
    pub fn new(tls: bool, websocket: bool) -> Self {
        match (tls, websocket) {
            (false, false) => Scheme::Http,
            (true, false) => Scheme::Https,
            (false, true) => Scheme::Ws,
            (true, true) => Scheme::Wss,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
            Scheme::Ws => "ws",
            Scheme::Wss => "wss",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// All local IPv4 interface addresses.
pub fn local_ipv4_addrs() -> Result<Vec<Ipv4Addr>, nix::Error> {
    let addrs = nix::ifaddrs::getifaddrs()?
        .filter_map(|ifaddr| {
            ifaddr
                .address
                .and_then(|storage| storage.as_sockaddr_in().copied())
                .map(|sin| *SocketAddrV4::from(sin).ip())
        })
        .collect();
    Ok(addrs)
}

pub fn listen_url(scheme: Scheme, ip: Ipv4Addr, port: u16) -> String {
    format!("{}://{}:{}", scheme, ip, port)
}

/// Log the banner for every local IPv4 address.
pub fn print_listen_info(scheme: Scheme, port: u16) -> Result<(), nix::Error> {
    for ip in local_ipv4_addrs()? {
        tracing::info!("Listening on {}", listen_url(scheme, ip, port));
    }
    Ok(())
}
