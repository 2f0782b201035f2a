//! Connection target

use std::fmt;
use std::net::SocketAddr;

/// Host name and port of a server, optionally with a pre-resolved address.
///
/// When `address` is present the connector skips DNS and races that single
/// address; `host` is still used for SNI and hostname verification.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Endpoint {
    host: String,
    port: u16,
    address: Option<SocketAddr>,
}

impl Endpoint {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            address: None,
        }
    }

    /// Pin the endpoint to an already resolved address.
    #[must_use]
    pub fn with_address(mut self, address: SocketAddr) -> Self {
        self.address = Some(address);
        self
    }

    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    #[must_use]
    pub fn address(&self) -> Option<SocketAddr> {
        self.address
    }

    /// `host:port`, bracketing IPv6 literals.
    #[must_use]
    pub fn authority(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') && !self.host.starts_with('[') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authority_brackets_ipv6() {
        assert_eq!(Endpoint::new("::1", 443).authority(), "[::1]:443");
        assert_eq!(Endpoint::new("[::1]", 443).authority(), "[::1]:443");
        assert_eq!(Endpoint::new("example.org", 80).authority(), "example.org:80");
    }
}
