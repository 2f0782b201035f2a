use std::error::Error as StdError;
use std::io;

use super::types::{Error, Kind};

impl Error {
    /// Returns true if hostname lookup failed.
    #[must_use]
    pub fn is_address_resolution(&self) -> bool {
        matches!(self.inner.kind, Kind::AddressResolution)
    }

    /// Returns true if dual-stack filtering left nothing to race.
    #[must_use]
    pub fn is_no_viable_address(&self) -> bool {
        matches!(self.inner.kind, Kind::NoViableAddress)
    }

    /// Returns true if every connection attempt failed.
    #[must_use]
    pub fn is_connect(&self) -> bool {
        matches!(self.inner.kind, Kind::SocketConnect { .. })
    }

    /// Returns true if the failed connection was aimed at a proxy.
    #[must_use]
    pub fn is_proxied(&self) -> bool {
        matches!(self.inner.kind, Kind::SocketConnect { proxied: true })
    }

    /// Returns true if the proxy tunnel could not be negotiated.
    #[must_use]
    pub fn is_proxy(&self) -> bool {
        matches!(self.inner.kind, Kind::ProxyHandshake)
    }

    /// Returns true if the error came from the TLS layer.
    #[must_use]
    pub fn is_tls(&self) -> bool {
        matches!(
            self.inner.kind,
            Kind::SocketOverlay | Kind::SslHandshake | Kind::HostnameUnverified
        )
    }

    /// Returns true if the peer certificate did not match the hostname.
    #[must_use]
    pub fn is_hostname_unverified(&self) -> bool {
        matches!(self.inner.kind, Kind::HostnameUnverified)
    }

    /// Returns true if the error is related to a timeout.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        let mut source = self.source();

        while let Some(err) = source {
            if let Some(io) = err.downcast_ref::<io::Error>()
                && io.kind() == io::ErrorKind::TimedOut
            {
                return true;
            }
            source = err.source();
        }

        false
    }
}
