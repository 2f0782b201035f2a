use super::BoxError;
use super::types::{Error, Kind};

/// Creates an `Error` for a failed hostname lookup.
pub fn address_resolution<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::AddressResolution).with(e.into())
}

/// Creates an `Error` for a race that had nothing to race.
pub fn no_viable_address() -> Error {
    Error::new(Kind::NoViableAddress).with(super::helpers::NoAddresses)
}

/// Creates an `Error` wrapping the representative racer failure.
pub fn socket_connect<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::SocketConnect { proxied: false }).with(e.into())
}

/// Creates an `Error` for a certificate that does not cover `hostname`.
pub fn hostname_unverified(hostname: &str) -> Error {
    Error::new(Kind::HostnameUnverified).with(super::helpers::HostnameMismatch {
        hostname: hostname.to_owned(),
    })
}

/// Creates an `Error` for a failed proxy tunnel negotiation.
pub fn proxy_handshake<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::ProxyHandshake).with(e.into())
}

/// Creates an `Error` for a TLS session that could not be layered on the socket.
pub fn socket_overlay<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::SocketOverlay).with(e.into())
}

/// Creates an `Error` for a failed explicit TLS handshake.
pub fn ssl_handshake<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::SslHandshake).with(e.into())
}
