use std::error::Error as StdError;
use std::fmt;

/// A Result alias where the Err case is `wsdial_client::Error`.
pub type Result<T> = std::result::Result<T, Error>;

/// The single error a failed `connect` call hands back to its caller.
///
/// Every variant is terminal for the call that produced it; nothing in this
/// crate retries on the caller's behalf.
pub struct Error {
    pub inner: Box<Inner>,
}

pub struct Inner {
    pub kind: Kind,
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    /// `host:port` the failing step was talking to.
    pub target: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// Hostname lookup failed or returned nothing usable
    AddressResolution,
    /// Dual-stack filtering left zero candidates
    NoViableAddress,
    /// Every racer failed; `proxied` tells whether the target was a proxy
    SocketConnect { proxied: bool },
    /// Peer certificate does not match the expected hostname
    HostnameUnverified,
    /// Proxy tunnel negotiation failed
    ProxyHandshake,
    /// The connected socket could not be wrapped in a TLS session
    SocketOverlay,
    /// The explicit TLS handshake failed
    SslHandshake,
}

impl Error {
    pub fn new(kind: Kind) -> Error {
        Error {
            inner: Box::new(Inner {
                kind,
                source: None,
                target: None,
            }),
        }
    }

    #[must_use = "Error builder methods return a new Error and should be used"]
    pub fn with<E: Into<Box<dyn StdError + Send + Sync>>>(mut self, source: E) -> Error {
        self.inner.source = Some(source.into());
        self
    }

    #[must_use]
    pub fn with_target(mut self, target: impl Into<String>) -> Error {
        self.inner.target = Some(target.into());
        self
    }

    /// Marks a connect failure as having been aimed at a proxy.
    #[must_use]
    pub(crate) fn proxied(mut self, proxied: bool) -> Error {
        if let Kind::SocketConnect { .. } = self.inner.kind {
            self.inner.kind = Kind::SocketConnect { proxied };
        }
        self
    }

    #[must_use]
    pub fn kind(&self) -> Kind {
        self.inner.kind
    }

    /// `host:port` associated with this error, if any
    #[must_use]
    pub fn target(&self) -> Option<&str> {
        self.inner.target.as_deref()
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut f = f.debug_struct("wsdial_client::Error");

        f.field("kind", &self.inner.kind);

        if let Some(ref source) = self.inner.source {
            f.field("source", source);
        }

        if let Some(ref target) = self.inner.target {
            f.field("target", target);
        }

        f.finish()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let target = self.inner.target.as_deref().unwrap_or("<unknown>");
        match self.inner.kind {
            Kind::AddressResolution => write!(f, "failed to resolve '{target}'")?,
            Kind::NoViableAddress => {
                write!(f, "no viable address to connect to '{target}'")?;
            }
            Kind::SocketConnect { proxied: true } => {
                write!(f, "failed to connect to the proxy '{target}'")?;
            }
            Kind::SocketConnect { proxied: false } => write!(f, "failed to connect to '{target}'")?,
            Kind::HostnameUnverified => {
                write!(f, "the certificate of the peer does not match '{target}'")?;
            }
            Kind::ProxyHandshake => {
                write!(f, "handshake with the proxy server ({target}) failed")?;
            }
            Kind::SocketOverlay => {
                write!(f, "failed to overlay an existing socket for '{target}'")?;
            }
            Kind::SslHandshake => {
                write!(f, "TLS handshake with the endpoint ({target}) failed")?;
            }
        }

        if let Some(ref source) = self.inner.source {
            write!(f, ": {source}")?;
        }
        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.inner
            .source
            .as_ref()
            .map(|err| &**err as &(dyn StdError + 'static))
    }
}
