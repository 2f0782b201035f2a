//! Proxy tunnel negotiation seam

use std::fmt;
use std::io;
use std::sync::Arc;

use futures::future::BoxFuture;
use tokio::io::{AsyncRead, AsyncWrite};

use crate::connect::types::Endpoint;

/// Any stream a proxy handshake can talk over.
pub trait ProxyStream: AsyncRead + AsyncWrite + Unpin + Send {}

impl<T: AsyncRead + AsyncWrite + Unpin + Send + ?Sized> ProxyStream for T {}

/// Negotiates a tunnel to the real target over a socket connected to a proxy.
///
/// `perform` returns once the proxy has agreed to relay bytes; after that the
/// stream carries the target's traffic.
pub trait ProxyHandshake: Send + Sync + 'static {
    fn perform<'a>(&'a self, stream: &'a mut dyn ProxyStream) -> BoxFuture<'a, io::Result<()>>;

    /// Host name of the target behind the proxy, used for TLS verification.
    fn proxied_hostname(&self) -> &str;
}

/// Where the proxy lives and how to talk to it.
///
/// `server_names` are handed to the sockets racing towards the proxy, so a
/// TLS-aware factory presents them as SNI. They never reach the target; the
/// target's override lives on `ConnectConfig`.
#[derive(Clone)]
pub struct ProxySettings {
    pub endpoint: Endpoint,
    pub handshaker: Arc<dyn ProxyHandshake>,
    pub server_names: Vec<String>,
}

impl ProxySettings {
    pub fn new(endpoint: Endpoint, handshaker: impl ProxyHandshake) -> Self {
        Self {
            endpoint,
            handshaker: Arc::new(handshaker),
            server_names: Vec::new(),
        }
    }

    /// SNI override for the proxy connection
    #[must_use]
    pub fn with_server_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.server_names = names.into_iter().map(Into::into).collect();
        self
    }
}

impl fmt::Debug for ProxySettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxySettings")
            .field("endpoint", &self.endpoint)
            .field("proxied_hostname", &self.handshaker.proxied_hostname())
            .field("server_names", &self.server_names)
            .finish()
    }
}
