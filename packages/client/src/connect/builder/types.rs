//! Core `ConnectorBuilder` struct and configuration methods

use std::sync::Arc;

use crate::config::ConnectConfig;
use crate::connect::proxy::ProxySettings;
use crate::connect::tcp::{SocketFactory, TcpSocketFactory};
use crate::dns::Resolve;
use crate::tls::{TlsConfig, VerifyHostname};

/// Builder for connectors
///
/// Starts from a `TcpSocketFactory`, the system resolver, the default
/// hostname verifier and no TLS or proxy.
pub struct ConnectorBuilder<F: SocketFactory = TcpSocketFactory> {
    pub(super) factory: F,
    pub(super) resolver: Option<Arc<dyn Resolve>>,
    pub(super) config: ConnectConfig,
    pub(super) proxy: Option<ProxySettings>,
    pub(super) tls: Option<TlsConfig>,
    pub(super) hostname_verifier: Option<Arc<dyn VerifyHostname>>,
}

impl ConnectorBuilder<TcpSocketFactory> {
    /// Create a new connector builder with default settings
    #[must_use]
    pub fn new() -> Self {
        Self {
            factory: TcpSocketFactory::default(),
            resolver: None,
            config: ConnectConfig::default(),
            proxy: None,
            tls: None,
            hostname_verifier: None,
        }
    }
}

impl Default for ConnectorBuilder<TcpSocketFactory> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: SocketFactory> ConnectorBuilder<F> {
    /// Replace the socket factory used by every racer
    #[must_use]
    pub fn factory<G: SocketFactory>(self, factory: G) -> ConnectorBuilder<G> {
        ConnectorBuilder {
            factory,
            resolver: self.resolver,
            config: self.config,
            proxy: self.proxy,
            tls: self.tls,
            hostname_verifier: self.hostname_verifier,
        }
    }

    /// Use a custom hostname resolver
    #[must_use]
    pub fn resolver(mut self, resolver: impl Resolve) -> Self {
        self.resolver = Some(Arc::new(resolver));
        self
    }

    /// Use a shared hostname resolver
    #[must_use]
    pub fn shared_resolver(mut self, resolver: Arc<dyn Resolve>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Replace the whole connection configuration
    #[must_use]
    pub fn config(mut self, config: ConnectConfig) -> Self {
        self.config = config;
        self
    }

    /// Route connections through a proxy
    #[must_use]
    pub fn proxy(mut self, proxy: ProxySettings) -> Self {
        self.proxy = Some(proxy);
        self
    }

    /// Overlay TLS on every connection
    #[must_use]
    pub fn tls(mut self, tls: TlsConfig) -> Self {
        self.tls = Some(tls);
        self
    }

    /// Replace the certificate hostname check
    #[must_use]
    pub fn hostname_verifier(mut self, verifier: impl VerifyHostname) -> Self {
        self.hostname_verifier = Some(Arc::new(verifier));
        self
    }
}
