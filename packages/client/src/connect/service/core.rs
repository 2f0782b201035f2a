//! Core connector service structure
//!
//! `ConnectorService` owns every collaborator of one configured connector
//! and runs the connection sequence: resolve, race, verify, tunnel,
//! overlay, verify again. Each step lives in its own module.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::config::ConnectConfig;
use crate::connect::proxy::ProxySettings;
use crate::connect::tcp::SocketFactory;
use crate::connect::types::{Endpoint, MaybeTlsStream, Transport, close_silently};
use crate::dns::Resolve;
use crate::error::{self, Result};
use crate::tls::{TlsConfig, VerifyHostname};

/// Connection sequencer state
pub struct ConnectorService<F: SocketFactory> {
    pub(super) factory: Arc<F>,
    pub(super) resolver: Arc<dyn Resolve>,
    pub(super) config: ConnectConfig,
    pub(super) proxy: Option<ProxySettings>,
    pub(super) tls: Option<TlsConfig>,
    pub(super) hostname_verifier: Arc<dyn VerifyHostname>,
}

impl<F: SocketFactory> ConnectorService<F> {
    pub fn new(
        factory: Arc<F>,
        resolver: Arc<dyn Resolve>,
        config: ConnectConfig,
        proxy: Option<ProxySettings>,
        tls: Option<TlsConfig>,
        hostname_verifier: Arc<dyn VerifyHostname>,
    ) -> Self {
        Self {
            factory,
            resolver,
            config,
            proxy,
            tls,
            hostname_verifier,
        }
    }

    #[must_use]
    pub fn config(&self) -> &ConnectConfig {
        &self.config
    }

    #[must_use]
    pub fn proxy(&self) -> Option<&ProxySettings> {
        self.proxy.as_ref()
    }

    /// Establish a fully layered connection to `target`.
    ///
    /// With a proxy configured the proxy endpoint is resolved and raced and
    /// `target` is only reached through the tunnel. Any socket opened along
    /// the way is closed before an error is returned.
    ///
    /// # Errors
    ///
    /// Exactly one of the `Kind` variants, describing the step that failed.
    pub async fn connect(&self, target: &Endpoint) -> Result<MaybeTlsStream<F::Stream>> {
        let dial = self.proxy.as_ref().map_or(target, |proxy| &proxy.endpoint);
        debug!(%target, via = ?self.proxy.as_ref().map(|p| &p.endpoint), "connecting");

        let mut stream = self.dial(dial).await?;

        if let Err(e) = self.verify_session(&stream, dial.host()) {
            close_silently(stream).await;
            return Err(e.with_target(dial.authority()));
        }

        if let Some(proxy) = &self.proxy {
            if let Err(e) = self.tunnel(proxy, &mut stream).await {
                close_silently(stream).await;
                return Err(e);
            }
        }

        let Some(tls) = &self.tls else {
            trace!(%target, "no TLS overlay configured");
            return Ok(MaybeTlsStream::Plain(stream));
        };
        let hostname = self
            .proxy
            .as_ref()
            .map_or(target.host(), |proxy| proxy.handshaker.proxied_hostname());
        self.overlay(tls, stream, target, hostname).await
    }

    /// Check a TLS session, if the stream carries one, against `hostname`.
    pub(super) fn verify_session<T: Transport>(&self, stream: &T, hostname: &str) -> Result<()> {
        if !self.config.verify_hostname {
            return Ok(());
        }
        let Some(session) = stream.tls_session() else {
            return Ok(());
        };
        if self.hostname_verifier.verify(hostname, session) {
            trace!(hostname, "peer certificate verified");
            Ok(())
        } else {
            debug!(hostname, "peer certificate does not match");
            Err(error::hostname_unverified(hostname))
        }
    }
}

impl<F: SocketFactory> fmt::Debug for ConnectorService<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectorService")
            .field("config", &self.config)
            .field("proxy", &self.proxy)
            .field("tls", &self.tls)
            .finish_non_exhaustive()
    }
}
