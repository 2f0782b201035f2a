//! Resolution and racing
//!
//! Turns an endpoint into a connected socket: resolve the host (unless the
//! endpoint is pinned to an address) and race the results.

use std::io;
use std::net::IpAddr;
use std::sync::Arc;

use tracing::debug;

use super::core::ConnectorService;
use crate::connect::race::{RaceSettings, race};
use crate::connect::tcp::SocketFactory;
use crate::connect::types::Endpoint;
use crate::error::{self, Result};

impl<F: SocketFactory> ConnectorService<F> {
    /// Resolve and race `dial`, tagging failures with whether it is a proxy.
    pub(super) async fn dial(&self, dial: &Endpoint) -> Result<F::Stream> {
        let (addrs, port) = match dial.address() {
            Some(address) => (vec![address.ip()], address.port()),
            None => (self.resolve(dial).await?, dial.port()),
        };

        let mut settings = RaceSettings::from(&self.config);
        if let Some(proxy) = &self.proxy {
            // The configured override names the target, not the proxy.
            settings.server_names.clone_from(&proxy.server_names);
        }
        let stream = race(Arc::clone(&self.factory), &addrs, port, &settings)
            .await
            .map_err(|e| e.proxied(self.proxy.is_some()).with_target(dial.authority()))?;

        debug!(endpoint = %dial, "socket connected");
        Ok(stream)
    }

    async fn resolve(&self, dial: &Endpoint) -> Result<Vec<IpAddr>> {
        let addrs = self
            .resolver
            .resolve(dial.host())
            .await
            .map_err(|e| error::address_resolution(e).with_target(dial.authority()))?;

        if addrs.is_empty() {
            return Err(error::address_resolution(io::Error::new(
                io::ErrorKind::NotFound,
                "resolver returned no addresses",
            ))
            .with_target(dial.authority()));
        }

        debug!(host = dial.host(), addrs = ?addrs, "resolved");
        Ok(addrs)
    }
}
