//! TLS overlay step
//!
//! Layers a TLS session bound to the real target on top of the raced (and
//! possibly tunnelled) socket, runs the handshake explicitly and checks the
//! certificate against the target's hostname.

use tracing::debug;

use super::core::ConnectorService;
use crate::connect::tcp::SocketFactory;
use crate::connect::types::{Endpoint, MaybeTlsStream, close_silently};
use crate::error::{self, Result};
use crate::tls::{Overlay, TlsConfig};

impl<F: SocketFactory> ConnectorService<F> {
    pub(super) async fn overlay(
        &self,
        tls: &TlsConfig,
        stream: F::Stream,
        target: &Endpoint,
        hostname: &str,
    ) -> Result<MaybeTlsStream<F::Stream>> {
        let server_name = self.config.sni_name(target.host());
        let overlay = match Overlay::new(tls, server_name) {
            Ok(overlay) => overlay,
            Err(e) => {
                close_silently(stream).await;
                return Err(error::socket_overlay(e).with_target(target.authority()));
            }
        };

        let stream = match overlay.handshake(stream).await {
            Ok(stream) => MaybeTlsStream::Tls(Box::new(stream)),
            Err((e, raw)) => {
                debug!(%target, "TLS handshake failed: {e}");
                close_silently(raw).await;
                return Err(error::ssl_handshake(e).with_target(target.authority()));
            }
        };

        if let Err(e) = self.verify_session(&stream, hostname) {
            close_silently(stream).await;
            return Err(e.with_target(target.authority()));
        }

        debug!(%target, server_name, "TLS established");
        Ok(stream)
    }
}
