//! TLS session overlay on an already connected socket

use std::io;

use rustls::pki_types::ServerName;
use tokio_rustls::TlsConnector;
use tokio_rustls::client::TlsStream;
use tracing::trace;

use super::config::TlsConfig;
use super::errors::TlsError;
use crate::connect::types::Transport;

/// A TLS client session bound to one server name, not yet started.
///
/// Creating the overlay and running the handshake are separate steps so the
/// caller can tell a bad server name from a failed negotiation.
pub struct Overlay {
    connector: TlsConnector,
    server_name: ServerName<'static>,
}

impl Overlay {
    /// # Errors
    ///
    /// `InvalidServerName` if `server_name` is neither a DNS name nor an IP literal.
    pub fn new(tls: &TlsConfig, server_name: &str) -> Result<Self, TlsError> {
        let name = server_name.trim_start_matches('[').trim_end_matches(']');
        let server_name = ServerName::try_from(name.to_owned())
            .map_err(|e| TlsError::InvalidServerName(format!("{server_name}: {e}")))?;
        Ok(Self {
            connector: tls.connector(),
            server_name,
        })
    }

    /// Run the handshake to completion.
    ///
    /// On failure the raw stream comes back with the error so the caller can
    /// close it.
    pub async fn handshake<S: Transport>(self, stream: S) -> Result<TlsStream<S>, (io::Error, S)> {
        trace!(server_name = ?self.server_name, "starting TLS handshake");
        self.connector
            .connect(self.server_name, stream)
            .into_fallible()
            .await
    }
}
