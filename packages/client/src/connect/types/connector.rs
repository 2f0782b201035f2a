//! Public connector handle

use std::fmt;
use std::sync::Arc;

use super::connection::MaybeTlsStream;
use super::endpoint::Endpoint;
use crate::config::ConnectConfig;
use crate::connect::builder::ConnectorBuilder;
use crate::connect::service::ConnectorService;
use crate::connect::tcp::{SocketFactory, TcpSocketFactory};
use crate::error::Result;

/// A configured connector. Cheap to clone; clones share collaborators.
pub struct Connector<F: SocketFactory = TcpSocketFactory> {
    inner: Arc<ConnectorService<F>>,
}

impl Connector<TcpSocketFactory> {
    pub fn builder() -> ConnectorBuilder<TcpSocketFactory> {
        ConnectorBuilder::new()
    }
}

impl<F: SocketFactory> Connector<F> {
    pub(crate) fn from_service(service: ConnectorService<F>) -> Self {
        Self {
            inner: Arc::new(service),
        }
    }

    /// Resolve, race, tunnel and overlay TLS as configured.
    ///
    /// # Errors
    ///
    /// See [`crate::error::Kind`] for the possible failures.
    pub async fn connect(&self, target: &Endpoint) -> Result<MaybeTlsStream<F::Stream>> {
        self.inner.connect(target).await
    }

    #[must_use]
    pub fn config(&self) -> &ConnectConfig {
        self.inner.config()
    }
}

impl<F: SocketFactory> Clone for Connector<F> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<F: SocketFactory> fmt::Debug for Connector<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Connector").field(&self.inner).finish()
    }
}
