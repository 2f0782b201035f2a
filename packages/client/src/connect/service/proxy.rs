//! Proxy tunnel step

use tracing::debug;

use super::core::ConnectorService;
use crate::connect::proxy::ProxySettings;
use crate::connect::tcp::SocketFactory;
use crate::error::{self, Result};

impl<F: SocketFactory> ConnectorService<F> {
    /// Negotiate the tunnel. The caller closes `stream` on failure.
    pub(super) async fn tunnel(&self, proxy: &ProxySettings, stream: &mut F::Stream) -> Result<()> {
        proxy.handshaker.perform(stream).await.map_err(|e| {
            debug!(proxy = %proxy.endpoint, "proxy handshake failed: {e}");
            error::proxy_handshake(e).with_target(proxy.endpoint.authority())
        })
    }
}
