//! TLS-aware socket factory
//!
//! Wraps another factory and finishes a TLS handshake inside `connect`, so
//! a race over this factory yields sockets that already speak TLS. Used to
//! reach HTTPS proxies.

use std::io;
use std::net::SocketAddr;

use futures::future::BoxFuture;
use tokio_rustls::client::TlsStream;

use super::config::TlsConfig;
use super::overlay::Overlay;
use crate::connect::tcp::SocketFactory;

/// Unconnected socket plus the SNI value it will present.
#[derive(Debug)]
pub struct PendingTlsSocket<S> {
    socket: S,
    server_name: String,
}

/// Socket factory producing TLS streams on top of `F`'s sockets
#[derive(Debug, Clone)]
pub struct TlsSocketFactory<F> {
    inner: F,
    tls: TlsConfig,
    server_name: String,
}

impl<F: SocketFactory> TlsSocketFactory<F> {
    /// `server_name` is used for SNI unless the race supplies an override.
    pub fn new(inner: F, tls: TlsConfig, server_name: impl Into<String>) -> Self {
        Self {
            inner,
            tls,
            server_name: server_name.into(),
        }
    }
}

impl<F: SocketFactory> SocketFactory for TlsSocketFactory<F> {
    type Socket = PendingTlsSocket<F::Socket>;
    type Stream = TlsStream<F::Stream>;

    fn create(&self, addr: &SocketAddr) -> io::Result<Self::Socket> {
        Ok(PendingTlsSocket {
            socket: self.inner.create(addr)?,
            server_name: self.server_name.clone(),
        })
    }

    fn apply_server_names(&self, socket: &mut Self::Socket, server_names: &[String]) {
        self.inner.apply_server_names(&mut socket.socket, server_names);
        if let Some(name) = server_names.first() {
            socket.server_name.clone_from(name);
        }
    }

    fn connect(
        &self,
        socket: Self::Socket,
        addr: SocketAddr,
    ) -> BoxFuture<'static, io::Result<Self::Stream>> {
        let overlay = Overlay::new(&self.tls, &socket.server_name);
        let connecting = self.inner.connect(socket.socket, addr);
        Box::pin(async move {
            let overlay = overlay.map_err(io::Error::other)?;
            let stream = connecting.await?;
            overlay.handshake(stream).await.map_err(|(e, _stream)| e)
        })
    }
}
