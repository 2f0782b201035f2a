//! Socket creation seam used by every racer
//!
//! A factory hands out one unconnected socket per candidate address and
//! later drives the connect on it. Keeping both halves behind a trait lets
//! callers swap in TLS-aware sockets or test doubles without touching the
//! race itself.

use std::io;
use std::net::SocketAddr;
use std::time::Duration;

use futures::future::BoxFuture;
use socket2::{Domain, Protocol, Socket, Type};
use tokio::net::{TcpSocket, TcpStream};
use tracing::trace;

use super::socket_config::{configure_tcp_socket, configure_tcp_stream};
use crate::connect::types::Transport;

/// Produces and connects racer sockets.
pub trait SocketFactory: Send + Sync + 'static {
    /// Socket before it is connected
    type Socket: Send + 'static;
    /// Socket after a successful connect
    type Stream: Transport;

    /// Create an unconnected socket suitable for `addr`'s family.
    fn create(&self, addr: &SocketAddr) -> io::Result<Self::Socket>;

    /// Best-effort SNI hint. Factories that do not speak TLS ignore it.
    fn apply_server_names(&self, _socket: &mut Self::Socket, _server_names: &[String]) {}

    /// Connect `socket` to `addr`.
    ///
    /// Dropping the returned future must abandon the attempt and release
    /// the socket; the race relies on that to cancel losers.
    fn connect(
        &self,
        socket: Self::Socket,
        addr: SocketAddr,
    ) -> BoxFuture<'static, io::Result<Self::Stream>>;
}

/// Plain TCP sockets built with `socket2`.
#[derive(Debug, Clone, Copy)]
pub struct TcpSocketFactory {
    nodelay: bool,
    keepalive: Option<Duration>,
}

impl Default for TcpSocketFactory {
    fn default() -> Self {
        Self {
            nodelay: true,
            keepalive: None,
        }
    }
}

impl TcpSocketFactory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle TCP_NODELAY on connected streams
    #[must_use]
    pub fn with_nodelay(mut self, nodelay: bool) -> Self {
        self.nodelay = nodelay;
        self
    }

    /// Enable TCP keep-alive with the given idle time
    #[must_use]
    pub fn with_keepalive(mut self, idle: Duration) -> Self {
        self.keepalive = Some(idle);
        self
    }
}

impl SocketFactory for TcpSocketFactory {
    type Socket = TcpSocket;
    type Stream = TcpStream;

    fn create(&self, addr: &SocketAddr) -> io::Result<TcpSocket> {
        let socket = Socket::new(Domain::for_address(*addr), Type::STREAM, Some(Protocol::TCP))?;
        configure_tcp_socket(&socket, self.keepalive)?;
        let std_stream: std::net::TcpStream = socket.into();
        Ok(TcpSocket::from_std_stream(std_stream))
    }

    fn connect(
        &self,
        socket: TcpSocket,
        addr: SocketAddr,
    ) -> BoxFuture<'static, io::Result<TcpStream>> {
        let nodelay = self.nodelay;
        Box::pin(async move {
            let stream = socket.connect(addr).await?;
            configure_tcp_stream(&stream, nodelay)?;
            trace!(%addr, "tcp connected");
            Ok(stream)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn connects_to_loopback_listener() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let factory = TcpSocketFactory::new().with_keepalive(Duration::from_secs(60));

        let socket = factory.create(&addr).unwrap();
        let (stream, accepted) = tokio::join!(factory.connect(socket, addr), listener.accept());

        let stream = stream.unwrap();
        assert!(accepted.is_ok());
        assert_eq!(stream.peer_addr().unwrap(), addr);
        assert!(stream.nodelay().unwrap());
    }

    #[tokio::test]
    async fn refused_port_reports_io_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let factory = TcpSocketFactory::new();
        let socket = factory.create(&addr).unwrap();
        assert!(factory.connect(socket, addr).await.is_err());
    }
}
