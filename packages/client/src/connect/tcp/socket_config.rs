//! TCP socket configuration utilities
//!
//! Socket options are applied in two places: keep-alive on the raw
//! `socket2` handle before it connects, TCP_NODELAY on the connected stream.

use std::io;
use std::time::Duration;

use socket2::{Socket, TcpKeepalive};
use tokio::net::TcpStream;
use tracing::debug;

/// Configure a socket that has not connected yet.
pub fn configure_tcp_socket(socket: &Socket, keepalive: Option<Duration>) -> io::Result<()> {
    socket.set_nonblocking(true)?;

    if let Some(idle) = keepalive {
        let params = TcpKeepalive::new().with_time(idle);
        if let Err(e) = socket.set_tcp_keepalive(&params) {
            // Not fatal: some platforms reject the idle time but keep the socket usable.
            debug!("failed to enable TCP keep-alive ({idle:?}): {e}");
        }
    }

    Ok(())
}

/// Inline TCP configuration for a freshly connected stream.
#[inline]
pub fn configure_tcp_stream(stream: &TcpStream, nodelay: bool) -> io::Result<()> {
    if nodelay {
        stream.set_nodelay(true)?;
    }
    Ok(())
}
