//! Stream abstractions shared by the racing layer and the sequencer

use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use rustls::CommonState;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt, ReadBuf};
use tokio::net::TcpStream;
use tokio_rustls::client::TlsStream;
use tracing::trace;

/// A connected, bidirectional byte stream.
///
/// `tls_session` lets the sequencer tell whether the socket factory already
/// negotiated TLS so that the certificate can be checked before anything
/// else is layered on top.
pub trait Transport: AsyncRead + AsyncWrite + Unpin + Send + 'static {
    fn tls_session(&self) -> Option<&CommonState> {
        None
    }
}

/// Type-erased transport for callers that pick the socket factory at runtime.
pub type BoxedTransport = Box<dyn Transport>;

impl Transport for TcpStream {}

impl<S: Transport> Transport for TlsStream<S> {
    fn tls_session(&self) -> Option<&CommonState> {
        let session: &CommonState = self.get_ref().1;
        Some(session)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn tls_session(&self) -> Option<&CommonState> {
        (**self).tls_session()
    }
}

/// The fully layered socket returned by the connector.
#[derive(Debug)]
pub enum MaybeTlsStream<S> {
    /// No TLS overlay was configured
    Plain(S),
    /// TLS session overlaid on the raced socket
    Tls(Box<TlsStream<S>>),
}

impl<S> MaybeTlsStream<S> {
    #[must_use]
    pub fn is_tls(&self) -> bool {
        matches!(self, MaybeTlsStream::Tls(_))
    }

    /// The raced socket underneath any TLS session.
    pub fn get_ref(&self) -> &S {
        match self {
            MaybeTlsStream::Plain(s) => s,
            MaybeTlsStream::Tls(s) => s.get_ref().0,
        }
    }
}

impl<S: Transport> Transport for MaybeTlsStream<S> {
    fn tls_session(&self) -> Option<&CommonState> {
        match self {
            MaybeTlsStream::Plain(s) => s.tls_session(),
            MaybeTlsStream::Tls(s) => s.tls_session(),
        }
    }
}

impl<S: AsyncRead + AsyncWrite + Unpin> AsyncRead for MaybeTlsStream<S> {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        match self.get_mut() {
            MaybeTlsStream::Plain(s) => Pin::new(s).poll_read(cx, buf),
            MaybeTlsStream::Tls(s) => Pin::new(s.as_mut()).poll_read(cx, buf),
        }
    }
}

impl<S: AsyncRead + AsyncWrite + Unpin> AsyncWrite for MaybeTlsStream<S> {
    fn poll_write(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        match self.get_mut() {
            MaybeTlsStream::Plain(s) => Pin::new(s).poll_write(cx, buf),
            MaybeTlsStream::Tls(s) => Pin::new(s.as_mut()).poll_write(cx, buf),
        }
    }

    fn poll_write_vectored(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        bufs: &[io::IoSlice<'_>],
    ) -> Poll<io::Result<usize>> {
        match self.get_mut() {
            MaybeTlsStream::Plain(s) => Pin::new(s).poll_write_vectored(cx, bufs),
            MaybeTlsStream::Tls(s) => Pin::new(s.as_mut()).poll_write_vectored(cx, bufs),
        }
    }

    fn is_write_vectored(&self) -> bool {
        match self {
            MaybeTlsStream::Plain(s) => s.is_write_vectored(),
            MaybeTlsStream::Tls(s) => s.is_write_vectored(),
        }
    }

    fn poll_flush(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        match self.get_mut() {
            MaybeTlsStream::Plain(s) => Pin::new(s).poll_flush(cx),
            MaybeTlsStream::Tls(s) => Pin::new(s.as_mut()).poll_flush(cx),
        }
    }

    fn poll_shutdown(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        match self.get_mut() {
            MaybeTlsStream::Plain(s) => Pin::new(s).poll_shutdown(cx),
            MaybeTlsStream::Tls(s) => Pin::new(s.as_mut()).poll_shutdown(cx),
        }
    }
}

/// Best-effort close for cleanup paths. Errors are swallowed.
pub async fn close_silently<S: AsyncWrite + Unpin>(mut stream: S) {
    if let Err(e) = stream.shutdown().await {
        trace!("ignored error while closing socket: {e}");
    }
    drop(stream);
}
