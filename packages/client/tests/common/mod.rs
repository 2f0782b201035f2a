//! Shared fixtures for the integration tests

#![allow(dead_code)]

use std::collections::HashMap;
use std::io;
use std::net::{IpAddr, SocketAddr};
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use std::time::Duration;

use futures::future::{self, BoxFuture};
use rcgen::{BasicConstraints, CertificateParams, DnType, IsCa, Issuer, KeyPair, SanType};
use rustls::pki_types::{CertificateDer, PrivateKeyDer, PrivatePkcs8KeyDer};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, ReadBuf};
use tokio::net::{TcpListener, TcpStream};
use tokio::time::Instant;
use tokio_rustls::TlsAcceptor;
use wsdial_client::{SocketFactory, TlsConfig, Transport};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn ip(s: &str) -> IpAddr {
    s.parse().unwrap()
}

// ---------------------------------------------------------------------------
// Scripted socket factory
// ---------------------------------------------------------------------------

/// What a mock connect does for one address.
#[derive(Debug, Clone, Copy)]
pub enum Script {
    Succeed(Duration),
    Fail(Duration),
    Hang,
}

/// Decrements the live-socket counter when the socket goes away.
#[derive(Debug)]
struct Live(Arc<AtomicUsize>);

impl Live {
    fn new(counter: &Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(Arc::clone(counter))
    }
}

impl Drop for Live {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[derive(Debug)]
pub struct MockSocket {
    live: Live,
}

/// Connected mock socket. Reads hit EOF, writes are discarded.
#[derive(Debug)]
pub struct MockStream {
    _live: Live,
    pub address: SocketAddr,
}

impl Transport for MockStream {}

impl AsyncRead for MockStream {
    fn poll_read(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        _buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}

impl AsyncWrite for MockStream {
    fn poll_write(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        Poll::Ready(Ok(buf.len()))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}

/// Socket factory whose connects follow a per-address script and which
/// counts the sockets that are still open.
#[derive(Debug, Clone)]
pub struct MockFactory {
    scripts: HashMap<IpAddr, Script>,
    live: Arc<AtomicUsize>,
    created: Arc<AtomicUsize>,
    started: Arc<Mutex<Vec<(IpAddr, Duration)>>>,
    server_names: Arc<Mutex<Vec<Vec<String>>>>,
    epoch: Instant,
}

impl MockFactory {
    pub fn new<'a>(scripts: impl IntoIterator<Item = (&'a str, Script)>) -> Self {
        Self {
            scripts: scripts.into_iter().map(|(a, s)| (ip(a), s)).collect(),
            live: Arc::new(AtomicUsize::new(0)),
            created: Arc::new(AtomicUsize::new(0)),
            started: Arc::new(Mutex::new(Vec::new())),
            server_names: Arc::new(Mutex::new(Vec::new())),
            epoch: Instant::now(),
        }
    }

    /// Sockets created and not yet dropped
    pub fn live(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }

    pub fn created(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }

    /// Connect start offsets from factory creation, in start order
    pub fn started(&self) -> Vec<(IpAddr, Duration)> {
        self.started.lock().unwrap().clone()
    }

    /// Server names applied to each created socket, in creation order
    pub fn server_names(&self) -> Vec<Vec<String>> {
        self.server_names.lock().unwrap().clone()
    }
}

impl SocketFactory for MockFactory {
    type Socket = MockSocket;
    type Stream = MockStream;

    fn create(&self, _addr: &SocketAddr) -> io::Result<MockSocket> {
        self.created.fetch_add(1, Ordering::SeqCst);
        Ok(MockSocket {
            live: Live::new(&self.live),
        })
    }

    fn apply_server_names(&self, _socket: &mut MockSocket, server_names: &[String]) {
        self.server_names.lock().unwrap().push(server_names.to_vec());
    }

    fn connect(
        &self,
        socket: MockSocket,
        addr: SocketAddr,
    ) -> BoxFuture<'static, io::Result<MockStream>> {
        self.started
            .lock()
            .unwrap()
            .push((addr.ip(), self.epoch.elapsed()));
        let script = self.scripts.get(&addr.ip()).copied().unwrap_or(Script::Hang);

        Box::pin(async move {
            match script {
                Script::Succeed(after) => {
                    tokio::time::sleep(after).await;
                    Ok(MockStream {
                        _live: socket.live,
                        address: addr,
                    })
                }
                Script::Fail(after) => {
                    tokio::time::sleep(after).await;
                    drop(socket);
                    Err(io::Error::new(
                        io::ErrorKind::ConnectionRefused,
                        format!("{addr} refused"),
                    ))
                }
                Script::Hang => {
                    let _socket = socket;
                    future::pending().await
                }
            }
        })
    }
}

// ---------------------------------------------------------------------------
// Open-socket accounting over a real factory
// ---------------------------------------------------------------------------

/// Wraps a real factory and counts the sockets it handed out that are still
/// open, so tests can check that failed sequences close what they opened.
#[derive(Debug, Clone)]
pub struct Counting<F> {
    inner: F,
    live: Arc<AtomicUsize>,
}

impl<F> Counting<F> {
    pub fn new(inner: F) -> Self {
        Self {
            inner,
            live: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn live(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }
}

#[derive(Debug)]
pub struct CountedSocket<S> {
    socket: S,
    live: Live,
}

#[derive(Debug)]
pub struct Counted<S> {
    stream: S,
    _live: Live,
}

impl<S: Transport> Transport for Counted<S> {
    fn tls_session(&self) -> Option<&rustls::CommonState> {
        self.stream.tls_session()
    }
}

impl<S: AsyncRead + Unpin> AsyncRead for Counted<S> {
    fn poll_read(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        Pin::new(&mut self.stream).poll_read(cx, buf)
    }
}

impl<S: AsyncWrite + Unpin> AsyncWrite for Counted<S> {
    fn poll_write(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        Pin::new(&mut self.stream).poll_write(cx, buf)
    }

    fn poll_flush(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.stream).poll_flush(cx)
    }

    fn poll_shutdown(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.stream).poll_shutdown(cx)
    }
}

impl<F: SocketFactory> SocketFactory for Counting<F> {
    type Socket = CountedSocket<F::Socket>;
    type Stream = Counted<F::Stream>;

    fn create(&self, addr: &SocketAddr) -> io::Result<Self::Socket> {
        Ok(CountedSocket {
            socket: self.inner.create(addr)?,
            live: Live::new(&self.live),
        })
    }

    fn apply_server_names(&self, socket: &mut Self::Socket, server_names: &[String]) {
        self.inner.apply_server_names(&mut socket.socket, server_names);
    }

    fn connect(
        &self,
        socket: Self::Socket,
        addr: SocketAddr,
    ) -> BoxFuture<'static, io::Result<Self::Stream>> {
        let live = socket.live;
        let connecting = self.inner.connect(socket.socket, addr);
        Box::pin(async move {
            let stream = connecting.await?;
            Ok(Counted {
                stream,
                _live: live,
            })
        })
    }
}

// ---------------------------------------------------------------------------
// Loopback servers
// ---------------------------------------------------------------------------

/// A loopback port with nothing listening on it.
pub fn refused_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

/// Echo server answering every connection until the test ends.
pub async fn echo_server() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            tokio::spawn(echo(stream));
        }
    });
    addr
}

async fn echo<S: AsyncRead + AsyncWrite + Unpin>(mut stream: S) {
    let mut buf = [0u8; 1024];
    loop {
        match stream.read(&mut buf).await {
            Ok(0) | Err(_) => return,
            Ok(n) => {
                if stream.write_all(&buf[..n]).await.is_err() {
                    return;
                }
            }
        }
    }
}

/// Request heads a fake proxy received, in arrival order.
pub type SeenRequests = Arc<Mutex<Vec<String>>>;

/// HTTP proxy that answers every CONNECT with `status_line` and, on 200,
/// echoes the tunnelled bytes.
pub async fn http_proxy(status_line: &'static str) -> (SocketAddr, SeenRequests) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let seen: SeenRequests = Arc::default();
    let requests = Arc::clone(&seen);
    tokio::spawn(async move {
        while let Ok((mut stream, _)) = listener.accept().await {
            let requests = Arc::clone(&requests);
            tokio::spawn(async move {
                let Some(head) = read_head(&mut stream).await else {
                    return;
                };
                requests.lock().unwrap().push(head);
                let response = format!("{status_line}\r\nVia: 1.1 fake-proxy\r\n\r\n");
                if stream.write_all(response.as_bytes()).await.is_err() {
                    return;
                }
                if status_line.contains(" 200 ") {
                    echo(stream).await;
                }
            });
        }
    });
    (addr, seen)
}

async fn read_head(stream: &mut TcpStream) -> Option<String> {
    let mut head = Vec::new();
    while !head.ends_with(b"\r\n\r\n") {
        head.push(stream.read_u8().await.ok()?);
    }
    String::from_utf8(head).ok()
}

// ---------------------------------------------------------------------------
// TLS material
// ---------------------------------------------------------------------------

pub struct TestCa {
    pub cert: CertificateDer<'static>,
    issuer: Issuer<'static, KeyPair>,
}

impl TestCa {
    pub fn new(name: &str) -> Self {
        let mut params = CertificateParams::new(Vec::<String>::new()).unwrap();
        params.is_ca = IsCa::Ca(BasicConstraints::Unconstrained);
        params.distinguished_name.push(DnType::CommonName, name);
        let key = KeyPair::generate().unwrap();
        let cert = params.clone().self_signed(&key).unwrap();
        Self {
            cert: cert.der().clone(),
            issuer: Issuer::new(params, key),
        }
    }

    /// Leaf certificate for `dns_names` plus 127.0.0.1.
    pub fn leaf(&self, dns_names: &[&str]) -> (CertificateDer<'static>, PrivateKeyDer<'static>) {
        let mut params = CertificateParams::new(Vec::<String>::new()).unwrap();
        for name in dns_names {
            params
                .subject_alt_names
                .push(SanType::DnsName((*name).try_into().unwrap()));
        }
        params
            .subject_alt_names
            .push(SanType::IpAddress(ip("127.0.0.1")));
        let key = KeyPair::generate().unwrap();
        let cert = params.signed_by(&key, &self.issuer).unwrap();
        let key = PrivateKeyDer::Pkcs8(PrivatePkcs8KeyDer::from(key.serialize_der()));
        (cert.der().clone(), key)
    }

    /// Client configuration trusting only this CA
    pub fn client_config(&self) -> TlsConfig {
        TlsConfig::builder()
            .add_root_certificate(self.cert.clone())
            .build()
            .unwrap()
    }
}

/// SNI values a TLS server saw, in arrival order.
pub type SeenNames = Arc<Mutex<Vec<Option<String>>>>;

/// TLS echo server presenting `leaf`.
pub async fn tls_echo_server(
    leaf: (CertificateDer<'static>, PrivateKeyDer<'static>),
) -> (SocketAddr, SeenNames) {
    let provider = Arc::new(rustls::crypto::ring::default_provider());
    let config = rustls::ServerConfig::builder_with_provider(provider)
        .with_safe_default_protocol_versions()
        .unwrap()
        .with_no_client_auth()
        .with_single_cert(vec![leaf.0], leaf.1)
        .unwrap();
    let acceptor = TlsAcceptor::from(Arc::new(config));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let seen: SeenNames = Arc::default();
    let names = Arc::clone(&seen);
    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            let acceptor = acceptor.clone();
            let names = Arc::clone(&names);
            tokio::spawn(async move {
                let Ok(tls) = acceptor.accept(stream).await else {
                    return;
                };
                names
                    .lock()
                    .unwrap()
                    .push(tls.get_ref().1.server_name().map(str::to_owned));
                echo(tls).await;
            });
        }
    });
    (addr, seen)
}
