//! End-to-end connection sequences over loopback sockets

mod common;

use std::time::Duration;

use common::{echo_server, init_tracing, ip, refused_port};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use wsdial_client::{ConnectConfig, Connector, Endpoint, Kind, StaticResolver, connect};

async fn round_trip<S: tokio::io::AsyncRead + tokio::io::AsyncWrite + Unpin>(stream: &mut S) {
    stream.write_all(b"ping").await.unwrap();
    let mut buf = [0u8; 4];
    stream.read_exact(&mut buf).await.unwrap();
    assert_eq!(&buf, b"ping");
}

#[tokio::test]
async fn unreachable_ipv6_falls_back_to_ipv4() {
    init_tracing();
    let server = echo_server().await;
    // Nothing listens on ::1 at this port, so the IPv6 candidate fails fast.
    let resolver = StaticResolver::new().with_host("ws.test", [ip("::1"), ip("127.0.0.1")]);
    let connector = Connector::builder()
        .resolver(resolver)
        .config(ConnectConfig::default().with_fallback_delay(Duration::from_secs(5)))
        .build()
        .unwrap();

    let started = std::time::Instant::now();
    let mut stream = connector
        .connect(&Endpoint::new("ws.test", server.port()))
        .await
        .unwrap();

    assert!(started.elapsed() < Duration::from_secs(5));
    assert!(!stream.is_tls());
    assert_eq!(stream.get_ref().peer_addr().unwrap(), server);
    round_trip(&mut stream).await;
}

#[tokio::test]
async fn refused_everywhere_is_a_connect_error() {
    let port = refused_port();
    let resolver = StaticResolver::new().with_host("ws.test", [ip("127.0.0.1")]);
    let connector = Connector::builder().resolver(resolver).build().unwrap();

    let err = connector
        .connect(&Endpoint::new("ws.test", port))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), Kind::SocketConnect { proxied: false });
    assert_eq!(err.target(), Some(format!("ws.test:{port}").as_str()));
}

#[tokio::test]
async fn unknown_host_is_a_resolution_error() {
    let connector = Connector::builder()
        .resolver(StaticResolver::new())
        .build()
        .unwrap();

    let err = connector
        .connect(&Endpoint::new("nowhere.test", 80))
        .await
        .unwrap_err();

    assert!(err.is_address_resolution());
}

#[tokio::test]
async fn pinned_address_skips_resolution() {
    let server = echo_server().await;
    let connector = Connector::builder()
        .resolver(StaticResolver::new())
        .build()
        .unwrap();

    let target = Endpoint::new("pinned.test", 1).with_address(server);
    let mut stream = connector.connect(&target).await.unwrap();
    round_trip(&mut stream).await;
}

#[tokio::test]
async fn ip_literal_hosts_resolve_without_dns() {
    let server = echo_server().await;
    let mut stream = connect(
        &Endpoint::new("127.0.0.1", server.port()),
        None,
        None,
        ConnectConfig::default(),
    )
    .await
    .unwrap();
    round_trip(&mut stream).await;
}

#[tokio::test]
async fn ipv6_only_policy_rejects_ipv4_results() {
    let resolver = StaticResolver::new().with_host("v4.test", [ip("127.0.0.1")]);
    let connector = Connector::builder()
        .resolver(resolver)
        .config(ConnectConfig::default().with_dual_stack(wsdial_client::DualStackMode::Ipv6Only))
        .build()
        .unwrap();

    let err = connector
        .connect(&Endpoint::new("v4.test", 80))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), Kind::NoViableAddress);
}

#[test]
fn invalid_configuration_is_rejected_at_build() {
    let result = Connector::builder()
        .config(ConnectConfig::default().with_fallback_delay(Duration::ZERO))
        .build();
    assert!(result.is_err());
}
