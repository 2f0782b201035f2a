//! # wsdial client
//!
//! Connection establishment for WebSocket clients: Happy Eyeballs
//! (RFC 6555) racing over every resolved address, optional proxy
//! tunnelling, and a TLS overlay whose certificate is checked against the
//! real target's hostname.
//!
//! ## Features
//!
//! - **Staggered racing**: IPv6 and IPv4 candidates start one fallback delay
//!   apart, or sooner when the previous attempt fails
//! - **Leak-free**: every losing socket is closed before `connect` returns
//! - **Proxy tunnels** via HTTP CONNECT, over plain TCP or TLS
//! - **Rustls TLS** with webpki or native roots and explicit hostname checks
//! - **Typed errors** naming the step that failed
//!
//! ## Usage
//!
//! ```no_run
//! use wsdial_client::{Connector, Endpoint, TlsConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let connector = Connector::builder()
//!     .tls(TlsConfig::builder().with_webpki_roots().build()?)
//!     .build()?;
//!
//! let stream = connector.connect(&Endpoint::new("echo.websocket.org", 443)).await?;
//! assert!(stream.is_tls());
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(clippy::all)]

use std::sync::Arc;

pub mod config;
pub mod connect;
pub mod dns;
pub mod error;
pub mod tls;

pub mod prelude;

pub use crate::prelude::*;

/// Connect once with a throwaway connector over plain TCP sockets.
///
/// The configuration is used as given; call `ConnectConfig::validate`
/// beforehand to reject zero delays.
///
/// # Errors
///
/// See [`error::Kind`].
pub async fn connect(
    target: &Endpoint,
    proxy: Option<ProxySettings>,
    tls: Option<TlsConfig>,
    config: ConnectConfig,
) -> Result<MaybeTlsStream<tokio::net::TcpStream>> {
    let service = ConnectorService::new(
        Arc::new(TcpSocketFactory::default()),
        Arc::new(SystemResolver),
        config,
        proxy,
        tls,
        Arc::new(DefaultHostnameVerifier),
    );
    service.connect(target).await
}
