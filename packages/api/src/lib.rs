//! wsdial public API
//!
//! A fluent dialer for WebSocket transports. `Dial::to(host, port)` races
//! every resolved address Happy Eyeballs style, optionally tunnels through
//! an HTTP proxy, overlays TLS and hands back a ready byte stream for the
//! WebSocket handshake.

#![deny(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]

pub mod builder;
pub mod error;

pub use builder::Dial;
pub use error::DialError;

// Re-export important types from client package
pub use wsdial_client::{
    BoxedTransport, ConnectConfig, DualStackMode, Endpoint, Kind, Resolve, StaticResolver,
    TlsConfig, Transport,
};
