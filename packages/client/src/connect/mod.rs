//! Connection establishment
//!
//! - `race`: Happy Eyeballs racing over resolved addresses
//! - `tcp`: the `SocketFactory` seam and the default TCP factory
//! - `proxy`: proxy tunnel negotiation
//! - `service`: the connection sequence
//! - `builder`: connector configuration

pub mod builder;
pub mod proxy;
pub mod race;
pub mod service;
pub mod tcp;
pub mod types;

pub use builder::ConnectorBuilder;
pub use proxy::{HttpConnectHandshaker, ProxyHandshake, ProxySettings, ProxyStream};
pub use race::{RaceSettings, race};
pub use service::ConnectorService;
pub use tcp::{SocketFactory, TcpSocketFactory};
pub use types::{BoxedTransport, Connector, Endpoint, MaybeTlsStream, Transport, close_silently};
