//! Commonly used types
//!
//! Everything a caller needs to configure a connector and handle its errors.

pub use crate::config::{ConfigResult, ConfigurationError, ConnectConfig, DualStackMode};
pub use crate::connect::{
    BoxedTransport, Connector, ConnectorBuilder, ConnectorService, Endpoint,
    HttpConnectHandshaker, MaybeTlsStream, ProxyHandshake, ProxySettings, ProxyStream,
    RaceSettings, SocketFactory, TcpSocketFactory, Transport, close_silently, race,
};
pub use crate::dns::{Resolve, Resolving, StaticResolver, SystemResolver};
pub use crate::error::{Error, Kind, Result};
pub use crate::tls::{
    DefaultHostnameVerifier, TlsConfig, TlsConfigBuilder, TlsError, TlsSocketFactory,
    VerifyHostname,
};
