//! Connection types
//!
//! - `connection`: the `Transport` bound, `MaybeTlsStream` and `close_silently`
//! - `connector`: the public `Connector` handle
//! - `endpoint`: host, port and optional pinned address

pub mod connection;
pub mod connector;
pub mod endpoint;

pub use connection::{BoxedTransport, MaybeTlsStream, Transport, close_silently};
pub use connector::Connector;
pub use endpoint::Endpoint;
