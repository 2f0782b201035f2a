//! TCP socket plumbing
//!
//! The `SocketFactory` seam plus the default `socket2`-backed factory.

pub mod socket_config;
pub mod socket_factory;

pub use socket_config::{configure_tcp_socket, configure_tcp_stream};
pub use socket_factory::{SocketFactory, TcpSocketFactory};
