//! Connector service
//!
//! The connection sequence split by step: `direct` (resolve and race),
//! `proxy` (tunnel), `tls` (overlay and verification).

pub mod core;
mod direct;
mod proxy;
mod tls;

pub use self::core::ConnectorService;
