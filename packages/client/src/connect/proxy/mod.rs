//! Proxy tunnelling
//!
//! The sequencer connects to the proxy endpoint and hands the raw socket to
//! a `ProxyHandshake`, which negotiates a tunnel to the real target.

mod handshake;
mod http_connect;

pub use handshake::{ProxyHandshake, ProxySettings, ProxyStream};
pub use http_connect::HttpConnectHandshaker;
