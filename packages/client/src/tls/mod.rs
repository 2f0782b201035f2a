//! TLS support
//!
//! Configuration, the post-handshake hostname check, the overlay that turns
//! a connected socket into a TLS stream, and a socket factory that does the
//! same inside a race.

pub mod config;
pub mod errors;
pub mod factory;
pub mod hostname;
pub mod overlay;
mod verifier;

pub use config::{TlsConfig, TlsConfigBuilder};
pub use errors::TlsError;
pub use factory::{PendingTlsSocket, TlsSocketFactory};
pub use hostname::{CertificateNames, DefaultHostnameVerifier, VerifyHostname, match_hostname};
pub use overlay::Overlay;
