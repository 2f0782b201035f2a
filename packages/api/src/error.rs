//! Errors returned by `Dial::connect`

use wsdial_client::{ConfigurationError, TlsError};

/// Everything that can stop a `Dial` from producing a transport
#[derive(Debug, thiserror::Error)]
pub enum DialError {
    #[error("invalid connection settings: {0}")]
    Config(#[from] ConfigurationError),
    #[error("invalid TLS settings: {0}")]
    Tls(#[from] TlsError),
    #[error(transparent)]
    Connect(#[from] wsdial_client::Error),
}

impl DialError {
    /// The connection error, if the failure happened while connecting
    #[must_use]
    pub fn as_connect(&self) -> Option<&wsdial_client::Error> {
        match self {
            DialError::Connect(e) => Some(e),
            _ => None,
        }
    }

    /// Which connection step failed, if any
    #[must_use]
    pub fn kind(&self) -> Option<wsdial_client::Kind> {
        self.as_connect().map(wsdial_client::Error::kind)
    }
}
