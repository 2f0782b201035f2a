//! TLS-specific error types

/// Failures while building a TLS configuration or inspecting a certificate
#[derive(Debug, thiserror::Error)]
pub enum TlsError {
    #[error("Certificate parsing failed: {0}")]
    CertificateParsing(String),
    #[error("Invalid root certificate: {0}")]
    InvalidRootCertificate(String),
    #[error("No root certificates configured")]
    NoRootCertificates,
    #[error("Invalid server name: {0}")]
    InvalidServerName(String),
    #[error("Verifier construction failed: {0}")]
    Verifier(String),
    #[error("TLS configuration rejected: {0}")]
    Rustls(#[from] rustls::Error),
}
