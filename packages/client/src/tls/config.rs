//! Client TLS configuration
//!
//! Roots come from the bundled webpki set, the platform store, or
//! explicitly added certificates. Certificate name checks are left to the
//! connector's hostname verifier so that a mismatch is reported as such
//! instead of as a handshake failure.

use std::fmt;
use std::sync::Arc;

use rustls::pki_types::CertificateDer;
use rustls::pki_types::pem::PemObject;
use rustls::{ClientConfig, RootCertStore};
use tokio_rustls::TlsConnector;
use tracing::{debug, warn};

use super::errors::TlsError;
use super::verifier::DeferredNameVerifier;

/// Shared rustls client configuration
#[derive(Clone)]
pub struct TlsConfig {
    client_config: Arc<ClientConfig>,
}

impl TlsConfig {
    pub fn builder() -> TlsConfigBuilder {
        TlsConfigBuilder::default()
    }

    /// Use a caller-built rustls configuration as is.
    ///
    /// Its verifier is responsible for name checks; with the stock webpki
    /// verifier a mismatch fails the handshake before the hostname verifier
    /// runs.
    pub fn from_client_config(client_config: Arc<ClientConfig>) -> Self {
        Self { client_config }
    }

    #[must_use]
    pub fn client_config(&self) -> &Arc<ClientConfig> {
        &self.client_config
    }

    pub(crate) fn connector(&self) -> TlsConnector {
        TlsConnector::from(Arc::clone(&self.client_config))
    }
}

impl fmt::Debug for TlsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TlsConfig")
            .field("alpn_protocols", &self.client_config.alpn_protocols)
            .finish_non_exhaustive()
    }
}

/// Builder for `TlsConfig`
#[derive(Debug, Default)]
pub struct TlsConfigBuilder {
    webpki_roots: bool,
    native_roots: bool,
    extra_roots: Vec<CertificateDer<'static>>,
    alpn_protocols: Vec<Vec<u8>>,
}

impl TlsConfigBuilder {
    /// Trust the bundled Mozilla root set
    #[must_use]
    pub fn with_webpki_roots(mut self) -> Self {
        self.webpki_roots = true;
        self
    }

    /// Trust the platform certificate store
    #[must_use]
    pub fn with_native_roots(mut self) -> Self {
        self.native_roots = true;
        self
    }

    /// Trust one additional DER-encoded root
    #[must_use]
    pub fn add_root_certificate(mut self, cert: CertificateDer<'static>) -> Self {
        self.extra_roots.push(cert);
        self
    }

    /// Trust every certificate in a PEM bundle
    ///
    /// # Errors
    ///
    /// `InvalidRootCertificate` if the bundle cannot be parsed.
    pub fn add_root_pem(mut self, pem: &[u8]) -> Result<Self, TlsError> {
        for cert in CertificateDer::pem_slice_iter(pem) {
            let cert = cert.map_err(|e| TlsError::InvalidRootCertificate(e.to_string()))?;
            self.extra_roots.push(cert);
        }
        Ok(self)
    }

    /// Protocols offered through ALPN, most preferred first
    #[must_use]
    pub fn with_alpn_protocols<I, P>(mut self, protocols: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Vec<u8>>,
    {
        self.alpn_protocols = protocols.into_iter().map(Into::into).collect();
        self
    }

    /// Build the configuration.
    ///
    /// # Errors
    ///
    /// `NoRootCertificates` when nothing would be trusted,
    /// `InvalidRootCertificate` when an added root is rejected.
    pub fn build(self) -> Result<TlsConfig, TlsError> {
        let mut roots = RootCertStore::empty();

        if self.webpki_roots {
            roots.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
        }

        if self.native_roots {
            let loaded = rustls_native_certs::load_native_certs();
            for err in &loaded.errors {
                warn!("Certificate load error: {err}");
            }
            let (added, ignored) = roots.add_parsable_certificates(loaded.certs);
            debug!("Loaded {added} system certificates ({ignored} ignored)");
        }

        for cert in self.extra_roots {
            roots
                .add(cert)
                .map_err(|e| TlsError::InvalidRootCertificate(e.to_string()))?;
        }

        if roots.is_empty() {
            return Err(TlsError::NoRootCertificates);
        }

        let provider = Arc::new(rustls::crypto::ring::default_provider());
        let verifier = DeferredNameVerifier::new(Arc::new(roots), Arc::clone(&provider))?;

        let mut client_config = ClientConfig::builder_with_provider(provider)
            .with_safe_default_protocol_versions()?
            .dangerous()
            .with_custom_certificate_verifier(Arc::new(verifier))
            .with_no_client_auth();
        client_config.alpn_protocols = self.alpn_protocols;

        Ok(TlsConfig::from_client_config(Arc::new(client_config)))
    }
}
