//! Certificate hostname verification
//!
//! Checks the peer's leaf certificate against the hostname the caller
//! meant to reach: IP literals against IP SANs, names against DNS SANs with
//! single-label left-most wildcards, and the subject CN only when the
//! certificate carries no DNS SAN at all.

use std::net::IpAddr;

use rustls::CommonState;
use tracing::{debug, warn};
use x509_parser::prelude::*;

use super::errors::TlsError;
use crate::dns::resolve::utilities::ip_literal;

/// Decides whether a negotiated TLS session is valid for a hostname.
pub trait VerifyHostname: Send + Sync + 'static {
    fn verify(&self, hostname: &str, session: &CommonState) -> bool;
}

/// Subject Alternative Name based verifier
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultHostnameVerifier;

impl VerifyHostname for DefaultHostnameVerifier {
    fn verify(&self, hostname: &str, session: &CommonState) -> bool {
        let Some(leaf) = session.peer_certificates().and_then(<[_]>::first) else {
            debug!(hostname, "no peer certificate to verify");
            return false;
        };
        match CertificateNames::from_der(leaf.as_ref()) {
            Ok(names) => names.covers(hostname),
            Err(e) => {
                warn!(hostname, "could not inspect peer certificate: {e}");
                false
            }
        }
    }
}

/// Names a certificate is valid for
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CertificateNames {
    pub dns_names: Vec<String>,
    pub ip_addresses: Vec<IpAddr>,
    pub common_name: Option<String>,
}

impl CertificateNames {
    /// Extract SANs and the subject CN from a DER certificate.
    ///
    /// # Errors
    ///
    /// `CertificateParsing` if the DER or its SAN extension is malformed.
    pub fn from_der(der: &[u8]) -> Result<Self, TlsError> {
        let (_, cert) = parse_x509_certificate(der)
            .map_err(|e| TlsError::CertificateParsing(e.to_string()))?;

        let mut names = CertificateNames::default();
        let san = cert
            .subject_alternative_name()
            .map_err(|e| TlsError::CertificateParsing(e.to_string()))?;
        if let Some(san) = san {
            for name in &san.value.general_names {
                match name {
                    GeneralName::DNSName(dns) => names.dns_names.push((*dns).to_owned()),
                    GeneralName::IPAddress(bytes) => {
                        if let Some(ip) = ip_from_bytes(bytes) {
                            names.ip_addresses.push(ip);
                        }
                    }
                    _ => {}
                }
            }
        }

        names.common_name = cert
            .subject()
            .iter_common_name()
            .next()
            .and_then(|cn| cn.as_str().ok())
            .map(str::to_owned);

        Ok(names)
    }

    /// Whether these names cover `hostname`.
    #[must_use]
    pub fn covers(&self, hostname: &str) -> bool {
        if let Some(ip) = ip_literal(hostname) {
            return self.ip_addresses.contains(&ip);
        }

        if self.dns_names.is_empty() {
            return self.common_name.as_deref().is_some_and(|cn| {
                debug!("Using Common Name for hostname verification");
                match_hostname(hostname, cn)
            });
        }

        self.dns_names
            .iter()
            .any(|pattern| match_hostname(hostname, pattern))
    }
}

fn ip_from_bytes(bytes: &[u8]) -> Option<IpAddr> {
    match bytes.len() {
        4 => <[u8; 4]>::try_from(bytes).ok().map(IpAddr::from),
        16 => <[u8; 16]>::try_from(bytes).ok().map(IpAddr::from),
        _ => None,
    }
}

/// Match hostname against a DNS name pattern (supports wildcards)
///
/// A wildcard stands for exactly one left-most label and must be followed
/// by at least two labels, so `*.com` never matches.
pub fn match_hostname(hostname: &str, pattern: &str) -> bool {
    let hostname = hostname.trim_end_matches('.').to_ascii_lowercase();
    let pattern = pattern.trim_end_matches('.').to_ascii_lowercase();

    if hostname.is_empty() || pattern.is_empty() {
        return false;
    }

    if hostname == pattern {
        return true;
    }

    let Some(suffix) = pattern.strip_prefix("*.") else {
        return false;
    };
    if suffix.contains('*') || !suffix.contains('.') {
        return false;
    }

    hostname
        .strip_suffix(suffix)
        .and_then(|prefix| prefix.strip_suffix('.'))
        .is_some_and(|label| !label.is_empty() && !label.contains('.'))
}
