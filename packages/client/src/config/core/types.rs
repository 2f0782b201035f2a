//! Core connection configuration structure and field definitions

use std::time::Duration;

use super::enums::DualStackMode;

/// Connection establishment configuration
///
/// One value drives one `connect` call; nothing in it is mutated while a
/// race is running.
#[derive(Debug, Clone)]
pub struct ConnectConfig {
    /// Timeout for a single connection attempt (`None` leaves it to the OS)
    pub connect_timeout: Option<Duration>,

    /// Happy Eyeballs stagger between consecutive candidates
    pub fallback_delay: Duration,

    /// Address families allowed to race
    pub dual_stack: DualStackMode,

    /// Check the peer certificate against the expected hostname
    pub verify_hostname: bool,

    /// SNI names; empty means "use the target hostname"
    pub server_names: Vec<String>,
}

impl ConnectConfig {
    /// Server name sent in the TLS ClientHello for `host`.
    #[must_use]
    pub fn sni_name<'a>(&'a self, host: &'a str) -> &'a str {
        self.server_names
            .first()
            .map_or(host, String::as_str)
    }
}
