//! Fluent builder methods for connection configuration

use std::time::Duration;

use super::enums::DualStackMode;
use super::types::ConnectConfig;

impl ConnectConfig {
    /// Set the per-attempt connection timeout
    ///
    /// Bounds a single racer's connect call, not the race as a whole.
    ///
    /// # Examples
    /// ```
    /// use std::time::Duration;
    /// use wsdial_client::config::ConnectConfig;
    ///
    /// let config = ConnectConfig::default()
    ///     .with_connect_timeout(Duration::from_secs(5));
    /// assert_eq!(config.connect_timeout, Some(Duration::from_secs(5)));
    /// ```
    #[must_use]
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Leave the connect timeout to the operating system
    #[must_use]
    pub fn without_connect_timeout(mut self) -> Self {
        self.connect_timeout = None;
        self
    }

    /// Set the Happy Eyeballs fallback delay
    ///
    /// Candidate `i` starts no later than `i * delay` after the race begins,
    /// earlier if its predecessor finishes first.
    #[must_use]
    pub fn with_fallback_delay(mut self, delay: Duration) -> Self {
        self.fallback_delay = delay;
        self
    }

    /// Restrict the address families that race
    #[must_use]
    pub fn with_dual_stack(mut self, mode: DualStackMode) -> Self {
        self.dual_stack = mode;
        self
    }

    /// Enable or disable certificate hostname verification
    #[must_use]
    pub fn with_verify_hostname(mut self, verify: bool) -> Self {
        self.verify_hostname = verify;
        self
    }

    /// Override the SNI server names
    #[must_use]
    pub fn with_server_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.server_names = names.into_iter().map(Into::into).collect();
        self
    }
}
