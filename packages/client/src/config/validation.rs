//! Configuration validation

use std::time::Duration;

use super::core::ConnectConfig;

/// Configuration validation result type
pub type ConfigResult<T> = Result<T, ConfigurationError>;

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("Invalid timeout value: {0}")]
    InvalidTimeout(String),

    #[error("Invalid server name: {0}")]
    InvalidServerName(String),
}

fn validate_timeout(timeout: Duration, name: &str) -> ConfigResult<()> {
    if timeout.is_zero() {
        return Err(ConfigurationError::InvalidTimeout(format!(
            "{name} cannot be zero"
        )));
    }
    Ok(())
}

impl ConnectConfig {
    /// Validates the configuration settings
    ///
    /// # Errors
    ///
    /// - `InvalidTimeout` if the fallback delay or connect timeout is zero
    /// - `InvalidServerName` if an SNI override is empty
    pub fn validate(&self) -> ConfigResult<()> {
        validate_timeout(self.fallback_delay, "fallback_delay")?;
        if let Some(timeout) = self.connect_timeout {
            validate_timeout(timeout, "connect_timeout")?;
        }
        if let Some(name) = self.server_names.iter().find(|n| n.trim().is_empty()) {
            return Err(ConfigurationError::InvalidServerName(format!(
                "'{name}' is empty"
            )));
        }
        Ok(())
    }
}
