//! Default implementations for connection configuration

use std::time::Duration;

use super::enums::DualStackMode;
use super::types::ConnectConfig;

/// RFC 6555 suggests 150-250 ms; the upper bound keeps IPv6 favoured.
pub const DEFAULT_FALLBACK_DELAY: Duration = Duration::from_millis(250);

pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

impl Default for ConnectConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Some(DEFAULT_CONNECT_TIMEOUT),
            fallback_delay: DEFAULT_FALLBACK_DELAY,
            dual_stack: DualStackMode::Both,
            verify_hostname: true,
            server_names: Vec::new(),
        }
    }
}
