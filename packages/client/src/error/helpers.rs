use std::fmt;

/// A marker type to indicate that there was no address left to try.
#[derive(Debug)]
pub struct NoAddresses;

impl fmt::Display for NoAddresses {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("no viable interface to connect")
    }
}

impl std::error::Error for NoAddresses {}

/// The peer certificate does not cover the expected hostname.
#[derive(Debug)]
pub struct HostnameMismatch {
    pub hostname: String,
}

impl fmt::Display for HostnameMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "certificate does not match hostname '{}'", self.hostname)
    }
}

impl std::error::Error for HostnameMismatch {}
