//! DNS resolution utilities

use std::net::IpAddr;

/// Stable sort putting IPv6 entries ahead of IPv4 entries.
///
/// Relative order inside each family is kept as the resolver returned it.
pub fn sort_addresses_by_preference(addrs: &mut [IpAddr]) {
    addrs.sort_by_key(|addr| match addr {
        IpAddr::V6(_) => 0,
        IpAddr::V4(_) => 1,
    });
}

/// Parses `host` as an IP literal, accepting bracketed IPv6.
pub fn ip_literal(host: &str) -> Option<IpAddr> {
    let trimmed = host
        .strip_prefix('[')
        .and_then(|h| h.strip_suffix(']'))
        .unwrap_or(host);
    trimmed.parse().ok()
}
