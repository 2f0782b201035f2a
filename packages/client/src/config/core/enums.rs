//! Dual-stack policy

use std::net::IpAddr;

/// Which address families take part in a race
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DualStackMode {
    /// Race IPv6 and IPv4 addresses
    #[default]
    Both,
    /// Race IPv4 addresses only
    Ipv4Only,
    /// Race IPv6 addresses only
    Ipv6Only,
}

impl DualStackMode {
    /// Returns true if `addr` may take part in a race under this policy.
    #[must_use]
    pub fn allows(self, addr: &IpAddr) -> bool {
        match self {
            DualStackMode::Both => true,
            DualStackMode::Ipv4Only => addr.is_ipv4(),
            DualStackMode::Ipv6Only => addr.is_ipv6(),
        }
    }

    /// Filters a resolved address list, preserving resolver order.
    #[must_use]
    pub fn filter(self, addrs: &[IpAddr]) -> Vec<IpAddr> {
        addrs.iter().copied().filter(|a| self.allows(a)).collect()
    }
}

#[cfg(test)]
mod tests {
    use std::net::{Ipv4Addr, Ipv6Addr};

    use super::*;

    fn mixed() -> Vec<IpAddr> {
        vec![
            IpAddr::V6(Ipv6Addr::LOCALHOST),
            IpAddr::V6(Ipv6Addr::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, 1)),
            IpAddr::V4(Ipv4Addr::LOCALHOST),
            IpAddr::V4(Ipv4Addr::new(192, 0, 2, 7)),
        ]
    }

    #[test]
    fn both_keeps_resolver_order() {
        assert_eq!(DualStackMode::Both.filter(&mixed()), mixed());
    }

    #[test]
    fn ipv4_only_drops_every_ipv6_entry() {
        let kept = DualStackMode::Ipv4Only.filter(&mixed());
        assert_eq!(kept.len(), 2);
        assert!(kept.iter().all(IpAddr::is_ipv4));
        assert_eq!(kept[0], IpAddr::V4(Ipv4Addr::LOCALHOST));
    }

    #[test]
    fn ipv6_only_drops_every_ipv4_entry() {
        let kept = DualStackMode::Ipv6Only.filter(&mixed());
        assert_eq!(kept.len(), 2);
        assert!(kept.iter().all(IpAddr::is_ipv6));
    }

    #[test]
    fn ipv6_only_on_ipv4_resolution_is_empty() {
        let v4 = vec![IpAddr::V4(Ipv4Addr::LOCALHOST)];
        assert!(DualStackMode::Ipv6Only.filter(&v4).is_empty());
    }
}
