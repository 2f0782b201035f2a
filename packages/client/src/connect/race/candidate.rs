//! Race candidates

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

/// One address taking part in a race.
///
/// `position` is the index in resolver order after dual-stack filtering and
/// `delay` is the stagger bound that applies to the candidate after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub address: SocketAddr,
    pub position: usize,
    pub delay: Duration,
}

impl Candidate {
    /// Lay out candidates for `addrs` in order, with `delay_i = (i + 1) * fallback_delay`.
    pub fn plan(addrs: &[IpAddr], port: u16, fallback_delay: Duration) -> Vec<Candidate> {
        addrs
            .iter()
            .enumerate()
            .map(|(position, ip)| {
                let step = u32::try_from(position + 1).unwrap_or(u32::MAX);
                Candidate {
                    address: SocketAddr::new(*ip, port),
                    position,
                    delay: fallback_delay.saturating_mul(step),
                }
            })
            .collect()
    }
}
