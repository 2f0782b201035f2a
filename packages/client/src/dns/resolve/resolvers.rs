//! Resolver backed by the operating system

use std::collections::HashSet;
use std::io;

use tracing::debug;

use super::traits::{Resolve, Resolving};
use super::utilities::{ip_literal, sort_addresses_by_preference};

/// Resolves through `getaddrinfo` on tokio's blocking pool.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemResolver;

impl Resolve for SystemResolver {
    fn resolve<'a>(&'a self, host: &'a str) -> Resolving<'a> {
        Box::pin(async move {
            // Fast path for IP addresses
            if let Some(ip) = ip_literal(host) {
                return Ok(vec![ip]);
            }

            if host.is_empty() {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "empty hostname",
                ));
            }

            let mut addrs: Vec<_> = tokio::net::lookup_host((host, 0))
                .await?
                .map(|sa| sa.ip())
                .collect();
            let mut seen = HashSet::new();
            addrs.retain(|a| seen.insert(*a));
            sort_addresses_by_preference(&mut addrs);

            debug!(host, count = addrs.len(), "resolved host");
            Ok(addrs)
        })
    }
}
