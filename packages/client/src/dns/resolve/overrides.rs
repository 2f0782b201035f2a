//! Resolver with fixed hostname mappings
//!
//! Used for pinned deployments and tests. Unknown hosts fall through to an
//! optional inner resolver, otherwise they fail like an NXDOMAIN.

use std::collections::HashMap;
use std::io;
use std::net::IpAddr;
use std::sync::Arc;

use super::traits::{Resolve, Resolving};
use super::utilities::ip_literal;

#[derive(Clone, Default)]
pub struct StaticResolver {
    overrides: HashMap<String, Vec<IpAddr>>,
    fallback: Option<Arc<dyn Resolve>>,
}

impl StaticResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `host` to `addrs`. The order given is the race order.
    #[must_use]
    pub fn with_host<I>(mut self, host: impl Into<String>, addrs: I) -> Self
    where
        I: IntoIterator<Item = IpAddr>,
    {
        self.overrides
            .insert(host.into().to_ascii_lowercase(), addrs.into_iter().collect());
        self
    }

    /// Resolve unmapped hosts with `resolver`.
    #[must_use]
    pub fn with_fallback(mut self, resolver: Arc<dyn Resolve>) -> Self {
        self.fallback = Some(resolver);
        self
    }
}

impl Resolve for StaticResolver {
    fn resolve<'a>(&'a self, host: &'a str) -> Resolving<'a> {
        Box::pin(async move {
            if let Some(addrs) = self.overrides.get(&host.to_ascii_lowercase()) {
                return Ok(addrs.clone());
            }
            if let Some(ip) = ip_literal(host) {
                return Ok(vec![ip]);
            }
            match &self.fallback {
                Some(resolver) => resolver.resolve(host).await,
                None => Err(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("no address mapping for {host}"),
                )),
            }
        })
    }
}

impl std::fmt::Debug for StaticResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticResolver")
            .field("overrides", &self.overrides)
            .field("fallback", &self.fallback.is_some())
            .finish()
    }
}
