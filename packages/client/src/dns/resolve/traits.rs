//! DNS resolution traits and type aliases

use std::io;
use std::net::IpAddr;

use futures::future::BoxFuture;

/// Future returned by [`Resolve::resolve`].
pub type Resolving<'a> = BoxFuture<'a, io::Result<Vec<IpAddr>>>;

/// Address resolver consumed by the connector.
///
/// Implementations return every address for `host` in the order they
/// should be raced. An empty list is treated as a resolution failure.
pub trait Resolve: Send + Sync + 'static {
    fn resolve<'a>(&'a self, host: &'a str) -> Resolving<'a>;
}
