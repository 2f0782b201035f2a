//! Hostname resolution for the racing layer
//!
//! Resolvers hand back a plain ordered list of IP addresses. The order is
//! the race order, so every resolver here puts IPv6 entries ahead of IPv4
//! entries to give IPv6 its Happy Eyeballs head start.

pub mod overrides;
pub mod resolvers;
pub mod traits;
pub mod utilities;

pub use overrides::StaticResolver;
pub use resolvers::SystemResolver;
pub use traits::{Resolve, Resolving};
pub use utilities::{ip_literal, sort_addresses_by_preference};
