//! DNS resolution

pub use resolve::{Resolve, Resolving, StaticResolver, SystemResolver};

pub mod resolve;
