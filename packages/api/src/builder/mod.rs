//! `Dial` builder modules
//!
//! - `core`: the builder struct and connection settings
//! - `proxy`: proxy routing
//! - `connect`: turning the settings into a connection

pub mod connect;
pub mod core;
pub mod proxy;

pub use self::core::Dial;
