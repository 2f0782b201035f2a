//! Connector builder
//!
//! - [`types`] - the `ConnectorBuilder` struct and its setters
//! - [`build`] - validation and connector creation

pub mod build;
pub mod types;

pub use types::ConnectorBuilder;
