//! Core connection configuration types and default implementations
//!
//! - `types`: the `ConnectConfig` struct
//! - `enums`: `DualStackMode` and its address filter
//! - `defaults`: defaults tuned for WebSocket endpoints
//! - `builders`: fluent `with_*` methods

pub mod builders;
pub mod defaults;
pub mod enums;
pub mod types;

pub use enums::DualStackMode;
pub use types::ConnectConfig;
