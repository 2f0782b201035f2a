//! Connection configuration
//!
//! `ConnectConfig` carries every knob the racing layer and the sequencer
//! read: per-attempt timeout, Happy Eyeballs fallback delay, dual-stack
//! policy, hostname verification and SNI override.

pub mod core;
pub mod validation;

pub use self::core::{ConnectConfig, DualStackMode};
pub use validation::{ConfigResult, ConfigurationError};
