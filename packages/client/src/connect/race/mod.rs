//! Connection racing
//!
//! `race` spreads connection attempts over a list of resolved addresses and
//! keeps only the first socket to connect.

pub mod candidate;
pub mod gate;
mod outcome;
mod racer;
pub mod scheduler;

pub use candidate::Candidate;
pub use gate::Gate;
pub use scheduler::{RaceSettings, race};
