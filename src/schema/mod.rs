//! Schema module - Configuration and rule table types.

mod config;
mod evolution;
mod ruleset;

pub use config::*;
pub use evolution::*;
pub use ruleset::*;
