//! Configuration: environment-backed settings plus the constants
//! (defaults, status values, response messages) shared across layers.

mod constants;
mod settings;

pub use constants::*;
pub use settings::Config;
