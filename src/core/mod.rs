pub mod config;
pub mod error;
pub mod types;

pub use config::{load_config, MatchConfig};
pub use error::{AllocationError, ConfigError, DuelError, Result, StateError};
pub use types::{RoundNumber, Side};
