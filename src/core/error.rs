use thiserror::Error;

use crate::core::types::Side;

/// Rejected damage allocation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AllocationError {
    #[error("Damage allocation total {total} exceeds budget {budget}")]
    BudgetExceeded { total: u32, budget: u32 },
}

/// Operation not valid for the current match state
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    #[error("Cannot {operation} while in state {state}")]
    WrongState {
        operation: &'static str,
        state: &'static str,
    },

    #[error("{0} has already chosen this round")]
    ChoiceAlreadySet(Side),

    #[error("Mode selection is disabled for this match")]
    ModeSelectionDisabled,
}

/// Configuration could not be loaded or is inconsistent
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Error, Debug)]
pub enum DuelError {
    #[error(transparent)]
    Allocation(#[from] AllocationError),

    #[error(transparent)]
    State(#[from] StateError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DuelError>;
