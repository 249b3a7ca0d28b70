//! Match configuration with documented defaults
//!
//! Everything a caller can tune about a duel lives here. Combat rules
//! themselves (budget, health, streak multipliers) are fixed constants in
//! `combat::constants` and are not configurable.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::combat::allocation::DamageAllocation;
use crate::combat::choice::Choice;
use crate::core::error::ConfigError;

/// Configuration for a single match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Probability that the opponent plays the counter to its prediction
    ///
    /// 0.0 = always random, 1.0 = always counters the predicted move.
    /// The remaining probability mass falls back to a uniform random choice.
    pub difficulty: f32,

    /// Seed for the match RNG. `None` draws a seed from OS entropy.
    pub seed: Option<u64>,

    /// Fixed opponent allocation instead of a random split of the budget
    ///
    /// Re-applied on every restart.
    pub opponent_allocation: Option<DamageAllocation>,

    /// Opponent always plays this choice, bypassing the predictor's decision
    ///
    /// History is still recorded so prediction state stays observable.
    pub scripted_opponent: Option<Choice>,

    /// Start in (and return to) mode selection before damage setup
    pub mode_selection: bool,

    /// Frames of death animation between the lethal round and match over
    ///
    /// 0 skips the animation state entirely.
    pub death_animation_frames: u32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            difficulty: 0.7,
            seed: None,
            opponent_allocation: None,
            scripted_opponent: None,
            mode_selection: false,
            death_animation_frames: 0,
        }
    }
}

impl MatchConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Default config with a fixed seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Parse a config from TOML text and validate it
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: MatchConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.difficulty) {
            return Err(ConfigError::Invalid(format!(
                "difficulty ({}) must be within [0, 1]",
                self.difficulty
            )));
        }

        if let Some(allocation) = &self.opponent_allocation {
            if let Err(e) = allocation.check_budget() {
                return Err(ConfigError::Invalid(format!("opponent_allocation: {}", e)));
            }
        }

        Ok(())
    }
}

/// Load a match config from a TOML file
pub fn load_config(path: impl AsRef<Path>) -> Result<MatchConfig, ConfigError> {
    let text = fs::read_to_string(path.as_ref())?;
    let config = MatchConfig::from_toml_str(&text)?;
    tracing::debug!("Loaded match config from {}", path.as_ref().display());
    Ok(config)
}
