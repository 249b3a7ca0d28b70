//! Match state machine states
//!
//! ModeSelection → Setup → Playing ⇄ RoundResult → (DeathAnimation →) MatchOver.
//! ModeSelection and DeathAnimation only appear when enabled in `MatchConfig`.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::types::Side;

/// Where the match currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchState {
    /// Choosing practice or story mode
    ModeSelection,
    /// Human distributes the damage budget
    Setup,
    /// Waiting for the human's move
    Playing,
    /// Showing the outcome of a non-lethal round
    RoundResult,
    /// Presentation delay after a lethal round
    DeathAnimation { defeated: Side, frame: u32 },
    /// Terminal until restart
    MatchOver { defeated: Side },
}

impl MatchState {
    pub fn name(&self) -> &'static str {
        match self {
            MatchState::ModeSelection => "ModeSelection",
            MatchState::Setup => "Setup",
            MatchState::Playing => "Playing",
            MatchState::RoundResult => "RoundResult",
            MatchState::DeathAnimation { .. } => "DeathAnimation",
            MatchState::MatchOver { .. } => "MatchOver",
        }
    }

    /// Lethal round already resolved
    pub fn is_finished(&self) -> bool {
        matches!(
            self,
            MatchState::DeathAnimation { .. } | MatchState::MatchOver { .. }
        )
    }

    pub fn defeated(&self) -> Option<Side> {
        match self {
            MatchState::DeathAnimation { defeated, .. } | MatchState::MatchOver { defeated } => {
                Some(*defeated)
            }
            _ => None,
        }
    }
}

impl fmt::Display for MatchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Game mode picked on the home screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    Practice,
    Story,
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameMode::Practice => write!(f, "Practice"),
            GameMode::Story => write!(f, "Story"),
        }
    }
}
