//! Read-only projections handed to the presentation layer

use serde::{Deserialize, Serialize};

use crate::combat::allocation::DamageAllocation;
use crate::combat::choice::Choice;
use crate::combat::combatant::Combatant;
use crate::combat::damage::DamageBreakdown;
use crate::core::types::{RoundNumber, Side};
use crate::duel::state::{GameMode, MatchState};
use crate::opponent::predictor::DecisionBranch;

/// Outcome of the most recent round (dropped when the next round starts)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundResult {
    pub round: RoundNumber,
    pub human_choice: Choice,
    pub opponent_choice: Choice,
    /// None for a draw
    pub winner: Option<Side>,
    /// Health the loser lost (0 on a draw)
    pub damage: u32,
    pub breakdown: Option<DamageBreakdown>,
    /// Winner's Rock streak armed a shield for them this round
    pub shield_armed: bool,
}

impl RoundResult {
    pub fn is_draw(&self) -> bool {
        self.winner.is_none()
    }
}

/// One combatant as the presentation layer sees it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatantView {
    pub side: Side,
    pub health: u32,
    pub max_health: u32,
    pub allocation: DamageAllocation,
    pub current_choice: Option<Choice>,
    pub consecutive_choices: u32,
    pub special_ability_active: bool,
    pub consecutive_wins: u32,
    pub consecutive_losses: u32,
    pub pending_bonus: Option<f32>,
    pub defense_bonus: bool,
}

impl From<&Combatant> for CombatantView {
    fn from(c: &Combatant) -> Self {
        Self {
            side: c.side(),
            health: c.health(),
            max_health: c.max_health(),
            allocation: *c.allocation(),
            current_choice: c.current_choice(),
            consecutive_choices: c.consecutive_choices(),
            special_ability_active: c.special_ability_active(),
            consecutive_wins: c.consecutive_wins(),
            consecutive_losses: c.consecutive_losses(),
            pending_bonus: c.pending_bonus(),
            defense_bonus: c.defense_bonus(),
        }
    }
}

/// Full read-only snapshot of a match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchView {
    pub state: MatchState,
    pub mode: Option<GameMode>,
    pub round: RoundNumber,
    pub human: CombatantView,
    pub opponent: CombatantView,
    pub last_result: Option<RoundResult>,
    /// Why the opponent played what it did (display only)
    pub opponent_rationale: Option<String>,
    pub opponent_branch: Option<DecisionBranch>,
    pub winner: Option<Side>,
    pub animation_progress: f32,
}

impl MatchView {
    pub fn combatant(&self, side: Side) -> &CombatantView {
        match side {
            Side::Human => &self.human,
            Side::Opponent => &self.opponent,
        }
    }
}
