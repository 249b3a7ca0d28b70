//! Damage calculation
//!
//! final = floor(base × special × streak). Multipliers default to 1.0;
//! the loser's health is clamped by the caller, never here.

use serde::{Deserialize, Serialize};

use crate::combat::choice::Choice;
use crate::combat::constants::SCISSORS_SPECIAL_MULTIPLIER;

/// Outgoing multiplier from the special ability
///
/// Only an armed Scissors win boosts damage. Armed Rock earns a shield
/// instead and armed Paper has no damage effect.
pub fn special_multiplier(choice: Choice, armed: bool) -> f32 {
    match (choice, armed) {
        (Choice::Scissors, true) => SCISSORS_SPECIAL_MULTIPLIER,
        _ => 1.0,
    }
}

/// Final integer damage for a winning hit
pub fn damage(base: u32, special_multiplier: f32, streak_multiplier: f32) -> u32 {
    let raw = base as f32 * special_multiplier * streak_multiplier;
    raw.max(0.0).floor() as u32
}

/// How a round's damage was put together, kept for display
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DamageBreakdown {
    pub base: u32,
    pub special_multiplier: f32,
    pub streak_multiplier: f32,
    /// Damage leaving the winner
    pub dealt: u32,
    /// Damage the loser actually lost after any shield
    pub taken: u32,
}

impl DamageBreakdown {
    pub fn compute(base: u32, special_multiplier: f32, streak_multiplier: f32) -> Self {
        let dealt = damage(base, special_multiplier, streak_multiplier);
        Self {
            base,
            special_multiplier,
            streak_multiplier,
            dealt,
            taken: dealt,
        }
    }

    /// The loser's shield absorbed part of the hit
    pub fn was_shielded(&self) -> bool {
        self.taken < self.dealt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_damage_is_base() {
        assert_eq!(damage(7, 1.0, 1.0), 7);
        assert_eq!(damage(0, 1.5, 2.0), 0);
    }

    #[test]
    fn test_damage_floors() {
        // 5 × 1.5 = 7.5
        assert_eq!(damage(5, 1.5, 1.0), 7);
        // 5 × 1.5 × 1.5 = 11.25
        assert_eq!(damage(5, 1.5, 1.5), 11);
        assert_eq!(damage(5, 1.0, 2.0), 10);
    }

    #[test]
    fn test_only_armed_scissors_boosts() {
        assert_eq!(special_multiplier(Choice::Scissors, true), 1.5);
        assert_eq!(special_multiplier(Choice::Scissors, false), 1.0);
        assert_eq!(special_multiplier(Choice::Rock, true), 1.0);
        assert_eq!(special_multiplier(Choice::Paper, true), 1.0);
    }

    #[test]
    fn test_breakdown_starts_unshielded() {
        let breakdown = DamageBreakdown::compute(8, 1.5, 1.0);
        assert_eq!(breakdown.dealt, 12);
        assert_eq!(breakdown.taken, 12);
        assert!(!breakdown.was_shielded());
    }
}
