//! Combat rule constants - all fixed values in one place
//!
//! These are rules of the game, not tuning knobs. `MatchConfig` never overrides them.

// Health and budget
pub const MAX_HEALTH: u32 = 20;
pub const DAMAGE_BUDGET: u32 = 20;

// Special ability: same choice played this many rounds running
pub const SPECIAL_STREAK_THRESHOLD: u32 = 2;
pub const SCISSORS_SPECIAL_MULTIPLIER: f32 = 1.5;

// Streak bonuses (banked, consumed on the next win)
pub const WIN_STREAK_THRESHOLD: u32 = 3;
pub const WIN_STREAK_MULTIPLIER: f32 = 1.5;
pub const LOSS_STREAK_THRESHOLD: u32 = 3;
pub const LOSS_STREAK_MULTIPLIER: f32 = 2.0;

// Opponent history window
pub const HISTORY_CAPACITY: usize = 10;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_matches_health() {
        // A single fully-committed hit can end the match
        assert_eq!(DAMAGE_BUDGET, MAX_HEALTH);
    }

    #[test]
    fn test_multipliers_reasonable() {
        assert!(SCISSORS_SPECIAL_MULTIPLIER > 1.0);
        assert!(LOSS_STREAK_MULTIPLIER > WIN_STREAK_MULTIPLIER);
        assert!(SPECIAL_STREAK_THRESHOLD >= 2);
    }
}
