//! Per-side combat state
//!
//! Health, committed allocation, the current move, and the streak state that
//! drives special abilities and banked bonuses. Only the match controller
//! mutates a combatant; everything else reads it.

use serde::{Deserialize, Serialize};

use crate::combat::allocation::DamageAllocation;
use crate::combat::choice::Choice;
use crate::combat::constants::{
    LOSS_STREAK_MULTIPLIER, LOSS_STREAK_THRESHOLD, MAX_HEALTH, SPECIAL_STREAK_THRESHOLD,
    WIN_STREAK_MULTIPLIER, WIN_STREAK_THRESHOLD,
};
use crate::core::types::Side;

/// One side of the duel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combatant {
    side: Side,
    health: u32,
    allocation: DamageAllocation,
    /// Move for the round in progress (None between rounds)
    current_choice: Option<Choice>,
    /// Most recent move, kept across rounds for streak detection
    last_choice: Option<Choice>,
    /// Rounds in a row `last_choice` has been played
    consecutive_choices: u32,
    special_ability_active: bool,
    consecutive_wins: u32,
    consecutive_losses: u32,
    /// Banked multiplier applied to the next winning hit
    pending_bonus: Option<f32>,
    /// One-shot shield halving the next incoming hit
    defense_bonus: bool,
}

impl Combatant {
    pub fn new(side: Side) -> Self {
        Self {
            side,
            health: MAX_HEALTH,
            allocation: DamageAllocation::empty(),
            current_choice: None,
            last_choice: None,
            consecutive_choices: 0,
            special_ability_active: false,
            consecutive_wins: 0,
            consecutive_losses: 0,
            pending_bonus: None,
            defense_bonus: false,
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn max_health(&self) -> u32 {
        MAX_HEALTH
    }

    pub fn health_percentage(&self) -> f32 {
        self.health as f32 / MAX_HEALTH as f32
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn allocation(&self) -> &DamageAllocation {
        &self.allocation
    }

    pub fn current_choice(&self) -> Option<Choice> {
        self.current_choice
    }

    pub fn last_choice(&self) -> Option<Choice> {
        self.last_choice
    }

    pub fn consecutive_choices(&self) -> u32 {
        self.consecutive_choices
    }

    pub fn special_ability_active(&self) -> bool {
        self.special_ability_active
    }

    pub fn consecutive_wins(&self) -> u32 {
        self.consecutive_wins
    }

    pub fn consecutive_losses(&self) -> u32 {
        self.consecutive_losses
    }

    pub fn pending_bonus(&self) -> Option<f32> {
        self.pending_bonus
    }

    pub fn defense_bonus(&self) -> bool {
        self.defense_bonus
    }

    /// Multiplier the banked bonus contributes to the next winning hit
    pub fn streak_multiplier(&self) -> f32 {
        self.pending_bonus.unwrap_or(1.0)
    }

    pub(crate) fn set_allocation(&mut self, allocation: DamageAllocation) {
        self.allocation = allocation;
    }

    /// Commit this round's move and update the same-choice streak
    pub(crate) fn set_choice(&mut self, choice: Choice) {
        if self.last_choice == Some(choice) {
            self.consecutive_choices += 1;
        } else {
            self.consecutive_choices = 1;
        }
        self.last_choice = Some(choice);
        self.special_ability_active = self.consecutive_choices >= SPECIAL_STREAK_THRESHOLD;
        self.current_choice = Some(choice);
    }

    /// Clear the round's move; streak state carries over
    pub(crate) fn reset_choice(&mut self) {
        self.current_choice = None;
    }

    /// Apply an incoming hit, returning the damage left after any shield
    ///
    /// An armed shield halves a non-zero hit (floor, minimum 1) and is spent.
    /// A zero hit leaves it armed, since the minimum of 1 would otherwise turn
    /// no damage into some.
    /// Health never drops below zero.
    pub(crate) fn take_damage(&mut self, damage: u32) -> u32 {
        let incoming = if self.defense_bonus && damage > 0 {
            self.defense_bonus = false;
            (damage / 2).max(1)
        } else {
            damage
        };
        let lost = incoming.min(self.health);
        self.health -= lost;
        incoming
    }

    pub(crate) fn record_win(&mut self) {
        self.consecutive_wins += 1;
        self.consecutive_losses = 0;
        if self.consecutive_wins == WIN_STREAK_THRESHOLD {
            self.pending_bonus = Some(WIN_STREAK_MULTIPLIER);
        }
    }

    /// Count a loss; a third loss in a row banks a bonus for the next win
    pub(crate) fn record_loss(&mut self) {
        self.consecutive_losses += 1;
        self.consecutive_wins = 0;
        if self.consecutive_losses == LOSS_STREAK_THRESHOLD {
            self.pending_bonus = Some(LOSS_STREAK_MULTIPLIER);
        }
    }

    pub(crate) fn consume_bonus(&mut self) {
        self.pending_bonus = None;
    }

    /// Rock special: shield this combatant's next incoming hit
    pub(crate) fn arm_defense(&mut self) {
        self.defense_bonus = true;
    }

    /// Back to full health with no streaks, choices, shield or allocation
    pub(crate) fn reset(&mut self) {
        *self = Self::new(self.side);
    }
}
