//! Committed damage allocation
//!
//! Each side splits a fixed budget across the three choices before play.
//! Winning with a choice deals the points committed to it.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::combat::choice::Choice;
use crate::combat::constants::DAMAGE_BUDGET;
use crate::core::error::AllocationError;

/// Damage points committed to each choice (sum never exceeds the budget)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DamageAllocation {
    pub scissors: u32,
    pub rock: u32,
    pub paper: u32,
}

impl DamageAllocation {
    /// Build an allocation, rejecting any split over the budget
    pub fn new(scissors: u32, rock: u32, paper: u32) -> Result<Self, AllocationError> {
        let allocation = Self {
            scissors,
            rock,
            paper,
        };
        allocation.check_budget()?;
        Ok(allocation)
    }

    /// Nothing committed (state before setup)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Random split spending the whole budget
    ///
    /// Scissors draws from the full budget, Rock from what remains,
    /// Paper takes the rest.
    pub fn random_full_budget<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let scissors = rng.gen_range(0..=DAMAGE_BUDGET);
        let rock = rng.gen_range(0..=DAMAGE_BUDGET - scissors);
        let paper = DAMAGE_BUDGET - scissors - rock;
        Self {
            scissors,
            rock,
            paper,
        }
    }

    /// Points committed to a choice
    pub fn get(&self, choice: Choice) -> u32 {
        match choice {
            Choice::Scissors => self.scissors,
            Choice::Rock => self.rock,
            Choice::Paper => self.paper,
        }
    }

    /// Sum across all three choices (saturating, so oversized input still fails the check)
    pub fn total(&self) -> u32 {
        self.scissors
            .saturating_add(self.rock)
            .saturating_add(self.paper)
    }

    pub fn check_budget(&self) -> Result<(), AllocationError> {
        let total = self.total();
        if total > DAMAGE_BUDGET {
            return Err(AllocationError::BudgetExceeded {
                total,
                budget: DAMAGE_BUDGET,
            });
        }
        Ok(())
    }
}
