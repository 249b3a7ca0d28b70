//! Bounded move history for the adaptive opponent
//!
//! Three parallel rings of the most recent rounds. Appending past capacity
//! evicts the oldest entry. Analysis only ever reads from here.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::combat::choice::Choice;
use crate::combat::constants::HISTORY_CAPACITY;
use crate::core::types::Side;

/// One completed round as the opponent remembers it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub human: Choice,
    pub opponent: Choice,
    /// None for a draw
    pub winner: Option<Side>,
}

impl RoundRecord {
    pub fn human_won(&self) -> bool {
        self.winner == Some(Side::Human)
    }

    pub fn human_lost(&self) -> bool {
        self.winner == Some(Side::Opponent)
    }
}

/// Fixed-capacity FIFO ring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ring<T> {
    items: VecDeque<T>,
    capacity: usize,
}

impl<T> Ring<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, item: T) {
        if self.capacity == 0 {
            return;
        }
        if self.items.len() == self.capacity {
            self.items.pop_front();
        }
        self.items.push_back(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Oldest first
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator {
        self.items.iter()
    }

    /// The most recent `n` entries, oldest first
    pub fn last_n(&self, n: usize) -> impl Iterator<Item = &T> {
        let skip = self.items.len().saturating_sub(n);
        self.items.iter().skip(skip)
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

/// Everything the predictor knows about the current match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionHistory {
    human: Ring<Choice>,
    opponent: Ring<Choice>,
    rounds: Ring<RoundRecord>,
}

impl PredictionHistory {
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            human: Ring::with_capacity(capacity),
            opponent: Ring::with_capacity(capacity),
            rounds: Ring::with_capacity(capacity),
        }
    }

    /// Append a completed round to all three rings
    pub fn record(&mut self, record: RoundRecord) {
        self.human.push(record.human);
        self.opponent.push(record.opponent);
        self.rounds.push(record);
    }

    pub fn human_moves(&self) -> &Ring<Choice> {
        &self.human
    }

    pub fn opponent_moves(&self) -> &Ring<Choice> {
        &self.opponent
    }

    pub fn rounds(&self) -> &Ring<RoundRecord> {
        &self.rounds
    }

    pub fn clear(&mut self) {
        self.human.clear();
        self.opponent.clear();
        self.rounds.clear();
    }
}

impl Default for PredictionHistory {
    fn default() -> Self {
        Self::new()
    }
}
