//! Adaptive opponent
//!
//! Predicts the human's next move from recorded history and plays the
//! counter with probability `difficulty`, falling back to a uniform random
//! move otherwise.
//!
//! The prediction blends four distributions with fixed weights:
//! - recent pattern (last 3 human moves)          0.4
//! - what the human plays right after a win       0.3
//! - what the human plays right after a loss      0.2
//! - uniform                                      0.1

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::combat::choice::Choice;
use crate::core::types::Side;
use crate::opponent::history::{PredictionHistory, RoundRecord};

pub const RECENT_WEIGHT: f32 = 0.4;
pub const POST_WIN_WEIGHT: f32 = 0.3;
pub const POST_LOSS_WEIGHT: f32 = 0.2;
pub const UNIFORM_WEIGHT: f32 = 0.1;

/// Human moves needed before the opponent predicts at all
pub const MIN_MOVES_TO_PREDICT: usize = 2;
/// Window for the recent-pattern distribution
pub const RECENT_WINDOW: usize = 3;
/// Matching rounds needed before a post-win/post-loss distribution is trusted
pub const MIN_FOLLOW_UPS: usize = 2;

pub const DEFAULT_DIFFICULTY: f32 = 0.7;

/// Probability per choice, indexed by `Choice::index`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Distribution([f32; 3]);

impl Distribution {
    pub fn uniform() -> Self {
        Self([1.0 / 3.0; 3])
    }

    /// Relative frequencies of the given moves; uniform when there are none
    pub fn from_moves<'a>(moves: impl IntoIterator<Item = &'a Choice>) -> Self {
        let mut counts = [0u32; 3];
        let mut total = 0u32;
        for choice in moves {
            counts[choice.index()] += 1;
            total += 1;
        }
        if total == 0 {
            return Self::uniform();
        }
        Self(counts.map(|count| count as f32 / total as f32))
    }

    pub fn get(&self, choice: Choice) -> f32 {
        self.0[choice.index()]
    }

    /// Most likely choice; ties go to the earlier of Scissors, Rock, Paper
    pub fn most_likely(&self) -> Choice {
        let mut best = Choice::Scissors;
        for &choice in Choice::all() {
            if self.get(choice) > self.get(best) {
                best = choice;
            }
        }
        best
    }

    /// Weighted sum of distributions
    pub fn blend(parts: &[(f32, Distribution)]) -> Self {
        let mut out = [0.0f32; 3];
        for (weight, dist) in parts {
            for (slot, p) in out.iter_mut().zip(dist.0.iter()) {
                *slot += weight * p;
            }
        }
        Self(out)
    }

    pub fn total(&self) -> f32 {
        self.0.iter().sum()
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "S {:.2} / R {:.2} / P {:.2}",
            self.0[0], self.0[1], self.0[2]
        )
    }
}

/// Which path produced the opponent's move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecisionBranch {
    /// Fewer than two human moves on record
    InsufficientData,
    /// Countered the predicted move
    Counter,
    /// Difficulty roll failed, played at random
    Random,
    /// Move fixed by configuration
    Scripted,
}

/// Opponent move plus a display-only explanation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub choice: Choice,
    pub branch: DecisionBranch,
    /// Predicted human move, when a prediction was made
    pub predicted: Option<Choice>,
    pub rationale: String,
}

/// Recent-pattern distribution over the human's last three moves
pub fn recent_pattern(history: &PredictionHistory) -> Distribution {
    let moves = history.human_moves();
    if moves.len() < RECENT_WINDOW {
        return Distribution::uniform();
    }
    Distribution::from_moves(moves.last_n(RECENT_WINDOW))
}

/// Human moves in the rounds that immediately follow rounds matching `filter`
///
/// Uniform when fewer than two rounds match, or when none of the matching
/// rounds has a successor on record yet.
fn follow_up_pattern(
    history: &PredictionHistory,
    filter: impl Fn(&RoundRecord) -> bool,
) -> Distribution {
    let rounds: Vec<&RoundRecord> = history.rounds().iter().collect();
    let matching = rounds.iter().filter(|r| filter(**r)).count();
    if matching < MIN_FOLLOW_UPS {
        return Distribution::uniform();
    }

    let follow_ups: Vec<&Choice> = rounds
        .windows(2)
        .filter(|pair| filter(pair[0]))
        .map(|pair| &pair[1].human)
        .collect();
    if follow_ups.is_empty() {
        return Distribution::uniform();
    }
    Distribution::from_moves(follow_ups)
}

/// What the human tends to play after winning a round
pub fn post_win_pattern(history: &PredictionHistory) -> Distribution {
    follow_up_pattern(history, RoundRecord::human_won)
}

/// What the human tends to play after losing a round
pub fn post_loss_pattern(history: &PredictionHistory) -> Distribution {
    follow_up_pattern(history, RoundRecord::human_lost)
}

/// History-driven move selection for the opponent side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Predictor {
    history: PredictionHistory,
    difficulty: f32,
}

impl Predictor {
    pub fn new(difficulty: f32) -> Self {
        Self {
            history: PredictionHistory::new(),
            difficulty: difficulty.clamp(0.0, 1.0),
        }
    }

    pub fn history(&self) -> &PredictionHistory {
        &self.history
    }

    pub fn difficulty(&self) -> f32 {
        self.difficulty
    }

    /// Set difficulty, clamped into [0, 1]
    pub fn set_difficulty(&mut self, difficulty: f32) {
        self.difficulty = difficulty.clamp(0.0, 1.0);
    }

    /// Append a finished round
    pub fn record_round(&mut self, human: Choice, opponent: Choice, winner: Option<Side>) {
        self.history.record(RoundRecord {
            human,
            opponent,
            winner,
        });
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }

    /// Blended distribution over the human's next move
    pub fn predict(&self) -> Distribution {
        Distribution::blend(&[
            (RECENT_WEIGHT, recent_pattern(&self.history)),
            (POST_WIN_WEIGHT, post_win_pattern(&self.history)),
            (POST_LOSS_WEIGHT, post_loss_pattern(&self.history)),
            (UNIFORM_WEIGHT, Distribution::uniform()),
        ])
    }

    /// Pick the opponent's move for the coming round
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Decision {
        if self.history.human_moves().len() < MIN_MOVES_TO_PREDICT {
            let choice = random_choice(rng);
            tracing::debug!(%choice, "predictor: not enough data, random move");
            return Decision {
                choice,
                branch: DecisionBranch::InsufficientData,
                predicted: None,
                rationale: "Not enough data yet, choosing at random".to_string(),
            };
        }

        let distribution = self.predict();
        let predicted = distribution.most_likely();

        if rng.gen::<f32>() < self.difficulty {
            let choice = predicted.counter();
            tracing::debug!(%distribution, %predicted, %choice, "predictor: countering");
            Decision {
                choice,
                branch: DecisionBranch::Counter,
                predicted: Some(predicted),
                rationale: format!("Expecting {}, answering with {}", predicted, choice),
            }
        } else {
            let choice = random_choice(rng);
            tracing::debug!(%distribution, %predicted, %choice, "predictor: random roll");
            Decision {
                choice,
                branch: DecisionBranch::Random,
                predicted: Some(predicted),
                rationale: "Choosing at random".to_string(),
            }
        }
    }
}

impl Default for Predictor {
    fn default() -> Self {
        Self::new(DEFAULT_DIFFICULTY)
    }
}

/// Uniformly random move
pub fn random_choice<R: Rng + ?Sized>(rng: &mut R) -> Choice {
    Choice::all()[rng.gen_range(0..Choice::all().len())]
}
