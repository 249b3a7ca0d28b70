//! Adaptive computer opponent
//!
//! The opponent is a plain `Combatant` on the table; this module only owns
//! the move history and the prediction model the controller consults for
//! the opponent side.

pub mod history;
pub mod predictor;

pub use history::{PredictionHistory, Ring, RoundRecord};
pub use predictor::{Decision, DecisionBranch, Distribution, Predictor};
