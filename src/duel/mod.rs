//! Match flow: the state machine that sequences a duel
//!
//! The presentation layer drives a `MatchController` with player intents and
//! renders `MatchView` snapshots. Quitting is a presentation concern.

pub mod controller;
pub mod state;
pub mod view;

pub use controller::MatchController;
pub use state::{GameMode, MatchState};
pub use view::{CombatantView, MatchView, RoundResult};
