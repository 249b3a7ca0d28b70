//! Match controller
//!
//! Owns both combatants, the opponent's predictor and the match RNG, and is
//! the only code that mutates any of them. Each round runs in a fixed order:
//! resolve → modifiers → damage → apply → streaks/bonuses → history →
//! termination check → state transition.
//!
//! Every public mutator validates before touching state, so a rejected call
//! leaves the match exactly as it was.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::combat::allocation::DamageAllocation;
use crate::combat::choice::{resolve, Choice, Winner};
use crate::combat::combatant::Combatant;
use crate::combat::damage::{special_multiplier, DamageBreakdown};
use crate::core::config::MatchConfig;
use crate::core::error::{ConfigError, Result, StateError};
use crate::core::types::{RoundNumber, Side};
use crate::duel::state::{GameMode, MatchState};
use crate::duel::view::{CombatantView, MatchView, RoundResult};
use crate::opponent::predictor::{Decision, DecisionBranch, Predictor};

pub struct MatchController {
    config: MatchConfig,
    state: MatchState,
    mode: Option<GameMode>,
    round: RoundNumber,
    human: Combatant,
    opponent: Combatant,
    predictor: Predictor,
    rng: ChaCha8Rng,
    last_result: Option<RoundResult>,
    last_decision: Option<Decision>,
}

impl MatchController {
    /// Create a match from a validated config
    pub fn new(config: MatchConfig) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Ok(Self::with_rng(config, rng))
    }

    /// Create a match drawing from a caller-supplied RNG
    ///
    /// `config.seed` is ignored; the config is assumed valid.
    pub fn with_rng(config: MatchConfig, rng: ChaCha8Rng) -> Self {
        let mut controller = Self {
            state: MatchState::Setup,
            mode: None,
            round: RoundNumber::first(),
            human: Combatant::new(Side::Human),
            opponent: Combatant::new(Side::Opponent),
            predictor: Predictor::new(config.difficulty),
            rng,
            last_result: None,
            last_decision: None,
            config,
        };
        controller.reset_match();
        tracing::info!(
            difficulty = controller.predictor.difficulty(),
            "New match ready"
        );
        controller
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn state(&self) -> MatchState {
        self.state
    }

    pub fn mode(&self) -> Option<GameMode> {
        self.mode
    }

    pub fn round(&self) -> RoundNumber {
        self.round
    }

    pub fn human(&self) -> &Combatant {
        &self.human
    }

    pub fn opponent(&self) -> &Combatant {
        &self.opponent
    }

    pub fn combatant(&self, side: Side) -> &Combatant {
        match side {
            Side::Human => &self.human,
            Side::Opponent => &self.opponent,
        }
    }

    pub fn predictor(&self) -> &Predictor {
        &self.predictor
    }

    pub fn last_result(&self) -> Option<&RoundResult> {
        self.last_result.as_ref()
    }

    pub fn last_decision(&self) -> Option<&Decision> {
        self.last_decision.as_ref()
    }

    /// Pick practice or story mode and move on to damage setup
    pub fn select_mode(&mut self, mode: GameMode) -> std::result::Result<(), StateError> {
        if self.state != MatchState::ModeSelection {
            return Err(self.reject("select a mode"));
        }
        self.mode = Some(mode);
        self.state = MatchState::Setup;
        tracing::info!(%mode, "Game mode selected");
        Ok(())
    }

    /// Abandon the match and return to mode selection
    pub fn go_home(&mut self) -> std::result::Result<(), StateError> {
        if !self.config.mode_selection {
            tracing::warn!("Rejected go_home: mode selection disabled");
            return Err(StateError::ModeSelectionDisabled);
        }
        self.reset_match();
        tracing::info!("Returned to mode selection");
        Ok(())
    }

    /// Commit the human's damage allocation and start play
    pub fn submit_allocation(&mut self, scissors: u32, rock: u32, paper: u32) -> Result<()> {
        if self.state != MatchState::Setup {
            return Err(self.reject("submit an allocation").into());
        }
        let allocation = DamageAllocation::new(scissors, rock, paper).map_err(|e| {
            tracing::warn!(%e, "Rejected allocation");
            e
        })?;

        self.human.set_allocation(allocation);
        self.state = MatchState::Playing;
        tracing::info!(
            human = ?allocation,
            opponent = ?self.opponent.allocation(),
            "Allocations locked, match started"
        );
        Ok(())
    }

    /// Commit the human's move; the opponent answers and the round resolves
    ///
    /// The opponent decides from history only, never from the move just submitted.
    pub fn submit_choice(&mut self, choice: Choice) -> std::result::Result<(), StateError> {
        if self.state != MatchState::Playing {
            return Err(self.reject("submit a choice"));
        }
        // Unreachable while rounds resolve inside this call; holds the
        // one-choice-per-round contract if the opponent ever answers later.
        if self.human.current_choice().is_some() {
            tracing::warn!("Rejected choice: human already chose");
            return Err(StateError::ChoiceAlreadySet(Side::Human));
        }

        self.human.set_choice(choice);
        let decision = self.opponent_decision();
        self.opponent.set_choice(decision.choice);
        self.last_decision = Some(decision);
        self.resolve_round();
        Ok(())
    }

    /// Leave the round result screen and start the next round
    pub fn advance(&mut self) -> std::result::Result<(), StateError> {
        if self.state != MatchState::RoundResult {
            return Err(self.reject("advance"));
        }
        self.round = self.round.next();
        self.human.reset_choice();
        self.opponent.reset_choice();
        self.last_result = None;
        self.state = MatchState::Playing;
        Ok(())
    }

    /// Step the death animation one frame
    pub fn tick_animation(&mut self) -> std::result::Result<(), StateError> {
        let MatchState::DeathAnimation { defeated, frame } = self.state else {
            return Err(self.reject("tick the death animation"));
        };
        let frame = frame + 1;
        if frame >= self.config.death_animation_frames {
            self.state = MatchState::MatchOver { defeated };
            tracing::info!(%defeated, "Death animation finished");
        } else {
            self.state = MatchState::DeathAnimation { defeated, frame };
        }
        Ok(())
    }

    /// Death animation progress in [0, 1]; 1.0 once the match is over
    pub fn animation_progress(&self) -> f32 {
        match self.state {
            MatchState::DeathAnimation { frame, .. } => {
                let total = self.config.death_animation_frames.max(1);
                (frame as f32 / total as f32).min(1.0)
            }
            MatchState::MatchOver { .. } => 1.0,
            _ => 0.0,
        }
    }

    /// Discard the match and start over; always succeeds
    pub fn restart(&mut self) {
        self.reset_match();
        tracing::info!(state = %self.state, "Match restarted");
    }

    pub fn set_difficulty(&mut self, difficulty: f32) {
        self.predictor.set_difficulty(difficulty);
        self.config.difficulty = self.predictor.difficulty();
    }

    /// The surviving side once exactly one combatant is down
    pub fn winner(&self) -> Option<Side> {
        match (self.human.is_alive(), self.opponent.is_alive()) {
            (true, false) => Some(Side::Human),
            (false, true) => Some(Side::Opponent),
            _ => None,
        }
    }

    pub fn snapshot(&self) -> MatchView {
        MatchView {
            state: self.state,
            mode: self.mode,
            round: self.round,
            human: CombatantView::from(&self.human),
            opponent: CombatantView::from(&self.opponent),
            last_result: self.last_result.clone(),
            opponent_rationale: self.last_decision.as_ref().map(|d| d.rationale.clone()),
            opponent_branch: self.last_decision.as_ref().map(|d| d.branch),
            winner: self.winner(),
            animation_progress: self.animation_progress(),
        }
    }

    fn reject(&self, operation: &'static str) -> StateError {
        tracing::warn!(operation, state = %self.state, "Rejected operation");
        StateError::WrongState {
            operation,
            state: self.state.name(),
        }
    }

    /// Rebuild all match state; the RNG stream carries on
    fn reset_match(&mut self) {
        self.human = Combatant::new(Side::Human);
        self.opponent = Combatant::new(Side::Opponent);
        self.predictor = Predictor::new(self.config.difficulty);
        self.round = RoundNumber::first();
        self.last_result = None;
        self.last_decision = None;
        self.mode = None;

        let allocation = match self.config.opponent_allocation {
            Some(fixed) => fixed,
            None => DamageAllocation::random_full_budget(&mut self.rng),
        };
        self.opponent.set_allocation(allocation);

        self.state = if self.config.mode_selection {
            MatchState::ModeSelection
        } else {
            MatchState::Setup
        };
    }

    fn opponent_decision(&mut self) -> Decision {
        match self.config.scripted_opponent {
            Some(choice) => Decision {
                choice,
                branch: DecisionBranch::Scripted,
                predicted: None,
                rationale: format!("Scripted to play {}", choice),
            },
            None => self.predictor.choose(&mut self.rng),
        }
    }

    /// (winner, loser)
    fn pair_mut(&mut self, winner: Side) -> (&mut Combatant, &mut Combatant) {
        match winner {
            Side::Human => (&mut self.human, &mut self.opponent),
            Side::Opponent => (&mut self.opponent, &mut self.human),
        }
    }

    fn resolve_round(&mut self) {
        let (Some(human_choice), Some(opponent_choice)) =
            (self.human.current_choice(), self.opponent.current_choice())
        else {
            return;
        };

        let winner = match resolve(human_choice, opponent_choice) {
            Winner::First => Some(Side::Human),
            Winner::Second => Some(Side::Opponent),
            Winner::Draw => None,
        };

        let mut shield_armed = false;
        let breakdown = winner.map(|side| {
            let choice = match side {
                Side::Human => human_choice,
                Side::Opponent => opponent_choice,
            };
            let (winner, loser) = self.pair_mut(side);
            let armed = winner.special_ability_active();

            let mut breakdown = DamageBreakdown::compute(
                winner.allocation().get(choice),
                special_multiplier(choice, armed),
                winner.streak_multiplier(),
            );
            breakdown.taken = loser.take_damage(breakdown.dealt);
            winner.consume_bonus();

            if choice == Choice::Rock && armed {
                winner.arm_defense();
                shield_armed = true;
            }
            winner.record_win();
            loser.record_loss();
            breakdown
        });

        self.predictor
            .record_round(human_choice, opponent_choice, winner);

        let damage = breakdown.map_or(0, |b| b.taken);
        tracing::debug!(
            round = %self.round,
            human = %human_choice,
            opponent = %opponent_choice,
            winner = ?winner,
            damage,
            special = breakdown.map_or(1.0, |b| b.special_multiplier),
            streak = breakdown.map_or(1.0, |b| b.streak_multiplier),
            shield_armed,
            "Round resolved"
        );

        self.last_result = Some(RoundResult {
            round: self.round,
            human_choice,
            opponent_choice,
            winner,
            damage,
            breakdown,
            shield_armed,
        });

        if !self.opponent.is_alive() || !self.human.is_alive() {
            // Opponent checked first
            let defeated = if !self.opponent.is_alive() {
                Side::Opponent
            } else {
                Side::Human
            };
            tracing::info!(%defeated, round = %self.round, "Match over");
            self.state = if self.config.death_animation_frames > 0 {
                MatchState::DeathAnimation { defeated, frame: 0 }
            } else {
                MatchState::MatchOver { defeated }
            };
        } else {
            self.state = MatchState::RoundResult;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::constants::MAX_HEALTH;
    use crate::core::error::{AllocationError, DuelError};

    fn scripted(opponent: Choice, allocation: DamageAllocation) -> MatchController {
        let config = MatchConfig {
            seed: Some(1),
            opponent_allocation: Some(allocation),
            scripted_opponent: Some(opponent),
            ..MatchConfig::default()
        };
        MatchController::new(config).unwrap()
    }

    fn alloc(s: u32, r: u32, p: u32) -> DamageAllocation {
        DamageAllocation::new(s, r, p).unwrap()
    }

    #[test]
    fn test_starts_in_setup() {
        let controller = MatchController::new(MatchConfig::seeded(5)).unwrap();
        assert_eq!(controller.state(), MatchState::Setup);
        assert_eq!(controller.round(), RoundNumber(1));
        assert_eq!(controller.opponent().allocation().total(), 20);
    }

    #[test]
    fn test_choice_rejected_during_setup() {
        let mut controller = scripted(Choice::Rock, alloc(0, 20, 0));
        let err = controller.submit_choice(Choice::Rock).unwrap_err();
        assert!(matches!(err, StateError::WrongState { .. }));
        assert_eq!(controller.state(), MatchState::Setup);
        assert!(controller.human().current_choice().is_none());
    }

    #[test]
    fn test_over_budget_allocation_leaves_state() {
        let mut controller = scripted(Choice::Rock, alloc(0, 20, 0));
        let err = controller.submit_allocation(7, 7, 7).unwrap_err();
        assert!(matches!(
            err,
            DuelError::Allocation(AllocationError::BudgetExceeded { total: 21, .. })
        ));
        assert_eq!(controller.state(), MatchState::Setup);
        assert_eq!(controller.human().allocation().total(), 0);

        controller.submit_allocation(6, 7, 7).unwrap();
        assert_eq!(controller.state(), MatchState::Playing);
    }

    #[test]
    fn test_draw_round_no_damage() {
        let mut controller = scripted(Choice::Rock, alloc(0, 20, 0));
        controller.submit_allocation(5, 10, 5).unwrap();
        controller.submit_choice(Choice::Rock).unwrap();

        let result = controller.last_result().unwrap();
        assert!(result.is_draw());
        assert_eq!(result.damage, 0);
        assert_eq!(controller.state(), MatchState::RoundResult);
        assert_eq!(controller.human().health(), MAX_HEALTH);
        assert_eq!(controller.opponent().health(), MAX_HEALTH);
    }

    #[test]
    fn test_advance_clears_round() {
        let mut controller = scripted(Choice::Rock, alloc(0, 20, 0));
        controller.submit_allocation(5, 10, 5).unwrap();
        controller.submit_choice(Choice::Rock).unwrap();
        controller.advance().unwrap();

        assert_eq!(controller.state(), MatchState::Playing);
        assert_eq!(controller.round(), RoundNumber(2));
        assert!(controller.last_result().is_none());
        assert!(controller.human().current_choice().is_none());
        assert!(controller.opponent().current_choice().is_none());
        // Streak state survives
        assert_eq!(controller.human().consecutive_choices(), 1);

        assert!(controller.advance().is_err());
    }

    #[test]
    fn test_second_choice_in_round_rejected() {
        let mut controller = scripted(Choice::Rock, alloc(0, 20, 0));
        controller.submit_allocation(5, 10, 5).unwrap();
        controller.submit_choice(Choice::Rock).unwrap();
        let before = controller.snapshot();
        assert!(controller.submit_choice(Choice::Paper).is_err());
        assert_eq!(controller.snapshot(), before);
    }

    #[test]
    fn test_choice_resolves_round_immediately() {
        let mut controller = scripted(Choice::Paper, alloc(0, 0, 20));
        controller.submit_allocation(5, 5, 5).unwrap();
        controller.submit_choice(Choice::Scissors).unwrap();

        assert_eq!(controller.state(), MatchState::RoundResult);
        assert_eq!(controller.opponent().current_choice(), Some(Choice::Paper));
        assert_eq!(controller.last_decision().unwrap().branch, DecisionBranch::Scripted);
        assert_eq!(controller.predictor().history().rounds().len(), 1);
        assert!(matches!(
            controller.submit_choice(Choice::Rock),
            Err(StateError::WrongState { .. })
        ));
    }

    #[test]
    fn test_predictor_records_each_round() {
        let mut controller = scripted(Choice::Rock, alloc(0, 1, 0));
        controller.submit_allocation(1, 0, 1).unwrap();
        controller.submit_choice(Choice::Paper).unwrap();
        controller.advance().unwrap();
        controller.submit_choice(Choice::Scissors).unwrap();

        let rounds: Vec<_> = controller.predictor().history().rounds().iter().collect();
        assert_eq!(rounds.len(), 2);
        assert_eq!(rounds[0].winner, Some(Side::Human));
        assert_eq!(rounds[1].winner, Some(Side::Opponent));
        assert_eq!(rounds[1].human, Choice::Scissors);
    }

    #[test]
    fn test_rock_streak_arms_winner_shield() {
        // Opponent always Rock with 4 points; human plays Scissors and loses.
        let mut controller = scripted(Choice::Rock, alloc(0, 4, 0));
        controller.submit_allocation(0, 0, 20).unwrap();

        controller.submit_choice(Choice::Scissors).unwrap();
        assert!(!controller.last_result().unwrap().shield_armed);
        controller.advance().unwrap();

        controller.submit_choice(Choice::Scissors).unwrap();
        assert!(controller.last_result().unwrap().shield_armed);
        assert!(controller.opponent().defense_bonus());
        assert!(!controller.human().defense_bonus());
        controller.advance().unwrap();

        // Human finally wins with Paper: 20 halved by the shield
        controller.submit_choice(Choice::Paper).unwrap();
        let result = controller.last_result().unwrap();
        assert_eq!(result.winner, Some(Side::Human));
        assert_eq!(result.breakdown.unwrap().dealt, 20);
        assert_eq!(result.damage, 10);
        assert_eq!(controller.opponent().health(), 10);
        assert!(!controller.opponent().defense_bonus());
    }

    #[test]
    fn test_scissors_streak_boosts_damage() {
        let mut controller = scripted(Choice::Paper, alloc(0, 0, 1));
        controller.submit_allocation(4, 0, 0).unwrap();

        controller.submit_choice(Choice::Scissors).unwrap();
        assert_eq!(controller.last_result().unwrap().damage, 4);
        controller.advance().unwrap();

        controller.submit_choice(Choice::Scissors).unwrap();
        let breakdown = controller.last_result().unwrap().breakdown.unwrap();
        assert_eq!(breakdown.special_multiplier, 1.5);
        assert_eq!(breakdown.taken, 6);
        assert_eq!(controller.opponent().health(), MAX_HEALTH - 10);
    }

    #[test]
    fn test_loss_streak_bonus_banked_then_spent() {
        let mut controller = scripted(Choice::Rock, alloc(0, 1, 0));
        controller.submit_allocation(0, 0, 3).unwrap();

        for _ in 0..3 {
            controller.submit_choice(Choice::Scissors).unwrap();
            controller.advance().unwrap();
        }
        assert_eq!(controller.human().pending_bonus(), Some(2.0));

        controller.submit_choice(Choice::Paper).unwrap();
        let result = controller.last_result().unwrap().clone();
        let breakdown = result.breakdown.unwrap();
        assert_eq!(breakdown.streak_multiplier, 2.0);
        assert_eq!(breakdown.dealt, 6);
        // Opponent's Rock streak shielded it
        assert_eq!(result.damage, 3);
        assert_eq!(controller.opponent().health(), MAX_HEALTH - 3);
        assert_eq!(controller.human().pending_bonus(), None);
    }

    #[test]
    fn test_lethal_round_ends_match() {
        let mut controller = scripted(Choice::Rock, alloc(0, 20, 0));
        controller.submit_allocation(10, 5, 5).unwrap();
        controller.submit_choice(Choice::Scissors).unwrap();

        assert_eq!(
            controller.state(),
            MatchState::MatchOver {
                defeated: Side::Human
            }
        );
        assert_eq!(controller.winner(), Some(Side::Opponent));
        assert!(controller.advance().is_err());
    }

    #[test]
    fn test_death_animation_runs_to_match_over() {
        let config = MatchConfig {
            seed: Some(3),
            opponent_allocation: Some(alloc(0, 20, 0)),
            scripted_opponent: Some(Choice::Scissors),
            death_animation_frames: 4,
            ..MatchConfig::default()
        };
        let mut controller = MatchController::new(config).unwrap();
        controller.submit_allocation(0, 20, 0).unwrap();
        controller.submit_choice(Choice::Rock).unwrap();

        assert_eq!(
            controller.state(),
            MatchState::DeathAnimation {
                defeated: Side::Opponent,
                frame: 0
            }
        );
        assert_eq!(controller.animation_progress(), 0.0);
        controller.tick_animation().unwrap();
        controller.tick_animation().unwrap();
        assert_eq!(controller.animation_progress(), 0.5);
        controller.tick_animation().unwrap();
        controller.tick_animation().unwrap();
        assert_eq!(
            controller.state(),
            MatchState::MatchOver {
                defeated: Side::Opponent
            }
        );
        assert_eq!(controller.animation_progress(), 1.0);
        assert!(controller.tick_animation().is_err());
        assert_eq!(controller.winner(), Some(Side::Human));
    }

    #[test]
    fn test_mode_selection_flow() {
        let config = MatchConfig {
            seed: Some(11),
            mode_selection: true,
            ..MatchConfig::default()
        };
        let mut controller = MatchController::new(config).unwrap();
        assert_eq!(controller.state(), MatchState::ModeSelection);
        assert!(controller.submit_allocation(5, 5, 5).is_err());

        controller.select_mode(GameMode::Story).unwrap();
        assert_eq!(controller.state(), MatchState::Setup);
        assert_eq!(controller.mode(), Some(GameMode::Story));
        assert!(controller.select_mode(GameMode::Practice).is_err());

        controller.submit_allocation(5, 5, 5).unwrap();
        controller.go_home().unwrap();
        assert_eq!(controller.state(), MatchState::ModeSelection);
        assert_eq!(controller.mode(), None);
        assert_eq!(controller.human().allocation().total(), 0);
    }

    #[test]
    fn test_go_home_requires_mode_selection() {
        let mut controller = MatchController::new(MatchConfig::seeded(2)).unwrap();
        assert_eq!(
            controller.go_home(),
            Err(StateError::ModeSelectionDisabled)
        );
        assert_eq!(controller.state(), MatchState::Setup);
    }

    #[test]
    fn test_set_difficulty_clamps() {
        let mut controller = MatchController::new(MatchConfig::seeded(2)).unwrap();
        controller.set_difficulty(4.0);
        assert_eq!(controller.predictor().difficulty(), 1.0);
        controller.restart();
        assert_eq!(controller.predictor().difficulty(), 1.0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = MatchConfig {
            difficulty: -0.5,
            ..MatchConfig::default()
        };
        assert!(MatchController::new(config).is_err());
    }
}
