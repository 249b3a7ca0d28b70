//! Headless Autoplay Runner
//!
//! Plays scripted human strategies against the adaptive opponent and prints
//! a JSON summary. Matches run in parallel; each match gets its own seed.

use clap::{Parser, ValueEnum};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::Serialize;

use rps_duel::combat::{Choice, DamageAllocation};
use rps_duel::core::{MatchConfig, Side};
use rps_duel::duel::{MatchController, MatchState};
use rps_duel::opponent::predictor::random_choice;

/// Headless runner - scripted human vs adaptive opponent
#[derive(Parser, Debug)]
#[command(name = "autoplay")]
#[command(about = "Run scripted human strategies against the adaptive opponent")]
struct Args {
    /// Human strategy
    #[arg(long, value_enum, default_value = "cycle")]
    strategy: Strategy,

    /// Number of matches to play
    #[arg(long, default_value_t = 100)]
    matches: u32,

    /// Opponent difficulty in [0, 1]
    #[arg(long, default_value_t = 0.7)]
    difficulty: f32,

    /// Human allocation as scissors,rock,paper
    #[arg(long, default_value = "7,7,6", value_parser = parse_allocation)]
    allocation: DamageAllocation,

    /// Rounds before a match is abandoned as a stalemate
    #[arg(long, default_value_t = 200)]
    max_rounds: u32,

    /// Base random seed; match i uses seed + i
    #[arg(long)]
    seed: Option<u64>,

    /// Include every match outcome in the output
    #[arg(long)]
    per_match: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
enum Strategy {
    /// Scissors, Rock, Paper, repeat
    Cycle,
    /// Always Rock
    Repeat,
    /// Uniformly random
    Random,
    /// Play whatever the opponent played last round
    CopyLast,
    /// Keep a winning move, switch to its counter after a loss
    WinStay,
}

impl Strategy {
    fn next_move(&self, controller: &MatchController, rng: &mut StdRng) -> Choice {
        let history = controller.predictor().history();
        let last = history.rounds().iter().last();
        match self {
            Strategy::Cycle => Choice::all()[history.human_moves().len() % Choice::all().len()],
            Strategy::Repeat => Choice::Rock,
            Strategy::Random => random_choice(rng),
            Strategy::CopyLast => last.map_or(Choice::Rock, |r| r.opponent),
            Strategy::WinStay => match last {
                Some(r) if r.human_lost() => r.human.counter(),
                Some(r) => r.human,
                None => Choice::Rock,
            },
        }
    }
}

/// Parse `scissors,rock,paper` into a within-budget allocation
fn parse_allocation(s: &str) -> Result<DamageAllocation, String> {
    let values = s
        .split(',')
        .map(|v| v.trim().parse::<u32>())
        .collect::<Result<Vec<u32>, _>>()
        .map_err(|e| format!("invalid allocation '{}': {}", s, e))?;
    match values.as_slice() {
        [scissors, rock, paper] => {
            DamageAllocation::new(*scissors, *rock, *paper).map_err(|e| e.to_string())
        }
        _ => Err(format!("expected three values scissors,rock,paper; got '{}'", s)),
    }
}

/// Per-match outcome
#[derive(Debug, Clone, Serialize)]
struct MatchOutcome {
    seed: u64,
    rounds: u32,
    winner: Option<Side>,
    predictions: u32,
    correct_predictions: u32,
    stalemate: bool,
}

/// JSON output structure
#[derive(Serialize)]
struct Summary {
    strategy: Strategy,
    matches: u32,
    difficulty: f32,
    opponent_win_rate: f32,
    human_win_rate: f32,
    stalemates: u32,
    mean_rounds: f32,
    prediction_hit_rate: f32,
    base_seed: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    outcomes: Option<Vec<MatchOutcome>>,
}

fn play_match(args: &Args, seed: u64) -> Result<MatchOutcome, rps_duel::core::DuelError> {
    let config = MatchConfig {
        difficulty: args.difficulty,
        seed: Some(seed),
        ..MatchConfig::default()
    };
    let mut controller = MatchController::new(config)?;
    let mut human_rng = StdRng::seed_from_u64(seed.wrapping_add(0x9e37_79b9));

    let allocation = args.allocation;
    controller.submit_allocation(allocation.scissors, allocation.rock, allocation.paper)?;

    let mut predictions = 0;
    let mut correct_predictions = 0;
    let mut stalemate = false;

    loop {
        let choice = args.strategy.next_move(&controller, &mut human_rng);
        controller.submit_choice(choice)?;

        if let Some(predicted) = controller.last_decision().and_then(|d| d.predicted) {
            predictions += 1;
            if predicted == choice {
                correct_predictions += 1;
            }
        }

        match controller.state() {
            MatchState::RoundResult if controller.round().0 >= args.max_rounds => {
                stalemate = true;
                break;
            }
            MatchState::RoundResult => controller.advance()?,
            _ => break,
        }
    }

    Ok(MatchOutcome {
        seed,
        rounds: controller.round().0,
        winner: controller.winner(),
        predictions,
        correct_predictions,
        stalemate,
    })
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("rps_duel=warn")),
        )
        .init();

    let args = Args::parse();
    let base_seed = args.seed.unwrap_or_else(|| rand::thread_rng().gen());

    let outcomes: Vec<MatchOutcome> = (0..args.matches)
        .into_par_iter()
        .filter_map(|i| {
            let seed = base_seed.wrapping_add(i as u64);
            play_match(&args, seed)
                .map_err(|e| tracing::error!(seed, %e, "Match aborted"))
                .ok()
        })
        .collect();

    let played = outcomes.len().max(1) as f32;
    let wins = |side: Side| outcomes.iter().filter(|o| o.winner == Some(side)).count() as f32;
    let predictions: u32 = outcomes.iter().map(|o| o.predictions).sum();
    let correct: u32 = outcomes.iter().map(|o| o.correct_predictions).sum();

    let summary = Summary {
        strategy: args.strategy,
        matches: outcomes.len() as u32,
        difficulty: args.difficulty,
        opponent_win_rate: wins(Side::Opponent) / played,
        human_win_rate: wins(Side::Human) / played,
        stalemates: outcomes.iter().filter(|o| o.stalemate).count() as u32,
        mean_rounds: outcomes.iter().map(|o| o.rounds as f32).sum::<f32>() / played,
        prediction_hit_rate: if predictions > 0 {
            correct as f32 / predictions as f32
        } else {
            0.0
        },
        base_seed,
        outcomes: args.per_match.then(|| outcomes.clone()),
    };

    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize summary: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_allocation_accepts_three_values() {
        let allocation = parse_allocation("7, 7,6").unwrap();
        assert_eq!((allocation.scissors, allocation.rock, allocation.paper), (7, 7, 6));
    }

    #[test]
    fn test_parse_allocation_rejects_wrong_arity() {
        assert!(parse_allocation("10,10").is_err());
        assert!(parse_allocation("5,5,5,5").is_err());
        assert!(parse_allocation("a,b,c").is_err());
    }

    #[test]
    fn test_parse_allocation_rejects_over_budget() {
        assert!(parse_allocation("10,10,1").is_err());
    }

    #[test]
    fn test_malformed_allocation_is_a_cli_error() {
        let result = Args::try_parse_from(["autoplay", "--allocation", "20"]);
        assert!(result.is_err());
    }
}
