//! RPS Duel - Entry Point
//!
//! Text front-end for a single duel against the adaptive opponent.
//! Reads commands from stdin and renders match snapshots to stdout.

use clap::Parser;
use rps_duel::combat::Choice;
use rps_duel::core::error::Result;
use rps_duel::core::{load_config, MatchConfig};
use rps_duel::duel::{GameMode, MatchController, MatchState, MatchView};

use std::io::{self, Write};
use std::path::PathBuf;

/// Play a rock-paper-scissors duel in the terminal
#[derive(Parser, Debug)]
#[command(name = "rps-duel")]
#[command(about = "Rock-paper-scissors duel with committed damage and an adaptive opponent")]
struct Args {
    /// TOML match config
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Opponent difficulty in [0, 1]
    #[arg(long)]
    difficulty: Option<f32>,

    /// Start from the mode selection screen
    #[arg(long)]
    modes: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("rps_duel=info")),
        )
        .init();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => MatchConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if let Some(difficulty) = args.difficulty {
        config.difficulty = difficulty;
    }
    config.mode_selection |= args.modes;

    let mut controller = MatchController::new(config)?;

    println!("\n=== RPS DUEL ===");
    println!("Split 20 damage points across Scissors, Rock and Paper, then duel.");
    println!();
    println!("Commands:");
    println!("  practice / story     - Pick a game mode (mode selection only)");
    println!("  alloc <s> <r> <p>    - Commit your damage allocation (setup)");
    println!("  s / r / p            - Play Scissors, Rock or Paper");
    println!("  next / n             - Continue to the next round");
    println!("  home                 - Back to mode selection");
    println!("  restart              - Start a new match");
    println!("  json                 - Dump the match snapshot as JSON");
    println!("  quit / q             - Exit");
    println!();

    loop {
        // Death animation has no input; run it out
        while matches!(controller.state(), MatchState::DeathAnimation { .. }) {
            controller.tick_animation()?;
        }

        display_status(&controller.snapshot());

        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        if input == "quit" || input == "q" {
            break;
        }

        if let Err(e) = handle_command(&mut controller, input) {
            println!("! {}", e);
        }
    }

    Ok(())
}

fn handle_command(controller: &mut MatchController, input: &str) -> Result<()> {
    let mut parts = input.split_whitespace();
    let Some(command) = parts.next() else {
        return Ok(());
    };

    match command {
        "practice" => controller.select_mode(GameMode::Practice)?,
        "story" => controller.select_mode(GameMode::Story)?,
        "home" => controller.go_home()?,
        "restart" => controller.restart(),
        "next" | "n" => controller.advance()?,
        "json" => println!("{}", serde_json::to_string_pretty(&controller.snapshot())?),
        "alloc" => {
            let values: Vec<u32> = parts.filter_map(|p| p.parse().ok()).collect();
            match values.as_slice() {
                [scissors, rock, paper] => {
                    controller.submit_allocation(*scissors, *rock, *paper)?
                }
                _ => println!("Usage: alloc <scissors> <rock> <paper>"),
            }
        }
        other => match other.parse::<Choice>() {
            Ok(choice) => controller.submit_choice(choice)?,
            Err(_) => println!("Unknown command: {}", input),
        },
    }
    Ok(())
}

fn display_status(view: &MatchView) {
    println!();
    println!("--- Round {} | {} ---", view.round, view.state);
    for side in [&view.human, &view.opponent] {
        let mut flags = Vec::new();
        if side.special_ability_active {
            flags.push(format!("special x{}", side.consecutive_choices));
        }
        if side.consecutive_wins >= 3 {
            flags.push(format!("{} wins running", side.consecutive_wins));
        }
        if let Some(bonus) = side.pending_bonus {
            flags.push(format!("next win x{}", bonus));
        }
        if side.defense_bonus {
            flags.push("shielded".to_string());
        }
        println!(
            "{:<9} {:>2}/{} HP  [S {:>2} R {:>2} P {:>2}]  {}",
            side.side.to_string(),
            side.health,
            side.max_health,
            side.allocation.scissors,
            side.allocation.rock,
            side.allocation.paper,
            flags.join(", ")
        );
    }

    match view.state {
        MatchState::ModeSelection => println!("Choose a mode: practice / story"),
        MatchState::Setup => println!("Allocate your 20 damage points: alloc <s> <r> <p>"),
        MatchState::Playing => println!("Your move: s / r / p"),
        MatchState::RoundResult => {
            if let Some(result) = &view.last_result {
                println!(
                    "You played {}, computer played {}.",
                    result.human_choice, result.opponent_choice
                );
                match result.winner {
                    None => println!("Draw."),
                    Some(winner) => println!("{} wins the round for {} damage.", winner, result.damage),
                }
                if result.shield_armed {
                    println!("Rock streak: the winner raises a shield.");
                }
            }
            if let Some(rationale) = &view.opponent_rationale {
                println!("Computer: {}", rationale);
            }
            println!("Type 'next' to continue.");
        }
        MatchState::DeathAnimation { .. } => {}
        MatchState::MatchOver { defeated } => {
            if let Some(result) = &view.last_result {
                println!(
                    "Final round: you played {}, computer played {} ({} damage).",
                    result.human_choice, result.opponent_choice, result.damage
                );
            }
            match view.winner {
                Some(winner) => println!("Match over - {} wins!", winner),
                None => println!("Match over - {} falls.", defeated),
            }
            println!("Type 'restart' to play again.");
        }
    }
}
