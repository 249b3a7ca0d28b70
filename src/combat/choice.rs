//! Moves and the fixed dominance cycle
//!
//! Scissors beats Paper, Rock beats Scissors, Paper beats Rock.
//! `resolve` is the single source of truth for who wins a round.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the three moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Choice {
    Scissors,
    Rock,
    Paper,
}

impl Choice {
    /// All choices in fixed priority order (Scissors, Rock, Paper)
    ///
    /// Anything that breaks ties between choices iterates in this order.
    pub fn all() -> &'static [Choice] {
        &[Choice::Scissors, Choice::Rock, Choice::Paper]
    }

    /// Stable index into per-choice arrays, following `all()`
    pub fn index(&self) -> usize {
        match self {
            Choice::Scissors => 0,
            Choice::Rock => 1,
            Choice::Paper => 2,
        }
    }

    /// The choice this one defeats
    pub fn beats(&self) -> Choice {
        match self {
            Choice::Scissors => Choice::Paper,
            Choice::Rock => Choice::Scissors,
            Choice::Paper => Choice::Rock,
        }
    }

    /// The unique choice that defeats this one
    pub fn counter(&self) -> Choice {
        match self {
            Choice::Scissors => Choice::Rock,
            Choice::Rock => Choice::Paper,
            Choice::Paper => Choice::Scissors,
        }
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Choice::Scissors => write!(f, "Scissors"),
            Choice::Rock => write!(f, "Rock"),
            Choice::Paper => write!(f, "Paper"),
        }
    }
}

impl FromStr for Choice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "s" | "scissors" => Ok(Choice::Scissors),
            "r" | "rock" => Ok(Choice::Rock),
            "p" | "paper" => Ok(Choice::Paper),
            other => Err(format!("unknown choice '{}'", other)),
        }
    }
}

/// Outcome of comparing two choices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Winner {
    First,
    Second,
    Draw,
}

/// Decide a round between two choices
pub fn resolve(a: Choice, b: Choice) -> Winner {
    if a == b {
        Winner::Draw
    } else if a.beats() == b {
        Winner::First
    } else {
        Winner::Second
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_examples() {
        assert_eq!(resolve(Choice::Scissors, Choice::Paper), Winner::First);
        assert_eq!(resolve(Choice::Rock, Choice::Scissors), Winner::First);
        assert_eq!(resolve(Choice::Paper, Choice::Rock), Winner::First);
        assert_eq!(resolve(Choice::Paper, Choice::Scissors), Winner::Second);
        assert_eq!(resolve(Choice::Rock, Choice::Rock), Winner::Draw);
    }

    #[test]
    fn test_resolve_exhaustive_antisymmetric() {
        for &a in Choice::all() {
            for &b in Choice::all() {
                let forward = resolve(a, b);
                let backward = resolve(b, a);
                match forward {
                    Winner::Draw => {
                        assert_eq!(a, b);
                        assert_eq!(backward, Winner::Draw);
                    }
                    Winner::First => assert_eq!(backward, Winner::Second),
                    Winner::Second => assert_eq!(backward, Winner::First),
                }
            }
        }
    }

    #[test]
    fn test_counter_beats_target() {
        for &c in Choice::all() {
            assert_eq!(resolve(c.counter(), c), Winner::First);
            assert_eq!(c.counter().beats(), c);
        }
    }

    #[test]
    fn test_parse_choice() {
        assert_eq!("rock".parse::<Choice>(), Ok(Choice::Rock));
        assert_eq!(" S ".parse::<Choice>(), Ok(Choice::Scissors));
        assert_eq!("Paper".parse::<Choice>(), Ok(Choice::Paper));
        assert!("lizard".parse::<Choice>().is_err());
    }

    #[test]
    fn test_index_follows_priority_order() {
        for (i, c) in Choice::all().iter().enumerate() {
            assert_eq!(c.index(), i);
        }
    }
}
