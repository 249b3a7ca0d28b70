//! RPS Duel - rock-paper-scissors with committed damage and an adaptive opponent

pub mod combat;
pub mod core;
pub mod duel;
pub mod opponent;
