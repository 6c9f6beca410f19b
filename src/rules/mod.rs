//! Transition rules for the game.
//!
//! `GameMachine` is the sole authority on phase transitions:
//! - Which commands are legal in each phase
//! - How each command changes teams, notes, timer, and scores
//! - When turns, stages, and the game end
//!
//! Every operation reports a typed `Outcome` or a `Rejection`.

pub mod engine;
pub mod outcome;
pub mod ranking;

pub use engine::GameMachine;
pub use outcome::{CommandResult, Outcome, Rejection, ScoreCommit};
pub use ranking::{GameResult, Standing};
