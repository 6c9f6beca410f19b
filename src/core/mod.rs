//! Core game types: teams, notes, state, commands, RNG, configuration.
//!
//! Plain data plus the deterministic RNG. Transition rules live in
//! `rules`; nothing here changes phase on its own.

pub mod team;
pub mod note;
pub mod rng;
pub mod config;
pub mod action;
pub mod state;

pub use team::{Team, TeamId, TeamIdAllocator};
pub use note::{Note, CUSTOM_CATEGORY};
pub use rng::{GameRng, GameRngState};
pub use config::{GameConfig, Stage};
pub use action::{Command, CommandKind};
pub use state::{GameState, Phase};
