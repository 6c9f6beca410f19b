//! # fishbowl-engine
//!
//! Rules engine for a party word-guessing game played over three stages
//! (free speech, one word, charades) with one shared pool of notes.
//!
//! ## Design Principles
//!
//! 1. **Single Writer**: `GameMachine` owns the state. Screens read
//!    snapshots and send commands; nothing else mutates.
//!
//! 2. **Explicit Preconditions**: Every operation checks phase and pause
//!    state itself and answers with an `Outcome` or a `Rejection`. A turn's
//!    score can only be committed once.
//!
//! 3. **Deterministic Randomness**: Every reshuffle comes from a seedable
//!    ChaCha8 `GameRng`, so a seed reproduces a whole game.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: Teams and notes live in `im` vectors,
//!   so handing out a snapshot is O(1).
//!
//! - **External Clock**: The machine never reads time. A `TurnClock` turns
//!   elapsed time into one tick per second while a turn is running.
//!
//! ## Modules
//!
//! - `core`: Teams, notes, state, commands, RNG, configuration
//! - `rules`: The state machine, outcomes, and final ranking
//! - `notes`: Category catalog and custom note sources
//! - `timer`: Turn countdown driver
//! - `store`: Thread-safe store and persistence

pub mod core;
pub mod rules;
pub mod notes;
pub mod timer;
pub mod store;

// Re-export commonly used types
pub use crate::core::{
    Command, CommandKind, GameConfig, GameRng, GameRngState, GameState, Note, Phase, Stage, Team,
    TeamId, CUSTOM_CATEGORY,
};

pub use crate::rules::{
    CommandResult, GameMachine, GameResult, Outcome, Rejection, ScoreCommit, Standing,
};

pub use crate::notes::{Category, CatalogError, CustomNotes, NoteCatalog, NoteSelection};

pub use crate::timer::TurnClock;

pub use crate::store::{
    Checkpoint, GameStore, KeyValueStore, MemoryStore, PersistError, Preferences, SetupSnapshot,
};
