//! Ownership and persistence around a `GameMachine`.
//!
//! - `GameStore`: one lock around machine and turn clock for threaded hosts
//! - `persist`: key-value store trait, setup snapshots, session checkpoints

pub mod persist;
mod shared;

pub use persist::{
    Checkpoint, KeyValueStore, MemoryStore, PersistError, Preferences, SetupSnapshot,
    CHECKPOINT_KEY, SETUP_KEY,
};
pub use shared::GameStore;
