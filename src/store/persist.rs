//! Persistence over an abstract key-value store.
//!
//! Two records are kept:
//!
//! - `SetupSnapshot` (JSON): roster names, note selection, custom notes, and
//!   device preferences, restored at the next setup.
//! - `Checkpoint` (bincode): the full machine (state, RNG position, id
//!   allocator, config) so an interrupted game resumes with the same future
//!   shuffles.
//!
//! The machine itself knows nothing about storage.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::core::{GameConfig, GameRng, GameRngState, GameState, TeamId, TeamIdAllocator};
use crate::notes::{CustomNotes, NoteSelection};
use crate::rules::{GameMachine, Rejection};

/// Key for the setup snapshot.
pub const SETUP_KEY: &str = "fishbowl.setup";

/// Key for the session checkpoint.
pub const CHECKPOINT_KEY: &str = "fishbowl.checkpoint";

/// Persistence errors.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("setup snapshot encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("checkpoint encoding failed: {0}")]
    Binary(#[from] bincode::Error),
}

/// Durable byte storage keyed by string.
pub trait KeyValueStore {
    /// Read a value.
    fn get(&self, key: &str) -> Option<Vec<u8>>;

    /// Write a value, replacing any previous one.
    fn put(&mut self, key: &str, value: Vec<u8>);

    /// Delete a value. Returns true if it existed.
    fn remove(&mut self, key: &str) -> bool;
}

/// In-process store, for tests and hosts without durable storage.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: FxHashMap<String, Vec<u8>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.entries.get(key).cloned()
    }

    fn put(&mut self, key: &str, value: Vec<u8>) {
        self.entries.insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }
}

/// Device-level preferences kept alongside setup choices.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub sound_enabled: bool,
    pub haptic_enabled: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            haptic_enabled: true,
        }
    }
}

/// Setup choices remembered between sessions.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetupSnapshot {
    /// Team names in turn order.
    pub team_names: Vec<String>,
    /// Last catalog selection.
    #[serde(default)]
    pub selection: NoteSelection,
    /// Player-written notes.
    #[serde(default)]
    pub custom_notes: CustomNotes,
    /// Device preferences.
    #[serde(default)]
    pub preferences: Preferences,
}

impl SetupSnapshot {
    /// Record the machine's current team names.
    #[must_use]
    pub fn from_machine(machine: &GameMachine) -> Self {
        Self {
            team_names: machine.state().teams().iter().map(|t| t.name.clone()).collect(),
            ..Self::default()
        }
    }

    /// Set the note selection.
    #[must_use]
    pub fn with_selection(mut self, selection: NoteSelection) -> Self {
        self.selection = selection;
        self
    }

    /// Set the custom notes.
    #[must_use]
    pub fn with_custom_notes(mut self, custom_notes: CustomNotes) -> Self {
        self.custom_notes = custom_notes;
        self
    }

    /// Set the preferences.
    #[must_use]
    pub fn with_preferences(mut self, preferences: Preferences) -> Self {
        self.preferences = preferences;
        self
    }

    /// Write under `SETUP_KEY`.
    pub fn save(&self, store: &mut impl KeyValueStore) -> Result<(), PersistError> {
        store.put(SETUP_KEY, serde_json::to_vec(self)?);
        debug!(teams = self.team_names.len(), "setup saved");
        Ok(())
    }

    /// Read from `SETUP_KEY`; `Ok(None)` if nothing was saved.
    pub fn load(store: &impl KeyValueStore) -> Result<Option<Self>, PersistError> {
        store
            .get(SETUP_KEY)
            .map(|bytes| serde_json::from_slice(&bytes))
            .transpose()
            .map_err(PersistError::from)
    }

    /// Recreate the saved teams on a machine in setup.
    pub fn restore_teams(&self, machine: &mut GameMachine) -> Result<Vec<TeamId>, Rejection> {
        self.team_names
            .iter()
            .map(|name| machine.add_team(name.as_str()))
            .collect()
    }
}

/// Complete machine image for resuming a session.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Checkpoint {
    config: GameConfig,
    state: GameState,
    rng: GameRngState,
    team_ids: TeamIdAllocator,
}

impl Checkpoint {
    /// Capture a machine.
    #[must_use]
    pub fn capture(machine: &GameMachine) -> Self {
        Self {
            config: machine.config().clone(),
            state: machine.snapshot(),
            rng: machine.rng().state(),
            team_ids: machine.team_ids().clone(),
        }
    }

    /// The captured state.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Rebuild the machine.
    #[must_use]
    pub fn restore(self) -> GameMachine {
        GameMachine::from_parts(
            self.config,
            self.state,
            GameRng::from_state(&self.rng),
            self.team_ids,
        )
    }

    /// Encode with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, PersistError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode from bincode.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PersistError> {
        Ok(bincode::deserialize(bytes)?)
    }

    /// Write under `CHECKPOINT_KEY`.
    pub fn save(&self, store: &mut impl KeyValueStore) -> Result<(), PersistError> {
        store.put(CHECKPOINT_KEY, self.to_bytes()?);
        debug!(phase = %self.state.phase(), "checkpoint saved");
        Ok(())
    }

    /// Read from `CHECKPOINT_KEY`; `Ok(None)` if nothing was saved.
    pub fn load(store: &impl KeyValueStore) -> Result<Option<Self>, PersistError> {
        store
            .get(CHECKPOINT_KEY)
            .map(|bytes| Self::from_bytes(&bytes))
            .transpose()
    }
}
