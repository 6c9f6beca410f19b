//! Game state: the single record the machine owns.
//!
//! ## Phase
//!
//! Top-level screen state: home, setup, ready, playing, turn end, stage end,
//! game end.
//!
//! ## GameState
//!
//! Teams, notes, stage and turn progress, timer, and play flags. Fields are
//! crate-private; outside the crate the state is read-only, and every
//! mutation goes through `GameMachine`.
//!
//! Uses `im` persistent vectors so snapshots handed to readers are O(1).

use im::Vector;
use serde::{Deserialize, Serialize};

use super::config::Stage;
use super::note::Note;
use super::team::{Team, TeamId};

/// Top-level game phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Main menu.
    #[default]
    Home,
    /// Building the roster and note pool.
    Setup,
    /// Waiting for the current team to start its turn.
    Ready,
    /// A turn is running (possibly paused).
    Playing,
    /// A turn finished; its score is committed.
    TurnEnd,
    /// Every note of the stage has been guessed.
    StageEnd,
    /// All three stages are done.
    GameEnd,
}

impl Phase {
    /// Is a game in progress (between `start_game` and `GameEnd`)?
    #[must_use]
    pub const fn is_in_game(self) -> bool {
        matches!(
            self,
            Phase::Ready | Phase::Playing | Phase::TurnEnd | Phase::StageEnd
        )
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Home => "home",
            Phase::Setup => "setup",
            Phase::Ready => "ready",
            Phase::Playing => "playing",
            Phase::TurnEnd => "turn end",
            Phase::StageEnd => "stage end",
            Phase::GameEnd => "game end",
        };
        f.write_str(name)
    }
}

/// Complete game state.
///
/// ## Invariants
///
/// - `current_team_index < teams.len()` whenever teams are non-empty
/// - `is_playing` and `is_paused` are never both true
/// - `current_turn_score` is reset to 0 exactly when a turn starts
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub(crate) teams: Vector<Team>,
    pub(crate) notes: Vector<Note>,
    pub(crate) current_stage: Stage,
    pub(crate) current_team_index: usize,
    pub(crate) current_turn_score: i64,
    pub(crate) turn_time_left: u32,
    pub(crate) is_playing: bool,
    pub(crate) is_paused: bool,
    pub(crate) phase: Phase,
    pub(crate) current_note_index: Option<usize>,
    #[serde(default)]
    pub(crate) turn_number: u64,
}

impl GameState {
    /// The pristine record: no teams, no notes, phase `Home`.
    #[must_use]
    pub fn new(turn_seconds: u32) -> Self {
        Self {
            teams: Vector::new(),
            notes: Vector::new(),
            current_stage: Stage::FreeSpeech,
            current_team_index: 0,
            current_turn_score: 0,
            turn_time_left: turn_seconds,
            is_playing: false,
            is_paused: false,
            phase: Phase::Home,
            current_note_index: None,
            turn_number: 0,
        }
    }

    // === Accessors ===

    /// Teams in turn order.
    #[must_use]
    pub fn teams(&self) -> &Vector<Team> {
        &self.teams
    }

    /// Notes in current order.
    #[must_use]
    pub fn notes(&self) -> &Vector<Note> {
        &self.notes
    }

    /// Current stage.
    #[must_use]
    pub fn current_stage(&self) -> Stage {
        self.current_stage
    }

    /// Index of the team whose turn it is.
    #[must_use]
    pub fn current_team_index(&self) -> usize {
        self.current_team_index
    }

    /// Running score of the active turn (correct guesses minus skips).
    #[must_use]
    pub fn current_turn_score(&self) -> i64 {
        self.current_turn_score
    }

    /// Seconds left in the active turn.
    #[must_use]
    pub fn turn_time_left(&self) -> u32 {
        self.turn_time_left
    }

    /// A turn is running and not paused.
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// A turn is paused.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.is_paused
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Index of the note being shown, if any.
    #[must_use]
    pub fn current_note_index(&self) -> Option<usize> {
        self.current_note_index
    }

    /// Turns started so far. Grows by one at every `start_turn` that begins
    /// play and is never reset, so it identifies the running turn.
    #[must_use]
    pub fn turn_number(&self) -> u64 {
        self.turn_number
    }

    // === Derived queries ===

    /// The team whose turn it is.
    #[must_use]
    pub fn current_team(&self) -> Option<&Team> {
        self.teams.get(self.current_team_index)
    }

    /// The note being shown.
    #[must_use]
    pub fn current_note(&self) -> Option<&Note> {
        self.current_note_index.and_then(|i| self.notes.get(i))
    }

    /// Look up a team by id.
    #[must_use]
    pub fn team(&self, id: TeamId) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }

    /// Notes not yet guessed this stage.
    #[must_use]
    pub fn unguessed_count(&self) -> usize {
        self.notes.iter().filter(|n| !n.guessed).count()
    }

    /// Notes neither guessed nor skipped this turn.
    #[must_use]
    pub fn available_count(&self) -> usize {
        self.notes.iter().filter(|n| n.is_available()).count()
    }

    /// The countdown should be ticking.
    #[must_use]
    pub fn is_timer_running(&self) -> bool {
        self.phase == Phase::Playing && self.is_playing && !self.is_paused
    }

    /// Index of the first available note in current order.
    #[must_use]
    pub fn first_available(&self) -> Option<usize> {
        self.notes.iter().position(Note::is_available)
    }

    /// Wraparound scan: first available note after `from` (exclusive), then
    /// from the start of the list.
    #[must_use]
    pub fn next_available_after(&self, from: usize) -> Option<usize> {
        self.notes
            .iter()
            .enumerate()
            .skip(from + 1)
            .find(|(_, n)| n.is_available())
            .map(|(i, _)| i)
            .or_else(|| self.first_available())
    }

    // === Crate-internal mutation helpers ===

    pub(crate) fn clear_skips(&mut self) {
        for note in self.notes.iter_mut() {
            note.skipped_in_turn = false;
        }
    }

    pub(crate) fn reset_note_flags(&mut self) {
        for note in self.notes.iter_mut() {
            note.reset_flags();
        }
    }

    pub(crate) fn reset_scores(&mut self) {
        for team in self.teams.iter_mut() {
            team.score = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with_notes(texts: &[&str]) -> GameState {
        let mut state = GameState::new(60);
        state.notes = texts.iter().map(|t| Note::new(*t)).collect();
        state
    }

    #[test]
    fn test_pristine_state() {
        let state = GameState::new(60);

        assert!(state.teams().is_empty());
        assert!(state.notes().is_empty());
        assert_eq!(state.phase(), Phase::Home);
        assert_eq!(state.current_stage(), Stage::FreeSpeech);
        assert_eq!(state.turn_time_left(), 60);
        assert!(!state.is_playing());
        assert!(!state.is_paused());
        assert!(state.current_team().is_none());
        assert_eq!(state.current_note_index(), None);
        assert_eq!(state.turn_number(), 0);
        assert!(state.current_note().is_none());
    }

    #[test]
    fn test_phase_in_game() {
        assert!(!Phase::Home.is_in_game());
        assert!(!Phase::Setup.is_in_game());
        assert!(Phase::Ready.is_in_game());
        assert!(Phase::Playing.is_in_game());
        assert!(Phase::StageEnd.is_in_game());
        assert!(!Phase::GameEnd.is_in_game());
        assert_eq!(Phase::TurnEnd.to_string(), "turn end");
    }

    #[test]
    fn test_wraparound_scan_forward() {
        let state = state_with_notes(&["a", "b", "c", "d"]);
        assert_eq!(state.next_available_after(1), Some(2));
    }

    #[test]
    fn test_wraparound_scan_wraps() {
        let mut state = state_with_notes(&["a", "b", "c", "d"]);
        state.notes[0].guessed = true;
        state.notes[3].skipped_in_turn = true;

        assert_eq!(state.next_available_after(2), Some(1));
    }

    #[test]
    fn test_wraparound_scan_can_return_origin() {
        let mut state = state_with_notes(&["a", "b", "c"]);
        state.notes[0].guessed = true;
        state.notes[2].guessed = true;

        // Only the origin itself is available; the scan wraps back to it.
        assert_eq!(state.next_available_after(1), Some(1));
    }

    #[test]
    fn test_wraparound_scan_exhausted() {
        let mut state = state_with_notes(&["a", "b"]);
        state.notes[0].guessed = true;
        state.notes[1].skipped_in_turn = true;

        assert_eq!(state.next_available_after(0), None);
        assert_eq!(state.first_available(), None);
    }

    #[test]
    fn test_counts() {
        let mut state = state_with_notes(&["a", "b", "c", "d"]);
        state.notes[0].guessed = true;
        state.notes[1].skipped_in_turn = true;

        assert_eq!(state.unguessed_count(), 3);
        assert_eq!(state.available_count(), 2);

        state.clear_skips();
        assert_eq!(state.available_count(), 3);

        state.reset_note_flags();
        assert_eq!(state.unguessed_count(), 4);
    }

    #[test]
    fn test_team_lookup() {
        let mut state = GameState::new(60);
        state.teams.push_back(Team::new(TeamId::new(3), "Red").with_score(4));
        state.teams.push_back(Team::new(TeamId::new(5), "Blue"));

        assert_eq!(state.team(TeamId::new(5)).map(|t| t.name.as_str()), Some("Blue"));
        assert!(state.team(TeamId::new(9)).is_none());
        assert_eq!(state.current_team().map(|t| t.id), Some(TeamId::new(3)));

        state.reset_scores();
        assert!(state.teams().iter().all(|t| t.score == 0));
    }

    #[test]
    fn test_state_serde() {
        let mut state = state_with_notes(&["a", "b"]);
        state.teams.push_back(Team::new(TeamId::new(0), "Red"));
        state.phase = Phase::Ready;

        let json = serde_json::to_string(&state).unwrap();
        let deserialized: GameState = serde_json::from_str(&json).unwrap();

        assert_eq!(state, deserialized);
    }
}
