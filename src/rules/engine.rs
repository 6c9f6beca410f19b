//! The game state machine.
//!
//! `GameMachine` owns one `GameState`, the RNG that drives every reshuffle,
//! and the configuration. It is the only writer of the state: callers read
//! through `state()` / `snapshot()` and change it only through the
//! operations below (or `dispatch`).
//!
//! ## Phase graph
//!
//! ```text
//! home -> setup                 open_setup
//! setup -> ready                start_game
//! ready -> playing | stageEnd   start_turn
//! playing -> turnEnd            timer expiry, end_turn, turn pool exhausted
//! playing -> stageEnd           last unguessed note guessed
//! turnEnd -> ready | stageEnd   next_turn
//! stageEnd -> ready | gameEnd   next_stage
//! gameEnd -> setup              play_again
//! * -> home                     abort_game (in-game, paused if playing), reset_game
//! ```
//!
//! Every operation checks its own preconditions and returns a `Rejection`
//! without touching state when they fail. In particular a second `end_turn`
//! sees `TurnEnd` and is refused, so a turn's score is committed at most once.

use tracing::{debug, info};

use crate::core::{
    Command, CommandKind, GameConfig, GameRng, GameState, Note, Phase, Stage, Team, TeamId,
    TeamIdAllocator,
};

use super::outcome::{CommandResult, Outcome, Rejection, ScoreCommit};
use super::ranking::{self, GameResult, Standing};

/// Phases in which the roster and note pool may be edited.
const SETUP_PHASES: &[Phase] = &[Phase::Home, Phase::Setup];

/// Phases from which a game can be abandoned for the main menu.
const ABORTABLE_PHASES: &[Phase] = &[
    Phase::Setup,
    Phase::Ready,
    Phase::Playing,
    Phase::TurnEnd,
    Phase::StageEnd,
];

/// Owner of the game state and its transition rules.
#[derive(Clone, Debug)]
pub struct GameMachine {
    config: GameConfig,
    state: GameState,
    rng: GameRng,
    team_ids: TeamIdAllocator,
}

impl GameMachine {
    /// Create a machine in the pristine `Home` state.
    #[must_use]
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, GameRng::new(seed))
    }

    /// Create a machine with an entropy-seeded RNG.
    #[must_use]
    pub fn from_entropy(config: GameConfig) -> Self {
        Self::with_rng(config, GameRng::from_entropy())
    }

    fn with_rng(config: GameConfig, rng: GameRng) -> Self {
        Self {
            state: GameState::new(config.turn_seconds),
            config,
            rng,
            team_ids: TeamIdAllocator::new(),
        }
    }

    /// Reassemble a machine from checkpointed parts.
    pub(crate) fn from_parts(
        config: GameConfig,
        state: GameState,
        rng: GameRng,
        team_ids: TeamIdAllocator,
    ) -> Self {
        Self {
            config,
            state,
            rng,
            team_ids,
        }
    }

    pub(crate) fn rng(&self) -> &GameRng {
        &self.rng
    }

    pub(crate) fn team_ids(&self) -> &TeamIdAllocator {
        &self.team_ids
    }

    // === Queries ===

    /// Read-only view of the live state.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Owned copy of the state (O(1) thanks to persistent vectors).
    #[must_use]
    pub fn snapshot(&self) -> GameState {
        self.state.clone()
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    /// The countdown should be ticking.
    #[must_use]
    pub fn is_timer_running(&self) -> bool {
        self.state.is_timer_running()
    }

    /// The running turn is in its final seconds.
    #[must_use]
    pub fn is_time_urgent(&self) -> bool {
        self.state.phase == Phase::Playing
            && self.state.turn_time_left <= self.config.urgent_threshold
    }

    /// Teams ranked by score.
    #[must_use]
    pub fn standings(&self) -> Vec<Standing> {
        ranking::standings(&self.state.teams)
    }

    /// Winner or tie, available once the game has ended.
    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        if self.state.phase != Phase::GameEnd {
            return None;
        }
        ranking::decide(&self.state.teams)
    }

    // === Dispatch ===

    /// Apply a command value. Equivalent to calling the matching method.
    pub fn dispatch(&mut self, command: Command) -> CommandResult {
        match command {
            Command::OpenSetup => self.open_setup(),
            Command::AddTeam(name) => self.add_team(name).map(Outcome::TeamAdded),
            Command::RemoveTeam(id) => self.remove_team(id),
            Command::RenameTeam { id, name } => self.update_team_name(id, name),
            Command::SetNotes(notes) => self.set_notes(notes),
            Command::StartGame => self.start_game(),
            Command::StartTurn => self.start_turn(),
            Command::CorrectGuess => self.correct_guess(),
            Command::SkipNote => self.skip_note(),
            Command::Pause => self.pause_game(),
            Command::Resume => self.resume_game(),
            Command::EndTurn => self.end_turn(),
            Command::Tick => self.decrement_timer(),
            Command::NextTurn => self.next_turn(),
            Command::NextStage => self.next_stage(),
            Command::PlayAgain => self.play_again(),
            Command::Abort => self.abort_game(),
            Command::Reset => self.reset_game(),
        }
    }

    // === Setup ===

    /// Leave the main menu for setup.
    pub fn open_setup(&mut self) -> CommandResult {
        self.expect_phase(CommandKind::OpenSetup, &[Phase::Home])?;
        Ok(self.enter(Phase::Setup))
    }

    /// Append a team with a fresh id and a zero score.
    pub fn add_team(&mut self, name: impl Into<String>) -> Result<TeamId, Rejection> {
        self.expect_phase(CommandKind::AddTeam, SETUP_PHASES)?;
        let name = normalize_name(name.into())?;

        let id = self.team_ids.alloc();
        debug!(team = %id, name = %name, "team added");
        self.state.teams.push_back(Team::new(id, name));
        Ok(id)
    }

    /// Remove a team. Unknown ids are accepted as a no-op.
    pub fn remove_team(&mut self, id: TeamId) -> CommandResult {
        self.expect_phase(CommandKind::RemoveTeam, SETUP_PHASES)?;

        let Some(pos) = self.state.teams.iter().position(|t| t.id == id) else {
            return Ok(Outcome::Unchanged);
        };
        self.state.teams.remove(pos);
        if self.state.current_team_index >= self.state.teams.len() {
            self.state.current_team_index = 0;
        }
        debug!(team = %id, "team removed");
        Ok(Outcome::Updated)
    }

    /// Rename a team in place.
    pub fn update_team_name(&mut self, id: TeamId, name: impl Into<String>) -> CommandResult {
        self.expect_phase(CommandKind::RenameTeam, SETUP_PHASES)?;
        let name = normalize_name(name.into())?;

        let team = self
            .state
            .teams
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(Rejection::UnknownTeam(id))?;
        team.name = name;
        Ok(Outcome::Updated)
    }

    /// Replace the note pool. Flags are cleared and the order is a fresh
    /// random permutation.
    pub fn set_notes<I>(&mut self, notes: I) -> CommandResult
    where
        I: IntoIterator<Item = Note>,
    {
        self.expect_phase(CommandKind::SetNotes, SETUP_PHASES)?;

        self.state.notes = notes.into_iter().map(Note::normalized).collect();
        self.rng.shuffle_vector(&mut self.state.notes);
        debug!(count = self.state.notes.len(), "note pool replaced");
        Ok(Outcome::Updated)
    }

    /// Reset scores and note flags, reshuffle, and enter stage 1.
    pub fn start_game(&mut self) -> CommandResult {
        self.expect_phase(CommandKind::StartGame, &[Phase::Setup])?;

        let teams = self.state.teams.len();
        if teams < self.config.min_teams {
            return Err(self.reject(Rejection::NotEnoughTeams {
                have: teams,
                need: self.config.min_teams,
            }));
        }
        let notes = self.state.notes.len();
        if notes < self.config.min_notes {
            return Err(self.reject(Rejection::NotEnoughNotes {
                have: notes,
                need: self.config.min_notes,
            }));
        }

        let state = &mut self.state;
        state.reset_scores();
        state.reset_note_flags();
        self.rng.shuffle_vector(&mut state.notes);
        state.current_stage = Stage::FreeSpeech;
        state.current_team_index = 0;
        state.current_turn_score = 0;
        state.turn_time_left = self.config.turn_seconds;
        state.is_playing = false;
        state.is_paused = false;
        state.current_note_index = Some(0);

        info!(teams, notes, "game started");
        Ok(self.enter(Phase::Ready))
    }

    // === Turn ===

    /// Begin the current team's turn with a fresh turn pool.
    ///
    /// Goes straight to `StageEnd` when nothing is left to guess.
    pub fn start_turn(&mut self) -> CommandResult {
        self.expect_phase(CommandKind::StartTurn, &[Phase::Ready])?;
        self.current_team_id()?;

        self.state.clear_skips();
        let Some(first) = self.state.first_available() else {
            info!(stage = %self.state.current_stage, "stage complete before turn");
            return Ok(self.enter(Phase::StageEnd));
        };

        let state = &mut self.state;
        state.current_note_index = Some(first);
        state.is_playing = true;
        state.is_paused = false;
        state.turn_time_left = self.config.turn_seconds;
        state.current_turn_score = 0;
        state.turn_number += 1;
        Ok(self.enter(Phase::Playing))
    }

    /// The current note was guessed: +1 and move on.
    pub fn correct_guess(&mut self) -> CommandResult {
        self.expect_running(CommandKind::CorrectGuess)?;
        let team = self.current_team_id()?;
        let index = self.current_available_note()?;

        self.state.notes[index].guessed = true;
        self.state.current_turn_score += 1;

        match self.state.next_available_after(index) {
            Some(next) => {
                self.state.current_note_index = Some(next);
                Ok(Outcome::Updated)
            }
            None => {
                let next = if self.state.unguessed_count() == 0 {
                    Phase::StageEnd
                } else {
                    Phase::TurnEnd
                };
                Ok(self.complete_turn(team, next))
            }
        }
    }

    /// The current note was skipped: -1 and move on. A skipped note stays in
    /// play for later turns, so a skip never completes the stage.
    pub fn skip_note(&mut self) -> CommandResult {
        self.expect_running(CommandKind::SkipNote)?;
        let team = self.current_team_id()?;
        let index = self.current_available_note()?;

        self.state.notes[index].skipped_in_turn = true;
        self.state.current_turn_score -= 1;

        match self.state.next_available_after(index) {
            Some(next) => {
                self.state.current_note_index = Some(next);
                Ok(Outcome::Updated)
            }
            None => Ok(self.complete_turn(team, Phase::TurnEnd)),
        }
    }

    /// Pause the running turn. Pausing twice is a no-op.
    pub fn pause_game(&mut self) -> CommandResult {
        self.expect_phase(CommandKind::Pause, &[Phase::Playing])?;
        if self.state.is_paused {
            return Ok(Outcome::Unchanged);
        }
        self.state.is_paused = true;
        self.state.is_playing = false;
        debug!(time_left = self.state.turn_time_left, "turn paused");
        Ok(Outcome::Updated)
    }

    /// Resume a paused turn. Resuming a running turn is a no-op.
    pub fn resume_game(&mut self) -> CommandResult {
        self.expect_phase(CommandKind::Resume, &[Phase::Playing])?;
        if !self.state.is_paused {
            return Ok(Outcome::Unchanged);
        }
        self.state.is_paused = false;
        self.state.is_playing = true;
        debug!(time_left = self.state.turn_time_left, "turn resumed");
        Ok(Outcome::Updated)
    }

    /// Force the running (or paused) turn to end and commit its score.
    pub fn end_turn(&mut self) -> CommandResult {
        self.expect_phase(CommandKind::EndTurn, &[Phase::Playing])?;
        let team = self.current_team_id()?;
        Ok(self.complete_turn(team, Phase::TurnEnd))
    }

    /// One second of turn time. The last second ends the turn.
    pub fn decrement_timer(&mut self) -> CommandResult {
        self.expect_running(CommandKind::Tick)?;
        let team = self.current_team_id()?;

        if self.state.turn_time_left <= 1 {
            self.state.turn_time_left = 0;
            return Ok(self.complete_turn(team, Phase::TurnEnd));
        }
        self.state.turn_time_left -= 1;
        Ok(Outcome::Updated)
    }

    // === Between turns ===

    /// Hand over to the next team, reshuffling the notes.
    pub fn next_turn(&mut self) -> CommandResult {
        self.expect_phase(CommandKind::NextTurn, &[Phase::TurnEnd])?;
        let team_count = self.state.teams.len();
        if team_count == 0 {
            return Err(self.reject(Rejection::NoTeams));
        }

        if self.state.unguessed_count() == 0 {
            return Ok(self.enter(Phase::StageEnd));
        }

        let state = &mut self.state;
        self.rng.shuffle_vector(&mut state.notes);
        state.current_team_index = (state.current_team_index + 1) % team_count;
        state.current_turn_score = 0;
        // Old index points into the previous order; start_turn reselects.
        state.current_note_index = None;
        Ok(self.enter(Phase::Ready))
    }

    /// Advance to the next stage, or end the game after the last one.
    pub fn next_stage(&mut self) -> CommandResult {
        self.expect_phase(CommandKind::NextStage, &[Phase::StageEnd])?;

        let Some(stage) = self.state.current_stage.next() else {
            info!(result = ?ranking::decide(&self.state.teams), "game over");
            return Ok(self.enter(Phase::GameEnd));
        };

        let state = &mut self.state;
        state.current_stage = stage;
        state.reset_note_flags();
        self.rng.shuffle_vector(&mut state.notes);
        state.current_team_index = 0;
        state.current_turn_score = 0;
        state.current_note_index = if state.notes.is_empty() { None } else { Some(0) };

        info!(stage = %stage, "stage started");
        Ok(self.enter(Phase::Ready))
    }

    // === Navigation ===

    /// From the final ranking back to setup, keeping teams and notes.
    pub fn play_again(&mut self) -> CommandResult {
        self.expect_phase(CommandKind::PlayAgain, &[Phase::GameEnd])?;
        Ok(self.enter(Phase::Setup))
    }

    /// Abandon the game for the main menu, keeping teams and notes.
    ///
    /// A running turn must be paused first; its score is discarded.
    pub fn abort_game(&mut self) -> CommandResult {
        self.expect_phase(CommandKind::Abort, ABORTABLE_PHASES)?;
        if self.state.phase == Phase::Playing && !self.state.is_paused {
            return Err(self.reject(Rejection::NotPaused(CommandKind::Abort)));
        }

        self.state.is_playing = false;
        self.state.is_paused = false;
        self.state.current_turn_score = 0;
        Ok(self.enter(Phase::Home))
    }

    /// Discard everything and return to the pristine record.
    ///
    /// Team ids and the turn counter keep counting up, so ids and turns from
    /// before the reset stay distinguishable.
    pub fn reset_game(&mut self) -> CommandResult {
        let turn_number = self.state.turn_number;
        self.state = GameState::new(self.config.turn_seconds);
        self.state.turn_number = turn_number;
        debug!("game reset");
        Ok(Outcome::Entered(Phase::Home))
    }

    // === Internals ===

    fn enter(&mut self, phase: Phase) -> Outcome {
        debug!(from = %self.state.phase, to = %phase, "phase change");
        self.state.phase = phase;
        Outcome::Entered(phase)
    }

    /// Commit the turn score to `team` and leave `Playing`.
    fn complete_turn(&mut self, team: TeamId, next: Phase) -> Outcome {
        let points = self.state.current_turn_score;
        let index = self.state.current_team_index;
        if let Some(t) = self.state.teams.get_mut(index) {
            t.score += points;
        }
        self.state.is_playing = false;
        self.state.is_paused = false;
        self.state.phase = next;

        info!(team = %team, points, next = %next, "turn completed");
        Outcome::TurnCompleted {
            commit: ScoreCommit { team, points },
            next,
        }
    }

    fn expect_phase(&self, command: CommandKind, allowed: &[Phase]) -> Result<(), Rejection> {
        let phase = self.state.phase;
        if allowed.contains(&phase) {
            Ok(())
        } else {
            Err(self.reject(Rejection::WrongPhase { command, phase }))
        }
    }

    /// Playing and not paused.
    fn expect_running(&self, command: CommandKind) -> Result<(), Rejection> {
        self.expect_phase(command, &[Phase::Playing])?;
        if self.state.is_paused {
            return Err(self.reject(Rejection::Paused(command)));
        }
        Ok(())
    }

    fn current_team_id(&self) -> Result<TeamId, Rejection> {
        self.state
            .current_team()
            .map(|t| t.id)
            .ok_or_else(|| self.reject(Rejection::NoTeams))
    }

    fn current_available_note(&self) -> Result<usize, Rejection> {
        self.state
            .current_note_index
            .filter(|&i| self.state.notes.get(i).is_some_and(Note::is_available))
            .ok_or_else(|| self.reject(Rejection::NoCurrentNote))
    }

    fn reject(&self, rejection: Rejection) -> Rejection {
        debug!(phase = %self.state.phase, %rejection, "command rejected");
        rejection
    }
}

impl Default for GameMachine {
    fn default() -> Self {
        Self::from_entropy(GameConfig::default())
    }
}

fn normalize_name(name: String) -> Result<String, Rejection> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(Rejection::EmptyName);
    }
    Ok(trimmed.to_string())
}
