//! Commands: the user and timer intents the machine accepts.
//!
//! Every state transition is reachable either through a `GameMachine`
//! method or by dispatching the matching `Command` value. Commands are plain
//! data, so hosts can queue, log, or replay them.

use serde::{Deserialize, Serialize};

use super::note::Note;
use super::team::TeamId;

/// A request to change the game state.
///
/// ## Example
///
/// ```
/// use fishbowl_engine::core::{Command, CommandKind};
///
/// let cmd = Command::AddTeam("Red".into());
/// assert_eq!(cmd.kind(), CommandKind::AddTeam);
/// assert_eq!(Command::Tick.kind().to_string(), "tick");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Leave the main menu for setup.
    OpenSetup,
    /// Append a team.
    AddTeam(String),
    /// Remove a team by id.
    RemoveTeam(TeamId),
    /// Rename a team.
    RenameTeam { id: TeamId, name: String },
    /// Replace the note pool.
    SetNotes(Vec<Note>),
    /// Reset scores and enter the first stage.
    StartGame,
    /// Begin the current team's turn.
    StartTurn,
    /// The current note was guessed.
    CorrectGuess,
    /// The current note was skipped.
    SkipNote,
    /// Pause the running turn.
    Pause,
    /// Resume a paused turn.
    Resume,
    /// Force the turn to end now.
    EndTurn,
    /// One second of turn time elapsed.
    Tick,
    /// Hand over to the next team.
    NextTurn,
    /// Advance to the next stage, or finish the game.
    NextStage,
    /// From the final ranking back to setup with the same roster.
    PlayAgain,
    /// Leave the game for the main menu.
    Abort,
    /// Discard everything and return to the pristine state.
    Reset,
}

/// Fieldless command discriminant, used in rejections and logs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommandKind {
    OpenSetup,
    AddTeam,
    RemoveTeam,
    RenameTeam,
    SetNotes,
    StartGame,
    StartTurn,
    CorrectGuess,
    SkipNote,
    Pause,
    Resume,
    EndTurn,
    Tick,
    NextTurn,
    NextStage,
    PlayAgain,
    Abort,
    Reset,
}

impl Command {
    /// The command's discriminant.
    #[must_use]
    pub fn kind(&self) -> CommandKind {
        match self {
            Command::OpenSetup => CommandKind::OpenSetup,
            Command::AddTeam(_) => CommandKind::AddTeam,
            Command::RemoveTeam(_) => CommandKind::RemoveTeam,
            Command::RenameTeam { .. } => CommandKind::RenameTeam,
            Command::SetNotes(_) => CommandKind::SetNotes,
            Command::StartGame => CommandKind::StartGame,
            Command::StartTurn => CommandKind::StartTurn,
            Command::CorrectGuess => CommandKind::CorrectGuess,
            Command::SkipNote => CommandKind::SkipNote,
            Command::Pause => CommandKind::Pause,
            Command::Resume => CommandKind::Resume,
            Command::EndTurn => CommandKind::EndTurn,
            Command::Tick => CommandKind::Tick,
            Command::NextTurn => CommandKind::NextTurn,
            Command::NextStage => CommandKind::NextStage,
            Command::PlayAgain => CommandKind::PlayAgain,
            Command::Abort => CommandKind::Abort,
            Command::Reset => CommandKind::Reset,
        }
    }
}

impl std::fmt::Display for CommandKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CommandKind::OpenSetup => "open setup",
            CommandKind::AddTeam => "add team",
            CommandKind::RemoveTeam => "remove team",
            CommandKind::RenameTeam => "rename team",
            CommandKind::SetNotes => "set notes",
            CommandKind::StartGame => "start game",
            CommandKind::StartTurn => "start turn",
            CommandKind::CorrectGuess => "correct guess",
            CommandKind::SkipNote => "skip note",
            CommandKind::Pause => "pause",
            CommandKind::Resume => "resume",
            CommandKind::EndTurn => "end turn",
            CommandKind::Tick => "tick",
            CommandKind::NextTurn => "next turn",
            CommandKind::NextStage => "next stage",
            CommandKind::PlayAgain => "play again",
            CommandKind::Abort => "abort",
            CommandKind::Reset => "reset",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_kind() {
        assert_eq!(Command::StartGame.kind(), CommandKind::StartGame);
        assert_eq!(
            Command::RenameTeam { id: TeamId::new(1), name: "Blue".into() }.kind(),
            CommandKind::RenameTeam
        );
        assert_eq!(Command::SetNotes(vec![]).kind(), CommandKind::SetNotes);
    }

    #[test]
    fn test_command_kind_display() {
        assert_eq!(CommandKind::CorrectGuess.to_string(), "correct guess");
        assert_eq!(CommandKind::NextStage.to_string(), "next stage");
    }

    #[test]
    fn test_command_serialization() {
        let cmd = Command::SetNotes(vec![Note::custom("Pizza")]);
        let json = serde_json::to_string(&cmd).unwrap();
        let deserialized: Command = serde_json::from_str(&json).unwrap();

        assert_eq!(cmd, deserialized);
    }
}
