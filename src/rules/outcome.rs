//! Typed results of machine operations.
//!
//! Every operation returns `Result<Outcome, Rejection>`. A rejection never
//! mutates state, so callers can retry or ignore it freely.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{CommandKind, Phase, TeamId};

/// Points moved from the turn score onto a team's total.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreCommit {
    /// Team credited.
    pub team: TeamId,
    /// Turn score added (may be negative).
    pub points: i64,
}

/// What an accepted operation did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// A team was appended.
    TeamAdded(TeamId),
    /// State changed, phase did not.
    Updated,
    /// Accepted, but nothing needed to change.
    Unchanged,
    /// The phase changed without a score commit.
    Entered(Phase),
    /// The active turn finished and its score was committed.
    TurnCompleted {
        /// The commit that was applied.
        commit: ScoreCommit,
        /// Phase entered after the turn (`TurnEnd` or `StageEnd`).
        next: Phase,
    },
}

impl Outcome {
    /// Phase entered by this outcome, if it changed the phase.
    #[must_use]
    pub fn entered(&self) -> Option<Phase> {
        match self {
            Outcome::Entered(phase) => Some(*phase),
            Outcome::TurnCompleted { next, .. } => Some(*next),
            _ => None,
        }
    }

    /// Score commit carried by this outcome.
    #[must_use]
    pub fn commit(&self) -> Option<ScoreCommit> {
        match self {
            Outcome::TurnCompleted { commit, .. } => Some(*commit),
            _ => None,
        }
    }
}

/// Why an operation was refused.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("cannot {command} during {phase}")]
    WrongPhase { command: CommandKind, phase: Phase },

    #[error("cannot {0} while the turn is paused")]
    Paused(CommandKind),

    #[error("cannot {0} while the turn is running")]
    NotPaused(CommandKind),

    #[error("no note is being shown")]
    NoCurrentNote,

    #[error("need at least {need} teams, have {have}")]
    NotEnoughTeams { have: usize, need: usize },

    #[error("need at least {need} notes, have {have}")]
    NotEnoughNotes { have: usize, need: usize },

    #[error("unknown team {0}")]
    UnknownTeam(TeamId),

    #[error("team name must not be empty")]
    EmptyName,

    #[error("there are no teams to take a turn")]
    NoTeams,
}

/// Result of every machine operation.
pub type CommandResult = Result<Outcome, Rejection>;
