//! Team identification and per-team data.
//!
//! ## TeamId
//!
//! Opaque identifier allocated by the machine. Ids are never reused within
//! one machine's lifetime, so a stale id held by a caller cannot silently
//! address a newer team.
//!
//! ## Team
//!
//! Name and cumulative score. Teams keep insertion order, which is also the
//! fixed turn order.

use serde::{Deserialize, Serialize};

/// Unique identifier for a team.
///
/// ```
/// use fishbowl_engine::core::TeamId;
///
/// let id = TeamId::new(3);
/// assert_eq!(id.raw(), 3);
/// assert_eq!(id.to_string(), "team-3");
/// ```
///
/// The raw value is not a public field:
///
/// ```compile_fail
/// use fishbowl_engine::core::TeamId;
///
/// let forged = TeamId(3);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TeamId(u32);

impl TeamId {
    /// Create a team ID from a raw value.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for TeamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "team-{}", self.0)
    }
}

/// A competing team.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    /// Stable identifier.
    pub id: TeamId,

    /// Display name. Not required to be unique.
    pub name: String,

    /// Score accumulated over committed turns.
    pub score: i64,
}

impl Team {
    /// Create a team with a zero score.
    #[must_use]
    pub fn new(id: TeamId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            score: 0,
        }
    }

    /// Set the score (builder style, mostly for tests and restores).
    #[must_use]
    pub fn with_score(mut self, score: i64) -> Self {
        self.score = score;
        self
    }
}

/// Allocator for fresh team ids.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TeamIdAllocator {
    next: u32,
}

impl TeamIdAllocator {
    /// Create an allocator starting at id 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next id.
    pub fn alloc(&mut self) -> TeamId {
        let id = TeamId(self.next);
        self.next += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_id_display() {
        assert_eq!(format!("{}", TeamId::new(0)), "team-0");
        assert_eq!(format!("{}", TeamId::new(42)), "team-42");
    }

    #[test]
    fn test_team_new() {
        let team = Team::new(TeamId::new(1), "Red");

        assert_eq!(team.id, TeamId::new(1));
        assert_eq!(team.name, "Red");
        assert_eq!(team.score, 0);
    }

    #[test]
    fn test_team_with_score() {
        let team = Team::new(TeamId::new(1), "Blue").with_score(-3);
        assert_eq!(team.score, -3);
    }

    #[test]
    fn test_allocator_is_monotonic() {
        let mut ids = TeamIdAllocator::new();

        let a = ids.alloc();
        let b = ids.alloc();
        let c = ids.alloc();

        assert_eq!(a, TeamId::new(0));
        assert_eq!(b, TeamId::new(1));
        assert_eq!(c, TeamId::new(2));
    }

    #[test]
    fn test_team_serialization() {
        let team = Team::new(TeamId::new(7), "Green").with_score(5);
        let json = serde_json::to_string(&team).unwrap();
        let deserialized: Team = serde_json::from_str(&json).unwrap();
        assert_eq!(team, deserialized);
    }
}
