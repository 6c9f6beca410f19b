//! Game configuration and stage definitions.
//!
//! - `Stage`: the three rule regimes, played in order over the same notes
//! - `GameConfig`: turn length and the minimum roster needed to start
//!
//! Defaults match the standard party rules: 60-second turns, at least two
//! teams and ten notes, urgent countdown in the last ten seconds.

use serde::{Deserialize, Serialize};

/// One of the three game-wide rule regimes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Stage {
    /// Describe the note freely without saying it.
    #[default]
    FreeSpeech,
    /// A single word as the clue.
    OneWord,
    /// Act it out without speaking.
    Charades,
}

impl Stage {
    /// All stages in play order.
    pub const ALL: [Stage; 3] = [Stage::FreeSpeech, Stage::OneWord, Stage::Charades];

    /// 1-based stage number.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Stage::FreeSpeech => 1,
            Stage::OneWord => 2,
            Stage::Charades => 3,
        }
    }

    /// Stage for a 1-based number.
    #[must_use]
    pub const fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(Stage::FreeSpeech),
            2 => Some(Stage::OneWord),
            3 => Some(Stage::Charades),
            _ => None,
        }
    }

    /// The following stage, or `None` after the last one.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    /// Is this the final stage?
    #[must_use]
    pub const fn is_last(self) -> bool {
        self.next().is_none()
    }

    /// Human-readable name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Stage::FreeSpeech => "Free Speech",
            Stage::OneWord => "One Word",
            Stage::Charades => "Charades",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Stage {} ({})", self.number(), self.name())
    }
}

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Length of one turn in seconds.
    pub turn_seconds: u32,

    /// Teams required before `start_game` is accepted.
    pub min_teams: usize,

    /// Notes required before `start_game` is accepted.
    pub min_notes: usize,

    /// Remaining seconds at or below which the countdown counts as urgent.
    pub urgent_threshold: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            turn_seconds: 60,
            min_teams: 2,
            min_notes: 10,
            urgent_threshold: 10,
        }
    }
}

impl GameConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the turn length.
    #[must_use]
    pub fn with_turn_seconds(mut self, seconds: u32) -> Self {
        assert!(seconds > 0, "Turn must last at least 1 second");
        self.turn_seconds = seconds;
        self
    }

    /// Set the minimum team count.
    #[must_use]
    pub fn with_min_teams(mut self, count: usize) -> Self {
        assert!(count >= 2, "Must require at least 2 teams");
        self.min_teams = count;
        self
    }

    /// Set the minimum note count.
    #[must_use]
    pub fn with_min_notes(mut self, count: usize) -> Self {
        assert!(count >= 1, "Must require at least 1 note");
        self.min_notes = count;
        self
    }

    /// Set the urgent countdown threshold.
    #[must_use]
    pub fn with_urgent_threshold(mut self, seconds: u32) -> Self {
        self.urgent_threshold = seconds;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_numbers() {
        for (i, stage) in Stage::ALL.iter().enumerate() {
            assert_eq!(stage.number() as usize, i + 1);
            assert_eq!(Stage::from_number(stage.number()), Some(*stage));
        }
        assert_eq!(Stage::from_number(0), None);
        assert_eq!(Stage::from_number(4), None);
    }

    #[test]
    fn test_stage_progression() {
        assert_eq!(Stage::FreeSpeech.next(), Some(Stage::OneWord));
        assert_eq!(Stage::OneWord.next(), Some(Stage::Charades));
        assert_eq!(Stage::Charades.next(), None);
        assert!(Stage::Charades.is_last());
        assert!(!Stage::FreeSpeech.is_last());
    }

    #[test]
    fn test_stage_display() {
        assert_eq!(format!("{}", Stage::OneWord), "Stage 2 (One Word)");
        assert_eq!(Stage::default(), Stage::FreeSpeech);
    }

    #[test]
    fn test_config_defaults() {
        let config = GameConfig::default();

        assert_eq!(config.turn_seconds, 60);
        assert_eq!(config.min_teams, 2);
        assert_eq!(config.min_notes, 10);
        assert_eq!(config.urgent_threshold, 10);
    }

    #[test]
    fn test_config_builder() {
        let config = GameConfig::new()
            .with_turn_seconds(45)
            .with_min_teams(3)
            .with_min_notes(1)
            .with_urgent_threshold(5);

        assert_eq!(config.turn_seconds, 45);
        assert_eq!(config.min_teams, 3);
        assert_eq!(config.min_notes, 1);
        assert_eq!(config.urgent_threshold, 5);
    }

    #[test]
    #[should_panic(expected = "Must require at least 2 teams")]
    fn test_config_single_team() {
        let _ = GameConfig::new().with_min_teams(1);
    }

    #[test]
    #[should_panic(expected = "Turn must last at least 1 second")]
    fn test_config_zero_turn() {
        let _ = GameConfig::new().with_turn_seconds(0);
    }

    #[test]
    fn test_config_serde() {
        let config = GameConfig::new().with_turn_seconds(30);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
