//! Notes: the clue cards shared by every stage.
//!
//! A note carries catalog metadata (text, categories, family-friendly flag)
//! plus two pieces of play state:
//!
//! - `guessed`: sticky for the rest of the stage, cleared at stage start.
//! - `skipped_in_turn`: cleared at the start of every turn, so a turn never
//!   shows a note it already skipped but the next turn may.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Category attached to user-written notes.
pub const CUSTOM_CATEGORY: &str = "custom";

/// A single clue card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// The word or phrase to be guessed.
    pub text: String,

    /// Category ids. Usually one or two, kept free of duplicates.
    pub categories: SmallVec<[String; 2]>,

    /// Suitable for family play.
    #[serde(default)]
    pub family_friendly: bool,

    /// Guessed during the current stage.
    #[serde(default)]
    pub guessed: bool,

    /// Already shown and skipped during the current turn.
    #[serde(default)]
    pub skipped_in_turn: bool,
}

impl Note {
    /// Create an uncategorized note.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            categories: SmallVec::new(),
            family_friendly: false,
            guessed: false,
            skipped_in_turn: false,
        }
    }

    /// Create a user-written note in the custom category.
    #[must_use]
    pub fn custom(text: impl Into<String>) -> Self {
        Self::new(text).with_category(CUSTOM_CATEGORY)
    }

    /// Add a category. Duplicates are ignored.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        let category = category.into();
        if !self.has_category(&category) {
            self.categories.push(category);
        }
        self
    }

    /// Mark as family friendly.
    #[must_use]
    pub fn family_friendly(mut self) -> Self {
        self.family_friendly = true;
        self
    }

    /// Check category membership.
    #[must_use]
    pub fn has_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }

    /// Unguessed and not skipped in the current turn.
    #[must_use]
    pub fn is_available(&self) -> bool {
        !self.guessed && !self.skipped_in_turn
    }

    /// Clear both play flags.
    pub fn reset_flags(&mut self) {
        self.guessed = false;
        self.skipped_in_turn = false;
    }

    /// Copy with both play flags cleared.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.reset_flags();
        self
    }
}
