//! Notes written by the players themselves.

use serde::{Deserialize, Serialize};

use crate::core::Note;

/// Ordered list of user-written note texts.
///
/// Texts are trimmed; empty and duplicate entries are refused.
///
/// ```
/// use fishbowl_engine::notes::CustomNotes;
///
/// let mut custom = CustomNotes::new();
/// assert!(custom.add("  Grandma's soup "));
/// assert!(!custom.add("Grandma's soup"));
/// assert!(!custom.add("   "));
/// assert_eq!(custom.len(), 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomNotes {
    texts: Vec<String>,
}

impl CustomNotes {
    /// Create an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a note. Returns false if it was empty or already present.
    pub fn add(&mut self, text: impl AsRef<str>) -> bool {
        let text = text.as_ref().trim();
        if text.is_empty() || self.contains(text) {
            return false;
        }
        self.texts.push(text.to_string());
        true
    }

    /// Remove the note at `index`.
    pub fn remove(&mut self, index: usize) -> Option<String> {
        if index < self.texts.len() {
            Some(self.texts.remove(index))
        } else {
            None
        }
    }

    /// Check whether a (trimmed) text is already present.
    #[must_use]
    pub fn contains(&self, text: &str) -> bool {
        let text = text.trim();
        self.texts.iter().any(|t| t == text)
    }

    /// Number of notes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.texts.len()
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    /// Texts in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.texts.iter().map(String::as_str)
    }

    /// Notes in the custom category, ready for the machine.
    #[must_use]
    pub fn to_notes(&self) -> Vec<Note> {
        self.texts.iter().map(|t| Note::custom(t.as_str())).collect()
    }
}

impl<S: AsRef<str>> FromIterator<S> for CustomNotes {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut notes = Self::new();
        for text in iter {
            notes.add(text);
        }
        notes
    }
}
