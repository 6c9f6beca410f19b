//! Categorized note catalog and random draws from it.
//!
//! The catalog is static game content: a list of categories and notes
//! tagged with one or more of them. A `NoteSelection` picks categories and a
//! count; `NoteCatalog::draw` returns a random subset ready for
//! `GameMachine::set_notes`.
//!
//! ## JSON format
//!
//! ```json
//! {
//!   "categories": [{ "id": "movies", "name": "Movies" }],
//!   "notes": [{ "note": "Titanic", "categories": ["movies"], "family_friendly": true }]
//! }
//! ```

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

use crate::core::{GameRng, Note};

/// Fewest notes a category draw may request.
pub const MIN_DRAW: usize = 15;

/// Most notes a category draw may request.
pub const MAX_DRAW: usize = 60;

/// A note category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Stable id referenced by notes.
    pub id: String,
    /// Display name.
    #[serde(alias = "name_he")]
    pub name: String,
}

impl Category {
    /// Create a category.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Catalog loading and building errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("malformed catalog: {0}")]
    Json(#[from] serde_json::Error),

    #[error("category `{0}` is defined twice")]
    DuplicateCategory(String),

    #[error("note `{note}` refers to unknown category `{category}`")]
    UnknownCategory { note: String, category: String },
}

#[derive(Deserialize)]
struct RawCatalog {
    categories: Vec<Category>,
    notes: Vec<RawNote>,
}

#[derive(Deserialize)]
struct RawNote {
    note: String,
    #[serde(default)]
    categories: SmallVec<[String; 2]>,
    #[serde(default)]
    family_friendly: bool,
}

/// Which catalog notes to draw.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteSelection {
    /// Category ids; a note matches if it has any of them.
    pub categories: Vec<String>,
    /// How many notes to draw, within `MIN_DRAW..=MAX_DRAW`.
    pub count: usize,
    /// Only draw notes marked family friendly.
    pub family_friendly_only: bool,
}

impl Default for NoteSelection {
    fn default() -> Self {
        Self {
            categories: vec!["movies".to_string(), "people".to_string()],
            count: 30,
            family_friendly_only: false,
        }
    }
}

impl NoteSelection {
    /// Select the given categories with the default count.
    pub fn new<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            categories: categories.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Set the draw size, clamped to `MIN_DRAW..=MAX_DRAW`.
    #[must_use]
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count.clamp(MIN_DRAW, MAX_DRAW);
        self
    }

    /// Restrict to family-friendly notes.
    #[must_use]
    pub fn family_friendly_only(mut self) -> Self {
        self.family_friendly_only = true;
        self
    }

    /// Notes a draw returns at most. A `count` that skipped `with_count`
    /// (hand-built or loaded from storage) is clamped here.
    #[must_use]
    pub fn draw_size(&self) -> usize {
        self.count.clamp(MIN_DRAW, MAX_DRAW)
    }

    /// Does `note` satisfy this selection?
    #[must_use]
    pub fn matches(&self, note: &Note) -> bool {
        if self.family_friendly_only && !note.family_friendly {
            return false;
        }
        self.categories.iter().any(|c| note.has_category(c))
    }
}

/// Registry of categories and catalog notes.
#[derive(Clone, Debug, Default)]
pub struct NoteCatalog {
    categories: FxHashMap<String, Category>,
    /// Category ids in registration order.
    order: Vec<String>,
    notes: Vec<Note>,
}

impl NoteCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a catalog from JSON.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let raw: RawCatalog = serde_json::from_str(json)?;

        let mut catalog = Self::new();
        for category in raw.categories {
            catalog.add_category(category)?;
        }
        for raw_note in raw.notes {
            let mut note = Note::new(raw_note.note);
            note.family_friendly = raw_note.family_friendly;
            for category in raw_note.categories {
                note = note.with_category(category);
            }
            catalog.add_note(note)?;
        }
        Ok(catalog)
    }

    /// Register a category.
    pub fn add_category(&mut self, category: Category) -> Result<(), CatalogError> {
        if self.categories.contains_key(&category.id) {
            return Err(CatalogError::DuplicateCategory(category.id));
        }
        self.order.push(category.id.clone());
        self.categories.insert(category.id.clone(), category);
        Ok(())
    }

    /// Add a note. Every category it names must already be registered.
    pub fn add_note(&mut self, note: Note) -> Result<(), CatalogError> {
        if let Some(missing) = note.categories.iter().find(|c| !self.categories.contains_key(*c)) {
            return Err(CatalogError::UnknownCategory {
                note: note.text.clone(),
                category: missing.clone(),
            });
        }
        self.notes.push(note.normalized());
        Ok(())
    }

    /// Look up a category by id.
    #[must_use]
    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.get(id)
    }

    /// Categories in registration order.
    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.order.iter().filter_map(|id| self.categories.get(id))
    }

    /// Number of notes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// Check if the catalog has no notes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Notes tagged with a category.
    pub fn notes_in<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a Note> {
        self.notes.iter().filter(move |n| n.has_category(category))
    }

    /// Notes satisfying a selection, in catalog order.
    pub fn matching<'a>(&'a self, selection: &'a NoteSelection) -> impl Iterator<Item = &'a Note> {
        self.notes.iter().filter(move |n| selection.matches(n))
    }

    /// Random subset for a selection: matching notes, shuffled, truncated
    /// to `selection.draw_size()`. Returns fewer when the catalog runs short.
    pub fn draw(&self, selection: &NoteSelection, rng: &mut GameRng) -> Vec<Note> {
        let mut pool: Vec<Note> = self.matching(selection).cloned().collect();
        rng.shuffle(&mut pool);
        pool.truncate(selection.draw_size());
        pool
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"{
        "categories": [
            { "id": "movies", "name": "Movies" },
            { "id": "people", "name_he": "People" },
            { "id": "places", "name": "Places" }
        ],
        "notes": [
            { "note": "Titanic", "categories": ["movies"], "family_friendly": true },
            { "note": "Einstein", "categories": ["people"], "family_friendly": true },
            { "note": "Pulp Fiction", "categories": ["movies"] },
            { "note": "Paris", "categories": ["places"], "family_friendly": true },
            { "note": "Chaplin", "categories": ["people", "movies"], "family_friendly": true }
        ]
    }"#;

    #[test]
    fn test_from_json() {
        let catalog = NoteCatalog::from_json(CATALOG).unwrap();

        assert_eq!(catalog.len(), 5);
        assert_eq!(catalog.category("people").unwrap().name, "People");
        let ids: Vec<_> = catalog.categories().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["movies", "people", "places"]);
        assert_eq!(catalog.notes_in("movies").count(), 3);
    }

    #[test]
    fn test_unknown_category_rejected() {
        let json = r#"{
            "categories": [{ "id": "movies", "name": "Movies" }],
            "notes": [{ "note": "Mars", "categories": ["space"] }]
        }"#;

        let err = NoteCatalog::from_json(json).unwrap_err();
        assert!(matches!(err, CatalogError::UnknownCategory { ref category, .. } if category == "space"));
    }

    #[test]
    fn test_duplicate_category_rejected() {
        let mut catalog = NoteCatalog::new();
        catalog.add_category(Category::new("movies", "Movies")).unwrap();

        let err = catalog.add_category(Category::new("movies", "Films")).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateCategory(_)));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(NoteCatalog::from_json("{"), Err(CatalogError::Json(_))));
    }

    #[test]
    fn test_selection_matching() {
        let catalog = NoteCatalog::from_json(CATALOG).unwrap();

        let movies = NoteSelection::new(["movies"]);
        assert_eq!(catalog.matching(&movies).count(), 3);

        let family_movies = NoteSelection::new(["movies"]).family_friendly_only();
        let texts: Vec<_> = catalog.matching(&family_movies).map(|n| n.text.as_str()).collect();
        assert_eq!(texts, vec!["Titanic", "Chaplin"]);

        let nothing = NoteSelection::new(Vec::<String>::new());
        assert_eq!(catalog.matching(&nothing).count(), 0);
    }

    #[test]
    fn test_selection_count_clamped() {
        assert_eq!(NoteSelection::default().count, 30);
        assert_eq!(NoteSelection::default().with_count(3).count, MIN_DRAW);
        assert_eq!(NoteSelection::default().with_count(500).count, MAX_DRAW);
        assert_eq!(NoteSelection::default().with_count(45).count, 45);
    }

    #[test]
    fn test_draw_subset() {
        let mut catalog = NoteCatalog::new();
        catalog.add_category(Category::new("words", "Words")).unwrap();
        for i in 0..40 {
            catalog.add_note(Note::new(format!("w{}", i)).with_category("words")).unwrap();
        }

        let selection = NoteSelection::new(["words"]).with_count(20);
        let drawn = catalog.draw(&selection, &mut GameRng::new(3));

        assert_eq!(drawn.len(), 20);
        assert!(drawn.iter().all(|n| n.has_category("words")));

        let again = catalog.draw(&selection, &mut GameRng::new(3));
        assert_eq!(drawn, again);
    }

    #[test]
    fn test_draw_clamps_unchecked_count() {
        let mut catalog = NoteCatalog::new();
        catalog.add_category(Category::new("words", "Words")).unwrap();
        for i in 0..100 {
            catalog.add_note(Note::new(format!("w{}", i)).with_category("words")).unwrap();
        }

        let stored: NoteSelection =
            serde_json::from_str(r#"{"categories":["words"],"count":200,"family_friendly_only":false}"#)
                .unwrap();
        assert_eq!(stored.count, 200);
        assert_eq!(stored.draw_size(), MAX_DRAW);
        assert_eq!(catalog.draw(&stored, &mut GameRng::new(2)).len(), MAX_DRAW);

        let tiny = NoteSelection { count: 0, ..NoteSelection::new(["words"]) };
        assert_eq!(catalog.draw(&tiny, &mut GameRng::new(2)).len(), MIN_DRAW);
    }

    #[test]
    fn test_draw_short_catalog() {
        let catalog = NoteCatalog::from_json(CATALOG).unwrap();
        let drawn = catalog.draw(&NoteSelection::default(), &mut GameRng::new(1));

        // Only four notes are movies or people.
        assert_eq!(drawn.len(), 4);
    }
}
