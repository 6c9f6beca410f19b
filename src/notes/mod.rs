//! Note sources: the categorized catalog and player-written notes.
//!
//! ## Key Types
//!
//! - `NoteCatalog`: static categories and notes, loadable from JSON
//! - `NoteSelection`: categories, count, and family filter for a draw
//! - `CustomNotes`: free-text notes typed in during setup
//!
//! The machine treats every note alike regardless of where it came from.

pub mod catalog;
pub mod custom;

pub use catalog::{Category, CatalogError, NoteCatalog, NoteSelection, MAX_DRAW, MIN_DRAW};
pub use custom::CustomNotes;
