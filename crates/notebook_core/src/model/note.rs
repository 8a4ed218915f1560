//! Note and tag records.
//!
//! # Responsibility
//! - Define the note shape written and read by `NoteRepository`.
//! - Provide small helpers for soft-delete state and tag access.
//!
//! # Invariants
//! - `id == 0` means the note was never persisted.
//! - `deleted_at` is the source of truth for tombstone state.
//! - A persisted note's `tags` mirror its `note_tags` rows exactly.

use serde::{Deserialize, Serialize};

/// Storage-generated note identifier.
pub type NoteId = i64;

/// Tag keyed by its unique name.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
}

impl Tag {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Note record as stored in the `notes` table plus its tag links.
///
/// `Default` yields the zero-value note: unset id, empty fields, no tags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Generated by storage on create; `0` before persistence.
    pub id: NoteId,
    pub title: String,
    /// Free-form body text.
    pub content: String,
    /// Epoch milliseconds, set by storage.
    pub created_at: i64,
    /// Epoch milliseconds, refreshed on every save.
    pub updated_at: i64,
    /// Soft-delete tombstone in epoch milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<i64>,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

impl Note {
    /// Creates an unsaved note with no tags.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            ..Self::default()
        }
    }

    /// Replaces the tag list with the given names.
    pub fn with_tags<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = names.into_iter().map(Tag::new).collect();
        self
    }

    /// Returns whether the note carries a soft-delete tombstone.
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Tag names in stored order.
    pub fn tag_names(&self) -> Vec<&str> {
        self.tags.iter().map(|tag| tag.name.as_str()).collect()
    }
}
