//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the note/tag data access contract used by callers.
//! - Isolate SQLite query details from the rest of the crate.
//!
//! # Invariants
//! - Repository APIs surface storage failures as `StorageError` unchanged.
//! - Missing rows are reported with `Option`, not zero-value records.

pub mod note_repo;
pub mod pagination;
