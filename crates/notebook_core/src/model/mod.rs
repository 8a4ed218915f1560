//! Domain model for notes and tags.
//!
//! # Responsibility
//! - Define the record shapes persisted by the repository layer.
//!
//! # Invariants
//! - A note is identified by a storage-generated integer id (`0` = unset).
//! - Deletion is a `deleted_at` tombstone; only test teardown removes rows.

pub mod note;
