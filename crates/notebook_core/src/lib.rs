//! Core data access for the notebook application.
//! Notes, tags and their SQLite persistence live here.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;

pub use config::{ConfigError, NotebookConfig};
pub use db::{StorageError, StorageResult};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::{Note, NoteId, Tag};
pub use repo::note_repo::{NoteRepository, SqliteNoteRepository};
pub use repo::pagination::{paginate, PageWindow, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
