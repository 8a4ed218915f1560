//! SQLite bootstrap and the storage error surfaced by every repository call.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;
pub mod schema;

pub use open::{open_db, open_db_in_memory};

pub type StorageResult<T> = Result<T, StorageError>;

/// Failure reported by the storage layer.
///
/// Repository methods only ever produce `Sqlite`, holding the driver error
/// exactly as rusqlite returned it. `SchemaTooNew` comes from opening a
/// database, never from a repository call.
#[derive(Debug)]
pub enum StorageError {
    Sqlite(rusqlite::Error),
    /// The file's `user_version` is ahead of [`schema::SCHEMA_VERSION`].
    SchemaTooNew { found: u32, supported: u32 },
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => Display::fmt(err, f),
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "notebook schema v{found} was written by a newer build; this build reads up to v{supported}"
            ),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::SchemaTooNew { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
