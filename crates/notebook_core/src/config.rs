//! Environment-driven configuration.
//!
//! # Responsibility
//! - Resolve database location and logging options from `NOTEBOOK_*` vars.
//! - Open the configured database.
//!
//! # Invariants
//! - A missing `NOTEBOOK_DB_PATH` selects an in-memory database.
//! - `log_level` is always one of `trace|debug|info|warn|error`.

use crate::db::{open_db, open_db_in_memory, StorageResult};
use crate::logging::{default_log_level, normalize_level};
use rusqlite::Connection;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const ENV_DB_PATH: &str = "NOTEBOOK_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "NOTEBOOK_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "NOTEBOOK_LOG_DIR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidValue { key: &'static str, reason: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue { key, reason } => write!(f, "invalid value for {key}: {reason}"),
        }
    }
}

impl Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotebookConfig {
    /// SQLite file; `None` means in-memory.
    pub database_path: Option<PathBuf>,
    pub log_level: &'static str,
    /// Absolute log directory; `None` leaves logging uninitialized.
    pub log_dir: Option<PathBuf>,
}

impl NotebookConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let database_path = non_blank(&env_map, ENV_DB_PATH).map(PathBuf::from);

        let log_level = match non_blank(&env_map, ENV_LOG_LEVEL) {
            Some(value) => normalize_level(value).map_err(|reason| ConfigError::InvalidValue {
                key: ENV_LOG_LEVEL,
                reason,
            })?,
            None => default_log_level(),
        };

        let log_dir = match non_blank(&env_map, ENV_LOG_DIR) {
            Some(value) => {
                let path = PathBuf::from(value);
                if !path.is_absolute() {
                    return Err(ConfigError::InvalidValue {
                        key: ENV_LOG_DIR,
                        reason: format!("must be an absolute path, got `{value}`"),
                    });
                }
                Some(path)
            }
            None => None,
        };

        Ok(Self {
            database_path,
            log_level,
            log_dir,
        })
    }

    /// Opens the configured database with the schema installed.
    pub fn open_database(&self) -> StorageResult<Connection> {
        match &self.database_path {
            Some(path) => open_db(path),
            None => open_db_in_memory(),
        }
    }
}

fn non_blank<'a>(env_map: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    env_map
        .get(key)
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, NotebookConfig, ENV_DB_PATH, ENV_LOG_DIR, ENV_LOG_LEVEL};
    use crate::logging::default_log_level;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn empty_env_uses_defaults() {
        let config = NotebookConfig::from_env_map(HashMap::new()).expect("empty env should parse");
        assert_eq!(config.database_path, None);
        assert_eq!(config.log_level, default_log_level());
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn reads_all_keys() {
        let log_dir = std::env::temp_dir().join("notebook-config-logs");
        let config = NotebookConfig::from_env_map(env(&[
            (ENV_DB_PATH, "notes.db"),
            (ENV_LOG_LEVEL, "WARNING"),
            (ENV_LOG_DIR, log_dir.to_str().expect("temp dir should be valid UTF-8")),
        ]))
        .expect("complete env should parse");

        assert_eq!(config.database_path, Some(PathBuf::from("notes.db")));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir, Some(log_dir));
    }

    #[test]
    fn blank_values_count_as_missing() {
        let config = NotebookConfig::from_env_map(env(&[(ENV_DB_PATH, "   ")]))
            .expect("blank db path should parse");
        assert_eq!(config.database_path, None);
    }

    #[test]
    fn rejects_unknown_level_and_relative_log_dir() {
        let err = NotebookConfig::from_env_map(env(&[(ENV_LOG_LEVEL, "loud")]))
            .expect_err("unknown level must be rejected");
        assert!(matches!(err, ConfigError::InvalidValue { key, .. } if key == ENV_LOG_LEVEL));

        let err = NotebookConfig::from_env_map(env(&[(ENV_LOG_DIR, "logs")]))
            .expect_err("relative log dir must be rejected");
        assert!(matches!(err, ConfigError::InvalidValue { key, .. } if key == ENV_LOG_DIR));
    }

    #[test]
    fn missing_db_path_opens_in_memory_database() {
        let config = NotebookConfig::from_env_map(HashMap::new()).expect("empty env should parse");
        let conn = config
            .open_database()
            .expect("in-memory database should open");
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM notes;", [], |row| row.get(0))
            .expect("notes table should exist");
        assert_eq!(count, 0);
    }
}
