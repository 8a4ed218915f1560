//! Notebook schema bootstrap.
//!
//! The database carries exactly one schema version, recorded in
//! `PRAGMA user_version`. A fresh file (version 0) receives `schema.sql`;
//! a file stamped by a newer build is refused.

use crate::db::{StorageError, StorageResult};
use log::info;
use rusqlite::{Connection, TransactionBehavior};

/// Schema version written by this build.
pub const SCHEMA_VERSION: u32 = 1;

const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Creates the notebook tables unless the database already has them.
///
/// Runs under an immediate transaction so two connections opening the same
/// fresh file cannot both install the schema.
pub fn ensure_schema(conn: &mut Connection) -> StorageResult<()> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    let found = tx.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;

    if found > SCHEMA_VERSION {
        return Err(StorageError::SchemaTooNew {
            found,
            supported: SCHEMA_VERSION,
        });
    }
    if found == SCHEMA_VERSION {
        return Ok(());
    }

    tx.execute_batch(SCHEMA_SQL)?;
    tx.pragma_update(None, "user_version", SCHEMA_VERSION)?;
    tx.commit()?;

    info!("event=db_schema module=db status=ok installed_version={SCHEMA_VERSION}");
    Ok(())
}
