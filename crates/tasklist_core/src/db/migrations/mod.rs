//! Schema version check and destructive upgrade.
//!
//! # Responsibility
//! - Create the `tasks` table on a fresh database.
//! - Replace the table wholesale when the stored version is older.
//!
//! # Invariants
//! - Applied version is mirrored to `PRAGMA user_version`.
//! - Upgrade is drop + recreate inside one transaction; rows are lost.
//! - A newer stored version is refused, never downgraded.

use crate::db::{DbError, DbResult};
use log::{info, warn};
use rusqlite::Connection;

/// Schema version written by this build.
pub const DATABASE_VERSION: u32 = 1;

const CREATE_TASKS_SQL: &str = include_str!("create_tasks.sql");
const DROP_TASKS_SQL: &str = "DROP TABLE IF EXISTS tasks;";

/// What the schema check did to the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaOutcome {
    /// Stored version already matched.
    UpToDate,
    /// Fresh database; table created.
    Created,
    /// Older version found; table dropped and recreated.
    Recreated { from_version: u32 },
}

/// Returns the latest schema version known by this binary.
pub fn latest_version() -> u32 {
    DATABASE_VERSION
}

/// Brings the connection to [`DATABASE_VERSION`].
pub fn apply_migrations(conn: &mut Connection) -> DbResult<SchemaOutcome> {
    apply_schema_version(conn, DATABASE_VERSION)
}

/// Brings the connection to `target_version`.
///
/// # Side effects
/// - Version `0` creates the table.
/// - Any version in `1..target_version` drops the table with all rows and
///   recreates it empty.
///
/// # Errors
/// - `UnsupportedSchemaVersion` when the stored version is above `target_version`.
pub fn apply_schema_version(conn: &mut Connection, target_version: u32) -> DbResult<SchemaOutcome> {
    let current_version = current_user_version(conn)?;

    if current_version > target_version {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: current_version,
            latest_supported: target_version,
        });
    }

    if current_version == target_version {
        return Ok(SchemaOutcome::UpToDate);
    }

    let tx = conn.transaction()?;
    let outcome = if current_version == 0 {
        SchemaOutcome::Created
    } else {
        tx.execute_batch(DROP_TASKS_SQL)?;
        SchemaOutcome::Recreated {
            from_version: current_version,
        }
    };
    tx.execute_batch(CREATE_TASKS_SQL)?;
    tx.execute_batch(&format!("PRAGMA user_version = {target_version};"))?;
    tx.commit()?;

    match outcome {
        SchemaOutcome::Recreated { from_version } => warn!(
            "event=db_migrate module=db status=ok from_version={} to_version={} destructive_upgrade=true",
            from_version, target_version
        ),
        _ => info!(
            "event=db_migrate module=db status=ok from_version=0 to_version={}",
            target_version
        ),
    }

    Ok(outcome)
}

/// Reads `PRAGMA user_version`.
pub fn current_user_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}
