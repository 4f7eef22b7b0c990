//! Relational task store on SQLite.
//!
//! # Responsibility
//! - Map `TaskStore` onto the single `tasks(id, description)` table.
//!
//! # Invariants
//! - Identifiers are assigned by SQLite (`AUTOINCREMENT`) and never reused.
//! - `list_all` is a full-table scan with no ordering clause; callers must
//!   not depend on row order.
//! - Only `RecordKey::Id` is accepted for removal.

use crate::db::{open_db, open_db_in_memory};
use crate::model::record::{Record, RecordKey};
use crate::store::{StoreError, StoreResult, TaskStore};
use log::{debug, info};
use rusqlite::{params, Connection, Row};
use std::path::Path;

const BACKEND_NAME: &str = "sqlite";

/// SQLite-backed task store owning its connection.
pub struct SqliteTaskStore {
    conn: Connection,
}

impl SqliteTaskStore {
    /// Wraps a connection that already passed `db::open_db*` bootstrap.
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Opens (and if needed creates or upgrades) the database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        Ok(Self::new(open_db(path)?))
    }

    /// Opens a private in-memory database.
    pub fn open_in_memory() -> StoreResult<Self> {
        Ok(Self::new(open_db_in_memory()?))
    }

    /// Borrows the underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl TaskStore for SqliteTaskStore {
    fn backend_name(&self) -> &'static str {
        BACKEND_NAME
    }

    fn add(&self, description: &str) -> StoreResult<Record> {
        self.conn.execute(
            "INSERT INTO tasks (description) VALUES (?1);",
            params![description],
        )?;
        let id = self.conn.last_insert_rowid();
        info!(
            "event=store_add module=store status=ok backend={} id={}",
            BACKEND_NAME, id
        );
        Ok(Record::with_id(id, description))
    }

    fn list_all(&self) -> StoreResult<Vec<Record>> {
        let mut stmt = self.conn.prepare("SELECT id, description FROM tasks;")?;
        let mut rows = stmt.query([])?;
        let mut records = Vec::new();

        while let Some(row) = rows.next()? {
            records.push(parse_task_row(row)?);
        }

        debug!(
            "event=store_list module=store status=ok backend={} count={}",
            BACKEND_NAME,
            records.len()
        );
        Ok(records)
    }

    fn remove(&self, key: &RecordKey) -> StoreResult<()> {
        let id = match key {
            RecordKey::Id(id) => *id,
            RecordKey::Description(_) => {
                return Err(StoreError::UnsupportedKey {
                    backend: BACKEND_NAME,
                    key: key.clone(),
                });
            }
        };

        let changed = self
            .conn
            .execute("DELETE FROM tasks WHERE id = ?1;", params![id])?;
        info!(
            "event=store_remove module=store status=ok backend={} id={} changed={}",
            BACKEND_NAME, id, changed
        );
        Ok(())
    }
}

fn parse_task_row(row: &Row<'_>) -> StoreResult<Record> {
    let id: i64 = row.get("id")?;
    // The column is nullable TEXT; a NULL can only come from an outside writer.
    let description = row
        .get::<_, Option<String>>("description")?
        .ok_or_else(|| StoreError::InvalidData(format!("task {id} has NULL description")))?;
    Ok(Record::with_id(id, description))
}
