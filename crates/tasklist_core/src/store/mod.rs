//! Durable task persistence contract and backends.
//!
//! # Responsibility
//! - Define the `TaskStore` contract shared by every backend.
//! - Keep SQL and preference-file details behind that contract.
//!
//! # Invariants
//! - Stores never validate descriptions; callers pass already-normalized text.
//! - `remove` of an absent key is a no-op. A key kind the backend does not
//!   index by is `StoreError::UnsupportedKey`.
//! - `list_all` returns a fresh snapshot each call, never a live cursor.
//!
//! # Backend guarantees
//! - `sqlite`: every `add` creates a distinct row with a new identifier;
//!   duplicate descriptions are kept apart.
//! - `preferences`: the description is the identity; duplicate descriptions
//!   collapse into one entry and reload order is unspecified.

use crate::db::DbError;
use crate::model::record::{Record, RecordKey};
use crate::prefs::PrefsError;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub mod preference_store;
pub mod sqlite_store;

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level failure, distinct from input validation.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    Prefs(PrefsError),
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    InvalidData(String),
    UnsupportedKey {
        backend: &'static str,
        key: RecordKey,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Prefs(err) => write!(f, "{err}"),
            Self::Io { path, source } => write!(f, "{}: {source}", path.display()),
            Self::InvalidData(message) => write!(f, "invalid persisted task data: {message}"),
            Self::UnsupportedKey { backend, key } => {
                write!(f, "{backend} store cannot remove by key {key}")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Prefs(err) => Some(err),
            Self::Io { source, .. } => Some(source),
            Self::InvalidData(_) => None,
            Self::UnsupportedKey { .. } => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<PrefsError> for StoreError {
    fn from(value: PrefsError) -> Self {
        Self::Prefs(value)
    }
}

/// Durable task persistence.
pub trait TaskStore {
    /// Short backend name used in logs and errors.
    fn backend_name(&self) -> &'static str;
    /// Persists one description and returns the stored record.
    fn add(&self, description: &str) -> StoreResult<Record>;
    /// Reads every stored record.
    fn list_all(&self) -> StoreResult<Vec<Record>>;
    /// Removes the record matching `key`; absent keys are ignored.
    fn remove(&self, key: &RecordKey) -> StoreResult<()>;
}

impl<S: TaskStore + ?Sized> TaskStore for &S {
    fn backend_name(&self) -> &'static str {
        (**self).backend_name()
    }

    fn add(&self, description: &str) -> StoreResult<Record> {
        (**self).add(description)
    }

    fn list_all(&self) -> StoreResult<Vec<Record>> {
        (**self).list_all()
    }

    fn remove(&self, key: &RecordKey) -> StoreResult<()> {
        (**self).remove(key)
    }
}

impl<S: TaskStore + ?Sized> TaskStore for Box<S> {
    fn backend_name(&self) -> &'static str {
        (**self).backend_name()
    }

    fn add(&self, description: &str) -> StoreResult<Record> {
        (**self).add(description)
    }

    fn list_all(&self) -> StoreResult<Vec<Record>> {
        (**self).list_all()
    }

    fn remove(&self, key: &RecordKey) -> StoreResult<()> {
        (**self).remove(key)
    }
}
