//! Store selection and startup construction.
//!
//! # Responsibility
//! - Describe where task data lives and which backend holds it.
//! - Build the one store instance handed to the list mirror.
//!
//! # Invariants
//! - File names inside `data_dir` are fixed constants.
//! - `open_store` is the only place a backend is chosen.

use crate::store::preference_store::PreferenceTaskStore;
use crate::store::sqlite_store::SqliteTaskStore;
use crate::store::{StoreError, StoreResult, TaskStore};
use log::info;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Database file name inside the data directory.
pub const DATABASE_FILE_NAME: &str = "tasks.db";
/// Preference file name inside the data directory.
pub const PREFERENCE_FILE_NAME: &str = "tasklist_prefs.json";

/// Persistence backend choice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// Relational table with store-assigned identifiers.
    #[default]
    Sqlite,
    /// Unordered string set in a preference file.
    Preferences,
}

impl BackendKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sqlite => "sqlite",
            Self::Preferences => "preferences",
        }
    }
}

/// Startup configuration for the task store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Directory holding the database or preference file.
    pub data_dir: PathBuf,
    #[serde(default)]
    pub backend: BackendKind,
}

impl StoreConfig {
    pub fn new(data_dir: impl Into<PathBuf>, backend: BackendKind) -> Self {
        Self {
            data_dir: data_dir.into(),
            backend,
        }
    }

    /// Full path of the file the configured backend writes.
    pub fn store_path(&self) -> PathBuf {
        match self.backend {
            BackendKind::Sqlite => self.data_dir.join(DATABASE_FILE_NAME),
            BackendKind::Preferences => self.data_dir.join(PREFERENCE_FILE_NAME),
        }
    }
}

/// Opens the configured backend, creating `data_dir` when missing.
///
/// # Side effects
/// - May create the data directory.
/// - Sqlite: may create the database or drop and recreate an outdated table.
pub fn open_store(config: &StoreConfig) -> StoreResult<Box<dyn TaskStore>> {
    ensure_dir(&config.data_dir)?;
    let path = config.store_path();

    let store: Box<dyn TaskStore> = match config.backend {
        BackendKind::Sqlite => Box::new(SqliteTaskStore::open(&path)?),
        BackendKind::Preferences => Box::new(PreferenceTaskStore::new(path)),
    };

    info!(
        "event=store_open module=config status=ok backend={}",
        config.backend.as_str()
    );
    Ok(store)
}

fn ensure_dir(dir: &Path) -> StoreResult<()> {
    std::fs::create_dir_all(dir).map_err(|source| StoreError::Io {
        path: dir.to_path_buf(),
        source,
    })
}
