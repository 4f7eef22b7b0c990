//! Key-value preference file.
//!
//! # Responsibility
//! - Persist named entries in one JSON document on disk.
//! - Expose string-set entries with whole-value read/replace semantics.
//!
//! # Invariants
//! - A missing file reads as an empty document.
//! - Writes replace the whole file via temp file + rename, so readers never
//!   observe a partially written document.
//! - String sets carry no ordering; the on-disk array order is incidental.

use log::{error, info};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub type PrefsResult<T> = Result<T, PrefsError>;

/// Preference file read/write failures.
#[derive(Debug)]
pub enum PrefsError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Serialization(serde_json::Error),
    InvalidData(String),
}

impl Display for PrefsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "{}: {source}", path.display()),
            Self::Serialization(err) => write!(f, "preference encoding failed: {err}"),
            Self::InvalidData(message) => write!(f, "invalid preference data: {message}"),
        }
    }
}

impl Error for PrefsError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Serialization(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<serde_json::Error> for PrefsError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value)
    }
}

/// Handle to one preference document on disk.
#[derive(Debug, Clone)]
pub struct PreferenceFile {
    path: PathBuf,
}

impl PreferenceFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Reads the string set stored under `key`.
    ///
    /// Absent keys yield an empty set.
    pub fn get_string_set(&self, key: &str) -> PrefsResult<HashSet<String>> {
        let document = self.load()?;
        match document.get(key) {
            None | Some(Value::Null) => Ok(HashSet::new()),
            Some(value) => serde_json::from_value(value.clone()).map_err(|err| {
                PrefsError::InvalidData(format!("entry `{key}` is not a string set: {err}"))
            }),
        }
    }

    /// Replaces the string set stored under `key`, keeping other entries.
    pub fn put_string_set(&self, key: &str, values: &HashSet<String>) -> PrefsResult<()> {
        let mut document = self.load()?;
        document.insert(key.to_string(), serde_json::to_value(values)?);
        self.store(&document)
    }

    fn load(&self) -> PrefsResult<Map<String, Value>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(err) => {
                error!(
                    "event=prefs_load module=prefs status=error error_code=read_failed error={}",
                    err
                );
                return Err(PrefsError::Io {
                    path: self.path.clone(),
                    source: err,
                });
            }
        };

        if raw.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str::<Value>(&raw)? {
            Value::Object(map) => Ok(map),
            _ => Err(PrefsError::InvalidData(format!(
                "`{}` does not contain a JSON object",
                self.path.display()
            ))),
        }
    }

    fn store(&self, document: &Map<String, Value>) -> PrefsResult<()> {
        let contents = serde_json::to_string_pretty(document)?;
        atomic_write(&self.path, &contents)?;
        info!(
            "event=prefs_save module=prefs status=ok entries={} bytes={}",
            document.len(),
            contents.len()
        );
        Ok(())
    }
}

fn atomic_write(path: &Path, contents: &str) -> PrefsResult<()> {
    let io_error = |source: std::io::Error| PrefsError::Io {
        path: path.to_path_buf(),
        source,
    };

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&parent).map_err(io_error)?;

    // Same directory keeps the rename on one filesystem.
    let temp_path = parent.join(format!(
        ".{}.tmp.{}",
        path.file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("prefs"),
        std::process::id()
    ));

    fs::write(&temp_path, contents).map_err(|source| PrefsError::Io {
        path: temp_path.clone(),
        source,
    })?;
    if let Err(err) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(io_error(err));
    }
    Ok(())
}
