//! Preference-file task store.
//!
//! # Responsibility
//! - Map `TaskStore` onto one string-set entry of a preference file.
//!
//! # Invariants
//! - The description is the record identity; records carry `id = None`.
//! - Adding an already stored description is absorbed, not duplicated.
//! - Every mutation reads the full set and writes the full set back.
//! - `list_all` order is unspecified and may differ between calls.

use crate::model::record::{Record, RecordKey};
use crate::prefs::PreferenceFile;
use crate::store::{StoreError, StoreResult, TaskStore};
use log::{debug, info};
use std::collections::HashSet;
use std::path::PathBuf;

/// Entry name holding the task set inside the preference file.
pub const TASKS_KEY: &str = "tasks_value";

const BACKEND_NAME: &str = "preferences";

/// Task store backed by an unordered set in a preference file.
#[derive(Debug, Clone)]
pub struct PreferenceTaskStore {
    prefs: PreferenceFile,
}

impl PreferenceTaskStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            prefs: PreferenceFile::new(path),
        }
    }

    pub fn preference_file(&self) -> &PreferenceFile {
        &self.prefs
    }

    /// Replaces the whole stored set with `descriptions`.
    ///
    /// Duplicates in the input collapse into one entry.
    pub fn save_all<I, T>(&self, descriptions: I) -> StoreResult<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let set: HashSet<String> = descriptions.into_iter().map(Into::into).collect();
        self.prefs.put_string_set(TASKS_KEY, &set)?;
        info!(
            "event=store_save_all module=store status=ok backend={} count={}",
            BACKEND_NAME,
            set.len()
        );
        Ok(())
    }

    fn read_set(&self) -> StoreResult<HashSet<String>> {
        Ok(self.prefs.get_string_set(TASKS_KEY)?)
    }
}

impl TaskStore for PreferenceTaskStore {
    fn backend_name(&self) -> &'static str {
        BACKEND_NAME
    }

    fn add(&self, description: &str) -> StoreResult<Record> {
        let mut set = self.read_set()?;
        let inserted = set.insert(description.to_string());
        self.prefs.put_string_set(TASKS_KEY, &set)?;
        info!(
            "event=store_add module=store status=ok backend={} collapsed={} count={}",
            BACKEND_NAME,
            !inserted,
            set.len()
        );
        Ok(Record::keyed_by_description(description))
    }

    fn list_all(&self) -> StoreResult<Vec<Record>> {
        let records: Vec<Record> = self
            .read_set()?
            .into_iter()
            .map(Record::keyed_by_description)
            .collect();
        debug!(
            "event=store_list module=store status=ok backend={} count={}",
            BACKEND_NAME,
            records.len()
        );
        Ok(records)
    }

    fn remove(&self, key: &RecordKey) -> StoreResult<()> {
        let description = match key {
            RecordKey::Description(description) => description,
            RecordKey::Id(_) => {
                return Err(StoreError::UnsupportedKey {
                    backend: BACKEND_NAME,
                    key: key.clone(),
                });
            }
        };

        let mut set = self.read_set()?;
        if !set.remove(description) {
            debug!(
                "event=store_remove module=store status=ok backend={} changed=0",
                BACKEND_NAME
            );
            return Ok(());
        }

        self.prefs.put_string_set(TASKS_KEY, &set)?;
        info!(
            "event=store_remove module=store status=ok backend={} changed=1 count={}",
            BACKEND_NAME,
            set.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{PreferenceTaskStore, TASKS_KEY};
    use crate::model::record::RecordKey;
    use crate::store::{StoreError, TaskStore};

    #[test]
    fn records_carry_no_identifier() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = PreferenceTaskStore::new(dir.path().join("prefs.json"));
        let record = store.add("walk dog").expect("add");
        assert_eq!(record.id, None);
        assert_eq!(record.key(), RecordKey::Description("walk dog".to_string()));
    }

    #[test]
    fn id_key_is_unsupported() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = PreferenceTaskStore::new(dir.path().join("prefs.json"));
        let err = store.remove(&RecordKey::Id(1)).expect_err("no identifiers here");
        assert!(matches!(
            err,
            StoreError::UnsupportedKey {
                backend: "preferences",
                ..
            }
        ));
    }

    #[test]
    fn removing_absent_description_does_not_create_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("prefs.json");
        let store = PreferenceTaskStore::new(&path);

        store
            .remove(&RecordKey::Description("ghost".to_string()))
            .expect("absent key is a no-op");
        assert!(!path.exists());
    }

    #[test]
    fn tasks_live_under_fixed_key() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = PreferenceTaskStore::new(dir.path().join("prefs.json"));
        store.add("a").expect("add");

        let set = store
            .preference_file()
            .get_string_set(TASKS_KEY)
            .expect("read raw set");
        assert!(set.contains("a"));
    }
}
