use std::collections::HashSet;
use tasklist_core::store::preference_store::TASKS_KEY;
use tasklist_core::{PreferenceTaskStore, Record, RecordKey, TaskStore};

fn description_set(records: &[Record]) -> HashSet<String> {
    records.iter().map(|r| r.description.clone()).collect()
}

#[test]
fn add_then_list_contains_description() {
    let dir = tempfile::tempdir().unwrap();
    let store = PreferenceTaskStore::new(dir.path().join("prefs.json"));

    store.add("Buy milk").unwrap();

    let all = store.list_all().unwrap();
    assert_eq!(all, vec![Record::keyed_by_description("Buy milk")]);
}

#[test]
fn repeated_description_collapses_into_one_entry() {
    let dir = tempfile::tempdir().unwrap();
    let store = PreferenceTaskStore::new(dir.path().join("prefs.json"));

    store.add("Buy milk").unwrap();
    store.add("Buy milk").unwrap();

    assert_eq!(store.list_all().unwrap().len(), 1);
}

#[test]
fn remove_by_description() {
    let dir = tempfile::tempdir().unwrap();
    let store = PreferenceTaskStore::new(dir.path().join("prefs.json"));
    store.add("keep").unwrap();
    let gone = store.add("gone").unwrap();

    store.remove(&gone.key()).unwrap();

    let all = store.list_all().unwrap();
    assert_eq!(description_set(&all), HashSet::from(["keep".to_string()]));
}

#[test]
fn remove_twice_is_a_no_op() {
    let dir = tempfile::tempdir().unwrap();
    let store = PreferenceTaskStore::new(dir.path().join("prefs.json"));
    let record = store.add("once").unwrap();

    store.remove(&record.key()).unwrap();
    store.remove(&record.key()).unwrap();

    assert!(store.list_all().unwrap().is_empty());
}

#[test]
fn contents_survive_a_new_handle_as_a_set() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prefs.json");
    {
        let store = PreferenceTaskStore::new(&path);
        for text in ["s1", "s2", "s3"] {
            store.add(text).unwrap();
        }
    }

    let reopened = PreferenceTaskStore::new(&path);
    let all = reopened.list_all().unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(
        description_set(&all),
        HashSet::from(["s1".to_string(), "s2".to_string(), "s3".to_string()])
    );
}

#[test]
fn save_all_replaces_and_deduplicates() {
    let dir = tempfile::tempdir().unwrap();
    let store = PreferenceTaskStore::new(dir.path().join("prefs.json"));
    store.add("old").unwrap();

    store.save_all(["a", "b", "a"]).unwrap();

    let all = store.list_all().unwrap();
    assert_eq!(
        description_set(&all),
        HashSet::from(["a".to_string(), "b".to_string()])
    );
}

#[test]
fn file_holds_one_string_array_under_fixed_key() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prefs.json");
    let store = PreferenceTaskStore::new(&path);
    store.add("x").unwrap();
    store.add("y").unwrap();

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    let entries = raw[TASKS_KEY].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert!(entries.iter().all(|value| value.is_string()));
}

#[test]
fn id_keys_are_rejected_without_touching_data() {
    let dir = tempfile::tempdir().unwrap();
    let store = PreferenceTaskStore::new(dir.path().join("prefs.json"));
    store.add("stay").unwrap();

    assert!(store.remove(&RecordKey::Id(1)).is_err());
    assert_eq!(store.list_all().unwrap().len(), 1);
}
