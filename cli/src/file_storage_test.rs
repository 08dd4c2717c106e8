use session::storage::{TOKEN_KEY, USER_DATA_KEY};
use session::{Session, SessionStore, Token};

use super::*;

fn storage_in(dir: &tempfile::TempDir) -> FileStorage {
    FileStorage::new(dir.path().join("nested").join("session.json"))
}

fn ada() -> Session {
    Session {
        user: serde_json::from_value(serde_json::json!({"name": "Ada", "login": "ada"})).unwrap(),
        token: Token::new("abc123").unwrap(),
    }
}

#[test]
fn missing_file_reads_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let storage = storage_in(&dir);
    assert_eq!(storage.get(TOKEN_KEY), None);
    assert!(storage.remove(TOKEN_KEY).is_ok());
    assert!(!storage.path().exists());
}

#[test]
fn set_creates_parent_dirs_and_writes_json_object() {
    let dir = tempfile::tempdir().unwrap();
    let storage = storage_in(&dir);

    storage.set(TOKEN_KEY, "abc123").unwrap();

    let raw = fs::read_to_string(storage.path()).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(parsed, serde_json::json!({"token": "abc123"}));
    assert_eq!(storage.get(TOKEN_KEY).as_deref(), Some("abc123"));
}

#[test]
fn entries_are_independent() {
    let dir = tempfile::tempdir().unwrap();
    let storage = storage_in(&dir);

    storage.set(TOKEN_KEY, "abc123").unwrap();
    storage.set(USER_DATA_KEY, r#"{"name":"Ada"}"#).unwrap();
    storage.remove(TOKEN_KEY).unwrap();

    assert_eq!(storage.get(TOKEN_KEY), None);
    assert_eq!(storage.get(USER_DATA_KEY).as_deref(), Some(r#"{"name":"Ada"}"#));
}

#[test]
fn removing_last_entry_deletes_file() {
    let dir = tempfile::tempdir().unwrap();
    let storage = storage_in(&dir);

    storage.set(TOKEN_KEY, "abc123").unwrap();
    storage.remove(TOKEN_KEY).unwrap();

    assert!(!storage.path().exists());
}

#[test]
fn corrupt_file_reads_as_empty_and_is_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    fs::write(&path, "not json").unwrap();
    let storage = FileStorage::new(&path);

    assert_eq!(storage.get(TOKEN_KEY), None);
    storage.set(TOKEN_KEY, "fresh").unwrap();
    assert_eq!(storage.get(TOKEN_KEY).as_deref(), Some("fresh"));
}

#[test]
fn session_survives_process_restart() {
    let dir = tempfile::tempdir().unwrap();

    let mut store = SessionStore::rehydrate(storage_in(&dir));
    store.set(ada()).unwrap();

    let restored = SessionStore::rehydrate(storage_in(&dir));
    assert_eq!(restored.get(), Some(&ada()));
}

#[test]
fn cleared_session_leaves_no_file() {
    let dir = tempfile::tempdir().unwrap();

    let mut store = SessionStore::rehydrate(storage_in(&dir));
    store.set(ada()).unwrap();
    store.clear();

    assert!(!storage_in(&dir).path().exists());
    assert!(!SessionStore::rehydrate(storage_in(&dir)).is_authenticated());
}

#[test]
fn partial_file_is_purged_on_rehydrate() {
    let dir = tempfile::tempdir().unwrap();
    let storage = storage_in(&dir);
    storage.set(TOKEN_KEY, "orphan").unwrap();

    let store = SessionStore::rehydrate(storage_in(&dir));

    assert!(!store.is_authenticated());
    assert!(!storage.path().exists());
}
