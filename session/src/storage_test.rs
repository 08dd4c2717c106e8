use super::*;

#[test]
fn memory_storage_starts_empty() {
    let storage = MemoryStorage::new();
    assert!(storage.is_empty());
    assert_eq!(storage.get(TOKEN_KEY), None);
}

#[test]
fn memory_storage_set_get_remove() {
    let storage = MemoryStorage::new();
    storage.set(TOKEN_KEY, "abc").unwrap();
    assert_eq!(storage.get(TOKEN_KEY).as_deref(), Some("abc"));
    storage.remove(TOKEN_KEY).unwrap();
    assert_eq!(storage.get(TOKEN_KEY), None);
}

#[test]
fn removing_missing_key_succeeds() {
    let storage = MemoryStorage::new();
    assert!(storage.remove(USER_DATA_KEY).is_ok());
}

#[test]
fn clones_share_entries() {
    let storage = MemoryStorage::new();
    let reloaded = storage.clone();
    storage.set(USER_DATA_KEY, "{}").unwrap();
    assert_eq!(reloaded.get(USER_DATA_KEY).as_deref(), Some("{}"));
    assert_eq!(reloaded.len(), 1);
}

#[test]
fn arc_wrapped_storage_delegates() {
    let inner = MemoryStorage::new();
    let shared: Arc<dyn SessionStorage> = Arc::new(inner.clone());
    shared.set(TOKEN_KEY, "t").unwrap();
    assert_eq!(inner.get(TOKEN_KEY).as_deref(), Some("t"));
}
