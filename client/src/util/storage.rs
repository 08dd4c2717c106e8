//! `localStorage`-backed [`SessionStorage`].
//!
//! Host builds have no durable storage: reads miss and writes report
//! [`StorageError::Unavailable`], which the session store logs and tolerates.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use session::{SessionStorage, StorageError};

/// Handle to `window.localStorage`. Zero-sized; every call looks the
/// storage object up again so a revoked permission is noticed.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

#[cfg(feature = "csr")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

#[cfg(feature = "csr")]
fn write_error(key: &str, err: &wasm_bindgen::JsValue) -> StorageError {
    StorageError::Write {
        key: key.to_owned(),
        reason: err.as_string().unwrap_or_else(|| format!("{err:?}")),
    }
}

impl SessionStorage for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        #[cfg(feature = "csr")]
        {
            local_storage()?.get_item(key).ok().flatten()
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = key;
            None
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        #[cfg(feature = "csr")]
        {
            let storage = local_storage().ok_or(StorageError::Unavailable)?;
            storage.set_item(key, value).map_err(|err| write_error(key, &err))
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (key, value);
            Err(StorageError::Unavailable)
        }
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        #[cfg(feature = "csr")]
        {
            let storage = local_storage().ok_or(StorageError::Unavailable)?;
            storage.remove_item(key).map_err(|err| write_error(key, &err))
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = key;
            Err(StorageError::Unavailable)
        }
    }
}
