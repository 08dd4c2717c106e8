//! Session Store: the single source of truth for "who is signed in".
//!
//! SYSTEM CONTEXT
//! ==============
//! Built exactly once per process via [`SessionStore::rehydrate`], then
//! mutated only through `set`/`clear`. The in-memory copy and the two
//! persisted entries always agree on both-or-neither.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use crate::error::StorageError;
use crate::storage::{SessionStorage, TOKEN_KEY, USER_DATA_KEY};
use crate::types::{Session, Token, UserProfile};

#[derive(Debug)]
pub struct SessionStore<S> {
    storage: S,
    current: Option<Session>,
}

impl<S: SessionStorage> SessionStore<S> {
    /// Restore the persisted session, if a complete one exists.
    ///
    /// A lone token, a lone profile, or a profile that no longer decodes is
    /// discarded and both entries are purged.
    pub fn rehydrate(storage: S) -> Self {
        let token = storage.get(TOKEN_KEY);
        let user_data = storage.get(USER_DATA_KEY);
        let restored = match (token, user_data) {
            (None, None) => None,
            (Some(token), Some(user_data)) => decode_persisted(&token, &user_data),
            _ => {
                log::warn!("session: discarding partial persisted session");
                None
            }
        };

        let store = Self { storage, current: restored };
        if store.current.is_none() {
            store.purge();
        } else {
            log::debug!("session: rehydrated persisted session");
        }
        store
    }

    /// Current session; `None` when signed out.
    #[must_use]
    pub fn get(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    /// Replace the session and persist identity and credential together.
    ///
    /// The in-memory session is replaced even when persistence fails, so the
    /// current page stays signed in. A failed write purges both entries, so a
    /// reload never restores the previous user.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when either entry could not be written.
    pub fn set(&mut self, session: Session) -> Result<(), StorageError> {
        let persisted = self.persist(&session);
        self.current = Some(session);
        if let Err(err) = &persisted {
            log::warn!("session: persisted copy not written, purging stored pair: {err}");
            self.purge();
        }
        persisted
    }

    /// Drop the session and both persisted entries. Clearing an empty store
    /// is a no-op.
    pub fn clear(&mut self) {
        if self.current.take().is_some() {
            log::debug!("session: cleared");
        }
        self.purge();
    }

    fn persist(&self, session: &Session) -> Result<(), StorageError> {
        let user_data = serde_json::to_string(&session.user)
            .map_err(|err| StorageError::Write { key: USER_DATA_KEY.to_owned(), reason: err.to_string() })?;
        self.storage.set(TOKEN_KEY, session.token.as_str())?;
        self.storage.set(USER_DATA_KEY, &user_data)
    }

    fn purge(&self) {
        for key in [TOKEN_KEY, USER_DATA_KEY] {
            if self.storage.get(key).is_none() {
                continue;
            }
            if let Err(err) = self.storage.remove(key) {
                log::warn!("session: failed to remove `{key}`: {err}");
            }
        }
    }
}

fn decode_persisted(token: &str, user_data: &str) -> Option<Session> {
    let Some(token) = Token::new(token) else {
        log::warn!("session: persisted token is blank");
        return None;
    };
    match serde_json::from_str::<UserProfile>(user_data) {
        Ok(user) => Some(Session { user, token }),
        Err(err) => {
            log::warn!("session: persisted profile is unreadable: {err}");
            None
        }
    }
}
