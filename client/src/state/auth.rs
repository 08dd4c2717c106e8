//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` provides one [`AuthContext`] and rehydrates it once. Route guards,
//! the callback page and every authenticated fetch read the session through
//! this handle; nothing else touches `localStorage` for auth.
//!
//! DESIGN
//! ======
//! The persisted [`SessionStore`] lives in a `StoredValue` and the render
//! copy in an `RwSignal`. Every mutation goes through the store first and
//! then publishes, so views never observe a session the store does not hold.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use session::guard::{self, GuardDecision, Resolution};
use session::{CallbackOutcome, CallbackParams, ClientError, OAuthFlow, Session, SessionStore, UserProfile};

use crate::util::storage::BrowserStorage;

/// Render-facing snapshot of the session.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub session: Option<Session>,
    pub resolution: Resolution,
}

impl AuthState {
    #[must_use]
    pub fn decision(&self) -> GuardDecision {
        guard::decide(self.resolution, self.session.as_ref())
    }

    #[must_use]
    pub fn user(&self) -> Option<&UserProfile> {
        self.session.as_ref().map(|session| &session.user)
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.resolution == Resolution::Resolved && self.session.is_some()
    }

    fn resolved(session: Option<Session>) -> Self {
        Self { session, resolution: Resolution::Resolved }
    }
}

/// Typed handle to the app-wide session. `Copy`, so closures capture it freely.
#[derive(Clone, Copy)]
pub struct AuthContext {
    state: RwSignal<AuthState>,
    store: StoredValue<Option<SessionStore<BrowserStorage>>>,
}

impl AuthContext {
    /// Create the handle and register it as context. Starts `Pending`.
    pub fn provide() -> Self {
        let ctx = Self { state: RwSignal::new(AuthState::default()), store: StoredValue::new(None) };
        provide_context(ctx);
        ctx
    }

    /// The handle provided by `App`.
    pub fn current() -> Self {
        expect_context::<Self>()
    }

    /// Read `localStorage` once and publish the result as resolved.
    pub fn rehydrate(self) {
        let session = self.with_store(|store| store.get().cloned()).flatten();
        self.state.set(AuthState::resolved(session));
    }

    /// Reactive snapshot.
    pub fn state(self) -> AuthState {
        self.state.get()
    }

    pub fn session(self) -> Option<Session> {
        self.state.with(|state| state.session.clone())
    }

    /// Current session without subscribing; for event handlers and tasks.
    pub fn session_untracked(self) -> Option<Session> {
        self.state.with_untracked(|state| state.session.clone())
    }

    pub fn resolution(self) -> Resolution {
        self.state.with(|state| state.resolution)
    }

    pub fn decision(self) -> GuardDecision {
        self.state.with(AuthState::decision)
    }

    pub fn set(self, session: Session) {
        let persisted = self.with_store(|store| store.set(session.clone()));
        if let Some(Err(err)) = persisted {
            log::warn!("auth: session kept for this page only: {err}");
        }
        self.state.set(AuthState::resolved(Some(session)));
    }

    pub fn clear(self) {
        self.with_store(SessionStore::clear);
        self.state.set(AuthState::resolved(None));
    }

    /// Run the callback half of the OAuth flow against the persisted store
    /// and publish the outcome.
    pub fn handle_callback(self, flow: &mut OAuthFlow, params: &CallbackParams) -> CallbackOutcome {
        let outcome = self
            .with_store(|store| flow.handle_callback(store, params))
            .unwrap_or_else(|| CallbackOutcome::Failure(ClientError::Unauthenticated));
        let session = self.with_store(|store| store.get().cloned()).flatten();
        self.state.set(AuthState::resolved(session));
        outcome
    }

    /// Treat a rejected credential as session loss. Returns whether the
    /// session was dropped; guarded views then redirect on their own.
    pub fn absorb(self, err: &ClientError) -> bool {
        if !ends_session(err) {
            return false;
        }
        log::info!("auth: dropping session after {err}");
        self.clear();
        true
    }

    fn with_store<R>(self, f: impl FnOnce(&mut SessionStore<BrowserStorage>) -> R) -> Option<R> {
        self.store
            .try_update_value(|slot| f(slot.get_or_insert_with(|| SessionStore::rehydrate(BrowserStorage))))
    }
}

/// Errors after which the stored credential is no longer worth sending.
#[must_use]
pub fn ends_session(err: &ClientError) -> bool {
    err.is_credential_rejected() || matches!(err, ClientError::Unauthenticated)
}
