//! OAuth Redirect Flow: turns a provider round-trip into a [`Session`].
//!
//! SYSTEM CONTEXT
//! ==============
//! `Idle -> Redirecting -> AwaitingCallback -> Resolved(outcome)`. The flow
//! decides only two destinations, dashboard on success and login on failure,
//! each after a fixed pause so the user can read the confirmation. It never
//! retries on its own.
//!
//! The callback arrives as
//! `/auth/callback?login=success&token=<opaque>&userData=<url-encoded JSON>`.

#[cfg(test)]
#[path = "oauth_test.rs"]
mod oauth_test;

use std::borrow::Cow;
use std::time::Duration;

use crate::api::ApiClient;
use crate::config::{FAILURE_REDIRECT_DELAY, SUCCESS_REDIRECT_DELAY};
use crate::error::ClientError;
use crate::storage::SessionStorage;
use crate::store::SessionStore;
use crate::transport::Transport;
use crate::types::{Session, Token, UserProfile};

pub const DASHBOARD_PATH: &str = "/dashboard";
pub const LOGIN_PATH: &str = "/login";

const SUCCESS_INDICATOR: &str = "success";

/// Query parameters the provider hands back on the callback route.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CallbackParams {
    pub login: Option<String>,
    pub token: Option<String>,
    pub user_data: Option<String>,
}

impl CallbackParams {
    /// Parse a raw query string, a `?`-prefixed query, or a full callback URL.
    /// Values are percent-decoded; the first occurrence of a key wins.
    #[must_use]
    pub fn from_query(raw: &str) -> Self {
        let query = raw.split_once('?').map_or(raw, |(_, query)| query);
        let query = query.split_once('#').map_or(query, |(query, _)| query);

        let mut params = Self::default();
        for pair in query.split('&').filter(|pair| !pair.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let slot = match decode_component(key).as_ref() {
                "login" => &mut params.login,
                "token" => &mut params.token,
                "userData" => &mut params.user_data,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(decode_component(value).into_owned());
            }
        }
        params
    }
}

fn decode_component(raw: &str) -> Cow<'_, str> {
    if !raw.contains(['%', '+']) {
        return Cow::Borrowed(raw);
    }
    let spaced = raw.replace('+', " ");
    let bytes = urlencoding::decode_binary(spaced.as_bytes());
    Cow::Owned(String::from_utf8_lossy(&bytes).into_owned())
}

/// Decode a callback into a session without touching any store.
///
/// # Errors
///
/// Returns [`ClientError::CallbackDecodeFailure`] when the success indicator
/// is absent or wrong, the token is blank, or the identity is not a JSON object.
pub fn decode_callback(params: &CallbackParams) -> Result<Session, ClientError> {
    match params.login.as_deref() {
        Some(SUCCESS_INDICATOR) => {}
        Some(other) => return Err(ClientError::CallbackDecodeFailure(format!("login status `{other}`"))),
        None => return Err(ClientError::CallbackDecodeFailure("missing login status".to_owned())),
    }
    let token = params
        .token
        .as_deref()
        .and_then(Token::new)
        .ok_or_else(|| ClientError::CallbackDecodeFailure("missing token".to_owned()))?;
    let raw_user = params
        .user_data
        .as_deref()
        .filter(|raw| !raw.trim().is_empty())
        .ok_or_else(|| ClientError::CallbackDecodeFailure("missing userData".to_owned()))?;
    let user = decode_identity(raw_user)?;
    Ok(Session { user, token })
}

/// Some backends encode `userData` twice; one extra decode is attempted
/// before giving up.
fn decode_identity(raw: &str) -> Result<UserProfile, ClientError> {
    match serde_json::from_str::<UserProfile>(raw) {
        Ok(user) => Ok(user),
        Err(first) if raw.contains('%') => {
            let decoded = decode_component(raw);
            serde_json::from_str::<UserProfile>(&decoded)
                .map_err(|_| ClientError::CallbackDecodeFailure(format!("userData: {first}")))
        }
        Err(err) => Err(ClientError::CallbackDecodeFailure(format!("userData: {err}"))),
    }
}

/// Terminal result of a callback.
#[derive(Clone, Debug, PartialEq)]
pub enum CallbackOutcome {
    Success(Session),
    Failure(ClientError),
}

/// Navigation the callback view performs once its pause elapses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingRedirect {
    pub path: &'static str,
    pub delay: Duration,
}

impl CallbackOutcome {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    #[must_use]
    pub fn redirect(&self) -> PendingRedirect {
        match self {
            Self::Success(_) => PendingRedirect { path: DASHBOARD_PATH, delay: SUCCESS_REDIRECT_DELAY },
            Self::Failure(_) => PendingRedirect { path: LOGIN_PATH, delay: FAILURE_REDIRECT_DELAY },
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum OAuthPhase {
    #[default]
    Idle,
    Redirecting,
    AwaitingCallback,
    Resolved(CallbackOutcome),
}

#[derive(Clone, Debug, Default)]
pub struct OAuthFlow {
    phase: OAuthPhase,
}

impl OAuthFlow {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flow for a freshly loaded callback route; the redirect half happened
    /// on a previous page load.
    #[must_use]
    pub fn awaiting_callback() -> Self {
        Self { phase: OAuthPhase::AwaitingCallback }
    }

    #[must_use]
    pub fn phase(&self) -> &OAuthPhase {
        &self.phase
    }

    /// Fetch the provider redirect target. Failures are logged and reported
    /// as `None`; the user stays on the login view with nothing shown.
    pub async fn begin_login<T: Transport>(&mut self, api: &ApiClient<T>) -> Option<String> {
        self.phase = OAuthPhase::Redirecting;
        match api.login_redirect().await {
            Ok(target) => {
                log::info!("oauth: redirecting to provider");
                self.phase = OAuthPhase::AwaitingCallback;
                Some(target)
            }
            Err(err) => {
                log::error!("oauth: could not obtain login redirect: {err}");
                self.phase = OAuthPhase::Idle;
                None
            }
        }
    }

    /// Resolve the callback, storing the session on success.
    ///
    /// Once resolved, later calls return the same outcome and leave the
    /// store alone.
    pub fn handle_callback<S: SessionStorage>(
        &mut self,
        store: &mut SessionStore<S>,
        params: &CallbackParams,
    ) -> CallbackOutcome {
        if let OAuthPhase::Resolved(outcome) = &self.phase {
            return outcome.clone();
        }
        let outcome = match decode_callback(params) {
            Ok(session) => {
                if let Err(err) = store.set(session.clone()) {
                    log::warn!("oauth: signed in for this page only: {err}");
                }
                log::info!("oauth: signed in as {}", session.user.display_name());
                CallbackOutcome::Success(session)
            }
            Err(err) => {
                log::warn!("oauth: callback rejected: {err}");
                CallbackOutcome::Failure(err)
            }
        };
        self.phase = OAuthPhase::Resolved(outcome.clone());
        outcome
    }
}
