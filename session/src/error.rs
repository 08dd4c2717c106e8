//! Error taxonomy shared by every session and API operation.
//!
//! ERROR HANDLING
//! ==============
//! Nothing here is fatal. Call sites turn every variant into status text via
//! [`ClientError::user_message`]; only [`ClientError::NetworkFailure`] is
//! offered back to the user as retryable, and no code path retries on its own.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

const NETWORK_MESSAGE: &str = "Network error. Please try again.";
const CALLBACK_MESSAGE: &str = "Something went wrong during authentication.";
const UNAUTHENTICATED_MESSAGE: &str = "Please sign in to continue.";
const REMOTE_FALLBACK_MESSAGE: &str = "Request failed";

/// Failure of a session or backend operation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    /// A credential was required but the session is empty.
    #[error("not authenticated")]
    Unauthenticated,
    /// The OAuth callback carried no success indicator or an undecodable payload.
    #[error("oauth callback could not be decoded: {0}")]
    CallbackDecodeFailure(String),
    /// The request never produced a response (offline, DNS, CORS, timeout).
    #[error("network failure: {0}")]
    NetworkFailure(String),
    /// The backend answered with a non-success status.
    #[error("backend rejected request with status {status}: {message}")]
    RemoteRejection { status: u16, message: String },
    /// Local validation of a user selection failed before any request.
    #[error("invalid selection: {0}")]
    InvalidSelection(String),
}

impl ClientError {
    /// Status text suitable for rendering next to the failed action.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Unauthenticated => UNAUTHENTICATED_MESSAGE.to_owned(),
            Self::CallbackDecodeFailure(_) => CALLBACK_MESSAGE.to_owned(),
            Self::NetworkFailure(_) => NETWORK_MESSAGE.to_owned(),
            Self::RemoteRejection { message, .. } if !message.trim().is_empty() => message.clone(),
            Self::RemoteRejection { .. } => REMOTE_FALLBACK_MESSAGE.to_owned(),
            Self::InvalidSelection(reason) => reason.clone(),
        }
    }

    /// Whether offering a "try again" action makes sense.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::NetworkFailure(_))
    }

    /// Whether the backend refused the attached credential.
    #[must_use]
    pub fn is_credential_rejected(&self) -> bool {
        matches!(self, Self::RemoteRejection { status: 401, .. })
    }
}

/// Failure of the durable session persistence layer.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// No durable storage exists in this environment (SSR, private mode, no home dir).
    #[error("durable storage unavailable")]
    Unavailable,
    /// A write or remove for `key` was refused.
    #[error("failed to write `{key}`: {reason}")]
    Write { key: String, reason: String },
}
