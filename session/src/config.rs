//! Backend location and timing configuration.
//!
//! The browser build bakes values in at compile time through `option_env!`;
//! the CLI feeds the same parser from clap flags.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

pub const DEFAULT_BACKEND_BASE: &str = "/api";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Pause on the callback screen before entering the dashboard.
pub const SUCCESS_REDIRECT_DELAY: Duration = Duration::from_millis(1500);
/// Pause on the callback screen before returning to login.
pub const FAILURE_REDIRECT_DELAY: Duration = Duration::from_millis(2000);
/// Pause on the upload confirmation before the modal closes.
pub const UPLOAD_SUCCESS_DELAY: Duration = Duration::from_millis(1500);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL every backend endpoint is joined onto, without a trailing `/`.
    pub backend_base: String,
    /// Upper bound on any single backend request.
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_values(None, None)
    }
}

impl ClientConfig {
    /// Build config from values baked in at compile time.
    ///
    /// - `DEPLOYHUB_BACKEND_URL`: default `/api`
    /// - `DEPLOYHUB_REQUEST_TIMEOUT_SECS`: default 30
    #[must_use]
    pub fn from_build_env() -> Self {
        Self::from_values(option_env!("DEPLOYHUB_BACKEND_URL"), option_env!("DEPLOYHUB_REQUEST_TIMEOUT_SECS"))
    }

    /// Build config from raw optional strings. Blank values and unparsable or
    /// zero timeouts fall back to defaults.
    #[must_use]
    pub fn from_values(backend: Option<&str>, timeout_secs: Option<&str>) -> Self {
        let backend_base = backend
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .unwrap_or(DEFAULT_BACKEND_BASE)
            .trim_end_matches('/')
            .to_owned();
        let secs = match timeout_secs.map(|raw| raw.trim().parse::<u64>()) {
            Some(Ok(secs)) if secs > 0 => secs,
            _ => DEFAULT_REQUEST_TIMEOUT_SECS,
        };
        Self { backend_base, request_timeout: Duration::from_secs(secs) }
    }

    /// Join `path` onto the backend base with exactly one separator.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.backend_base, path.trim_start_matches('/'))
    }
}
