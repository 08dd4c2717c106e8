//! Backend API binding for the browser build.
//!
//! ERROR HANDLING
//! ==============
//! Pages get `Result<_, ClientError>` back and render
//! [`ClientError::user_message`]. A rejected credential is additionally fed to
//! [`AuthContext::absorb`], which drops the session; the route guard then
//! sends the user to login.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use session::{ApiClient, ClientConfig, ClientError};

use super::transport::GlooTransport;
use crate::state::auth::AuthContext;

pub type BrowserApi = ApiClient<GlooTransport>;

/// API client over `fetch` using the build-time backend config.
pub fn api_client() -> BrowserApi {
    ApiClient::new(GlooTransport, ClientConfig::from_build_env())
}

/// Status text for a failed call, dropping the session first when the
/// backend refused the credential.
pub fn report_failure(auth: AuthContext, err: &ClientError) -> String {
    auth.absorb(err);
    failure_text(err)
}

fn failure_text(err: &ClientError) -> String {
    log::warn!("api: {err}");
    err.user_message()
}
