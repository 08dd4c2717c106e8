//! Authenticated Fetch Wrapper and typed backend endpoints.
//!
//! ERROR HANDLING
//! ==============
//! An empty session short-circuits with [`ClientError::Unauthenticated`]
//! before the transport is touched. A rejected credential comes back as an
//! ordinary [`ClientError::RemoteRejection`]; this layer never clears the
//! session itself, callers decide what a 401 means for their view.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::transport::{AUTHORIZATION, ApiRequest, ApiResponse, Method, RequestBody, Transport};
use crate::types::{CreateRepository, NewProject, ProjectDetail, ProjectSummary, Session};
use crate::upload::UploadSelection;

const LOGIN_PATH: &str = "auth/github";
const LOGOUT_PATH: &str = "auth/logout";
const PROJECTS_PATH: &str = "projects";
const CREATE_REPO_PATH: &str = "github/create-repo";

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginRedirect {
    redirect_url: Option<String>,
}

fn project_path(project_id: &str) -> String {
    format!("{PROJECTS_PATH}/{}", urlencoding::encode(project_id))
}

fn rejection(response: &ApiResponse) -> ClientError {
    ClientError::RemoteRejection {
        status: response.status,
        message: response.error_message().unwrap_or_default(),
    }
}

/// Backend client bound to one transport and one backend base URL.
#[derive(Clone, Debug)]
pub struct ApiClient<T> {
    transport: T,
    config: ClientConfig,
}

impl<T: Transport> ApiClient<T> {
    #[must_use]
    pub fn new(transport: T, config: ClientConfig) -> Self {
        Self { transport, config }
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Configured login entry point; the backend answers it with a provider redirect.
    #[must_use]
    pub fn login_url(&self) -> String {
        self.config.endpoint(LOGIN_PATH)
    }

    /// Issue `method endpoint` with the session's bearer credential attached.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Unauthenticated`] when `session` is `None`; no request is sent.
    /// - [`ClientError::NetworkFailure`] when the transport gets no response.
    /// - [`ClientError::RemoteRejection`] for any non-2xx status.
    pub async fn call(
        &self,
        session: Option<&Session>,
        endpoint: &str,
        method: Method,
        body: RequestBody,
    ) -> Result<ApiResponse, ClientError> {
        let Some(session) = session else {
            log::debug!("api: refusing {} {endpoint} without a session", method.as_str());
            return Err(ClientError::Unauthenticated);
        };
        let request = ApiRequest {
            method,
            url: self.config.endpoint(endpoint),
            headers: vec![(AUTHORIZATION.to_owned(), session.token.bearer())],
            body,
            timeout: self.config.request_timeout,
        };
        self.dispatch(request).await
    }

    async fn dispatch(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        let method = request.method;
        let url = request.url.clone();
        let response = self.transport.send(request).await.inspect_err(|err| {
            log::warn!("api: {} {url} failed: {err}", method.as_str());
        })?;
        if response.is_success() {
            return Ok(response);
        }
        log::warn!("api: {} {url} rejected with status {}", method.as_str(), response.status);
        Err(rejection(&response))
    }

    /// Ask the backend where to send the browser for provider sign-in.
    ///
    /// A JSON `redirectUrl` wins; a success without one falls back to
    /// [`Self::login_url`] for a top-level navigation.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NetworkFailure`] or [`ClientError::RemoteRejection`].
    pub async fn login_redirect(&self) -> Result<String, ClientError> {
        let request = ApiRequest {
            method: Method::Get,
            url: self.login_url(),
            headers: Vec::new(),
            body: RequestBody::Empty,
            timeout: self.config.request_timeout,
        };
        let response = self.dispatch(request).await?;
        let target = response
            .json::<LoginRedirect>()
            .map(|body| body.redirect_url)
            .unwrap_or_default()
            .filter(|url| !url.trim().is_empty());
        Ok(target.unwrap_or_else(|| self.login_url()))
    }

    /// `GET /projects`.
    ///
    /// # Errors
    ///
    /// See [`Self::call`]; a malformed body is a [`ClientError::RemoteRejection`].
    pub async fn list_projects(&self, session: Option<&Session>) -> Result<Vec<ProjectSummary>, ClientError> {
        self.call(session, PROJECTS_PATH, Method::Get, RequestBody::Empty).await?.json()
    }

    /// `GET /projects/{id}`.
    ///
    /// # Errors
    ///
    /// See [`Self::call`]; a missing project is `RemoteRejection { status: 404, .. }`.
    pub async fn get_project(&self, session: Option<&Session>, project_id: &str) -> Result<ProjectDetail, ClientError> {
        self.call(session, &project_path(project_id), Method::Get, RequestBody::Empty)
            .await?
            .json()
    }

    /// `POST /projects`.
    ///
    /// # Errors
    ///
    /// See [`Self::call`].
    pub async fn create_project(&self, session: Option<&Session>, project: &NewProject) -> Result<ProjectSummary, ClientError> {
        let body = serde_json::to_value(project)
            .map_err(|err| ClientError::InvalidSelection(format!("unserializable project: {err}")))?;
        self.call(session, PROJECTS_PATH, Method::Post, RequestBody::Json(body))
            .await?
            .json()
    }

    /// `POST /file/{projectId}/upload` with the selection's multipart body.
    ///
    /// # Errors
    ///
    /// See [`Self::call`].
    pub async fn upload_bundle(&self, session: Option<&Session>, selection: UploadSelection) -> Result<(), ClientError> {
        let endpoint = selection.endpoint();
        log::info!(
            "api: uploading {} ({} bytes) as {}",
            selection.file_name(),
            selection.size(),
            selection.target()
        );
        self.call(session, &endpoint, Method::Post, selection.into_body()).await?;
        Ok(())
    }

    /// `POST /github/create-repo`.
    ///
    /// # Errors
    ///
    /// See [`Self::call`].
    pub async fn create_repository(&self, session: Option<&Session>, request: &CreateRepository) -> Result<(), ClientError> {
        let body = serde_json::to_value(request)
            .map_err(|err| ClientError::InvalidSelection(format!("unserializable repository request: {err}")))?;
        self.call(session, CREATE_REPO_PATH, Method::Post, RequestBody::Json(body)).await?;
        Ok(())
    }

    /// `POST /auth/logout`, best effort; callers clear the local session regardless.
    ///
    /// # Errors
    ///
    /// See [`Self::call`].
    pub async fn logout(&self, session: Option<&Session>) -> Result<(), ClientError> {
        self.call(session, LOGOUT_PATH, Method::Post, RequestBody::Empty).await?;
        Ok(())
    }
}
