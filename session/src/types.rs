//! Wire DTOs for the session and the project dashboard.
//!
//! DESIGN
//! ======
//! `UserProfile` is consumed, not interpreted: only the fields the UI shows
//! are named, everything else rides along in `extra` so a persisted profile
//! reads back exactly as the backend sent it.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Identity record delivered by the OAuth callback.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Display name, if the provider has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Provider account handle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login: Option<String>,
    /// Avatar image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// Every other field, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserProfile {
    /// Best label for headers and menus.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .or(self.login.as_deref())
            .unwrap_or("Unknown user")
    }
}

/// Opaque bearer credential issued by the backend after the OAuth exchange.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(String);

impl Token {
    /// Wrap a raw credential. Blank input is not a credential.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() { None } else { Some(Self(raw)) }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `Authorization` header value.
    #[must_use]
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(***)")
    }
}

/// An authenticated browser session. Identity and credential always travel
/// together; the empty session is `None`.
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    pub user: UserProfile,
    pub token: Token,
}

// =============================================================================
// PROJECTS
// =============================================================================

/// Deployment state reported by the backend for a project.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentStatus {
    #[default]
    Pending,
    Deploying,
    Deployed,
    Failed,
    #[serde(other)]
    Unknown,
}

impl DeploymentStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Deploying => "deploying",
            Self::Deployed => "deployed",
            Self::Failed => "failed",
            Self::Unknown => "unknown",
        }
    }
}

/// A project row as listed on the dashboard.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectSummary {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub has_frontend: bool,
    #[serde(default)]
    pub has_backend: bool,
    #[serde(default)]
    pub github_repo_url: Option<String>,
    #[serde(default)]
    pub github_repo_name: Option<String>,
    #[serde(default)]
    pub deployment_status: DeploymentStatus,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// An uploaded bundle attached to a project.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectFile {
    pub id: String,
    #[serde(alias = "file_name")]
    pub name: String,
    #[serde(default)]
    pub file_size: Option<u64>,
    #[serde(default)]
    pub is_frontend: bool,
    #[serde(default)]
    pub is_backend: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// One deployment attempt for a project.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Deployment {
    pub id: String,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub status: DeploymentStatus,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Project page payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectDetail {
    pub project: ProjectSummary,
    #[serde(default)]
    pub files: Vec<ProjectFile>,
    #[serde(default)]
    pub deployments: Vec<Deployment>,
}

/// Body of `POST /projects`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProject {
    pub title: String,
    pub description: String,
}

/// Body of `POST /github/create-repo`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRepository {
    pub project_id: String,
    pub repo_name: String,
    pub description: Option<String>,
    pub is_private: bool,
}

impl CreateRepository {
    /// Public repository request named after the project title.
    #[must_use]
    pub fn for_project(project: &ProjectSummary) -> Self {
        Self {
            project_id: project.id.clone(),
            repo_name: repository_name(&project.title),
            description: project.description.clone(),
            is_private: false,
        }
    }
}

/// Derive a repository name from a project title: lowercase, and every
/// character outside `[a-z0-9-]` becomes `-`.
#[must_use]
pub fn repository_name(title: &str) -> String {
    title
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' { c } else { '-' })
        .collect()
}
