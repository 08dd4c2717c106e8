//! Browser-agnostic session lifecycle for the DeployHub dashboard.
//!
//! This crate owns everything about "who is signed in" that does not need a
//! DOM: the persisted session store, the OAuth callback decoder, the route
//! guard decision, and the authenticated API client. The Leptos `client`
//! and the terminal `cli` both drive the same types; each supplies its own
//! [`SessionStorage`] and [`Transport`].
//!
//! CONTROL FLOW
//! ============
//! guard consults store -> login starts the OAuth flow -> callback decodes
//! into a [`Session`] -> store persists it -> guard admits -> [`ApiClient`]
//! attaches the stored credential to every authenticated call.

pub mod api;
pub mod config;
pub mod error;
pub mod guard;
pub mod oauth;
pub mod storage;
pub mod store;
pub mod transport;
pub mod types;
pub mod upload;

pub use api::ApiClient;
pub use config::ClientConfig;
pub use error::{ClientError, StorageError};
pub use guard::{GuardDecision, Resolution};
pub use oauth::{CallbackOutcome, CallbackParams, OAuthFlow, OAuthPhase, PendingRedirect};
pub use storage::{MemoryStorage, SessionStorage};
pub use store::SessionStore;
pub use transport::{ApiRequest, ApiResponse, FormPart, FormValue, Method, RequestBody, Transport};
pub use types::{Session, Token, UserProfile};
pub use upload::{SelectedFile, UploadSelection, UploadTarget};
