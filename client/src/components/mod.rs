//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components read the session through `AuthContext` and report failures
//! as status text; none of them owns routing beyond the guard redirect.

pub mod app_header;
pub mod file_upload_modal;
pub mod project_card;
pub mod require_auth;
