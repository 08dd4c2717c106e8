//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and delegates rendering details
//! to `components`. Pages behind `RequireAuth` may assume a session exists
//! when they first render, but must still cope with it disappearing.

pub mod auth_callback;
pub mod create_project;
pub mod dashboard;
pub mod home;
pub mod login;
pub mod project;
