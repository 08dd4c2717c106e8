//! Networking for the browser build.
//!
//! SYSTEM CONTEXT
//! ==============
//! `transport` carries `session` requests over `fetch` via `gloo-net`; `api`
//! binds that transport to the build-time backend config.

pub mod api;
pub mod transport;
