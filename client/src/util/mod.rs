//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser concerns (`localStorage`, timers, file
//! pickers, top-level navigation) from page and component logic. All but
//! `files` carry host stubs so the crate builds and tests without a browser.

#[cfg(feature = "csr")]
pub mod files;
pub mod navigation;
pub mod storage;
pub mod timer;
