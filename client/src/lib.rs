//! # client
//!
//! Leptos + WASM frontend for the DeployHub dashboard.
//!
//! Session handling lives in the `session` crate; this crate supplies the
//! browser halves of it (`localStorage`, `fetch`, timers, navigation) and the
//! pages and components that sit on top.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Browser entry point: install logging and mount the app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Debug) {
        web_sys::console::warn_1(&format!("logger already installed: {err}").into());
    }
    leptos::mount::mount_to_body(app::App);
}
