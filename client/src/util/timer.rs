//! Delayed actions tied to component lifetime.
//!
//! SYSTEM CONTEXT
//! ==============
//! The callback page and the upload modal both act after a fixed pause. The
//! pause is cancelled when the owning component is disposed, so a user who
//! navigates away first is never yanked to a stale destination.

#[cfg(test)]
#[path = "timer_test.rs"]
mod timer_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

/// Shared cancellation flag for one scheduled action.
#[derive(Clone, Debug, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Flag that is cancelled when the current reactive owner is cleaned up.
/// Call during component setup; async tasks check it after every await.
pub fn lifetime_flag() -> CancelFlag {
    let flag = CancelFlag::new();
    on_cleanup({
        let flag = flag.clone();
        move || flag.cancel()
    });
    flag
}

/// Run `action` after `delay` unless `flag` is cancelled by then.
pub fn run_after<F>(flag: CancelFlag, delay: Duration, action: F)
where
    F: FnOnce() + 'static,
{
    #[cfg(feature = "csr")]
    leptos::task::spawn_local(async move {
        gloo_timers::future::sleep(delay).await;
        if !flag.is_cancelled() {
            action();
        }
    });
    #[cfg(not(feature = "csr"))]
    {
        let _ = (flag, delay, action);
    }
}

/// Run `action` after `delay`, cancelled with the calling component.
pub fn schedule_after<F>(delay: Duration, action: F) -> CancelFlag
where
    F: FnOnce() + 'static,
{
    let flag = lifetime_flag();
    run_after(flag.clone(), delay, action);
    flag
}

/// In-app navigation to `path` after `delay`, cancelled with the component.
pub fn schedule_navigation(path: &'static str, delay: Duration) -> CancelFlag {
    let navigate = use_navigate();
    log::debug!("timer: navigating to {path} in {}ms", delay.as_millis());
    schedule_after(delay, move || navigate(path, NavigateOptions::default()))
}
