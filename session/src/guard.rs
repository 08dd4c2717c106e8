//! Route Guard decision for views that require a session.
//!
//! The decision is a pure function of resolution state and the current
//! session, so switching between protected views only re-reads the store and
//! never restarts the OAuth flow.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use crate::types::Session;

/// Whether startup rehydration has finished.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Resolution {
    #[default]
    Pending,
    Resolved,
}

/// What a protected view should do right now.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Rehydration in flight: show a neutral loading state, do not navigate.
    Loading,
    /// Render the protected view.
    Admit,
    /// Navigate to login and render nothing for this view.
    RedirectToLogin,
}

#[must_use]
pub fn decide(resolution: Resolution, session: Option<&Session>) -> GuardDecision {
    match (resolution, session) {
        (Resolution::Pending, _) => GuardDecision::Loading,
        (Resolution::Resolved, Some(_)) => GuardDecision::Admit,
        (Resolution::Resolved, None) => GuardDecision::RedirectToLogin,
    }
}
