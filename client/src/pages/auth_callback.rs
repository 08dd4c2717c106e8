//! OAuth callback route (`/auth/callback`, also `/login/callback`).
//!
//! SYSTEM CONTEXT
//! ==============
//! The provider round-trip lands here with the result in the query string.
//! The page resolves it exactly once on mount, shows the outcome, and then
//! leaves for one of two fixed destinations after a short pause. Leaving the
//! page earlier cancels that pending navigation.

use leptos::prelude::*;
use leptos_router::hooks::use_location;
use session::{CallbackOutcome, CallbackParams, OAuthFlow};

use crate::state::auth::AuthContext;
use crate::util::timer::schedule_navigation;

#[component]
pub fn AuthCallbackPage() -> impl IntoView {
    let auth = AuthContext::current();
    let query = use_location().search.get_untracked();
    let params = CallbackParams::from_query(&query);

    let mut flow = OAuthFlow::awaiting_callback();
    let outcome = auth.handle_callback(&mut flow, &params);
    let redirect = outcome.redirect();
    schedule_navigation(redirect.path, redirect.delay);

    let body = match outcome {
        CallbackOutcome::Success(session) => view! {
            <div class="callback-card callback-card--ok">
                <h1>"Welcome to DeployHub!"</h1>
                <p>
                    {format!("Signed in as {}. ", session.user.display_name())}
                    "Redirecting to your dashboard..."
                </p>
            </div>
        }
        .into_any(),
        CallbackOutcome::Failure(err) => view! {
            <div class="callback-card callback-card--error">
                <h1>"Authentication Failed"</h1>
                <p>{err.user_message()}</p>
                <p class="callback-card__hint">"Redirecting you back to the login page..."</p>
            </div>
        }
        .into_any(),
    };

    view! { <div class="callback-page">{body}</div> }
}
