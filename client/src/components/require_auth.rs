//! Route Guard wrapper for views that need a signed-in user.
//!
//! DESIGN
//! ======
//! Renders from [`GuardDecision`] alone. While rehydration is pending it
//! shows a neutral placeholder and never navigates; once resolved it either
//! renders the children or replaces the route with login. Moving between two
//! guarded views only re-reads the session.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;
use session::GuardDecision;
use session::oauth::LOGIN_PATH;

use crate::state::auth::AuthContext;

#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let auth = AuthContext::current();
    let navigate = use_navigate();

    Effect::new(move || {
        if auth.decision() == GuardDecision::RedirectToLogin {
            log::debug!("guard: no session, sending to login");
            navigate(LOGIN_PATH, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });

    view! {
        <Show
            when=move || auth.decision() == GuardDecision::Admit
            fallback=move || {
                view! {
                    <div class="guard-placeholder">
                        <p>
                            {move || match auth.decision() {
                                GuardDecision::Loading => "Loading...",
                                _ => "Redirecting to login...",
                            }}
                        </p>
                    </div>
                }
            }
        >
            {children()}
        </Show>
    }
}
