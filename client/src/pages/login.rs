//! Login page: starts the GitHub OAuth redirect.
//!
//! A visitor who already holds a session is sent straight to the dashboard.
//! A failed redirect request is logged and leaves the button usable again;
//! nothing is shown to the user.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;
use session::{GuardDecision, Resolution};
use session::oauth::DASHBOARD_PATH;

use crate::state::auth::AuthContext;

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = AuthContext::current();
    let navigate = use_navigate();
    let busy = RwSignal::new(false);

    Effect::new(move || {
        if auth.decision() == GuardDecision::Admit {
            navigate(DASHBOARD_PATH, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });

    let on_login = move |_| {
        if busy.get_untracked() {
            return;
        }
        busy.set(true);

        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            let mut flow = session::OAuthFlow::new();
            match flow.begin_login(&crate::net::api::api_client()).await {
                Some(target) => crate::util::navigation::redirect_browser(&target),
                None => busy.set(false),
            }
        });
    };

    view! {
        <div class="login-page">
            <a class="login-page__back" href="/">"← Back to home"</a>
            <div class="login-card">
                <h1>"Welcome to DeployHub"</h1>
                <p class="login-card__subtitle">"Sign in with GitHub to get started"</p>
                <Show
                    when=move || auth.resolution() == Resolution::Resolved
                    fallback=|| view! { <p class="login-card__loading">"Loading..."</p> }
                >
                    <button class="login-button" on:click=on_login disabled=move || busy.get()>
                        {move || if busy.get() { "Redirecting to GitHub..." } else { "Continue with GitHub" }}
                    </button>
                </Show>
                <p class="login-card__legal">
                    "By signing in, you agree to our terms of service and privacy policy."
                </p>
            </div>
        </div>
    }
}
