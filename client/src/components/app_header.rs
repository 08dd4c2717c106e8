//! Top bar for signed-in views: identity and sign-out.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::state::auth::AuthContext;

#[component]
pub fn AppHeader() -> impl IntoView {
    let auth = AuthContext::current();
    let navigate = use_navigate();
    let signing_out = RwSignal::new(false);

    let display_name = move || {
        auth.state()
            .user()
            .map_or_else(|| "Signed out".to_owned(), |user| user.display_name().to_owned())
    };
    let avatar = move || auth.state().user().and_then(|user| user.avatar_url.clone());

    // Leave the guarded route before clearing, or the guard redirects to login first.
    let on_sign_out = move |_| {
        if signing_out.get_untracked() {
            return;
        }
        signing_out.set(true);
        let session = auth.session_untracked();
        let navigate = navigate.clone();
        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            if let Err(err) = crate::net::api::api_client().logout(session.as_ref()).await {
                log::warn!("auth: backend sign-out failed, clearing locally: {err}");
            }
            navigate("/", NavigateOptions::default());
            auth.clear();
        });
        #[cfg(not(feature = "csr"))]
        {
            let _ = session;
            navigate("/", NavigateOptions::default());
            auth.clear();
        }
    };

    view! {
        <header class="app-header">
            <a class="app-header__brand" href="/dashboard">"DeployHub"</a>
            <span class="app-header__spacer"></span>
            {move || avatar().map(|src| view! { <img class="app-header__avatar" src=src alt=""/> })}
            <span class="app-header__user">{display_name}</span>
            <button class="btn app-header__logout" on:click=on_sign_out disabled=move || signing_out.get()>
                "Sign out"
            </button>
        </header>
    }
}
