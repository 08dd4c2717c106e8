//! Public landing page.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;
use session::oauth::{DASHBOARD_PATH, LOGIN_PATH};

use crate::state::auth::AuthContext;

#[component]
pub fn HomePage() -> impl IntoView {
    let auth = AuthContext::current();
    let navigate = use_navigate();

    Effect::new(move || {
        if auth.state().is_authenticated() {
            navigate(DASHBOARD_PATH, NavigateOptions::default());
        }
    });

    view! {
        <div class="home-page">
            <section class="home-page__hero">
                <h1>"Deploy your project in minutes"</h1>
                <p>
                    "Upload your frontend and backend as zip archives. DeployHub pushes them to a "
                    "GitHub repository and ships them to your hosting provider."
                </p>
                <a class="btn btn--primary" href=LOGIN_PATH>"Get Started"</a>
            </section>
            <section class="home-page__features">
                <div class="feature">
                    <h3>"Auto Deploy"</h3>
                    <p>"Frontend and backend deployments from one upload."</p>
                </div>
                <div class="feature">
                    <h3>"GitHub Sync"</h3>
                    <p>"A repository is created for every project."</p>
                </div>
            </section>
        </div>
    }
}
