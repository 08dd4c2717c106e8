//! Root application component with routing and the auth context.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::require_auth::RequireAuth;
use crate::pages::{
    auth_callback::AuthCallbackPage, create_project::CreateProjectPage, dashboard::DashboardPage, home::HomePage,
    login::LoginPage, project::ProjectPage,
};
use crate::state::auth::AuthContext;

/// Root application component.
///
/// Provides the session handle, rehydrates it once before any route
/// renders, and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = AuthContext::provide();
    auth.rehydrate();

    view! {
        <Title text="DeployHub"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=HomePage/>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=(StaticSegment("auth"), StaticSegment("callback")) view=AuthCallbackPage/>
                <Route path=(StaticSegment("login"), StaticSegment("callback")) view=AuthCallbackPage/>
                <Route
                    path=StaticSegment("dashboard")
                    view=|| view! { <RequireAuth><DashboardPage/></RequireAuth> }
                />
                <Route
                    path=(StaticSegment("projects"), StaticSegment("new"))
                    view=|| view! { <RequireAuth><CreateProjectPage/></RequireAuth> }
                />
                <Route
                    path=(StaticSegment("projects"), ParamSegment("id"))
                    view=|| view! { <RequireAuth><ProjectPage/></RequireAuth> }
                />
            </Routes>
        </Router>
    }
}
