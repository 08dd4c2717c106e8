//! Dashboard page listing the signed-in user's projects.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the authenticated landing route. It fetches the project list once
//! per visit; a rejected credential drops the session and the surrounding
//! guard takes the user back to login.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;
use session::types::{DeploymentStatus, ProjectSummary};

use crate::components::app_header::AppHeader;
use crate::components::project_card::ProjectCard;
use crate::net::api::api_client;
use crate::state::auth::AuthContext;

/// Counts shown above the project grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DashboardStats {
    pub total: usize,
    pub deployed: usize,
    pub with_repository: usize,
}

impl DashboardStats {
    #[must_use]
    pub fn from_projects(projects: &[ProjectSummary]) -> Self {
        Self {
            total: projects.len(),
            deployed: projects
                .iter()
                .filter(|p| p.deployment_status == DeploymentStatus::Deployed)
                .count(),
            with_repository: projects.iter().filter(|p| p.github_repo_url.is_some()).count(),
        }
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = AuthContext::current();
    let projects = LocalResource::new(move || {
        let session = auth.session_untracked();
        async move { api_client().list_projects(session.as_ref()).await }
    });

    Effect::new(move || {
        if let Some(Err(err)) = projects.get() {
            auth.absorb(&err);
        }
    });

    let listing = move || match projects.get() {
        None => view! { <p class="dashboard-page__loading">"Loading projects..."</p> }.into_any(),
        Some(Err(err)) => view! { <p class="dashboard-page__error">{err.user_message()}</p> }.into_any(),
        Some(Ok(list)) if list.is_empty() => view! {
            <div class="dashboard-page__empty">
                <h3>"No projects yet"</h3>
                <p>"Create your first project to start deploying."</p>
                <a class="btn btn--primary" href="/projects/new">"Create Project"</a>
            </div>
        }
        .into_any(),
        Some(Ok(list)) => {
            let stats = DashboardStats::from_projects(&list);
            view! {
                <p class="dashboard-page__stats">
                    {format!(
                        "{} projects · {} deployed · {} on GitHub",
                        stats.total,
                        stats.deployed,
                        stats.with_repository,
                    )}
                </p>
                <div class="dashboard-page__cards">
                    {list.into_iter().map(|project| view! { <ProjectCard project/> }).collect_view()}
                </div>
            }
            .into_any()
        }
    };

    view! {
        <div class="dashboard-page">
            <AppHeader/>
            <div class="dashboard-page__title">
                <h1>"Your Projects"</h1>
                <a class="btn btn--primary" href="/projects/new">"+ New Project"</a>
            </div>
            {listing}
        </div>
    }
}
