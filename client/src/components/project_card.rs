//! Dashboard card for one project.

#[cfg(test)]
#[path = "project_card_test.rs"]
mod project_card_test;

use leptos::prelude::*;
use session::types::ProjectSummary;

/// Date part of the backend's RFC 3339 timestamp.
fn created_label(created_at: Option<&str>) -> String {
    created_at
        .map(|raw| raw.split_once('T').map_or(raw, |(date, _)| date))
        .map_or_else(String::new, |date| format!("Created {date}"))
}

#[component]
pub fn ProjectCard(project: ProjectSummary) -> impl IntoView {
    let href = format!("/projects/{}", project.id);
    let status = project.deployment_status.as_str();
    let description = project.description.unwrap_or_else(|| "No description".to_owned());
    let created = created_label(project.created_at.as_deref());

    view! {
        <a class="project-card" href=href>
            <span class="project-card__title">{project.title}</span>
            <span class=format!("project-card__status project-card__status--{status}")>{status}</span>
            <p class="project-card__description">{description}</p>
            <span class="project-card__parts">
                <span class="project-card__part" class:project-card__part--ready=project.has_frontend>
                    "Frontend"
                </span>
                <span class="project-card__part" class:project-card__part--ready=project.has_backend>
                    "Backend"
                </span>
            </span>
            {project
                .github_repo_name
                .map(|name| view! { <span class="project-card__repo">{name}</span> })}
            <span class="project-card__created">{created}</span>
        </a>
    }
}
