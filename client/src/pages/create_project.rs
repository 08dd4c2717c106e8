//! New-project form.

#[cfg(test)]
#[path = "create_project_test.rs"]
mod create_project_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;
use session::types::NewProject;

use crate::components::app_header::AppHeader;
use crate::state::auth::AuthContext;

const MIN_TITLE_CHARS: usize = 3;

/// Trim and check the form before anything is sent.
///
/// # Errors
///
/// Returns the message to show under the title field.
pub fn validate_new_project(title: &str, description: &str) -> Result<NewProject, &'static str> {
    let title = title.trim();
    if title.is_empty() {
        return Err("Project title is required");
    }
    if title.chars().count() < MIN_TITLE_CHARS {
        return Err("Project title must be at least 3 characters");
    }
    Ok(NewProject { title: title.to_owned(), description: description.trim().to_owned() })
}

#[component]
pub fn CreateProjectPage() -> impl IntoView {
    let auth = AuthContext::current();
    let navigate = use_navigate();
    let title = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let project = match validate_new_project(&title.get_untracked(), &description.get_untracked()) {
            Ok(project) => project,
            Err(message) => {
                error.set(Some(message.to_owned()));
                return;
            }
        };
        busy.set(true);
        error.set(None);
        let session = auth.session_untracked();
        let navigate = navigate.clone();

        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            match crate::net::api::api_client().create_project(session.as_ref(), &project).await {
                Ok(created) => {
                    log::info!("projects: created {}", created.id);
                    navigate(&format!("/projects/{}", created.id), NavigateOptions::default());
                }
                Err(err) => {
                    error.set(Some(crate::net::api::report_failure(auth, &err)));
                    busy.set(false);
                }
            }
        });
        #[cfg(not(feature = "csr"))]
        {
            let _ = (session, project, navigate);
        }
    };

    view! {
        <div class="create-project-page">
            <AppHeader/>
            <a class="create-project-page__back" href="/dashboard">"← Back to dashboard"</a>
            <form class="create-project-form" on:submit=on_submit>
                <h1>"Create New Project"</h1>
                <label for="title">"Project Title *"</label>
                <input
                    id="title"
                    class="create-project-form__input"
                    class:create-project-form__input--invalid=move || error.with(Option::is_some)
                    type="text"
                    placeholder="Enter project title"
                    prop:value=move || title.get()
                    on:input=move |ev| {
                        title.set(event_target_value(&ev));
                        error.set(None);
                    }
                />
                <Show when=move || error.with(Option::is_some)>
                    <p class="create-project-form__error">{move || error.get().unwrap_or_default()}</p>
                </Show>
                <label for="description">"Description"</label>
                <textarea
                    id="description"
                    class="create-project-form__input"
                    rows="4"
                    placeholder="Describe your project (optional)"
                    prop:value=move || description.get()
                    on:input=move |ev| description.set(event_target_value(&ev))
                ></textarea>
                <div class="create-project-form__actions">
                    <a class="btn" href="/dashboard">"Cancel"</a>
                    <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Creating..." } else { "Create Project" }}
                    </button>
                </div>
            </form>
        </div>
    }
}
