//! Project page: bundle uploads, repository creation and deployment history.
//!
//! SYSTEM CONTEXT
//! ==============
//! Loads `GET /projects/{id}`. A missing project sends the user back to the
//! dashboard, a rejected credential drops the session. Uploads and
//! repository creation refetch the page data when they succeed.

#[cfg(test)]
#[path = "project_test.rs"]
mod project_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_params_map};
use session::oauth::DASHBOARD_PATH;
use session::types::{CreateRepository, ProjectDetail, ProjectSummary};
use session::upload::format_file_size;
use session::{ClientError, UploadTarget};

use crate::components::app_header::AppHeader;
use crate::components::file_upload_modal::FileUploadModal;
use crate::net::api::api_client;
use crate::state::auth::AuthContext;

/// The backend has no such project (or no longer shows it to this user).
#[must_use]
pub fn is_missing(err: &ClientError) -> bool {
    matches!(err, ClientError::RemoteRejection { status: 404, .. })
}

#[must_use]
pub fn part_state(uploaded: bool) -> &'static str {
    if uploaded { "Uploaded" } else { "Not uploaded" }
}

#[must_use]
pub fn repository_caption(project: &ProjectSummary) -> String {
    match (&project.github_repo_url, &project.github_repo_name) {
        (Some(_), Some(name)) => format!("Repository created: {name}"),
        (Some(url), None) => format!("Repository created: {url}"),
        (None, _) => "Create a GitHub repository to version control your code".to_owned(),
    }
}

#[component]
pub fn ProjectPage() -> impl IntoView {
    let auth = AuthContext::current();
    let navigate = use_navigate();
    let params = use_params_map();
    let project_id = Memo::new(move |_| params.with(|p| p.get("id")).unwrap_or_default());

    let detail = LocalResource::new(move || {
        let id = project_id.get();
        let session = auth.session_untracked();
        async move { api_client().get_project(session.as_ref(), &id).await }
    });

    Effect::new(move || match detail.get() {
        Some(Err(err)) if is_missing(&err) => {
            log::info!("projects: {} not found", project_id.get_untracked());
            navigate(DASHBOARD_PATH, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
        Some(Err(err)) => {
            auth.absorb(&err);
        }
        _ => {}
    });

    let upload_target = RwSignal::new(None::<UploadTarget>);
    let creating_repo = RwSignal::new(false);
    let repo_error = RwSignal::new(None::<String>);

    let on_upload = Callback::new(move |target: UploadTarget| upload_target.set(Some(target)));
    let on_upload_close = Callback::new(move |()| upload_target.set(None));
    let on_upload_success = Callback::new(move |()| {
        upload_target.set(None);
        detail.refetch();
    });

    let on_create_repo = Callback::new(move |project: ProjectSummary| {
        if creating_repo.get_untracked() {
            return;
        }
        creating_repo.set(true);
        repo_error.set(None);
        let request = CreateRepository::for_project(&project);
        let session = auth.session_untracked();

        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            match api_client().create_repository(session.as_ref(), &request).await {
                Ok(()) => detail.refetch(),
                Err(err) => repo_error.set(Some(crate::net::api::report_failure(auth, &err))),
            }
            creating_repo.set(false);
        });
        #[cfg(not(feature = "csr"))]
        {
            let _ = (request, session);
            creating_repo.set(false);
        }
    });

    let content = move || match detail.get() {
        None => view! { <p class="project-page__loading">"Loading project..."</p> }.into_any(),
        Some(Err(err)) => view! { <p class="project-page__error">{err.user_message()}</p> }.into_any(),
        Some(Ok(detail)) => view! {
            <ProjectDetailView
                detail
                on_upload
                on_create_repo
                creating_repo
                repo_error
            />
        }
        .into_any(),
    };

    view! {
        <div class="project-page">
            <AppHeader/>
            <a class="project-page__back" href="/dashboard">"← Back to dashboard"</a>
            {content}
            {move || {
                upload_target
                    .get()
                    .map(|target| {
                        view! {
                            <FileUploadModal
                                project_id=project_id.get_untracked()
                                target
                                on_close=on_upload_close
                                on_success=on_upload_success
                            />
                        }
                    })
            }}
        </div>
    }
}

#[component]
fn ProjectDetailView(
    detail: ProjectDetail,
    on_upload: Callback<UploadTarget>,
    on_create_repo: Callback<ProjectSummary>,
    #[prop(into)] creating_repo: Signal<bool>,
    #[prop(into)] repo_error: Signal<Option<String>>,
) -> impl IntoView {
    let ProjectDetail { project, files, deployments } = detail;
    let status = project.deployment_status.as_str();
    let caption = repository_caption(&project);
    let repo_link = project.github_repo_url.clone();
    let needs_repo = repo_link.is_none();
    let has_frontend = project.has_frontend;
    let has_backend = project.has_backend;
    let project_for_repo = project.clone();

    view! {
        <section class="project-page__summary">
            <h1>{project.title}</h1>
            <span class=format!("status-badge status-badge--{status}")>{status}</span>
            {project.description.map(|text| view! { <p class="project-page__description">{text}</p> })}
            {repo_link.map(|url| view! { <a class="project-page__repo" href=url target="_blank">"View on GitHub"</a> })}
        </section>

        <section class="project-page__parts">
            <div class="part-card">
                <h3>"Frontend"</h3>
                <p>{part_state(has_frontend)}</p>
                <button class="btn" on:click=move |_| on_upload.run(UploadTarget::Frontend)>"Upload Frontend"</button>
            </div>
            <div class="part-card">
                <h3>"Backend"</h3>
                <p>{part_state(has_backend)}</p>
                <button class="btn" on:click=move |_| on_upload.run(UploadTarget::Backend)>"Upload Backend"</button>
            </div>
            <div class="part-card">
                <h3>"GitHub Repository"</h3>
                <p>{caption}</p>
                <Show when=move || needs_repo>
                    <button
                        class="btn btn--primary"
                        disabled=move || creating_repo.get()
                        on:click={
                            let project = project_for_repo.clone();
                            move |_| on_create_repo.run(project.clone())
                        }
                    >
                        {move || if creating_repo.get() { "Creating..." } else { "Create Repository" }}
                    </button>
                </Show>
                <Show when=move || repo_error.with(Option::is_some)>
                    <p class="part-card__error">{move || repo_error.get().unwrap_or_default()}</p>
                </Show>
            </div>
        </section>

        <section class="project-page__files">
            <h2>"Files"</h2>
            {if files.is_empty() {
                view! { <p>"No files uploaded yet."</p> }.into_any()
            } else {
                view! {
                    <ul>
                        {files
                            .into_iter()
                            .map(|file| {
                                let kind = if file.is_frontend { "frontend" } else if file.is_backend { "backend" } else { "" };
                                let size = file.file_size.map(format_file_size).unwrap_or_default();
                                view! {
                                    <li class="file-row">
                                        <span class="file-row__name">{file.name}</span>
                                        <span class="file-row__kind">{kind}</span>
                                        <span class="file-row__size">{size}</span>
                                    </li>
                                }
                            })
                            .collect_view()}
                    </ul>
                }
                    .into_any()
            }}
        </section>

        <section class="project-page__deployments">
            <h2>"Deployments"</h2>
            {if deployments.is_empty() {
                view! { <p>"No deployments yet."</p> }.into_any()
            } else {
                view! {
                    <ul>
                        {deployments
                            .into_iter()
                            .map(|deployment| {
                                let status = deployment.status.as_str();
                                view! {
                                    <li class="deployment-row">
                                        <span>{deployment.provider.unwrap_or_default()}</span>
                                        <span class=format!("status-badge status-badge--{status}")>{status}</span>
                                        {deployment.url.map(|url| view! { <a href=url.clone() target="_blank">{url.clone()}</a> })}
                                    </li>
                                }
                            })
                            .collect_view()}
                    </ul>
                }
                    .into_any()
            }}
        </section>
    }
}
