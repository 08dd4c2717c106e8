//! Single-archive upload modal for one project and one bundle kind.
//!
//! SYSTEM CONTEXT
//! ==============
//! Opened from the project page with a fixed [`UploadTarget`]. The picked
//! archive is validated locally before any bytes are read, posted with the
//! session credential, and on success the parent is told after a short
//! confirmation pause.
//!
//! DESIGN
//! ======
//! `Idle -> Uploading -> Succeeded | Failed(message)`. Failure only returns
//! to `Idle` through the explicit "Try again" action. Async results are
//! dropped if the modal was closed while they were in flight.

#[cfg(test)]
#[path = "file_upload_modal_test.rs"]
mod file_upload_modal_test;

use leptos::prelude::*;
#[cfg(feature = "csr")]
use session::config::UPLOAD_SUCCESS_DELAY;
use session::upload::{format_file_size, validate_file_name};
use session::{ClientError, SelectedFile, UploadSelection, UploadTarget};

use crate::state::auth::AuthContext;
use crate::util::timer::lifetime_flag;
#[cfg(feature = "csr")]
use crate::util::timer::run_after;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum UploadStatus {
    #[default]
    Idle,
    Uploading,
    Succeeded,
    Failed(String),
}

impl UploadStatus {
    #[must_use]
    pub fn accepts_submit(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Whether the result panel replaces the picker.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed(_))
    }
}

/// Reject a picker result by name alone, before loading it.
///
/// # Errors
///
/// Returns [`ClientError::InvalidSelection`] unless exactly one `.zip` was picked.
pub fn check_pick(names: &[String]) -> Result<(), ClientError> {
    match names {
        [name] => validate_file_name(name),
        _ => Err(ClientError::InvalidSelection("select exactly one .zip file".to_owned())),
    }
}

fn describe(file: &SelectedFile) -> String {
    let size = u64::try_from(file.bytes.len()).unwrap_or(u64::MAX);
    format!("{} ({})", file.name, format_file_size(size))
}

#[component]
pub fn FileUploadModal(
    project_id: String,
    target: UploadTarget,
    on_close: Callback<()>,
    on_success: Callback<()>,
) -> impl IntoView {
    let auth = AuthContext::current();
    let alive = lifetime_flag();
    let status = RwSignal::new(UploadStatus::Idle);
    let selected = RwSignal::new(Vec::<SelectedFile>::new());
    let project_id = StoredValue::new(project_id);

    let pick_alive = alive.clone();
    let on_pick = move |ev: leptos::ev::Event| {
        #[cfg(feature = "csr")]
        {
            let files = crate::util::files::picked_files(&ev);
            let names: Vec<String> = files.iter().map(web_sys::File::name).collect();
            if let Err(err) = check_pick(&names) {
                selected.set(Vec::new());
                status.set(UploadStatus::Failed(err.user_message()));
                return;
            }
            let alive = pick_alive.clone();
            leptos::task::spawn_local(async move {
                let loaded = crate::util::files::read_files(files).await;
                if alive.is_cancelled() {
                    return;
                }
                match loaded {
                    Ok(files) => selected.set(files),
                    Err(err) => status.set(UploadStatus::Failed(err.user_message())),
                }
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (ev, &pick_alive);
        }
    };

    let on_submit = move |_| {
        if !status.get_untracked().accepts_submit() {
            return;
        }
        let selection = match UploadSelection::new(selected.get_untracked(), target, &project_id.get_value()) {
            Ok(selection) => selection,
            Err(err) => {
                status.set(UploadStatus::Failed(err.user_message()));
                return;
            }
        };
        status.set(UploadStatus::Uploading);
        let session = auth.session_untracked();
        let alive = alive.clone();
        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            let result = crate::net::api::api_client().upload_bundle(session.as_ref(), selection).await;
            if alive.is_cancelled() {
                return;
            }
            match result {
                Ok(()) => {
                    status.set(UploadStatus::Succeeded);
                    run_after(alive, UPLOAD_SUCCESS_DELAY, move || on_success.run(()));
                }
                Err(err) => status.set(UploadStatus::Failed(crate::net::api::report_failure(auth, &err))),
            }
        });
        #[cfg(not(feature = "csr"))]
        {
            let _ = (session, selection, alive, on_success);
        }
    };

    let on_try_again = move |_| {
        selected.set(Vec::new());
        status.set(UploadStatus::Idle);
    };

    view! {
        <div class="modal-backdrop">
            <div class="modal upload-modal">
                <header class="modal__header">
                    <h2>{format!("Upload {} Bundle", target.label())}</h2>
                    <button class="modal__close" on:click=move |_| on_close.run(()) aria-label="Close">
                        "✕"
                    </button>
                </header>
                <div class="modal__body">
                    {move || match status.get() {
                        UploadStatus::Succeeded => {
                            view! {
                                <div class="upload-modal__result upload-modal__result--ok">
                                    <h3>"Upload Successful!"</h3>
                                    <p>"Your archive is uploaded and ready for deployment."</p>
                                </div>
                            }
                                .into_any()
                        }
                        UploadStatus::Failed(message) => {
                            view! {
                                <div class="upload-modal__result upload-modal__result--error">
                                    <h3>"Upload Failed"</h3>
                                    <p>{message}</p>
                                    <button class="btn" on:click=on_try_again>"Try again"</button>
                                </div>
                            }
                                .into_any()
                        }
                        UploadStatus::Idle | UploadStatus::Uploading => {
                            view! {
                                <div class="upload-modal__picker">
                                    <label class="upload-modal__drop">
                                        <span>{format!("Choose the {} .zip archive", target.as_str())}</span>
                                        <input
                                            type="file"
                                            accept=".zip,application/zip"
                                            on:change=on_pick.clone()
                                            disabled=move || status.get() == UploadStatus::Uploading
                                        />
                                    </label>
                                    <ul class="upload-modal__files">
                                        {move || {
                                            selected
                                                .with(|files| files.iter().map(describe).collect::<Vec<_>>())
                                                .into_iter()
                                                .map(|line| view! { <li>{line}</li> })
                                                .collect_view()
                                        }}
                                    </ul>
                                </div>
                            }
                                .into_any()
                        }
                    }}
                </div>
                <Show when=move || !status.get().is_finished()>
                    <footer class="modal__footer">
                        <button class="btn" on:click=move |_| on_close.run(())>"Cancel"</button>
                        <button
                            class="btn btn--primary"
                            on:click=on_submit.clone()
                            disabled=move || !status.get().accepts_submit() || selected.with(Vec::is_empty)
                        >
                            {move || if status.get() == UploadStatus::Uploading { "Uploading..." } else { "Upload" }}
                        </button>
                    </footer>
                </Show>
            </div>
        </div>
    }
}
