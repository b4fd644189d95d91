//! Four-step translation wizard
//!
//! The [`Wizard`] state machine lives in a signal and is mirrored into
//! `sessionStorage` on every change. Async transitions validate up front,
//! run the request, then apply the result to the signal as it is by then;
//! `busy` guards re-entry.

mod document_step;
mod execute_step;
mod glossary_step;
mod preview_step;

use dioxus::core::Task;
use dioxus::prelude::*;
use transdesk_core::api::{GlossaryApi, TranslationApi};
use transdesk_core::conflict::{GlossarySelection, SelectedGlossary};
use transdesk_core::poller::{poll_job, TranslationStatus};
use transdesk_core::wizard::{cancel_remote, Retreat, Wizard, WizardSession, WizardStep};
use transdesk_core::AppError;

use crate::api::HttpApi;
use crate::components::widgets::StepIndicator;
use crate::config::client_config;
use crate::interop::{clear_file_input, save_bytes, translated_filename, TimerSleeper};
use crate::storage::BrowserSessionStore;
use crate::toast::{push_toast, report_error, use_toasts, Toast, ToastKind};

use document_step::{DocumentStep, DOCUMENT_INPUT_ID};
use execute_step::ExecuteStep;
use glossary_step::GlossaryStep;
use preview_step::PreviewStep;

/// Validation failures stay next to the wizard; remote failures become toasts.
fn surface(
    mut step_error: Signal<Option<String>>,
    toasts: Signal<Vec<Toast>>,
    context: &str,
    error: AppError,
) {
    if error.is_validation() {
        step_error.set(Some(error.user_message()));
    } else {
        report_error(toasts, context, error.user_message());
    }
}

#[component]
pub fn TranslateView() -> Element {
    let toasts = use_toasts();
    let mut wizard = use_signal(|| Wizard::restore(&BrowserSessionStore));
    let mut staged = use_signal(|| None::<web_sys::File>);
    let mut selection =
        use_signal(|| GlossarySelection::new(client_config().max_selected_glossaries));
    let mut busy = use_signal(|| false);
    let mut step_error = use_signal(|| None::<String>);
    let mut poll_task = use_signal(|| None::<Task>);

    // Mirror the session into storage
    use_effect(move || {
        let current = wizard.read();
        if *current.session() == WizardSession::default() {
            WizardSession::clear(&BrowserSessionStore);
        } else {
            current.persist(&BrowserSessionStore);
        }
    });

    // ── Polling ─────────────────────────────────────────────────────────

    let stop_polling = use_callback(move |_: ()| {
        if let Some(task) = poll_task.write().take() {
            task.cancel();
        }
    });

    let start_polling = use_callback(move |job_id: String| {
        stop_polling.call(());
        let interval = client_config().poll_interval();
        let task = spawn(async move {
            let api = HttpApi::from_env();
            let last = poll_job(&api, &TimerSleeper, &job_id, interval, |update| {
                wizard.write().apply_update(update)
            })
            .await;
            match last.status {
                TranslationStatus::Success => {
                    push_toast(toasts, ToastKind::Success, "Translation complete")
                }
                TranslationStatus::Error => {
                    let message = last
                        .error_message
                        .unwrap_or_else(|| "Translation failed".to_string());
                    push_toast(toasts, ToastKind::Error, message);
                }
                TranslationStatus::Cancelled => {
                    push_toast(toasts, ToastKind::Info, "Translation was cancelled")
                }
                TranslationStatus::Idle | TranslationStatus::Translating => {}
            }
            poll_task.set(None);
        });
        poll_task.set(Some(task));
    });

    // ── Restore ─────────────────────────────────────────────────────────

    use_hook(move || {
        let (issue, resume, ids) = {
            let current = wizard.peek();
            let resume = current
                .should_poll()
                .then(|| current.job_id().map(str::to_string))
                .flatten();
            (
                current.inconsistency(),
                resume,
                current.session().selected_glossary_ids.clone(),
            )
        };

        if let Some(issue) = issue {
            dioxus_logger::tracing::warn!("Session restored inconsistent: {issue:?}");
            step_error.set(Some(issue.to_string()));
        }

        if let Some(job_id) = resume {
            dioxus_logger::tracing::info!("Resuming status polling for job {job_id}");
            start_polling.call(job_id);
        }

        if !ids.is_empty() {
            spawn(async move {
                let api = HttpApi::from_env();
                let mut restored = Vec::new();
                for id in ids.iter() {
                    match api.get_glossary(id).await {
                        Ok(glossary) => restored.push(SelectedGlossary::from(glossary)),
                        Err(e) => dioxus_logger::tracing::warn!(
                            "Dropping stored glossary selection {id}: {e}"
                        ),
                    }
                }
                // Keep whatever the user picked while the fetches were out
                let untouched = selection.peek().is_empty()
                    && wizard.peek().session().selected_glossary_ids == ids;
                if !untouched {
                    dioxus_logger::tracing::debug!("Selection changed during restore; keeping it");
                    return;
                }
                let kept: Vec<String> = restored.iter().map(|g| g.id.clone()).collect();
                selection.write().restore(restored);
                wizard.write().set_selected_glossaries(kept);
            });
        }
    });

    // ── Navigation ──────────────────────────────────────────────────────

    let advance = move |_: MouseEvent| {
        if busy() {
            return;
        }
        step_error.set(None);
        let file = staged.peek().clone();
        let upload = match wizard.peek().begin_advance(file.is_some()) {
            Ok(upload) => upload,
            Err(e) => {
                step_error.set(Some(e.to_string()));
                return;
            }
        };
        let (Some(upload), Some(file)) = (upload, file) else {
            let result = wizard.write().finish_advance(None);
            if let Err(e) = result {
                step_error.set(Some(e.to_string()));
            }
            return;
        };
        busy.set(true);
        spawn(async move {
            let api = HttpApi::from_env();
            let uploaded = api
                .upload_document(&file, &upload.source_language, &upload.target_language)
                .await;
            match uploaded {
                Ok(document) => {
                    let result = wizard.write().finish_advance(Some((&upload, &document)));
                    if let Err(e) = result {
                        surface(step_error, toasts, "Advancing wizard", e.into());
                    }
                }
                Err(e) => surface(step_error, toasts, "Uploading document", e.into()),
            }
            busy.set(false);
        });
    };

    let mut apply_retreat = move |result: Result<Retreat, transdesk_core::ValidationError>| {
        match result {
            Ok(Retreat::Moved { stop_polling: true, .. }) => {
                stop_polling.call(());
                step_error.set(None);
            }
            Ok(_) => step_error.set(None),
            Err(e) => step_error.set(Some(e.to_string())),
        }
    };

    let back = move |_: MouseEvent| {
        let result = wizard.write().retreat();
        apply_retreat(result);
    };

    let go_back_to = move |target: WizardStep| {
        let result = wizard.write().go_back_to(target);
        apply_retreat(result);
    };

    // ── Job lifecycle ───────────────────────────────────────────────────

    let start = move |_: ()| {
        if busy() {
            return;
        }
        step_error.set(None);
        let request = match wizard.peek().start_request() {
            Ok(request) => request,
            Err(e) => {
                step_error.set(Some(e.to_string()));
                return;
            }
        };
        busy.set(true);
        spawn(async move {
            let api = HttpApi::from_env();
            match api.start_translation(&request).await {
                Ok(started) => {
                    let started_id = started.id.clone();
                    let applied = wizard.write().finish_start(started);
                    match applied {
                        Ok(job_id) => {
                            if wizard.peek().should_poll() {
                                start_polling.call(job_id);
                            }
                        }
                        Err(e) => {
                            dioxus_logger::tracing::warn!("Cancelling job {started_id}: {e}");
                            step_error.set(Some(e.to_string()));
                            cancel_remote(&api, &started_id).await;
                        }
                    }
                }
                Err(e) => surface(step_error, toasts, "Starting translation", e.into()),
            }
            busy.set(false);
        });
    };

    let cancel = move |_: ()| {
        stop_polling.call(());
        let cancelled = wizard.write().cancel();
        if let Some(job_id) = cancelled {
            push_toast(toasts, ToastKind::Info, "Translation cancelled");
            spawn(async move {
                cancel_remote(&HttpApi::from_env(), &job_id).await;
            });
        }
    };

    let download = move |_: ()| {
        let (download_id, filename) = {
            let current = wizard.peek();
            let Some(id) = current.download_id().map(str::to_string) else {
                return;
            };
            let session = current.session();
            let original = session
                .uploaded_file
                .as_ref()
                .map(|f| f.name.as_str())
                .unwrap_or_default();
            (id, translated_filename(original, &session.target_language))
        };
        spawn(async move {
            match HttpApi::from_env().download_document(&download_id).await {
                Ok(bytes) => match save_bytes(&bytes, &filename) {
                    Ok(()) => push_toast(toasts, ToastKind::Success, format!("Downloaded {filename}")),
                    Err(e) => report_error(toasts, "Saving download", e),
                },
                Err(e) => report_error(toasts, &format!("Download of {download_id}"), e),
            }
        });
    };

    let mut reset_local = move || {
        staged.set(None);
        selection.write().clear();
        step_error.set(None);
        clear_file_input(DOCUMENT_INPUT_ID);
    };

    let new_translation = move |_: ()| {
        stop_polling.call(());
        wizard.write().new_translation(&BrowserSessionStore);
        reset_local();
    };

    let acknowledge = move |_: ()| {
        let done = wizard.write().acknowledge_completion(&BrowserSessionStore);
        if done {
            reset_local();
        }
    };

    // ── Render ──────────────────────────────────────────────────────────

    let step = wizard.read().step();

    rsx! {
        div {
            class: "page",
            div {
                class: "page-header",
                div {
                    h1 { class: "page-title", "Translate a document" }
                    p { class: "page-subtitle", "Upload, pick glossaries, review and run" }
                }
            }

            StepIndicator { current: step }

            div {
                class: "wizard-body",
                match step {
                    WizardStep::Document => rsx! { DocumentStep { wizard: wizard, staged: staged } },
                    WizardStep::Glossary => rsx! { GlossaryStep { wizard: wizard, selection: selection } },
                    WizardStep::Preview => rsx! {
                        PreviewStep { wizard: wizard, selection: selection, on_edit: go_back_to }
                    },
                    WizardStep::Execute => rsx! {
                        ExecuteStep {
                            wizard: wizard,
                            busy: busy(),
                            on_start: start,
                            on_cancel: cancel,
                            on_download: download,
                            on_new: new_translation,
                            on_done: acknowledge,
                        }
                    },
                }
            }

            if let Some(err) = step_error() {
                div { class: "banner banner-error", "{err}" }
            }

            div {
                class: "wizard-footer",
                button {
                    class: "btn",
                    disabled: step == WizardStep::Document || busy(),
                    onclick: back,
                    "← Back"
                }
                if step != WizardStep::Execute {
                    button {
                        class: "btn btn-primary",
                        disabled: busy(),
                        onclick: advance,
                        if busy() && step == WizardStep::Document {
                            "Uploading…"
                        } else {
                            "Continue →"
                        }
                    }
                }
            }
        }
    }
}
