use chrono::Utc;
use dioxus::prelude::*;
use transdesk_core::api::TranslationApi;
use transdesk_core::filters::{parse_timestamp, DateWindow, HistoryFilter};
use transdesk_core::{language_name, HistoryEntry, JobStatus, SUPPORTED_LANGUAGES};

use crate::api::HttpApi;
use crate::components::widgets::StatusBadge;
use crate::interop::{save_bytes, translated_filename};
use crate::toast::{push_toast, report_error, use_toasts, ToastKind};

fn display_time(raw: Option<&str>) -> String {
    match raw {
        Some(raw) => parse_timestamp(raw)
            .map(|ts| ts.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| raw.to_string()),
        None => "-".to_string(),
    }
}

#[component]
pub fn HistoryView() -> Element {
    let toasts = use_toasts();
    let mut entries = use_signal(Vec::<HistoryEntry>::new);
    let mut loading = use_signal(|| false);
    let mut error = use_signal(|| None::<String>);
    let mut filter = use_signal(HistoryFilter::default);
    let mut downloading = use_signal(|| None::<String>);

    let load = use_callback(move |_: ()| {
        spawn(async move {
            loading.set(true);
            error.set(None);
            match HttpApi::from_env().translation_history().await {
                Ok(list) => entries.set(list),
                Err(e) => {
                    dioxus_logger::tracing::error!("Failed to load history: {e}");
                    error.set(Some(e.to_string()));
                }
            }
            loading.set(false);
        });
    });

    use_hook(move || load.call(()));

    let mut download = move |entry: HistoryEntry| {
        if downloading.peek().is_some() {
            return;
        }
        downloading.set(Some(entry.id.clone()));
        spawn(async move {
            match HttpApi::from_env()
                .download_document(entry.download_id())
                .await
            {
                Ok(bytes) => {
                    let filename = translated_filename(&entry.document_name, &entry.target_language);
                    match save_bytes(&bytes, &filename) {
                        Ok(()) => push_toast(toasts, ToastKind::Success, format!("Downloaded {filename}")),
                        Err(e) => report_error(toasts, "Saving download", e),
                    }
                }
                Err(e) => report_error(toasts, &format!("Download of job {}", entry.id), e),
            }
            downloading.set(None);
        });
    };

    let all = entries();
    let current = filter();
    let visible: Vec<HistoryEntry> = current.apply(&all, Utc::now()).into_iter().cloned().collect();

    rsx! {
        div {
            class: "page",
            div {
                class: "page-header",
                div {
                    h1 { class: "page-title", "History" }
                    p { class: "page-subtitle", "Past translation jobs" }
                }
                div {
                    class: "page-actions",
                    button {
                        class: "btn",
                        disabled: loading(),
                        onclick: move |_| load.call(()),
                        if loading() { "Loading…" } else { "Refresh" }
                    }
                }
            }

            div {
                class: "filters",
                input {
                    class: "input search",
                    r#type: "search",
                    placeholder: "Search by document name",
                    value: "{current.query}",
                    oninput: move |e: FormEvent| filter.write().query = e.value(),
                }
                select {
                    class: "input",
                    onchange: move |e: FormEvent| filter.write().status = JobStatus::parse(&e.value()),
                    option { value: "", selected: current.status.is_none(), "All statuses" }
                    for status in JobStatus::ALL {
                        option {
                            key: "{status.as_str()}",
                            value: "{status.as_str()}",
                            selected: current.status == Some(status),
                            "{status.label()}"
                        }
                    }
                }
                select {
                    class: "input",
                    onchange: move |e: FormEvent| {
                        let value = e.value();
                        filter.write().language = (!value.is_empty()).then_some(value);
                    },
                    option { value: "", selected: current.language.is_none(), "All languages" }
                    for (code, name) in SUPPORTED_LANGUAGES.iter() {
                        option {
                            key: "{code}",
                            value: "{code}",
                            selected: current.language.as_deref() == Some(*code),
                            "{name}"
                        }
                    }
                }
                select {
                    class: "input",
                    onchange: move |e: FormEvent| filter.write().window = DateWindow::parse(&e.value()),
                    for window in DateWindow::ALL {
                        option {
                            key: "{window.as_str()}",
                            value: "{window.as_str()}",
                            selected: current.window == window,
                            "{window.label()}"
                        }
                    }
                }
                if current.is_active() {
                    button {
                        class: "btn btn-small",
                        onclick: move |_| filter.write().clear(),
                        "Clear filters"
                    }
                }
            }

            if let Some(err) = error() {
                div { class: "banner banner-error", "Error: {err}" }
            }

            if !loading() && visible.is_empty() {
                div {
                    class: "empty",
                    div { class: "empty-icon", "🕘" }
                    if all.is_empty() {
                        "No translations yet"
                    } else {
                        "No jobs match the current filters"
                    }
                }
            } else {
                table {
                    class: "table",
                    thead {
                        tr {
                            th { "Document" }
                            th { "Languages" }
                            th { "Status" }
                            th { "Submitted" }
                            th { "Completed" }
                            th {}
                        }
                    }
                    tbody {
                        for entry in visible {
                            tr {
                                key: "{entry.id}",
                                td { class: "cell-name", "{entry.document_name}" }
                                td {
                                    "{language_name(&entry.source_language)} → {language_name(&entry.target_language)}"
                                }
                                td {
                                    StatusBadge { status: entry.status }
                                    if entry.status == JobStatus::Translating {
                                        if let Some(progress) = entry.progress {
                                            span { class: "cell-muted", " {progress.round()}%" }
                                        }
                                    }
                                }
                                td { class: "cell-muted", "{display_time(entry.submitted_at.as_deref())}" }
                                td { class: "cell-muted", "{display_time(entry.completed_at.as_deref())}" }
                                td {
                                    if entry.can_download() {
                                        button {
                                            class: "btn btn-small",
                                            disabled: downloading().is_some(),
                                            onclick: {
                                                let entry = entry.clone();
                                                move |_| download(entry.clone())
                                            },
                                            if downloading().as_deref() == Some(entry.id.as_str()) {
                                                "Downloading…"
                                            } else {
                                                "Download"
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
