use dioxus::prelude::*;
use transdesk_core::language_name;
use transdesk_core::poller::TranslationStatus;
use transdesk_core::wizard::Wizard;

use crate::components::widgets::ProgressBar;

#[component]
pub fn ExecuteStep(
    wizard: Signal<Wizard>,
    busy: bool,
    on_start: EventHandler<()>,
    on_cancel: EventHandler<()>,
    on_download: EventHandler<()>,
    on_new: EventHandler<()>,
    on_done: EventHandler<()>,
) -> Element {
    let current = wizard.read().clone();
    let session = current.session();
    let document = session
        .uploaded_file
        .as_ref()
        .map(|f| f.name.clone())
        .unwrap_or_default();
    let pair = format!(
        "{} → {}",
        language_name(&session.source_language),
        language_name(&session.target_language)
    );

    rsx! {
        div {
            class: "step-panel",
            h2 { class: "section-title", "Translate" }
            div { class: "execute-summary", "{document} · {pair}" }

            match current.status() {
                TranslationStatus::Idle => rsx! {
                    div {
                        class: "execute-state",
                        p { "Everything is ready. Start the translation when you are." }
                        button {
                            class: "btn btn-primary btn-large",
                            disabled: busy,
                            onclick: move |_| on_start.call(()),
                            if busy { "Starting…" } else { "Start translation" }
                        }
                    }
                },
                TranslationStatus::Translating => rsx! {
                    div {
                        class: "execute-state",
                        p { "Translating…" }
                        ProgressBar { percent: current.progress() }
                        button {
                            class: "btn btn-danger",
                            onclick: move |_| on_cancel.call(()),
                            "Cancel"
                        }
                    }
                },
                TranslationStatus::Success => rsx! {
                    div {
                        class: "execute-state success",
                        div { class: "execute-icon", "✅" }
                        p { "Translation complete" }
                        div {
                            class: "execute-actions",
                            button {
                                class: "btn btn-primary",
                                disabled: !current.can_download(),
                                onclick: move |_| on_download.call(()),
                                "Download"
                            }
                            button {
                                class: "btn",
                                onclick: move |_| on_done.call(()),
                                "Done"
                            }
                            button {
                                class: "btn",
                                onclick: move |_| on_new.call(()),
                                "New translation"
                            }
                        }
                    }
                },
                TranslationStatus::Error => rsx! {
                    div {
                        class: "execute-state error",
                        div { class: "execute-icon", "⚠" }
                        p { "Translation failed" }
                        if let Some(message) = current.error_message() {
                            p { class: "execute-error", "{message}" }
                        }
                        div {
                            class: "execute-actions",
                            button {
                                class: "btn btn-primary",
                                disabled: busy,
                                onclick: move |_| on_start.call(()),
                                "Retry"
                            }
                            button {
                                class: "btn",
                                onclick: move |_| on_new.call(()),
                                "New translation"
                            }
                        }
                    }
                },
                TranslationStatus::Cancelled => rsx! {
                    div {
                        class: "execute-state",
                        p { "Translation cancelled" }
                        div {
                            class: "execute-actions",
                            button {
                                class: "btn btn-primary",
                                disabled: busy,
                                onclick: move |_| on_start.call(()),
                                "Start again"
                            }
                            button {
                                class: "btn",
                                onclick: move |_| on_new.call(()),
                                "New translation"
                            }
                        }
                    }
                },
            }
        }
    }
}
