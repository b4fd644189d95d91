use dioxus::prelude::*;
use transdesk_core::api::GlossaryApi;
use transdesk_core::filters::filter_glossaries;
use transdesk_core::Glossary;

use crate::api::HttpApi;
use crate::components::glossary_editor::GlossaryEditorDialog;
use crate::components::widgets::ConfirmDialog;
use crate::toast::{push_toast, report_error, use_toasts, ToastKind};

/// Dialog state
#[derive(Debug, Clone, PartialEq)]
enum DialogState {
    None,
    Create,
    Edit { id: String },
    Delete { id: String, name: String },
}

#[component]
pub fn GlossariesView() -> Element {
    let toasts = use_toasts();
    let mut glossaries = use_signal(Vec::<Glossary>::new);
    let mut loading = use_signal(|| false);
    let mut error = use_signal(|| None::<String>);
    let mut query = use_signal(String::new);
    let mut dialog = use_signal(|| DialogState::None);
    let mut deleting = use_signal(|| false);

    let load = use_callback(move |_: ()| {
        spawn(async move {
            loading.set(true);
            error.set(None);
            match HttpApi::from_env().list_glossaries().await {
                Ok(list) => glossaries.set(list),
                Err(e) => {
                    dioxus_logger::tracing::error!("Failed to load glossaries: {e}");
                    error.set(Some(e.to_string()));
                }
            }
            loading.set(false);
        });
    });

    use_hook(move || load.call(()));

    let mut confirm_delete = move |id: String, name: String| {
        if deleting() {
            return;
        }
        deleting.set(true);
        spawn(async move {
            match HttpApi::from_env().delete_glossary(&id).await {
                Ok(()) => {
                    glossaries.write().retain(|g| g.id != id);
                    push_toast(toasts, ToastKind::Success, format!("Deleted glossary \"{name}\""));
                    dialog.set(DialogState::None);
                }
                Err(e) => report_error(toasts, &format!("Failed to delete glossary {id}"), e),
            }
            deleting.set(false);
        });
    };

    let on_saved = move |saved: Glossary| {
        push_toast(toasts, ToastKind::Success, format!("Saved glossary \"{}\"", saved.name));
        dialog.set(DialogState::None);
        load.call(());
    };

    let all = glossaries();
    let visible: Vec<Glossary> = filter_glossaries(&all, &query())
        .into_iter()
        .cloned()
        .collect();
    let nothing_shown = !loading() && visible.is_empty();

    rsx! {
        div {
            class: "page",
            div {
                class: "page-header",
                div {
                    h1 { class: "page-title", "Glossaries" }
                    p { class: "page-subtitle", "Terminology applied to your translations" }
                }
                div {
                    class: "page-actions",
                    button {
                        class: "btn",
                        disabled: loading(),
                        onclick: move |_| load.call(()),
                        if loading() { "Loading…" } else { "Refresh" }
                    }
                    button {
                        class: "btn btn-primary",
                        onclick: move |_| dialog.set(DialogState::Create),
                        "+ New glossary"
                    }
                }
            }

            input {
                class: "input search",
                r#type: "search",
                placeholder: "Search by name or description",
                value: "{query}",
                oninput: move |e: FormEvent| query.set(e.value()),
            }

            if let Some(err) = error() {
                div { class: "banner banner-error", "Error: {err}" }
            }

            if nothing_shown {
                div {
                    class: "empty",
                    div { class: "empty-icon", "📚" }
                    if all.is_empty() {
                        "No glossaries yet. Create one to keep terminology consistent."
                    } else {
                        "No glossaries match \"{query}\""
                    }
                }
            }

            div {
                class: "card-grid",
                for glossary in visible {
                    div {
                        key: "{glossary.id}",
                        class: "card",
                        div {
                            class: "card-head",
                            h3 { class: "card-title", "{glossary.name}" }
                            span { class: "chip", "{glossary.language_pair()}" }
                        }
                        if !glossary.description.is_empty() {
                            p { class: "card-text", "{glossary.description}" }
                        }
                        div { class: "card-meta", "{glossary.term_count} terms" }
                        div {
                            class: "card-actions",
                            button {
                                class: "btn btn-small",
                                onclick: {
                                    let id = glossary.id.clone();
                                    move |_| dialog.set(DialogState::Edit { id: id.clone() })
                                },
                                "Edit"
                            }
                            button {
                                class: "btn btn-small btn-danger-outline",
                                onclick: {
                                    let id = glossary.id.clone();
                                    let name = glossary.name.clone();
                                    move |_| dialog.set(DialogState::Delete { id: id.clone(), name: name.clone() })
                                },
                                "Delete"
                            }
                        }
                    }
                }
            }

            match dialog() {
                DialogState::None => rsx! {},
                DialogState::Create => rsx! {
                    GlossaryEditorDialog {
                        glossary_id: None,
                        source_language: "en".to_string(),
                        target_language: "vi".to_string(),
                        on_close: move |_| dialog.set(DialogState::None),
                        on_saved: on_saved,
                    }
                },
                DialogState::Edit { id } => rsx! {
                    GlossaryEditorDialog {
                        glossary_id: Some(id),
                        on_close: move |_| dialog.set(DialogState::None),
                        on_saved: on_saved,
                    }
                },
                DialogState::Delete { id, name } => rsx! {
                    ConfirmDialog {
                        title: "Delete glossary".to_string(),
                        message: format!("Delete \"{name}\" and all of its terms? This cannot be undone."),
                        confirm_label: "Delete".to_string(),
                        danger: true,
                        busy: deleting(),
                        on_confirm: {
                            let name = name.clone();
                            move |_| confirm_delete(id.clone(), name.clone())
                        },
                        on_cancel: move |_| dialog.set(DialogState::None),
                    }
                },
            }
        }
    }
}
