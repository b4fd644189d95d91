//! Create/edit dialog for a glossary and its terms
//!
//! Term changes are staged locally (new, edited, soft-deleted) and reconciled
//! with the server in one save.

use dioxus::prelude::*;
use transdesk_core::api::GlossaryApi;
use transdesk_core::reconciler::{execute_plan, GlossaryEditor, TermDraft, TermField};
use transdesk_core::Glossary;

use crate::api::HttpApi;
use crate::components::widgets::{ConfirmDialog, LanguageSelect};
use crate::interop::{clear_file_input, read_file_text, selected_file};
use crate::toast::{push_toast, report_error, use_toasts, ToastKind};

const IMPORT_INPUT_ID: &str = "term-import-input";

fn row_class(term: &TermDraft, duplicates: &[String]) -> String {
    let mut class = String::from("term-row");
    if term.is_deleted {
        class.push_str(" deleted");
    } else if term.is_new {
        class.push_str(" new");
    } else if term.is_edited {
        class.push_str(" edited");
    }
    if !term.is_deleted && duplicates.iter().any(|d| d == term.source.trim()) {
        class.push_str(" duplicate");
    }
    class
}

#[component]
pub fn GlossaryEditorDialog(
    #[props(!optional)] glossary_id: Option<String>,
    #[props(default)] source_language: String,
    #[props(default)] target_language: String,
    on_close: EventHandler<()>,
    on_saved: EventHandler<Glossary>,
) -> Element {
    let toasts = use_toasts();
    let editing = glossary_id.is_some();
    let mut editor = use_signal(|| {
        if editing {
            None
        } else {
            Some(GlossaryEditor::create(&source_language, &target_language))
        }
    });
    let mut load_error = use_signal(|| None::<String>);
    let mut new_source = use_signal(String::new);
    let mut new_target = use_signal(String::new);
    let mut add_error = use_signal(|| None::<String>);
    let mut import_text = use_signal(String::new);
    let mut show_import = use_signal(|| false);
    let mut query = use_signal(String::new);
    let mut picked = use_signal(Vec::<String>::new);
    let mut confirm_delete_all = use_signal(|| false);

    use_hook(move || {
        if let Some(id) = glossary_id.clone() {
            spawn(async move {
                match HttpApi::from_env().get_glossary(&id).await {
                    Ok(glossary) => editor.set(Some(GlossaryEditor::edit(&glossary))),
                    Err(e) => {
                        dioxus_logger::tracing::error!("Failed to load glossary {id}: {e}");
                        load_error.set(Some(e.to_string()));
                    }
                }
            });
        }
    });

    let mut add_term = move || {
        let result = match editor.write().as_mut() {
            Some(ed) => ed.add_term(&new_source.peek(), &new_target.peek()),
            None => return,
        };
        match result {
            Ok(_) => {
                new_source.set(String::new());
                new_target.set(String::new());
                add_error.set(None);
            }
            Err(e) => add_error.set(Some(e.to_string())),
        }
    };

    let mut run_import = move |content: String| {
        let result = match editor.write().as_mut() {
            Some(ed) => ed.import(&content),
            None => return,
        };
        match result {
            Ok(summary) => {
                let message = if summary.skipped > 0 {
                    format!(
                        "Imported {} terms, skipped {} duplicates",
                        summary.imported, summary.skipped
                    )
                } else {
                    format!("Imported {} terms", summary.imported)
                };
                push_toast(toasts, ToastKind::Success, message);
                import_text.set(String::new());
                show_import.set(false);
            }
            Err(e) => push_toast(toasts, ToastKind::Error, e.to_string()),
        }
    };

    let import_file = move |_: FormEvent| {
        let Some(file) = selected_file(IMPORT_INPUT_ID) else {
            return;
        };
        spawn(async move {
            match read_file_text(&file).await {
                Ok(content) => run_import(content),
                Err(e) => report_error(toasts, "Term import", e),
            }
            clear_file_input(IMPORT_INPUT_ID);
        });
    };

    let mut toggle_picked = move |ids: Vec<String>| {
        let result = match editor.write().as_mut() {
            Some(ed) => ed.toggle_deleted_many(&ids),
            None => return,
        };
        if let Err(err) = result {
            dioxus_logger::tracing::warn!("{err}");
        }
        picked.write().clear();
    };

    let delete_picked = move |_: MouseEvent| {
        let ids = picked.peek().clone();
        let covers_all = editor
            .peek()
            .as_ref()
            .is_some_and(|ed| ed.selects_all_active(&ids));
        if covers_all {
            confirm_delete_all.set(true);
        } else {
            toggle_picked(ids);
        }
    };

    let delete_all = move |_: ()| {
        if let Some(ed) = editor.write().as_mut() {
            let marked = ed.delete_all();
            dioxus_logger::tracing::info!("Marked {marked} terms for deletion");
        }
        picked.write().clear();
        confirm_delete_all.set(false);
    };

    let save = move |_: MouseEvent| {
        let plan = {
            let mut guard = editor.write();
            let Some(ed) = guard.as_mut() else {
                return;
            };
            match ed.begin_save() {
                Ok(plan) => plan,
                Err(e) => {
                    push_toast(toasts, ToastKind::Error, e.to_string());
                    return;
                }
            }
        };
        spawn(async move {
            let result = execute_plan(&HttpApi::from_env(), plan).await;
            if let Some(ed) = editor.write().as_mut() {
                ed.finish_save(result.as_ref().map_err(|failure| &failure.progress));
            }
            picked.write().clear();
            match result {
                Ok(saved) => on_saved.call(saved),
                Err(e) => report_error(toasts, "Failed to save glossary", e),
            }
        });
    };

    let title = if editing { "Edit glossary" } else { "New glossary" };

    let Some(ed) = editor() else {
        return rsx! {
            div {
                class: "modal-backdrop",
                div {
                    class: "modal",
                    h3 { class: "modal-title", "{title}" }
                    if let Some(err) = load_error() {
                        div { class: "banner banner-error", "Failed to load glossary: {err}" }
                    } else {
                        div { class: "loading", "Loading glossary…" }
                    }
                    div {
                        class: "modal-actions",
                        button { class: "btn", onclick: move |_| on_close.call(()), "Close" }
                    }
                }
            }
        };
    };

    let duplicates = ed.duplicate_sources();
    let rows: Vec<TermDraft> = ed.search(&query()).into_iter().cloned().collect();
    let no_rows = rows.is_empty();
    let visible_ids: Vec<String> = rows.iter().map(|t| t.id.clone()).collect();
    let all_visible_picked = !no_rows && visible_ids.iter().all(|id| picked.read().contains(id));
    let picked_count = picked.read().len();
    let picked_active = picked
        .read()
        .iter()
        .any(|id| ed.term(id).is_some_and(|t| !t.is_deleted));
    let active_count = ed.active_count();
    let validation = ed.validate().err().map(|e| e.to_string());
    let can_save = ed.can_save() && (ed.is_create() || ed.has_changes());
    let saving = ed.is_saving();

    rsx! {
        div {
            class: "modal-backdrop",
            div {
                class: "modal modal-wide",
                h3 { class: "modal-title", "{title}" }

                div {
                    class: "form-grid",
                    label {
                        class: "field",
                        span { class: "field-label", "Name" }
                        input {
                            class: "input",
                            value: "{ed.metadata.name}",
                            placeholder: "e.g. Legal terms",
                            oninput: move |e: FormEvent| {
                                if let Some(ed) = editor.write().as_mut() {
                                    ed.metadata.name = e.value();
                                }
                            },
                        }
                    }
                    label {
                        class: "field",
                        span { class: "field-label", "Description" }
                        input {
                            class: "input",
                            value: "{ed.metadata.description}",
                            oninput: move |e: FormEvent| {
                                if let Some(ed) = editor.write().as_mut() {
                                    ed.metadata.description = e.value();
                                }
                            },
                        }
                    }
                    LanguageSelect {
                        label: "Source language".to_string(),
                        value: ed.metadata.source_language.clone(),
                        disabled: !ed.is_create(),
                        on_change: move |code: String| {
                            if let Some(ed) = editor.write().as_mut() {
                                ed.metadata.source_language = code;
                            }
                        },
                    }
                    LanguageSelect {
                        label: "Target language".to_string(),
                        value: ed.metadata.target_language.clone(),
                        placeholder: "Select…".to_string(),
                        disabled: !ed.is_create(),
                        on_change: move |code: String| {
                            if let Some(ed) = editor.write().as_mut() {
                                ed.metadata.target_language = code;
                            }
                        },
                    }
                }

                // Add term
                div {
                    class: "term-add",
                    input {
                        class: "input",
                        placeholder: "Source term",
                        value: "{new_source}",
                        oninput: move |e: FormEvent| new_source.set(e.value()),
                        onkeydown: move |e: KeyboardEvent| {
                            if e.key() == Key::Enter {
                                add_term();
                            }
                        },
                    }
                    input {
                        class: "input",
                        placeholder: "Target term (defaults to source)",
                        value: "{new_target}",
                        oninput: move |e: FormEvent| new_target.set(e.value()),
                        onkeydown: move |e: KeyboardEvent| {
                            if e.key() == Key::Enter {
                                add_term();
                            }
                        },
                    }
                    button { class: "btn", onclick: move |_| add_term(), "Add" }
                    button {
                        class: "btn",
                        onclick: move |_| show_import.toggle(),
                        if show_import() { "Hide import" } else { "Import…" }
                    }
                }
                if let Some(err) = add_error() {
                    div { class: "field-error", "{err}" }
                }

                if show_import() {
                    div {
                        class: "term-import",
                        textarea {
                            class: "input",
                            rows: "5",
                            placeholder: "One pair per line: source, target  or  source | target",
                            value: "{import_text}",
                            oninput: move |e: FormEvent| import_text.set(e.value()),
                        }
                        div {
                            class: "term-import-actions",
                            input {
                                id: IMPORT_INPUT_ID,
                                r#type: "file",
                                accept: ".txt,.csv",
                                onchange: import_file,
                            }
                            button {
                                class: "btn btn-primary",
                                disabled: import_text().trim().is_empty(),
                                onclick: move |_| run_import(import_text.peek().clone()),
                                "Import pasted terms"
                            }
                        }
                    }
                }

                div {
                    class: "term-toolbar",
                    label {
                        class: "term-check",
                        input {
                            r#type: "checkbox",
                            disabled: no_rows,
                            checked: all_visible_picked,
                            onchange: move |_: FormEvent| {
                                if all_visible_picked {
                                    picked.write().retain(|id| !visible_ids.contains(id));
                                } else {
                                    let mut current = picked.write();
                                    for id in &visible_ids {
                                        if !current.contains(id) {
                                            current.push(id.clone());
                                        }
                                    }
                                }
                            },
                        }
                        "All"
                    }
                    input {
                        class: "input search",
                        r#type: "search",
                        placeholder: "Search terms",
                        value: "{query}",
                        oninput: move |e: FormEvent| query.set(e.value()),
                    }
                    if picked_count > 0 {
                        button {
                            class: "btn btn-small btn-danger-outline",
                            disabled: saving,
                            onclick: delete_picked,
                            if picked_active {
                                "Delete selected ({picked_count})"
                            } else {
                                "Restore selected ({picked_count})"
                            }
                        }
                    }
                    button {
                        class: "btn btn-small btn-danger-outline",
                        disabled: saving || active_count == 0,
                        onclick: move |_| confirm_delete_all.set(true),
                        "Delete all"
                    }
                    span {
                        class: "term-counts",
                        "{active_count} terms"
                        if ed.deleted_count() > 0 {
                            " · {ed.deleted_count()} marked for deletion"
                        }
                    }
                }

                div {
                    class: "term-list",
                    if no_rows {
                        div { class: "empty", "No terms" }
                    }
                    for term in rows {
                        div {
                            key: "{term.id}",
                            class: row_class(&term, &duplicates),
                            input {
                                class: "term-check",
                                r#type: "checkbox",
                                checked: picked.read().contains(&term.id),
                                onchange: {
                                    let id = term.id.clone();
                                    move |_: FormEvent| {
                                        let mut current = picked.write();
                                        match current.iter().position(|p| *p == id) {
                                            Some(index) => {
                                                current.remove(index);
                                            }
                                            None => current.push(id.clone()),
                                        }
                                    }
                                },
                            }
                            input {
                                class: "input",
                                value: "{term.source}",
                                disabled: term.is_deleted,
                                oninput: {
                                    let id = term.id.clone();
                                    move |e: FormEvent| {
                                        if let Some(ed) = editor.write().as_mut() {
                                            if let Err(err) = ed.edit_term(&id, TermField::Source, &e.value()) {
                                                dioxus_logger::tracing::warn!("{err}");
                                            }
                                        }
                                    }
                                },
                            }
                            span { class: "term-arrow", "→" }
                            input {
                                class: "input",
                                value: "{term.target}",
                                disabled: term.is_deleted,
                                oninput: {
                                    let id = term.id.clone();
                                    move |e: FormEvent| {
                                        if let Some(ed) = editor.write().as_mut() {
                                            if let Err(err) = ed.edit_term(&id, TermField::Target, &e.value()) {
                                                dioxus_logger::tracing::warn!("{err}");
                                            }
                                        }
                                    }
                                },
                            }
                            button {
                                class: "btn btn-small",
                                onclick: {
                                    let id = term.id.clone();
                                    move |_| {
                                        if let Some(ed) = editor.write().as_mut() {
                                            if let Err(err) = ed.toggle_deleted(&id) {
                                                dioxus_logger::tracing::warn!("{err}");
                                            }
                                        }
                                    }
                                },
                                if term.is_deleted { "Undo" } else { "Delete" }
                            }
                        }
                    }
                }

                if let Some(reason) = validation {
                    div { class: "field-error", "{reason}" }
                }

                div {
                    class: "modal-actions",
                    button {
                        class: "btn",
                        disabled: saving,
                        onclick: move |_| on_close.call(()),
                        "Cancel"
                    }
                    button {
                        class: "btn btn-primary",
                        disabled: !can_save,
                        onclick: save,
                        if saving { "Saving…" } else { "Save" }
                    }
                }
            }
        }

        if confirm_delete_all() {
            ConfirmDialog {
                title: "Delete all terms?".to_string(),
                message: format!(
                    "All {active_count} terms will be marked for deletion. They are removed from the server when you save."
                ),
                confirm_label: "Delete all".to_string(),
                danger: true,
                on_confirm: delete_all,
                on_cancel: move |_| confirm_delete_all.set(false),
            }
        }
    }
}
