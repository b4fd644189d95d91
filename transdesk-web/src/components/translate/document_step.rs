use dioxus::prelude::*;
use transdesk_core::wizard::Wizard;

use crate::components::widgets::LanguageSelect;
use crate::interop::{clear_file_input, file_metadata, selected_file};

pub const DOCUMENT_INPUT_ID: &str = "document-input";

#[component]
pub fn DocumentStep(mut wizard: Signal<Wizard>, mut staged: Signal<Option<web_sys::File>>) -> Element {
    let session = wizard.read().session().clone();
    let uploaded = session.document_id.is_some();

    let pick_file = move |_: FormEvent| {
        if let Some(file) = selected_file(DOCUMENT_INPUT_ID) {
            wizard.write().stage_file(file_metadata(&file));
            staged.set(Some(file));
        }
    };

    rsx! {
        div {
            class: "step-panel",
            h2 { class: "section-title", "Document" }

            match session.uploaded_file.clone() {
                Some(file) => rsx! {
                    div {
                        class: "file-card",
                        div { class: "file-icon", "📄" }
                        div {
                            class: "file-info",
                            div { class: "file-name", "{file.name}" }
                            div {
                                class: "file-meta",
                                "{file.display_size()}"
                                if uploaded {
                                    span { class: "chip chip-ok", "Uploaded" }
                                } else {
                                    span { class: "chip", "Uploads on continue" }
                                }
                            }
                        }
                        button {
                            class: "btn btn-small",
                            onclick: move |_| {
                                wizard.write().remove_file();
                                staged.set(None);
                                clear_file_input(DOCUMENT_INPUT_ID);
                            },
                            "Remove"
                        }
                    }
                },
                None => rsx! {
                    label {
                        class: "dropzone",
                        r#for: DOCUMENT_INPUT_ID,
                        div { class: "dropzone-icon", "⬆" }
                        div { "Choose a document to translate" }
                    }
                },
            }
            input {
                id: DOCUMENT_INPUT_ID,
                class: "file-input",
                r#type: "file",
                onchange: pick_file,
            }

            div {
                class: "form-grid",
                LanguageSelect {
                    label: "Source language".to_string(),
                    value: session.source_language.clone(),
                    on_change: move |code: String| wizard.write().set_source_language(&code),
                }
                LanguageSelect {
                    label: "Target language".to_string(),
                    value: session.target_language.clone(),
                    placeholder: "Select…".to_string(),
                    on_change: move |code: String| wizard.write().set_target_language(&code),
                }
            }
        }
    }
}
