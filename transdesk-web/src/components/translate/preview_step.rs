use dioxus::prelude::*;
use transdesk_core::conflict::GlossarySelection;
use transdesk_core::language_name;
use transdesk_core::wizard::{GlossaryMode, Wizard, WizardStep};

/// Terms listed before the preview collapses to a count
const PREVIEW_TERM_LIMIT: usize = 8;

#[component]
pub fn PreviewStep(
    wizard: Signal<Wizard>,
    selection: Signal<GlossarySelection>,
    on_edit: EventHandler<WizardStep>,
) -> Element {
    let session = wizard.read().session().clone();
    let current = selection();
    let merged = current.merged_terms();
    let hidden = merged.len().saturating_sub(PREVIEW_TERM_LIMIT);
    let shown: Vec<_> = merged.into_iter().take(PREVIEW_TERM_LIMIT).collect();

    let file_label = session
        .uploaded_file
        .as_ref()
        .map(|f| format!("{} ({})", f.name, f.display_size()))
        .unwrap_or_else(|| "No document".to_string());

    rsx! {
        div {
            class: "step-panel",
            h2 { class: "section-title", "Review" }

            div {
                class: "summary-row",
                div {
                    div { class: "summary-label", "Document" }
                    div { class: "summary-value", "{file_label}" }
                }
                button {
                    class: "btn btn-small",
                    onclick: move |_| on_edit.call(WizardStep::Document),
                    "Edit"
                }
            }

            div {
                class: "summary-row",
                div {
                    div { class: "summary-label", "Languages" }
                    div {
                        class: "summary-value",
                        "{language_name(&session.source_language)} → {language_name(&session.target_language)}"
                    }
                }
                button {
                    class: "btn btn-small",
                    onclick: move |_| on_edit.call(WizardStep::Document),
                    "Edit"
                }
            }

            div {
                class: "summary-row",
                div {
                    div { class: "summary-label", "Glossaries" }
                    div {
                        class: "summary-value",
                        match session.glossary_mode {
                            GlossaryMode::Existing if !current.is_empty() => rsx! {
                                for (index, glossary) in current.selected().iter().enumerate() {
                                    span {
                                        key: "{glossary.id}",
                                        class: "chip",
                                        span { class: "color-chip color-{index}" }
                                        "{glossary.name}"
                                    }
                                }
                            },
                            _ => rsx! { "None" },
                        }
                    }
                }
                button {
                    class: "btn btn-small",
                    onclick: move |_| on_edit.call(WizardStep::Glossary),
                    "Edit"
                }
            }

            if session.glossary_mode == GlossaryMode::Existing && !shown.is_empty() {
                div {
                    class: "term-preview",
                    div { class: "summary-label", "Effective terms" }
                    table {
                        class: "table table-compact",
                        tbody {
                            for term in shown {
                                tr {
                                    key: "{term.source}",
                                    td { "{term.source}" }
                                    td { class: "term-arrow", "→" }
                                    td { "{term.target}" }
                                }
                            }
                        }
                    }
                    if hidden > 0 {
                        div { class: "cell-muted", "and {hidden} more" }
                    }
                }
            }
        }
    }
}
