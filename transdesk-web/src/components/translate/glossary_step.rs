use dioxus::prelude::*;
use transdesk_core::api::GlossaryApi;
use transdesk_core::conflict::{
    ConflictDecision, GlossarySelection, SelectedGlossary, SelectionOutcome,
};
use transdesk_core::wizard::{GlossaryMode, Wizard};
use transdesk_core::Glossary;

use crate::api::HttpApi;
use crate::components::glossary_editor::GlossaryEditorDialog;
use crate::components::widgets::ConfirmDialog;
use crate::config::client_config;
use crate::toast::{push_toast, report_error, use_toasts, ToastKind};

const MODES: [(GlossaryMode, &str, &str); 3] = [
    (GlossaryMode::None, "No glossary", "Translate without terminology constraints"),
    (GlossaryMode::Existing, "Use existing", "Apply saved glossaries for this language pair"),
    (GlossaryMode::New, "Create new", "Build a glossary for this document"),
];

#[component]
pub fn GlossaryStep(mut wizard: Signal<Wizard>, mut selection: Signal<GlossarySelection>) -> Element {
    let toasts = use_toasts();
    let mut available = use_signal(Vec::<Glossary>::new);
    let mut loading = use_signal(|| false);
    let mut creating = use_signal(|| false);

    let session = wizard.read().session().clone();
    let mode = session.glossary_mode;

    // A fetch still out when the step unmounts is cancelled with it
    use_drop(move || {
        if let Ok(mut current) = selection.try_write() {
            current.abandon_fetch();
        }
    });

    use_hook(move || {
        spawn(async move {
            loading.set(true);
            match HttpApi::from_env().list_glossaries().await {
                Ok(list) => available.set(list),
                Err(e) => report_error(toasts, "Loading glossaries", e),
            }
            loading.set(false);
        });
    });

    let mut sync_ids = move || {
        let ids = selection.peek().ids();
        wizard.write().set_selected_glossaries(ids);
    };

    let mut set_mode = move |next: GlossaryMode| {
        wizard.write().set_glossary_mode(next);
        if next != GlossaryMode::Existing {
            selection.write().clear();
        }
        creating.set(next == GlossaryMode::New);
    };

    let mut toggle = move |id: String| {
        if selection.peek().contains(&id) {
            selection.write().deselect(&id);
            sync_ids();
            return;
        }
        let started = selection.write().begin_fetch(&id);
        if let Err(e) = started {
            push_toast(toasts, ToastKind::Error, e.to_string());
            return;
        }
        spawn(async move {
            let fetched = HttpApi::from_env().get_glossary(&id).await;
            let outcome = selection.write().finish_fetch(&id, fetched);
            match outcome {
                Ok(SelectionOutcome::Added { .. }) => sync_ids(),
                Ok(SelectionOutcome::Conflict(_) | SelectionOutcome::Abandoned) => {}
                Err(e) => report_error(toasts, &format!("Selecting glossary {id}"), e.user_message()),
            }
        });
    };

    let mut resolve = move |decision: ConflictDecision| {
        selection.write().resolve(decision);
        sync_ids();
    };

    // A glossary created from this step is proposed like any other pick
    let on_created = move |glossary: Glossary| {
        creating.set(false);
        let name = glossary.name.clone();
        wizard.write().set_glossary_mode(GlossaryMode::Existing);
        available.write().push(glossary.clone());
        let outcome = selection.write().propose(SelectedGlossary::from(glossary));
        match outcome {
            Ok(SelectionOutcome::Added { .. }) => {
                sync_ids();
                push_toast(toasts, ToastKind::Success, format!("Created and selected \"{name}\""));
            }
            Ok(SelectionOutcome::Conflict(_) | SelectionOutcome::Abandoned) => {}
            Err(e) => push_toast(toasts, ToastKind::Error, e.to_string()),
        }
    };

    let current = selection();
    let max = client_config().max_selected_glossaries;
    let fetching_id = current.fetching().map(str::to_string);
    let rows: Vec<(Glossary, bool, Option<usize>, bool)> = available()
        .into_iter()
        .filter(|g| {
            g.source_language == session.source_language
                && g.target_language == session.target_language
        })
        .map(|g| {
            let selected = current.contains(&g.id);
            let color = current.color_index(&g.id);
            let fetching = fetching_id.as_deref() == Some(g.id.as_str());
            (g, selected, color, fetching)
        })
        .collect();
    let no_matches = rows.is_empty();

    rsx! {
        div {
            class: "step-panel",
            h2 { class: "section-title", "Glossary" }

            div {
                class: "mode-options",
                for (option, title, hint) in MODES {
                    label {
                        key: "{title}",
                        class: if mode == option { "mode-option active" } else { "mode-option" },
                        input {
                            r#type: "radio",
                            name: "glossary-mode",
                            checked: mode == option,
                            onchange: move |_| set_mode(option),
                        }
                        div {
                            div { class: "mode-title", "{title}" }
                            div { class: "mode-hint", "{hint}" }
                        }
                    }
                }
            }

            if mode == GlossaryMode::Existing {
                div {
                    class: "selection-summary",
                    "{current.len()} of {max} selected"
                }
                if loading() {
                    div { class: "loading", "Loading glossaries…" }
                } else if no_matches {
                    div {
                        class: "empty",
                        "No glossaries for {session.source_language} → {session.target_language}"
                    }
                }
                div {
                    class: "glossary-picker",
                    for (glossary, selected, color, fetching) in rows {
                        button {
                            key: "{glossary.id}",
                            class: if selected { "picker-item selected" } else { "picker-item" },
                            disabled: fetching || (!selected && current.is_full()),
                            onclick: {
                                let id = glossary.id.clone();
                                move |_| toggle(id.clone())
                            },
                            if let Some(index) = color {
                                span { class: "color-chip color-{index}" }
                            }
                            span { class: "picker-name", "{glossary.name}" }
                            span {
                                class: "picker-meta",
                                if fetching { "Loading…" } else { "{glossary.term_count} terms" }
                            }
                        }
                    }
                }
            }

            if mode == GlossaryMode::New && !creating() {
                button {
                    class: "btn",
                    onclick: move |_| creating.set(true),
                    "Open glossary editor"
                }
            }

            if creating() {
                GlossaryEditorDialog {
                    glossary_id: None,
                    source_language: session.source_language.clone(),
                    target_language: session.target_language.clone(),
                    on_close: move |_| creating.set(false),
                    on_saved: on_created,
                }
            }

            if let Some(conflict) = current.pending().cloned() {
                ConfirmDialog {
                    title: "Conflicting terms".to_string(),
                    message: format!(
                        "\"{}\" shares {} source term(s) with your current selection. Terms from the glossary selected last take precedence.",
                        conflict.glossary_name, conflict.count
                    ),
                    details: conflict.examples.clone(),
                    confirm_label: "Include anyway".to_string(),
                    cancel_label: "Exclude".to_string(),
                    on_confirm: move |_| resolve(ConflictDecision::Include),
                    on_cancel: move |_| resolve(ConflictDecision::Exclude),
                }
            }
        }
    }
}
