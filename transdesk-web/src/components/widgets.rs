//! Small presentational pieces shared across pages

use dioxus::prelude::*;
use transdesk_core::wizard::WizardStep;
use transdesk_core::{JobStatus, SUPPORTED_LANGUAGES};

// ── StepIndicator ───────────────────────────────────────────────────────────

#[component]
pub fn StepIndicator(current: WizardStep) -> Element {
    rsx! {
        ol {
            class: "steps",
            for step in WizardStep::ALL {
                li {
                    key: "{step.index()}",
                    class: if step == current {
                        "step active"
                    } else if step < current {
                        "step done"
                    } else {
                        "step"
                    },
                    span { class: "step-number", "{step.index() + 1}" }
                    span { class: "step-label", "{step.label()}" }
                }
            }
        }
    }
}

// ── LanguageSelect ──────────────────────────────────────────────────────────

#[component]
pub fn LanguageSelect(
    label: String,
    value: String,
    #[props(default)] placeholder: Option<String>,
    #[props(default)] disabled: bool,
    on_change: EventHandler<String>,
) -> Element {
    rsx! {
        label {
            class: "field",
            span { class: "field-label", "{label}" }
            select {
                class: "input",
                disabled: disabled,
                onchange: move |e: FormEvent| on_change.call(e.value()),
                if let Some(text) = placeholder {
                    option { value: "", selected: value.is_empty(), "{text}" }
                }
                for (code, name) in SUPPORTED_LANGUAGES.iter() {
                    option {
                        key: "{code}",
                        value: "{code}",
                        selected: value == *code,
                        "{name}"
                    }
                }
            }
        }
    }
}

// ── Progress & status ───────────────────────────────────────────────────────

#[component]
pub fn ProgressBar(percent: u8) -> Element {
    let percent = percent.min(100);
    rsx! {
        div {
            class: "progress",
            div {
                class: "progress-fill",
                style: "width: {percent}%;",
            }
        }
        div { class: "progress-label", "{percent}%" }
    }
}

#[component]
pub fn StatusBadge(status: JobStatus) -> Element {
    rsx! {
        span {
            class: "badge badge-{status.as_str()}",
            "{status.label()}"
        }
    }
}

// ── ConfirmDialog ───────────────────────────────────────────────────────────

#[component]
pub fn ConfirmDialog(
    title: String,
    message: String,
    #[props(default)] details: Vec<String>,
    confirm_label: String,
    #[props(default = "Cancel".to_string())] cancel_label: String,
    #[props(default)] danger: bool,
    #[props(default)] busy: bool,
    on_confirm: EventHandler<()>,
    on_cancel: EventHandler<()>,
) -> Element {
    rsx! {
        div {
            class: "modal-backdrop",
            div {
                class: "modal modal-small",
                h3 { class: "modal-title", "{title}" }
                p { class: "modal-message", "{message}" }
                if !details.is_empty() {
                    ul {
                        class: "modal-details",
                        for detail in details.iter() {
                            li { key: "{detail}", "{detail}" }
                        }
                    }
                }
                div {
                    class: "modal-actions",
                    button {
                        class: "btn",
                        disabled: busy,
                        onclick: move |_| on_cancel.call(()),
                        "{cancel_label}"
                    }
                    button {
                        class: if danger { "btn btn-danger" } else { "btn btn-primary" },
                        disabled: busy,
                        onclick: move |_| on_confirm.call(()),
                        "{confirm_label}"
                    }
                }
            }
        }
    }
}
