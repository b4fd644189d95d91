use std::fmt::Display;
use std::sync::atomic::{AtomicU64, Ordering};

use dioxus::prelude::*;
use gloo_timers::future::TimeoutFuture;

const TOAST_TTL_MS: u32 = 4_000;

static NEXT_TOAST_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl ToastKind {
    fn class(self) -> &'static str {
        match self {
            ToastKind::Success => "toast toast-success",
            ToastKind::Error => "toast toast-error",
            ToastKind::Info => "toast toast-info",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

/// Toast list provided by the app shell
pub fn use_toasts() -> Signal<Vec<Toast>> {
    use_context::<Signal<Vec<Toast>>>()
}

/// Show a toast that dismisses itself after a few seconds.
pub fn push_toast(mut toasts: Signal<Vec<Toast>>, kind: ToastKind, message: impl Into<String>) {
    let id = NEXT_TOAST_ID.fetch_add(1, Ordering::Relaxed);
    toasts.write().push(Toast {
        id,
        kind,
        message: message.into(),
    });
    spawn(async move {
        TimeoutFuture::new(TOAST_TTL_MS).await;
        toasts.write().retain(|t| t.id != id);
    });
}

/// Log a failed action with its context and show the error to the user.
pub fn report_error(toasts: Signal<Vec<Toast>>, context: &str, error: impl Display) {
    dioxus_logger::tracing::error!("{context}: {error}");
    push_toast(toasts, ToastKind::Error, error.to_string());
}

#[component]
pub fn ToastHost() -> Element {
    let mut toasts = use_toasts();

    rsx! {
        div {
            class: "toast-stack",
            for toast in toasts() {
                div {
                    key: "{toast.id}",
                    class: toast.kind.class(),
                    span { "{toast.message}" }
                    button {
                        class: "toast-close",
                        onclick: {
                            let id = toast.id;
                            move |_| toasts.write().retain(|t| t.id != id)
                        },
                        "×"
                    }
                }
            }
        }
    }
}
