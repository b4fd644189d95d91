use dioxus::prelude::*;

use crate::components::styles::APP_STYLES;
use crate::components::{GlossariesView, HistoryView, TranslateView};
use crate::toast::{Toast, ToastHost};

/// Top-level pages reachable from the sidebar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Translate,
    Glossaries,
    History,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::Translate, Page::Glossaries, Page::History];

    pub fn label(self) -> &'static str {
        match self {
            Page::Translate => "Translate",
            Page::Glossaries => "Glossaries",
            Page::History => "History",
        }
    }

    fn icon(self) -> &'static str {
        match self {
            Page::Translate => "🌐",
            Page::Glossaries => "📚",
            Page::History => "🕘",
        }
    }
}

#[component]
pub fn AppShell() -> Element {
    // Toast list shared with every page
    use_context_provider(|| Signal::new(Vec::<Toast>::new()));
    let mut page = use_signal(|| Page::Translate);

    rsx! {
        style { {APP_STYLES} }
        div {
            class: "app-shell",
            nav {
                class: "app-nav",
                div { class: "app-brand", "Transdesk" }
                for item in Page::ALL {
                    button {
                        key: "{item.label()}",
                        class: if page() == item { "nav-item active" } else { "nav-item" },
                        onclick: move |_| page.set(item),
                        span { class: "nav-icon", "{item.icon()}" }
                        "{item.label()}"
                    }
                }
            }
            main {
                class: "app-main",
                match page() {
                    Page::Translate => rsx! { TranslateView {} },
                    Page::Glossaries => rsx! { GlossariesView {} },
                    Page::History => rsx! { HistoryView {} },
                }
            }
            ToastHost {}
        }
    }
}
