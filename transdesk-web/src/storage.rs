use transdesk_core::wizard::SessionStore;

/// localStorage key holding the bearer token issued at sign-in
const AUTH_TOKEN_KEY: &str = "auth_token";

fn session_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.session_storage().ok().flatten())
}

/// Wizard state store backed by the tab's `sessionStorage`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BrowserSessionStore;

impl SessionStore for BrowserSessionStore {
    fn get(&self, key: &str) -> Option<String> {
        session_storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        let Some(storage) = session_storage() else {
            dioxus_logger::tracing::warn!("SessionStorage not available, dropping {key}");
            return;
        };
        if storage.set_item(key, value).is_err() {
            dioxus_logger::tracing::warn!("Failed to set {key} in sessionStorage");
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = session_storage() {
            let _ = storage.remove_item(key);
        }
    }
}

/// Bearer token stored by the sign-in flow, if any
pub fn auth_token() -> Option<String> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(AUTH_TOKEN_KEY).ok().flatten())
        .filter(|token| !token.is_empty())
}
