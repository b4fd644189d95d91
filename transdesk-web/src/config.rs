use std::sync::OnceLock;

use transdesk_core::ClientConfig;

/// Backend address used when the UI is served from a dev server
const DEV_API_BASE: &str = "http://localhost:18000";

/// Pick the API origin
/// - a non-empty build-time override wins
/// - on localhost, talk to the dev backend
/// - otherwise use the same origin (the API serves the static files)
fn resolve_api_base(override_base: Option<&str>, hostname: &str) -> String {
    if let Some(base) = override_base.map(str::trim).filter(|b| !b.is_empty()) {
        return base.to_string();
    }
    if hostname == "localhost" || hostname == "127.0.0.1" {
        DEV_API_BASE.to_string()
    } else {
        String::new()
    }
}

fn get_api_base() -> String {
    let hostname = web_sys::window()
        .and_then(|w| w.location().hostname().ok())
        .unwrap_or_default();
    resolve_api_base(option_env!("TRANSDESK_API_BASE"), &hostname)
}

static CLIENT_CONFIG: OnceLock<ClientConfig> = OnceLock::new();

/// Client configuration, computed at first use
pub fn client_config() -> &'static ClientConfig {
    CLIENT_CONFIG.get_or_init(|| ClientConfig::new(get_api_base()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_api_base() {
        assert_eq!(resolve_api_base(None, "localhost"), DEV_API_BASE);
        assert_eq!(resolve_api_base(None, "127.0.0.1"), DEV_API_BASE);
        assert_eq!(resolve_api_base(None, "tm.example.com"), "");
        assert_eq!(
            resolve_api_base(Some("https://api.example.com"), "localhost"),
            "https://api.example.com"
        );
        assert_eq!(resolve_api_base(Some("  "), "localhost"), DEV_API_BASE);
    }
}
