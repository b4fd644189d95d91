//! Client configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_POLL_INTERVAL_MS: u64 = 2_000;
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;
pub const MAX_SELECTED_GLOSSARIES: usize = 5;

/// Settings shared by the REST client and the orchestration code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Origin prefixed to every endpoint path; empty means same origin
    pub api_base: String,
    pub poll_interval_ms: u64,
    pub request_timeout_ms: u64,
    pub max_selected_glossaries: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            max_selected_glossaries: MAX_SELECTED_GLOSSARIES,
        }
    }
}

impl ClientConfig {
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into().trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval_ms = saturating_millis(interval);
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout_ms = saturating_millis(timeout);
        self
    }

    pub fn with_max_selected_glossaries(mut self, max: usize) -> Self {
        self.max_selected_glossaries = max;
        self
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Absolute URL for an endpoint path such as `/api/v2/glossaries`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }
}

fn saturating_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.poll_interval(), Duration::from_secs(2));
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.max_selected_glossaries, 5);
        assert_eq!(config.url("/api/v2/glossaries"), "/api/v2/glossaries");
    }

    #[test]
    fn test_builders_and_trailing_slash() {
        let config = ClientConfig::new("http://localhost:18000/")
            .with_poll_interval(Duration::from_millis(500))
            .with_max_selected_glossaries(3);
        assert_eq!(config.url("/api/v2/translations"), "http://localhost:18000/api/v2/translations");
        assert_eq!(config.poll_interval_ms, 500);
        assert_eq!(config.max_selected_glossaries, 3);
    }

    #[test]
    fn test_oversized_durations_saturate() {
        let config = ClientConfig::default()
            .with_poll_interval(Duration::MAX)
            .with_request_timeout(Duration::from_secs(u64::MAX));
        assert_eq!(config.poll_interval_ms, u64::MAX);
        assert_eq!(config.request_timeout_ms, u64::MAX);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"api_base":"https://tm.example.com"}"#).unwrap();
        assert_eq!(config.api_base, "https://tm.example.com");
        assert_eq!(config.poll_interval_ms, DEFAULT_POLL_INTERVAL_MS);
    }
}
