//! Response normalization
//!
//! The API is inconsistent about shapes: a body is either the payload itself
//! or `{ "data": payload }`, a list is either a bare array or a page object,
//! and a glossary carries its terms under `terms.items`, `terms`, or a
//! top-level `items`. Everything is folded into one shape here so the rest of
//! the crate never sees the variants.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiError;
use crate::types::{Glossary, Term};

/// Shown when an error body carries no readable message.
pub const FALLBACK_ERROR_MESSAGE: &str = "Unable to connect to server. Please try again.";

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Envelope<T> {
    Wrapped { data: T },
    Flat(T),
}

impl<T> Envelope<T> {
    pub fn into_inner(self) -> T {
        match self {
            Envelope::Wrapped { data } => data,
            Envelope::Flat(inner) => inner,
        }
    }
}

/// Paginated list as the server sends it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub page: u64,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub pages: u64,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ListPayload<T> {
    Paged(Page<T>),
    Bare(Vec<T>),
}

impl<T> ListPayload<T> {
    pub fn into_items(self) -> Vec<T> {
        match self {
            ListPayload::Paged(page) => page.items,
            ListPayload::Bare(items) => items,
        }
    }

    fn total(&self) -> Option<u64> {
        match self {
            ListPayload::Paged(page) => Some(page.total),
            ListPayload::Bare(_) => None,
        }
    }
}

/// Decode a single object, unwrapping `{data}` when present.
pub fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str::<Envelope<T>>(body)
        .map(Envelope::into_inner)
        .map_err(|e| ApiError::Decode(e.to_string()))
}

/// Decode a list that may be a bare array or a page, with or without `{data}`.
pub fn decode_list<T: DeserializeOwned>(body: &str) -> Result<Vec<T>, ApiError> {
    decode::<ListPayload<T>>(body).map(ListPayload::into_items)
}

// ============================================================================
// Glossary shape
// ============================================================================

/// Raw glossary as any endpoint may return it; converted into [`Glossary`].
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlossaryPayload {
    #[serde(default)]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    source_language: String,
    #[serde(default)]
    target_language: String,
    #[serde(default)]
    term_count: Option<u64>,
    #[serde(default)]
    terms: Option<ListPayload<Term>>,
    #[serde(default)]
    items: Option<Vec<Term>>,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default)]
    updated_at: Option<String>,
}

impl From<GlossaryPayload> for Glossary {
    fn from(raw: GlossaryPayload) -> Self {
        let page_total = raw.terms.as_ref().and_then(ListPayload::total);
        let terms = match (raw.terms, raw.items) {
            (Some(list), _) => list.into_items(),
            (None, Some(items)) => items,
            (None, None) => Vec::new(),
        };
        let term_count = raw
            .term_count
            .or(page_total)
            .unwrap_or(terms.len() as u64);

        Glossary {
            id: raw.id,
            name: raw.name,
            description: raw.description.unwrap_or_default(),
            source_language: raw.source_language,
            target_language: raw.target_language,
            term_count,
            terms,
            created_at: raw.created_at,
            updated_at: raw.updated_at,
        }
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Best human readable message in an error body.
///
/// Accepts `{error: {message}}`, `{error: "..."}`, `{message}`,
/// `{detail: "..."}` and `{detail: [{msg}, ...]}`.
pub fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| extract_message(&value))
        .unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string())
}

/// Build the error for a non-success response.
pub fn server_error(status: u16, body: &str) -> ApiError {
    ApiError::Server {
        status,
        message: error_message(body),
    }
}

fn extract_message(value: &Value) -> Option<String> {
    let non_empty = |v: Option<&Value>| {
        v.and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    if let Some(msg) = non_empty(value.pointer("/error/message")) {
        return Some(msg);
    }
    if let Some(msg) = non_empty(value.get("error")) {
        return Some(msg);
    }
    if let Some(msg) = non_empty(value.get("message")) {
        return Some(msg);
    }
    match value.get("detail") {
        Some(Value::String(detail)) if !detail.trim().is_empty() => Some(detail.clone()),
        Some(Value::Array(items)) => {
            let joined = items
                .iter()
                .filter_map(|item| non_empty(item.get("msg")))
                .collect::<Vec<_>>()
                .join("; ");
            (!joined.is_empty()).then_some(joined)
        }
        _ => None,
    }
}

// ============================================================================
// Tests
// ============================================================================
