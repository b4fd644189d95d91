//! Remote API seams
//!
//! The browser client implements these traits with `gloo-net`; tests use
//! in-memory fakes. Futures are `!Send` because the browser event loop is
//! single threaded.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::types::{
    Glossary, HistoryEntry, StartedJob, Term, TranslationJob, UploadedDocument, UpsertSummary,
};

/// Endpoint paths under `/api/v2`
pub mod endpoints {
    pub const GLOSSARIES: &str = "/api/v2/glossaries";
    pub const DOCUMENT_UPLOAD: &str = "/api/v2/documents/upload";
    pub const TRANSLATIONS: &str = "/api/v2/translations";

    pub fn glossary(id: &str) -> String {
        format!("{GLOSSARIES}/{id}")
    }

    pub fn terms(glossary_id: &str) -> String {
        format!("{GLOSSARIES}/{glossary_id}/terms")
    }

    pub fn term(glossary_id: &str, term_id: &str) -> String {
        format!("{GLOSSARIES}/{glossary_id}/terms/{term_id}")
    }

    pub fn terms_upsert(glossary_id: &str) -> String {
        format!("{GLOSSARIES}/{glossary_id}/terms/upsert")
    }

    pub fn document_download(document_id: &str) -> String {
        format!("/api/v2/documents/download/{document_id}")
    }

    pub fn translation(job_id: &str) -> String {
        format!("{TRANSLATIONS}/{job_id}")
    }

    pub fn translation_cancel(job_id: &str) -> String {
        format!("{TRANSLATIONS}/{job_id}/cancel")
    }
}

// ============================================================================
// Request bodies
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateGlossaryRequest {
    pub name: String,
    pub description: String,
    pub source_language: String,
    pub target_language: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGlossaryRequest {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TermPair {
    pub source: String,
    pub target: String,
}

impl From<&Term> for TermPair {
    fn from(term: &Term) -> Self {
        Self {
            source: term.source.clone(),
            target: term.target.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpsertTermsRequest {
    pub terms: Vec<TermPair>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StartTranslationRequest {
    pub document_id: String,
    pub source_language: String,
    pub target_language: String,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub glossaries: Vec<String>,
}

// ============================================================================
// Traits
// ============================================================================

#[async_trait(?Send)]
pub trait GlossaryApi {
    async fn list_glossaries(&self) -> Result<Vec<Glossary>, ApiError>;
    async fn get_glossary(&self, id: &str) -> Result<Glossary, ApiError>;
    async fn create_glossary(&self, request: &CreateGlossaryRequest) -> Result<Glossary, ApiError>;
    async fn update_glossary(
        &self,
        id: &str,
        request: &UpdateGlossaryRequest,
    ) -> Result<Glossary, ApiError>;
    async fn delete_glossary(&self, id: &str) -> Result<(), ApiError>;

    async fn update_term(
        &self,
        glossary_id: &str,
        term_id: &str,
        term: &TermPair,
    ) -> Result<Term, ApiError>;
    async fn delete_term(&self, glossary_id: &str, term_id: &str) -> Result<(), ApiError>;
    async fn upsert_terms(
        &self,
        glossary_id: &str,
        request: &UpsertTermsRequest,
    ) -> Result<UpsertSummary, ApiError>;
}

#[async_trait(?Send)]
pub trait TranslationApi {
    /// Handle to the local file being uploaded (a `web_sys::File` in the browser)
    type Upload: ?Sized;

    async fn upload_document(
        &self,
        file: &Self::Upload,
        source_language: &str,
        target_language: &str,
    ) -> Result<UploadedDocument, ApiError>;
    async fn start_translation(
        &self,
        request: &StartTranslationRequest,
    ) -> Result<StartedJob, ApiError>;
    async fn translation_status(&self, job_id: &str) -> Result<TranslationJob, ApiError>;
    async fn cancel_translation(&self, job_id: &str) -> Result<(), ApiError>;
    async fn download_document(&self, document_id: &str) -> Result<Vec<u8>, ApiError>;
    async fn translation_history(&self) -> Result<Vec<HistoryEntry>, ApiError>;
}

/// Waits between status checks
#[async_trait(?Send)]
pub trait Sleeper {
    async fn sleep(&self, duration: Duration);
}
