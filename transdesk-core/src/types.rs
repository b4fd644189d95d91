//! Domain types for glossaries, terms and translation jobs
//!
//! Field names follow the REST payloads (camelCase on the wire). Response
//! shapes that vary between endpoints are normalized in [`crate::envelope`].

use serde::{Deserialize, Serialize};

use crate::envelope::GlossaryPayload;

// ============================================================================
// Languages
// ============================================================================

/// Languages the translation backend accepts, as `(code, display name)`.
pub const SUPPORTED_LANGUAGES: &[(&str, &str)] =
    &[("vi", "Vietnamese"), ("en", "English"), ("ja", "Japanese")];

/// Display name for a language code, falling back to the code itself.
pub fn language_name(code: &str) -> &str {
    SUPPORTED_LANGUAGES
        .iter()
        .find(|(c, _)| c.eq_ignore_ascii_case(code))
        .map(|(_, name)| *name)
        .unwrap_or(code)
}

// ============================================================================
// Glossaries
// ============================================================================

/// A single source/target pair inside a glossary
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Term {
    pub id: String,
    pub source: String,
    pub target: String,
}

/// Glossary record with the page of terms the server returned alongside it
///
/// The local term list is a cache. `term_count` is the server's total and can
/// exceed `terms.len()` when the server paginates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", from = "GlossaryPayload")]
pub struct Glossary {
    pub id: String,
    pub name: String,
    pub description: String,
    pub source_language: String,
    pub target_language: String,
    pub term_count: u64,
    pub terms: Vec<Term>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl Glossary {
    /// Language pair rendered as `English → Vietnamese`.
    pub fn language_pair(&self) -> String {
        format!(
            "{} → {}",
            language_name(&self.source_language),
            language_name(&self.target_language)
        )
    }
}

/// Result of a batch term upsert
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct UpsertSummary {
    #[serde(default)]
    pub created: u64,
    #[serde(default)]
    pub updated: u64,
    #[serde(default)]
    pub total: u64,
}

// ============================================================================
// Documents & Jobs
// ============================================================================

/// Local metadata of the file the user picked, kept in the wizard session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UploadedFile {
    pub name: String,
    pub size: u64,
    #[serde(rename = "type")]
    pub mime: String,
}

impl UploadedFile {
    /// Human readable size (`512 B`, `1.5 KB`, `2.0 MB`).
    pub fn display_size(&self) -> String {
        format_size(self.size)
    }
}

pub fn format_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    let b = bytes as f64;
    if b < KB {
        format!("{bytes} B")
    } else if b < KB * KB {
        format!("{:.1} KB", b / KB)
    } else {
        format!("{:.1} MB", b / (KB * KB))
    }
}

/// Server acknowledgement of an upload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UploadedDocument {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub size: u64,
    #[serde(rename = "type", default)]
    pub mime: String,
    #[serde(default)]
    pub uploaded_at: Option<String>,
}

/// Remote job status as reported by the translation service
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Pending,
    Translating,
    Completed,
    Failed,
    Cancelled,
    /// Any status string this client does not know about
    #[serde(other)]
    Unknown,
}

impl JobStatus {
    pub const ALL: [JobStatus; 5] = [
        JobStatus::Pending,
        JobStatus::Translating,
        JobStatus::Completed,
        JobStatus::Failed,
        JobStatus::Cancelled,
    ];

    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            JobStatus::Completed | JobStatus::Failed | JobStatus::Cancelled
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::Translating => "translating",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
            JobStatus::Cancelled => "cancelled",
            JobStatus::Unknown => "unknown",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            JobStatus::Pending => "Pending",
            JobStatus::Translating => "Translating",
            JobStatus::Completed => "Completed",
            JobStatus::Failed => "Failed",
            JobStatus::Cancelled => "Cancelled",
            JobStatus::Unknown => "Unknown",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(raw))
    }
}

/// Response to starting a translation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StartedJob {
    pub id: String,
    pub status: JobStatus,
    #[serde(default)]
    pub submitted_at: Option<String>,
    #[serde(default)]
    pub target_document: Option<String>,
}

/// Full status of a translation job
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TranslationJob {
    pub id: String,
    pub status: JobStatus,

    /// Percentage in `0..=100`; servers may send fractions
    #[serde(default)]
    pub progress: f64,

    #[serde(default)]
    pub source_language: String,
    #[serde(default)]
    pub target_language: String,
    #[serde(default)]
    pub document_id: String,

    /// Id of the translated output document, once produced
    #[serde(default)]
    pub target_document: Option<String>,

    #[serde(default)]
    pub error_message: Option<String>,
}

impl TranslationJob {
    /// Progress clamped to a whole percentage.
    pub fn progress_percent(&self) -> u8 {
        clamp_percent(self.progress)
    }
}

pub(crate) fn clamp_percent(progress: f64) -> u8 {
    if progress.is_nan() {
        return 0;
    }
    progress.round().clamp(0.0, 100.0) as u8
}

/// One row of the translation history
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: String,
    #[serde(default)]
    pub document_name: String,
    #[serde(default)]
    pub source_language: String,
    #[serde(default)]
    pub target_language: String,
    pub status: JobStatus,
    #[serde(default, alias = "startedAt")]
    pub submitted_at: Option<String>,
    #[serde(default)]
    pub completed_at: Option<String>,
    #[serde(default)]
    pub progress: Option<f64>,
    #[serde(default)]
    pub target_document: Option<String>,
}

impl HistoryEntry {
    /// Id to hand to the download endpoint.
    pub fn download_id(&self) -> &str {
        self.target_document.as_deref().unwrap_or(&self.id)
    }

    pub fn can_download(&self) -> bool {
        self.status == JobStatus::Completed
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_name_falls_back_to_code() {
        assert_eq!(language_name("vi"), "Vietnamese");
        assert_eq!(language_name("EN"), "English");
        assert_eq!(language_name("fr"), "fr");
    }

    #[test]
    fn test_job_status_deserializes_unknown_values() {
        let status: JobStatus = serde_json::from_str("\"queued\"").unwrap();
        assert_eq!(status, JobStatus::Unknown);
        assert!(!status.is_terminal());

        let done: JobStatus = serde_json::from_str("\"completed\"").unwrap();
        assert!(done.is_terminal());
    }

    #[test]
    fn test_translation_job_progress_is_clamped() {
        let job: TranslationJob = serde_json::from_value(serde_json::json!({
            "id": "job-1",
            "status": "translating",
            "progress": 140.2
        }))
        .unwrap();
        assert_eq!(job.progress_percent(), 100);
        assert_eq!(clamp_percent(39.6), 40);
        assert_eq!(clamp_percent(-3.0), 0);
    }

    #[test]
    fn test_history_entry_accepts_started_at_alias() {
        let entry: HistoryEntry = serde_json::from_value(serde_json::json!({
            "id": "job-9",
            "documentName": "contract.docx",
            "sourceLanguage": "en",
            "targetLanguage": "vi",
            "status": "completed",
            "startedAt": "2026-01-02T10:00:00Z",
            "targetDocument": "doc-out"
        }))
        .unwrap();
        assert_eq!(entry.submitted_at.as_deref(), Some("2026-01-02T10:00:00Z"));
        assert_eq!(entry.download_id(), "doc-out");
        assert!(entry.can_download());
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MB");
    }
}
