//! Translation wizard state machine
//!
//! Four linear steps: pick a document, pick glossaries, preview, execute.
//! The persistent part of the state lives in [`WizardSession`] and is written
//! to tab-scoped storage one key per field; job progress is transient.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::api::{StartTranslationRequest, TranslationApi};
use crate::error::{AppError, SessionInconsistency, ValidationError};
use crate::poller::{PollUpdate, TranslationStatus};
use crate::types::{StartedJob, UploadedDocument, UploadedFile};

// ============================================================================
// Steps
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WizardStep {
    #[default]
    Document,
    Glossary,
    Preview,
    Execute,
}

impl WizardStep {
    pub const ALL: [WizardStep; 4] = [
        WizardStep::Document,
        WizardStep::Glossary,
        WizardStep::Preview,
        WizardStep::Execute,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn next(self) -> Option<Self> {
        Self::ALL.get(self.index() + 1).copied()
    }

    pub fn prev(self) -> Option<Self> {
        self.index().checked_sub(1).map(|i| Self::ALL[i])
    }

    pub fn label(self) -> &'static str {
        match self {
            WizardStep::Document => "Document",
            WizardStep::Glossary => "Glossary",
            WizardStep::Preview => "Preview",
            WizardStep::Execute => "Translate",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GlossaryMode {
    #[default]
    None,
    Existing,
    New,
}

// ============================================================================
// Session persistence
// ============================================================================

/// Tab-scoped key-value storage (`sessionStorage` in the browser)
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

pub mod keys {
    pub const CURRENT_STEP: &str = "wizard.currentStep";
    pub const SOURCE_LANGUAGE: &str = "wizard.sourceLanguage";
    pub const TARGET_LANGUAGE: &str = "wizard.targetLanguage";
    pub const GLOSSARY_MODE: &str = "wizard.glossaryMode";
    pub const SELECTED_GLOSSARIES: &str = "wizard.selectedGlossaries";
    pub const UPLOADED_FILE: &str = "wizard.uploadedFile";
    pub const DOCUMENT_ID: &str = "wizard.documentId";
    pub const JOB_ID: &str = "wizard.jobId";

    pub const ALL: [&str; 8] = [
        CURRENT_STEP,
        SOURCE_LANGUAGE,
        TARGET_LANGUAGE,
        GLOSSARY_MODE,
        SELECTED_GLOSSARIES,
        UPLOADED_FILE,
        DOCUMENT_ID,
        JOB_ID,
    ];
}

/// Wizard fields that survive a page reload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardSession {
    pub current_step: WizardStep,
    pub source_language: String,
    pub target_language: String,
    pub glossary_mode: GlossaryMode,
    pub selected_glossary_ids: Vec<String>,
    pub uploaded_file: Option<UploadedFile>,
    pub document_id: Option<String>,
    pub job_id: Option<String>,
}

impl Default for WizardSession {
    fn default() -> Self {
        Self {
            current_step: WizardStep::Document,
            source_language: "en".to_string(),
            target_language: String::new(),
            glossary_mode: GlossaryMode::None,
            selected_glossary_ids: Vec::new(),
            uploaded_file: None,
            document_id: None,
            job_id: None,
        }
    }
}

fn read<T: DeserializeOwned>(store: &(impl SessionStore + ?Sized), key: &str) -> Option<T> {
    let raw = store.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, error = %e, "Discarding unreadable session value");
            store.remove(key);
            None
        }
    }
}

fn write<T: Serialize>(store: &(impl SessionStore + ?Sized), key: &str, value: Option<&T>) {
    match value.map(serde_json::to_string) {
        Some(Ok(json)) => store.set(key, &json),
        Some(Err(e)) => tracing::warn!(key, error = %e, "Failed to encode session value"),
        None => store.remove(key),
    }
}

impl WizardSession {
    /// Read every field, falling back to defaults for missing ones, and
    /// repair a document reference that lost one of its halves.
    pub fn load(store: &(impl SessionStore + ?Sized)) -> (Self, Option<SessionInconsistency>) {
        let defaults = Self::default();
        let mut session = Self {
            current_step: read(store, keys::CURRENT_STEP).unwrap_or(defaults.current_step),
            source_language: read(store, keys::SOURCE_LANGUAGE).unwrap_or(defaults.source_language),
            target_language: read(store, keys::TARGET_LANGUAGE).unwrap_or(defaults.target_language),
            glossary_mode: read(store, keys::GLOSSARY_MODE).unwrap_or(defaults.glossary_mode),
            selected_glossary_ids: read(store, keys::SELECTED_GLOSSARIES).unwrap_or_default(),
            uploaded_file: read(store, keys::UPLOADED_FILE),
            document_id: read(store, keys::DOCUMENT_ID),
            job_id: read(store, keys::JOB_ID),
        };

        let inconsistency = match (&session.uploaded_file, &session.document_id) {
            (Some(_), None) => Some(SessionInconsistency::MetadataWithoutDocumentId),
            (None, Some(_)) => Some(SessionInconsistency::DocumentIdWithoutMetadata),
            _ => None,
        };
        if let Some(problem) = inconsistency {
            tracing::warn!(?problem, "Stored wizard session is inconsistent, forcing re-upload");
            session.uploaded_file = None;
            session.document_id = None;
            session.job_id = None;
            session.current_step = WizardStep::Document;
            session.save(store);
        }
        (session, inconsistency)
    }

    pub fn save(&self, store: &(impl SessionStore + ?Sized)) {
        write(store, keys::CURRENT_STEP, Some(&self.current_step));
        write(store, keys::SOURCE_LANGUAGE, Some(&self.source_language));
        write(store, keys::TARGET_LANGUAGE, Some(&self.target_language));
        write(store, keys::GLOSSARY_MODE, Some(&self.glossary_mode));
        write(store, keys::SELECTED_GLOSSARIES, Some(&self.selected_glossary_ids));
        write(store, keys::UPLOADED_FILE, self.uploaded_file.as_ref());
        write(store, keys::DOCUMENT_ID, self.document_id.as_ref());
        write(store, keys::JOB_ID, self.job_id.as_ref());
    }

    pub fn clear(store: &(impl SessionStore + ?Sized)) {
        for key in keys::ALL {
            store.remove(key);
        }
    }
}

// ============================================================================
// Wizard
// ============================================================================

/// Result of stepping back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Retreat {
    Moved {
        to: WizardStep,
        /// The caller must cancel its poll task
        stop_polling: bool,
    },
    /// Already on the first step; the caller leaves the wizard
    AtStart,
}

/// Upload an advance needs, with the inputs it was made for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingUpload {
    pub file: UploadedFile,
    pub source_language: String,
    pub target_language: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Wizard {
    session: WizardSession,
    status: TranslationStatus,
    progress: u8,
    error_message: Option<String>,
    target_document: Option<String>,
    inconsistency: Option<SessionInconsistency>,
}

impl Wizard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from storage. A job that was running when the tab reloaded is
    /// picked up again by the poller.
    pub fn restore(store: &(impl SessionStore + ?Sized)) -> Self {
        let (session, inconsistency) = WizardSession::load(store);
        let status = if session.current_step == WizardStep::Execute && session.job_id.is_some() {
            TranslationStatus::Translating
        } else {
            TranslationStatus::Idle
        };
        Self {
            session,
            status,
            inconsistency,
            ..Self::default()
        }
    }

    pub fn persist(&self, store: &(impl SessionStore + ?Sized)) {
        self.session.save(store);
    }

    // ── Accessors ──────────────────────────────────────────────────────

    pub fn session(&self) -> &WizardSession {
        &self.session
    }

    pub fn step(&self) -> WizardStep {
        self.session.current_step
    }

    pub fn status(&self) -> TranslationStatus {
        self.status
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn job_id(&self) -> Option<&str> {
        self.session.job_id.as_deref()
    }

    pub fn inconsistency(&self) -> Option<SessionInconsistency> {
        self.inconsistency
    }

    // ── Inputs ─────────────────────────────────────────────────────────

    pub fn set_source_language(&mut self, code: &str) {
        self.session.source_language = code.to_string();
    }

    pub fn set_target_language(&mut self, code: &str) {
        self.session.target_language = code.to_string();
    }

    pub fn set_glossary_mode(&mut self, mode: GlossaryMode) {
        self.session.glossary_mode = mode;
        if mode != GlossaryMode::Existing {
            self.session.selected_glossary_ids.clear();
        }
    }

    pub fn set_selected_glossaries(&mut self, ids: Vec<String>) {
        self.session.selected_glossary_ids = ids;
    }

    /// Record a newly picked file; it is uploaded on the next advance.
    pub fn stage_file(&mut self, file: UploadedFile) {
        self.session.uploaded_file = Some(file);
        self.session.document_id = None;
        self.inconsistency = None;
    }

    pub fn remove_file(&mut self) {
        self.session.uploaded_file = None;
        self.session.document_id = None;
    }

    pub fn attach_document(&mut self, document: &UploadedDocument) {
        self.session.document_id = Some(document.id.clone());
    }

    pub fn needs_upload(&self) -> bool {
        self.session.uploaded_file.is_some() && self.session.document_id.is_none()
    }

    // ── Transitions ────────────────────────────────────────────────────

    /// Check the current step's precondition. `has_staged_upload` tells
    /// whether a picked file is available to upload on advance.
    pub fn validate_advance(&self, has_staged_upload: bool) -> Result<(), ValidationError> {
        match self.session.current_step {
            WizardStep::Document => {
                let target = self.session.target_language.trim();
                if target.is_empty() {
                    return Err(ValidationError::MissingTargetLanguage);
                }
                if target == self.session.source_language.trim() {
                    return Err(ValidationError::SameLanguages);
                }
                let uploadable = self.needs_upload() && has_staged_upload;
                if self.session.document_id.is_none() && !uploadable {
                    return Err(ValidationError::DocumentNotUploaded);
                }
                Ok(())
            }
            WizardStep::Glossary | WizardStep::Preview => Ok(()),
            WizardStep::Execute => Err(ValidationError::NoNextStep),
        }
    }

    /// Move forward one step, uploading the staged file first when leaving
    /// the document step without a document id.
    pub async fn advance<A>(
        &mut self,
        api: &A,
        staged: Option<&A::Upload>,
    ) -> Result<WizardStep, AppError>
    where
        A: TranslationApi + ?Sized,
    {
        let Some(upload) = self.begin_advance(staged.is_some())? else {
            return Ok(self.finish_advance(None)?);
        };
        let file = staged.ok_or(ValidationError::DocumentNotUploaded)?;
        let document = api
            .upload_document(file, &upload.source_language, &upload.target_language)
            .await?;
        tracing::debug!(document_id = %document.id, "Document uploaded");
        Ok(self.finish_advance(Some((&upload, &document)))?)
    }

    /// First half of [`advance`](Self::advance): validate and describe the
    /// upload to run, if any. Nothing changes until
    /// [`finish_advance`](Self::finish_advance).
    pub fn begin_advance(
        &self,
        has_staged_upload: bool,
    ) -> Result<Option<PendingUpload>, ValidationError> {
        self.validate_advance(has_staged_upload)?;
        if self.session.current_step != WizardStep::Document || self.session.document_id.is_some() {
            return Ok(None);
        }
        let file = self
            .session
            .uploaded_file
            .clone()
            .ok_or(ValidationError::DocumentNotUploaded)?;
        Ok(Some(PendingUpload {
            file,
            source_language: self.session.source_language.clone(),
            target_language: self.session.target_language.clone(),
        }))
    }

    /// Attach the uploaded document and move on. An upload made for a file
    /// or language pair that changed meanwhile is discarded.
    pub fn finish_advance(
        &mut self,
        uploaded: Option<(&PendingUpload, &UploadedDocument)>,
    ) -> Result<WizardStep, ValidationError> {
        if let Some((upload, document)) = uploaded {
            let session = &self.session;
            let unchanged = session.current_step == WizardStep::Document
                && session.document_id.is_none()
                && session.uploaded_file.as_ref() == Some(&upload.file)
                && session.source_language == upload.source_language
                && session.target_language == upload.target_language;
            if !unchanged {
                tracing::warn!(
                    document_id = %document.id,
                    "Discarding upload made for a document that changed meanwhile"
                );
                return Err(ValidationError::DocumentChanged);
            }
            self.attach_document(document);
        }
        self.validate_advance(false)?;

        let next = self
            .session
            .current_step
            .next()
            .ok_or(ValidationError::NoNextStep)?;
        self.session.current_step = next;
        Ok(next)
    }

    /// Step back one step. Leaving the execute step resets the job status
    /// but keeps the job id.
    pub fn retreat(&mut self) -> Result<Retreat, ValidationError> {
        let step = self.session.current_step;
        match step {
            WizardStep::Document => Ok(Retreat::AtStart),
            WizardStep::Execute => {
                let stop_polling = self.status == TranslationStatus::Translating;
                self.reset_job_progress();
                self.session.current_step = WizardStep::Preview;
                Ok(Retreat::Moved {
                    to: WizardStep::Preview,
                    stop_polling,
                })
            }
            WizardStep::Glossary | WizardStep::Preview => {
                if self.status != TranslationStatus::Idle {
                    return Err(ValidationError::JobInProgress);
                }
                let to = step.prev().unwrap_or(WizardStep::Document);
                self.session.current_step = to;
                Ok(Retreat::Moved {
                    to,
                    stop_polling: false,
                })
            }
        }
    }

    /// Step back repeatedly until `target` is reached.
    pub fn go_back_to(&mut self, target: WizardStep) -> Result<Retreat, ValidationError> {
        let mut stop_polling = false;
        while self.session.current_step > target {
            if let Retreat::Moved { stop_polling: stop, .. } = self.retreat()? {
                stop_polling |= stop;
            }
        }
        Ok(Retreat::Moved {
            to: self.session.current_step,
            stop_polling,
        })
    }

    fn reset_job_progress(&mut self) {
        self.status = TranslationStatus::Idle;
        self.progress = 0;
        self.error_message = None;
        self.target_document = None;
    }

    // ── Job lifecycle ──────────────────────────────────────────────────

    /// Submit the job. Also used to retry a failed or cancelled one.
    pub async fn start<A>(&mut self, api: &A) -> Result<String, AppError>
    where
        A: TranslationApi + ?Sized,
    {
        let request = self.start_request()?;
        let started = api.start_translation(&request).await?;
        Ok(self.finish_start(started)?)
    }

    /// The request [`start`](Self::start) would send, if starting is allowed.
    pub fn start_request(&self) -> Result<StartTranslationRequest, ValidationError> {
        if self.session.current_step != WizardStep::Execute {
            return Err(ValidationError::NotAtExecute);
        }
        if self.status == TranslationStatus::Translating {
            return Err(ValidationError::JobAlreadyRunning);
        }
        let document_id = self
            .session
            .document_id
            .clone()
            .ok_or(ValidationError::DocumentNotUploaded)?;

        let glossaries = match self.session.glossary_mode {
            GlossaryMode::Existing => self.session.selected_glossary_ids.clone(),
            GlossaryMode::None | GlossaryMode::New => Vec::new(),
        };
        Ok(StartTranslationRequest {
            document_id,
            source_language: self.session.source_language.clone(),
            target_language: self.session.target_language.clone(),
            glossaries,
        })
    }

    /// Record a job the server accepted. Refused when the wizard left the
    /// execute step or another job took over while the request was out; the
    /// caller should then cancel `started` remotely.
    pub fn finish_start(&mut self, started: StartedJob) -> Result<String, ValidationError> {
        if self.session.current_step != WizardStep::Execute {
            return Err(ValidationError::NotAtExecute);
        }
        if self.status == TranslationStatus::Translating {
            return Err(ValidationError::JobAlreadyRunning);
        }

        self.reset_job_progress();
        self.status = TranslationStatus::from_remote(started.status);
        if self.status == TranslationStatus::Success {
            self.progress = 100;
        }
        self.target_document = started.target_document;
        self.session.job_id = Some(started.id.clone());
        tracing::debug!(job_id = %started.id, "Translation started");
        Ok(started.id)
    }

    pub fn should_poll(&self) -> bool {
        self.status == TranslationStatus::Translating && self.session.job_id.is_some()
    }

    /// Apply a poll observation. Ignored unless a job is still running, so a
    /// late response cannot revive a cancelled job.
    pub fn apply_update(&mut self, update: &PollUpdate) {
        if self.status != TranslationStatus::Translating {
            return;
        }
        self.status = update.status;
        self.progress = update.progress;
        if update.error_message.is_some() {
            self.error_message = update.error_message.clone();
        }
        if update.target_document.is_some() {
            self.target_document = update.target_document.clone();
        }
    }

    /// Mark the running job cancelled locally and return its id so the
    /// caller can notify the server.
    pub fn cancel(&mut self) -> Option<String> {
        if self.status != TranslationStatus::Translating {
            return None;
        }
        self.status = TranslationStatus::Cancelled;
        self.progress = 0;
        self.session.job_id.clone()
    }

    pub fn can_download(&self) -> bool {
        self.status == TranslationStatus::Success && self.session.job_id.is_some()
    }

    /// Id for the download endpoint: the translated document when known.
    pub fn download_id(&self) -> Option<&str> {
        self.target_document
            .as_deref()
            .or(self.session.job_id.as_deref())
    }

    /// Reset everything, including stored state.
    pub fn new_translation(&mut self, store: &(impl SessionStore + ?Sized)) {
        *self = Self::new();
        WizardSession::clear(store);
    }

    /// Close out a successful job. Returns false when there is none.
    pub fn acknowledge_completion(&mut self, store: &(impl SessionStore + ?Sized)) -> bool {
        if self.status != TranslationStatus::Success {
            return false;
        }
        self.new_translation(store);
        true
    }
}

/// Ask the server to cancel a job. Failure is logged only; the local state
/// has already moved on.
pub async fn cancel_remote<A>(api: &A, job_id: &str)
where
    A: TranslationApi + ?Sized,
{
    if let Err(e) = api.cancel_translation(job_id).await {
        tracing::warn!(job_id, error = %e, "Server-side cancel failed");
    }
}

// ============================================================================
// Tests
// ============================================================================
