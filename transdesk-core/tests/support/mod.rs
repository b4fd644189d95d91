//! In-memory fakes shared by the integration tests
#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use async_trait::async_trait;
use transdesk_core::api::{
    CreateGlossaryRequest, GlossaryApi, Sleeper, StartTranslationRequest, TermPair,
    TranslationApi, UpdateGlossaryRequest, UpsertTermsRequest,
};
use transdesk_core::wizard::SessionStore;
use transdesk_core::{
    ApiError, Glossary, HistoryEntry, JobStatus, StartedJob, Term, TranslationJob,
    UploadedDocument, UpsertSummary,
};

/// Every remote call the fakes received, in order
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ListGlossaries,
    GetGlossary(String),
    CreateGlossary(CreateGlossaryRequest),
    UpdateGlossary(String, UpdateGlossaryRequest),
    DeleteGlossary(String),
    UpdateTerm(String, String, TermPair),
    DeleteTerm(String, String),
    UpsertTerms(String, Vec<TermPair>),
    Upload(String),
    Start(StartTranslationRequest),
    Status(String),
    Cancel(String),
    Download(String),
    History,
}

/// Glossary and translation server backed by plain collections
#[derive(Default)]
pub struct FakeServer {
    pub calls: RefCell<Vec<Call>>,
    pub glossaries: RefCell<HashMap<String, Glossary>>,
    /// Status responses handed out in order; the last one repeats
    pub statuses: RefCell<VecDeque<Result<TranslationJob, ApiError>>>,
    /// Names of calls that should fail with a 500
    pub failing: RefCell<Vec<&'static str>>,
    next_id: Cell<u32>,
}

impl FakeServer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_glossary(self, glossary: Glossary) -> Self {
        self.glossaries
            .borrow_mut()
            .insert(glossary.id.clone(), glossary);
        self
    }

    pub fn fail_on(&self, call: &'static str) {
        self.failing.borrow_mut().push(call);
    }

    pub fn script_statuses(&self, statuses: Vec<Result<TranslationJob, ApiError>>) {
        *self.statuses.borrow_mut() = statuses.into();
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.borrow().iter().filter(|c| pred(c)).count()
    }

    fn record(&self, call: Call, name: &'static str) -> Result<(), ApiError> {
        self.calls.borrow_mut().push(call);
        if self.failing.borrow().contains(&name) {
            return Err(ApiError::Server {
                status: 500,
                message: format!("{name} failed"),
            });
        }
        Ok(())
    }

    fn fresh_id(&self, prefix: &str) -> String {
        let n = self.next_id.get() + 1;
        self.next_id.set(n);
        format!("{prefix}-{n}")
    }

    fn not_found(what: &str) -> ApiError {
        ApiError::Server {
            status: 404,
            message: format!("{what} not found"),
        }
    }

    fn with_glossary_mut<T>(
        &self,
        id: &str,
        f: impl FnOnce(&mut Glossary) -> T,
    ) -> Result<T, ApiError> {
        let mut glossaries = self.glossaries.borrow_mut();
        let glossary = glossaries
            .get_mut(id)
            .ok_or_else(|| Self::not_found("Glossary"))?;
        let out = f(glossary);
        glossary.term_count = glossary.terms.len() as u64;
        Ok(out)
    }
}

#[async_trait(?Send)]
impl GlossaryApi for FakeServer {
    async fn list_glossaries(&self) -> Result<Vec<Glossary>, ApiError> {
        self.record(Call::ListGlossaries, "list_glossaries")?;
        Ok(self.glossaries.borrow().values().cloned().collect())
    }

    async fn get_glossary(&self, id: &str) -> Result<Glossary, ApiError> {
        self.record(Call::GetGlossary(id.into()), "get_glossary")?;
        self.glossaries
            .borrow()
            .get(id)
            .cloned()
            .ok_or_else(|| Self::not_found("Glossary"))
    }

    async fn create_glossary(&self, request: &CreateGlossaryRequest) -> Result<Glossary, ApiError> {
        self.record(Call::CreateGlossary(request.clone()), "create_glossary")?;
        let glossary = Glossary {
            id: self.fresh_id("g"),
            name: request.name.clone(),
            description: request.description.clone(),
            source_language: request.source_language.clone(),
            target_language: request.target_language.clone(),
            ..Glossary::default()
        };
        self.glossaries
            .borrow_mut()
            .insert(glossary.id.clone(), glossary.clone());
        Ok(glossary)
    }

    async fn update_glossary(
        &self,
        id: &str,
        request: &UpdateGlossaryRequest,
    ) -> Result<Glossary, ApiError> {
        self.record(
            Call::UpdateGlossary(id.into(), request.clone()),
            "update_glossary",
        )?;
        self.with_glossary_mut(id, |g| {
            g.name = request.name.clone();
            g.description = request.description.clone();
            g.clone()
        })
    }

    async fn delete_glossary(&self, id: &str) -> Result<(), ApiError> {
        self.record(Call::DeleteGlossary(id.into()), "delete_glossary")?;
        self.glossaries.borrow_mut().remove(id);
        Ok(())
    }

    async fn update_term(
        &self,
        glossary_id: &str,
        term_id: &str,
        term: &TermPair,
    ) -> Result<Term, ApiError> {
        self.record(
            Call::UpdateTerm(glossary_id.into(), term_id.into(), term.clone()),
            "update_term",
        )?;
        self.with_glossary_mut(glossary_id, |g| {
            g.terms.iter_mut().find(|t| t.id == term_id).map(|t| {
                t.source = term.source.clone();
                t.target = term.target.clone();
                t.clone()
            })
        })?
        .ok_or_else(|| Self::not_found("Term"))
    }

    async fn delete_term(&self, glossary_id: &str, term_id: &str) -> Result<(), ApiError> {
        self.record(
            Call::DeleteTerm(glossary_id.into(), term_id.into()),
            "delete_term",
        )?;
        self.with_glossary_mut(glossary_id, |g| {
            let before = g.terms.len();
            g.terms.retain(|t| t.id != term_id);
            g.terms.len() < before
        })?
        .then_some(())
        .ok_or_else(|| Self::not_found("Term"))
    }

    async fn upsert_terms(
        &self,
        glossary_id: &str,
        request: &UpsertTermsRequest,
    ) -> Result<UpsertSummary, ApiError> {
        self.record(
            Call::UpsertTerms(glossary_id.into(), request.terms.clone()),
            "upsert_terms",
        )?;
        let ids: Vec<String> = request.terms.iter().map(|_| self.fresh_id("t")).collect();
        self.with_glossary_mut(glossary_id, |g| {
            let mut summary = UpsertSummary::default();
            for (pair, id) in request.terms.iter().zip(ids) {
                match g.terms.iter_mut().find(|t| t.source == pair.source) {
                    Some(existing) => {
                        existing.target = pair.target.clone();
                        summary.updated += 1;
                    }
                    None => {
                        g.terms.push(Term {
                            id,
                            source: pair.source.clone(),
                            target: pair.target.clone(),
                        });
                        summary.created += 1;
                    }
                }
            }
            summary.total = summary.created + summary.updated;
            summary
        })
    }
}

#[async_trait(?Send)]
impl TranslationApi for FakeServer {
    type Upload = str;

    async fn upload_document(
        &self,
        file: &Self::Upload,
        _source_language: &str,
        _target_language: &str,
    ) -> Result<UploadedDocument, ApiError> {
        self.record(Call::Upload(file.to_string()), "upload_document")?;
        Ok(UploadedDocument {
            id: self.fresh_id("doc"),
            name: file.to_string(),
            size: 0,
            mime: String::new(),
            uploaded_at: None,
        })
    }

    async fn start_translation(
        &self,
        request: &StartTranslationRequest,
    ) -> Result<StartedJob, ApiError> {
        self.record(Call::Start(request.clone()), "start_translation")?;
        Ok(StartedJob {
            id: self.fresh_id("job"),
            status: JobStatus::Pending,
            submitted_at: None,
            target_document: None,
        })
    }

    async fn translation_status(&self, job_id: &str) -> Result<TranslationJob, ApiError> {
        self.record(Call::Status(job_id.into()), "translation_status")?;
        let mut statuses = self.statuses.borrow_mut();
        let next = if statuses.len() > 1 {
            statuses.pop_front()
        } else {
            statuses.front().cloned()
        };
        next.unwrap_or_else(|| Err(Self::not_found("Job")))
    }

    async fn cancel_translation(&self, job_id: &str) -> Result<(), ApiError> {
        self.record(Call::Cancel(job_id.into()), "cancel_translation")
    }

    async fn download_document(&self, document_id: &str) -> Result<Vec<u8>, ApiError> {
        self.record(Call::Download(document_id.into()), "download_document")?;
        Ok(b"translated".to_vec())
    }

    async fn translation_history(&self) -> Result<Vec<HistoryEntry>, ApiError> {
        self.record(Call::History, "translation_history")?;
        Ok(Vec::new())
    }
}

/// Sleeper that returns immediately and counts how often it was asked
#[derive(Default)]
pub struct CountingSleeper {
    pub sleeps: Cell<usize>,
    pub last: Cell<Option<Duration>>,
}

#[async_trait(?Send)]
impl Sleeper for CountingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.sleeps.set(self.sleeps.get() + 1);
        self.last.set(Some(duration));
    }
}

#[derive(Default)]
pub struct MemoryStore(pub RefCell<HashMap<String, String>>);

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.0.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.0.borrow_mut().insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.0.borrow_mut().remove(key);
    }
}

pub fn term(id: &str, source: &str, target: &str) -> Term {
    Term {
        id: id.into(),
        source: source.into(),
        target: target.into(),
    }
}

pub fn glossary(id: &str, name: &str, terms: Vec<Term>) -> Glossary {
    Glossary {
        id: id.into(),
        name: name.into(),
        description: String::new(),
        source_language: "en".into(),
        target_language: "vi".into(),
        term_count: terms.len() as u64,
        terms,
        created_at: None,
        updated_at: None,
    }
}

pub fn job(id: &str, status: JobStatus, progress: f64) -> TranslationJob {
    TranslationJob {
        id: id.into(),
        status,
        progress,
        source_language: "en".into(),
        target_language: "vi".into(),
        document_id: "doc-1".into(),
        target_document: (status == JobStatus::Completed).then(|| format!("{id}-out")),
        error_message: (status == JobStatus::Failed).then(|| "Translation engine error".into()),
    }
}
