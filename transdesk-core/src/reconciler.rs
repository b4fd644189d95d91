//! Glossary editing and save reconciliation
//!
//! The editor keeps a working copy of a glossary's terms with per-term flags
//! and turns it into the smallest set of remote calls on save. The server
//! stays authoritative: a successful save re-fetches the glossary and the
//! editor restarts from that copy.

use std::collections::HashMap;

use chrono::Utc;
use futures::future::join_all;
use thiserror::Error;

use crate::api::{
    CreateGlossaryRequest, GlossaryApi, TermPair, UpdateGlossaryRequest, UpsertTermsRequest,
};
use crate::error::{ApiError, AppError, ValidationError};
use crate::import::{dedupe_against, parse_term_lines, ImportSummary};
use crate::types::{Glossary, Term};

// ============================================================================
// Drafts
// ============================================================================

/// Working copy of one term
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermDraft {
    pub id: String,
    pub source: String,
    pub target: String,
    /// Not on the server yet; `id` is synthetic
    pub is_new: bool,
    /// Persisted term whose text changed
    pub is_edited: bool,
    /// Soft-deleted; stays listed until save
    pub is_deleted: bool,
    /// Text last known to be on the server; `None` for new terms
    baseline: Option<TermPair>,
}

impl TermDraft {
    fn persisted(term: &Term) -> Self {
        Self {
            id: term.id.clone(),
            source: term.source.clone(),
            target: term.target.clone(),
            is_new: false,
            is_edited: false,
            is_deleted: false,
            baseline: Some(TermPair {
                source: term.source.clone(),
                target: term.target.clone(),
            }),
        }
    }

    fn fresh(id: String, source: String, target: String) -> Self {
        Self {
            id,
            source,
            target,
            is_new: true,
            is_edited: false,
            is_deleted: false,
            baseline: None,
        }
    }

    pub fn is_valid(&self) -> bool {
        !self.source.trim().is_empty() && !self.target.trim().is_empty()
    }

    /// Text differs from the server copy, ignoring surrounding whitespace.
    fn differs_from_baseline(&self) -> bool {
        self.baseline.as_ref().is_some_and(|base| {
            self.source.trim() != base.source.trim() || self.target.trim() != base.target.trim()
        })
    }

    fn label(&self) -> String {
        [self.source.trim(), self.target.trim()]
            .into_iter()
            .chain(self.baseline.as_ref().map(|b| b.source.trim()))
            .find(|text| !text.is_empty())
            .unwrap_or(self.id.as_str())
            .to_string()
    }

    fn pair(&self) -> TermPair {
        TermPair {
            source: self.source.trim().to_string(),
            target: self.target.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermField {
    Source,
    Target,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Edit { glossary_id: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GlossaryMetadata {
    pub name: String,
    pub description: String,
    pub source_language: String,
    pub target_language: String,
}

// ============================================================================
// Save plan
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveTarget {
    Existing { glossary_id: String },
    Create(CreateGlossaryRequest),
}

/// Remote calls a save will make, in execution order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavePlan {
    pub target: SaveTarget,
    pub metadata_update: Option<UpdateGlossaryRequest>,
    pub deletes: Vec<String>,
    pub creates: Vec<TermPair>,
    pub updates: Vec<(String, TermPair)>,
}

impl SavePlan {
    /// True when saving an existing glossary would only re-fetch it.
    pub fn is_empty(&self) -> bool {
        matches!(self.target, SaveTarget::Existing { .. })
            && self.metadata_update.is_none()
            && self.deletes.is_empty()
            && self.creates.is_empty()
            && self.updates.is_empty()
    }
}

/// Remote steps of a plan that reached the server
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveProgress {
    /// Id of the glossary this save created
    pub created: Option<String>,
    /// Name and description the server now holds
    pub metadata: Option<UpdateGlossaryRequest>,
    /// Term ids deleted on the server
    pub deleted: Vec<String>,
    /// The batched upsert of new terms went through
    pub upserted: bool,
    /// Term updates applied, with the text sent
    pub updated: Vec<(String, TermPair)>,
}

/// A save stopped part way; `progress` lists what was applied before `error`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{error}")]
pub struct SaveFailure {
    pub progress: SaveProgress,
    pub error: ApiError,
}

/// Run a plan: metadata, deletes, one batched upsert, updates, then re-fetch.
///
/// The first failing step stops the sequence. Steps already applied stay
/// applied and are reported in the failure.
pub async fn execute_plan<A>(api: &A, plan: SavePlan) -> Result<Glossary, SaveFailure>
where
    A: GlossaryApi + ?Sized,
{
    let mut progress = SaveProgress::default();
    match run_plan(api, plan, &mut progress).await {
        Ok(glossary) => Ok(glossary),
        Err(error) => {
            tracing::warn!(
                created = ?progress.created,
                deleted = progress.deleted.len(),
                upserted = progress.upserted,
                updated = progress.updated.len(),
                "Glossary save failed part way: {error}"
            );
            Err(SaveFailure { progress, error })
        }
    }
}

async fn run_plan<A>(
    api: &A,
    plan: SavePlan,
    progress: &mut SaveProgress,
) -> Result<Glossary, ApiError>
where
    A: GlossaryApi + ?Sized,
{
    let glossary_id = match plan.target {
        SaveTarget::Existing { glossary_id } => {
            if let Some(update) = plan.metadata_update {
                api.update_glossary(&glossary_id, &update).await?;
                progress.metadata = Some(update);
            }
            glossary_id
        }
        SaveTarget::Create(request) => {
            let created = api.create_glossary(&request).await?;
            if created.id.is_empty() {
                return Err(ApiError::Decode("created glossary has no id".into()));
            }
            progress.created = Some(created.id.clone());
            progress.metadata = Some(UpdateGlossaryRequest {
                name: request.name,
                description: request.description,
            });
            created.id
        }
    };
    let id = glossary_id.as_str();

    let deletes = join_all(plan.deletes.into_iter().map(|term_id| async move {
        api.delete_term(id, &term_id).await?;
        Ok::<_, ApiError>(term_id)
    }))
    .await;
    settle(deletes, &mut progress.deleted)?;

    if !plan.creates.is_empty() {
        let summary = api
            .upsert_terms(id, &UpsertTermsRequest { terms: plan.creates })
            .await?;
        progress.upserted = true;
        tracing::debug!(
            glossary_id = %id,
            created = summary.created,
            updated = summary.updated,
            "Upserted terms"
        );
    }

    let updates = join_all(plan.updates.into_iter().map(|(term_id, pair)| async move {
        api.update_term(id, &term_id, &pair).await?;
        Ok::<_, ApiError>((term_id, pair))
    }))
    .await;
    settle(updates, &mut progress.updated)?;

    api.get_glossary(id).await
}

/// Record every call that succeeded, then surface the first failure.
fn settle<T>(results: Vec<Result<T, ApiError>>, applied: &mut Vec<T>) -> Result<(), ApiError> {
    let mut first_error = None;
    for result in results {
        match result {
            Ok(done) => applied.push(done),
            Err(e) => {
                first_error.get_or_insert(e);
            }
        }
    }
    first_error.map_or(Ok(()), Err)
}

// ============================================================================
// Editor
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct GlossaryEditor {
    mode: EditorMode,
    original: GlossaryMetadata,
    pub metadata: GlossaryMetadata,
    terms: Vec<TermDraft>,
    saving: bool,
    last_stamp: i64,
}

impl GlossaryEditor {
    pub fn create(source_language: &str, target_language: &str) -> Self {
        let metadata = GlossaryMetadata {
            source_language: source_language.to_string(),
            target_language: target_language.to_string(),
            ..GlossaryMetadata::default()
        };
        Self {
            mode: EditorMode::Create,
            original: metadata.clone(),
            metadata,
            terms: Vec::new(),
            saving: false,
            last_stamp: 0,
        }
    }

    pub fn edit(glossary: &Glossary) -> Self {
        let metadata = GlossaryMetadata {
            name: glossary.name.clone(),
            description: glossary.description.clone(),
            source_language: glossary.source_language.clone(),
            target_language: glossary.target_language.clone(),
        };
        Self {
            mode: EditorMode::Edit {
                glossary_id: glossary.id.clone(),
            },
            original: metadata.clone(),
            metadata,
            terms: glossary.terms.iter().map(TermDraft::persisted).collect(),
            saving: false,
            last_stamp: 0,
        }
    }

    pub fn mode(&self) -> &EditorMode {
        &self.mode
    }

    pub fn is_create(&self) -> bool {
        matches!(self.mode, EditorMode::Create)
    }

    pub fn terms(&self) -> &[TermDraft] {
        &self.terms
    }

    pub fn term(&self, id: &str) -> Option<&TermDraft> {
        self.terms.iter().find(|t| t.id == id)
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    fn next_stamp(&mut self) -> i64 {
        let now = Utc::now().timestamp_millis();
        self.last_stamp = now.max(self.last_stamp + 1);
        self.last_stamp
    }

    fn live_sources(&self) -> impl Iterator<Item = &str> {
        self.terms
            .iter()
            .filter(|t| !t.is_deleted)
            .map(|t| t.source.trim())
    }

    // ── Term operations ────────────────────────────────────────────────

    /// Append a new term and return its synthetic id.
    pub fn add_term(&mut self, source: &str, target: &str) -> Result<String, ValidationError> {
        let source = source.trim();
        if source.is_empty() {
            return Err(ValidationError::EmptySource);
        }
        if self.live_sources().any(|existing| existing == source) {
            return Err(ValidationError::DuplicateTerm(source.to_string()));
        }
        let target = match target.trim() {
            "" => source,
            t => t,
        };
        let id = format!("new-{}", self.next_stamp());
        self.terms
            .push(TermDraft::fresh(id.clone(), source.to_string(), target.to_string()));
        Ok(id)
    }

    pub fn edit_term(
        &mut self,
        id: &str,
        field: TermField,
        value: &str,
    ) -> Result<(), ValidationError> {
        let term = self
            .terms
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| ValidationError::UnknownTerm(id.to_string()))?;
        let slot = match field {
            TermField::Source => &mut term.source,
            TermField::Target => &mut term.target,
        };
        if slot.as_str() == value {
            return Ok(());
        }
        *slot = value.to_string();
        term.is_edited = term.differs_from_baseline();
        Ok(())
    }

    /// Flip the soft-delete flag; returns whether the term is now deleted.
    pub fn toggle_deleted(&mut self, id: &str) -> Result<bool, ValidationError> {
        let term = self
            .terms
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| ValidationError::UnknownTerm(id.to_string()))?;
        term.is_deleted = !term.is_deleted;
        Ok(term.is_deleted)
    }

    /// Soft-delete every listed term, or restore them all when every one is
    /// already deleted. Returns whether the terms are now deleted.
    ///
    /// Unknown ids reject the whole call without touching any term.
    pub fn toggle_deleted_many(&mut self, ids: &[String]) -> Result<bool, ValidationError> {
        if let Some(missing) = ids.iter().find(|id| self.term(id).is_none()) {
            return Err(ValidationError::UnknownTerm(missing.clone()));
        }
        let delete = self
            .terms
            .iter()
            .any(|t| !t.is_deleted && ids.contains(&t.id));
        for term in self.terms.iter_mut().filter(|t| ids.contains(&t.id)) {
            term.is_deleted = delete;
        }
        Ok(delete)
    }

    /// True when `ids` covers every active term and there is at least one.
    pub fn selects_all_active(&self, ids: &[String]) -> bool {
        let mut active = self.terms.iter().filter(|t| !t.is_deleted).peekable();
        active.peek().is_some() && active.all(|t| ids.contains(&t.id))
    }

    /// Soft-delete every active term; returns how many were marked.
    pub fn delete_all(&mut self) -> usize {
        let mut marked = 0;
        for term in self.terms.iter_mut().filter(|t| !t.is_deleted) {
            term.is_deleted = true;
            marked += 1;
        }
        marked
    }

    /// Add pairs parsed from pasted or uploaded text.
    pub fn import(&mut self, content: &str) -> Result<ImportSummary, ValidationError> {
        let parsed = parse_term_lines(content);
        if parsed.is_empty() {
            return Err(ValidationError::EmptyImport);
        }
        let total = parsed.len();
        let existing: Vec<String> = self.live_sources().map(str::to_string).collect();
        let (accepted, summary) = dedupe_against(parsed, existing.iter().map(String::as_str));
        if accepted.is_empty() {
            return Err(ValidationError::AllDuplicates(total));
        }

        for pair in accepted {
            let stamp = self.next_stamp();
            let suffix: String = uuid::Uuid::new_v4().simple().to_string().chars().take(9).collect();
            self.terms.push(TermDraft::fresh(
                format!("imported-{stamp}-{suffix}"),
                pair.source,
                pair.target,
            ));
        }
        Ok(summary)
    }

    // ── Queries ────────────────────────────────────────────────────────

    /// Terms whose source or target contains `query`, ignoring case.
    pub fn search(&self, query: &str) -> Vec<&TermDraft> {
        let needle = query.trim().to_lowercase();
        self.terms
            .iter()
            .filter(|t| {
                needle.is_empty()
                    || t.source.to_lowercase().contains(&needle)
                    || t.target.to_lowercase().contains(&needle)
            })
            .collect()
    }

    pub fn active_count(&self) -> usize {
        self.terms.iter().filter(|t| !t.is_deleted).count()
    }

    pub fn deleted_count(&self) -> usize {
        self.terms.iter().filter(|t| t.is_deleted).count()
    }

    pub fn metadata_changed(&self) -> bool {
        self.metadata.name.trim() != self.original.name.trim()
            || self.metadata.description.trim() != self.original.description.trim()
    }

    pub fn has_changes(&self) -> bool {
        self.metadata_changed()
            || self.terms.iter().any(|t| {
                (t.is_new && !t.is_deleted) || (!t.is_new && (t.is_edited || t.is_deleted))
            })
    }

    /// Sources listed more than once among non-deleted terms.
    pub fn duplicate_sources(&self) -> Vec<String> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        let mut order = Vec::new();
        for source in self.live_sources().filter(|s| !s.is_empty()) {
            let count = counts.entry(source).or_insert(0);
            *count += 1;
            if *count == 2 {
                order.push(source.to_string());
            }
        }
        order
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.metadata.name.trim().is_empty() {
            return Err(ValidationError::MissingName);
        }
        if self.metadata.source_language.trim().is_empty()
            || self.metadata.target_language.trim().is_empty()
        {
            return Err(ValidationError::MissingLanguages);
        }
        if let Some(incomplete) = self
            .terms
            .iter()
            .find(|t| !t.is_deleted && (t.is_new || t.is_edited) && !t.is_valid())
        {
            return Err(ValidationError::IncompleteTerm(incomplete.label()));
        }
        if self.is_create() {
            if !self.terms.iter().any(|t| !t.is_deleted && t.is_valid()) {
                return Err(ValidationError::NoValidTerms);
            }
            let duplicates = self.duplicate_sources();
            if !duplicates.is_empty() {
                return Err(ValidationError::DuplicateSources(duplicates));
            }
        }
        Ok(())
    }

    pub fn can_save(&self) -> bool {
        !self.saving && self.validate().is_ok()
    }

    /// Calls the current state would produce, without validation.
    pub fn plan(&self) -> SavePlan {
        let target = match &self.mode {
            EditorMode::Edit { glossary_id } => SaveTarget::Existing {
                glossary_id: glossary_id.clone(),
            },
            EditorMode::Create => SaveTarget::Create(CreateGlossaryRequest {
                name: self.metadata.name.trim().to_string(),
                description: self.metadata.description.trim().to_string(),
                source_language: self.metadata.source_language.clone(),
                target_language: self.metadata.target_language.clone(),
            }),
        };
        let metadata_update = (!self.is_create() && self.metadata_changed()).then(|| {
            UpdateGlossaryRequest {
                name: self.metadata.name.trim().to_string(),
                description: self.metadata.description.trim().to_string(),
            }
        });

        SavePlan {
            target,
            metadata_update,
            deletes: self
                .terms
                .iter()
                .filter(|t| t.is_deleted && !t.is_new)
                .map(|t| t.id.clone())
                .collect(),
            creates: self
                .terms
                .iter()
                .filter(|t| t.is_new && !t.is_deleted)
                .map(TermDraft::pair)
                .collect(),
            updates: self
                .terms
                .iter()
                .filter(|t| t.is_edited && !t.is_new && !t.is_deleted)
                .map(|t| (t.id.clone(), t.pair()))
                .collect(),
        }
    }

    // ── Saving ─────────────────────────────────────────────────────────

    /// Validate, raise the saving guard and hand out the plan to execute.
    pub fn begin_save(&mut self) -> Result<SavePlan, ValidationError> {
        if self.saving {
            return Err(ValidationError::SaveInProgress);
        }
        self.validate()?;
        self.saving = true;
        Ok(self.plan())
    }

    /// Settle a save started with [`begin_save`](Self::begin_save).
    ///
    /// On success the editor restarts from the re-fetched glossary. On failure
    /// the steps that reached the server are folded in so a retry only sends
    /// what is still missing: a created glossary switches the editor to edit
    /// mode and applied deletes drop their drafts. New terms keep their flag
    /// because the upsert is keyed by source and can be sent again.
    pub fn finish_save(&mut self, outcome: Result<&Glossary, &SaveProgress>) {
        let progress = match outcome {
            Ok(glossary) => {
                *self = Self::edit(glossary);
                return;
            }
            Err(progress) => progress,
        };
        self.saving = false;

        if let Some(glossary_id) = &progress.created {
            self.mode = EditorMode::Edit {
                glossary_id: glossary_id.clone(),
            };
            self.original.source_language = self.metadata.source_language.clone();
            self.original.target_language = self.metadata.target_language.clone();
        }
        if let Some(applied) = &progress.metadata {
            self.original.name = applied.name.clone();
            self.original.description = applied.description.clone();
        }
        self.terms
            .retain(|t| !(t.is_deleted && !t.is_new && progress.deleted.contains(&t.id)));
        for (term_id, pair) in &progress.updated {
            if let Some(term) = self.terms.iter_mut().find(|t| &t.id == term_id) {
                term.baseline = Some(pair.clone());
                term.is_edited = term.differs_from_baseline();
            }
        }
    }

    pub async fn save<A>(&mut self, api: &A) -> Result<Glossary, AppError>
    where
        A: GlossaryApi + ?Sized,
    {
        let plan = self.begin_save()?;
        let result = execute_plan(api, plan).await;
        self.finish_save(result.as_ref().map_err(|failure| &failure.progress));
        result.map_err(|failure| AppError::Api(failure.error))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn legal() -> Glossary {
        Glossary {
            id: "g1".into(),
            name: "Legal".into(),
            description: "Contracts".into(),
            source_language: "en".into(),
            target_language: "vi".into(),
            term_count: 2,
            terms: vec![
                Term {
                    id: "t1".into(),
                    source: "Contract".into(),
                    target: "Hợp đồng".into(),
                },
                Term {
                    id: "t2".into(),
                    source: "Party".into(),
                    target: "Bên".into(),
                },
            ],
            ..Glossary::default()
        }
    }

    #[test]
    fn test_duplicate_add_is_rejected_without_mutation() {
        let mut editor = GlossaryEditor::edit(&legal());
        let before = editor.clone();
        assert_eq!(
            editor.add_term("  Contract ", "x"),
            Err(ValidationError::DuplicateTerm("Contract".into()))
        );
        assert_eq!(editor, before);

        // Case differs, so it is a distinct source
        assert!(editor.add_term("contract", "").is_ok());
        assert_eq!(editor.terms().last().unwrap().target, "contract");
    }

    #[test]
    fn test_deleted_source_can_be_added_again() {
        let mut editor = GlossaryEditor::edit(&legal());
        editor.toggle_deleted("t1").unwrap();
        assert!(editor.add_term("Contract", "Khế ước").is_ok());
    }

    #[test]
    fn test_synthetic_ids_are_unique() {
        let mut editor = GlossaryEditor::create("en", "vi");
        let a = editor.add_term("a", "b").unwrap();
        let b = editor.add_term("c", "d").unwrap();
        assert!(a.starts_with("new-"));
        assert_ne!(a, b);
    }

    #[test]
    fn test_delete_then_undo_restores_term() {
        let mut editor = GlossaryEditor::edit(&legal());
        let before = editor.term("t2").cloned();
        assert!(editor.toggle_deleted("t2").unwrap());
        assert_eq!(editor.deleted_count(), 1);
        assert!(editor.has_changes());
        assert!(!editor.toggle_deleted("t2").unwrap());
        assert_eq!(editor.term("t2").cloned(), before);
        assert!(!editor.has_changes());
        assert!(editor.plan().is_empty());
    }

    #[test]
    fn test_edit_flags() {
        let mut editor = GlossaryEditor::edit(&legal());
        editor.edit_term("t1", TermField::Target, "Khế ước").unwrap();
        assert!(editor.term("t1").unwrap().is_edited);

        let id = editor.add_term("Clause", "Điều khoản").unwrap();
        editor.edit_term(&id, TermField::Target, "Điều").unwrap();
        let draft = editor.term(&id).unwrap();
        assert!(draft.is_new);
        assert!(!draft.is_edited);

        editor.edit_term("t2", TermField::Source, "Party").unwrap();
        assert!(!editor.term("t2").unwrap().is_edited);

        assert_eq!(
            editor.edit_term("missing", TermField::Source, "x"),
            Err(ValidationError::UnknownTerm("missing".into()))
        );
    }

    #[test]
    fn test_restoring_original_text_clears_edited() {
        let mut editor = GlossaryEditor::edit(&legal());
        editor.edit_term("t1", TermField::Target, "Khế ước").unwrap();
        assert!(editor.has_changes());

        editor.edit_term("t1", TermField::Target, "Hợp đồng").unwrap();
        assert!(!editor.term("t1").unwrap().is_edited);
        assert!(!editor.has_changes());
        assert!(editor.plan().updates.is_empty());

        editor.edit_term("t1", TermField::Source, "Contract ").unwrap();
        assert!(!editor.term("t1").unwrap().is_edited);
    }

    #[test]
    fn test_incomplete_terms_block_save_in_both_modes() {
        let mut editor = GlossaryEditor::edit(&legal());
        let id = editor.add_term("Witness", "Nhân chứng").unwrap();
        editor.edit_term(&id, TermField::Target, "  ").unwrap();
        assert_eq!(
            editor.validate(),
            Err(ValidationError::IncompleteTerm("Witness".into()))
        );
        editor.toggle_deleted(&id).unwrap();
        assert!(editor.validate().is_ok());

        editor.edit_term("t2", TermField::Source, "").unwrap();
        assert_eq!(
            editor.validate(),
            Err(ValidationError::IncompleteTerm("Bên".into()))
        );

        let mut fresh = GlossaryEditor::create("en", "vi");
        fresh.metadata.name = "Legal".into();
        fresh.add_term("Contract", "Hợp đồng").unwrap();
        let party = fresh.add_term("Party", "Bên").unwrap();
        fresh.edit_term(&party, TermField::Target, "").unwrap();
        assert_eq!(
            fresh.validate(),
            Err(ValidationError::IncompleteTerm("Party".into()))
        );
        assert!(!fresh.can_save());
    }

    #[test]
    fn test_bulk_delete_and_restore() {
        let mut editor = GlossaryEditor::edit(&legal());
        let clause = editor.add_term("Clause", "Điều khoản").unwrap();

        let picked = vec!["t1".to_string(), clause.clone()];
        assert!(!editor.selects_all_active(&picked));
        assert_eq!(editor.toggle_deleted_many(&picked), Ok(true));
        assert!(editor.selects_all_active(&["t2".to_string()]));
        assert_eq!(editor.deleted_count(), 2);
        assert_eq!(editor.plan().deletes, vec!["t1"]);
        assert!(editor.plan().creates.is_empty());

        // Mixed selection deletes the rest rather than flipping each term
        let mixed = vec!["t1".to_string(), "t2".to_string()];
        assert_eq!(editor.toggle_deleted_many(&mixed), Ok(true));
        assert_eq!(editor.active_count(), 0);

        assert_eq!(editor.toggle_deleted_many(&mixed), Ok(false));
        assert_eq!(editor.active_count(), 2);

        let before = editor.clone();
        assert_eq!(
            editor.toggle_deleted_many(&["t1".to_string(), "gone".to_string()]),
            Err(ValidationError::UnknownTerm("gone".into()))
        );
        assert_eq!(editor, before);
    }

    #[test]
    fn test_delete_all_marks_only_active_terms() {
        let mut editor = GlossaryEditor::edit(&legal());
        editor.add_term("Clause", "Điều khoản").unwrap();
        editor.toggle_deleted("t2").unwrap();

        assert_eq!(editor.delete_all(), 2);
        assert_eq!(editor.active_count(), 0);
        assert!(!editor.selects_all_active(&[]));
        let plan = editor.plan();
        assert_eq!(plan.deletes, vec!["t1", "t2"]);
        assert!(plan.creates.is_empty());
        assert_eq!(editor.delete_all(), 0);
    }

    #[test]
    fn test_failed_save_folds_in_applied_steps() {
        let mut editor = GlossaryEditor::create("en", "vi");
        editor.metadata.name = "Legal".into();
        editor.add_term("Contract", "Hợp đồng").unwrap();
        editor.begin_save().unwrap();

        editor.finish_save(Err(&SaveProgress {
            created: Some("g9".into()),
            metadata: Some(UpdateGlossaryRequest {
                name: "Legal".into(),
                description: String::new(),
            }),
            ..SaveProgress::default()
        }));

        assert_eq!(
            editor.mode(),
            &EditorMode::Edit {
                glossary_id: "g9".into()
            }
        );
        assert!(!editor.is_saving());
        assert!(!editor.metadata_changed());
        let plan = editor.plan();
        assert_eq!(
            plan.target,
            SaveTarget::Existing {
                glossary_id: "g9".into()
            }
        );
        assert_eq!(plan.creates.len(), 1);
    }

    #[test]
    fn test_plan_buckets() {
        let mut editor = GlossaryEditor::edit(&legal());
        editor.metadata.description = "Contracts and agreements".into();
        editor.edit_term("t1", TermField::Target, "Khế ước").unwrap();
        editor.toggle_deleted("t2").unwrap();
        editor.add_term("Clause", "Điều khoản").unwrap();
        let dropped = editor.add_term("Draft", "Bản nháp").unwrap();
        editor.toggle_deleted(&dropped).unwrap();

        let plan = editor.plan();
        assert_eq!(
            plan.metadata_update,
            Some(UpdateGlossaryRequest {
                name: "Legal".into(),
                description: "Contracts and agreements".into(),
            })
        );
        assert_eq!(plan.deletes, vec!["t2"]);
        assert_eq!(plan.creates.len(), 1);
        assert_eq!(plan.creates[0].source, "Clause");
        assert_eq!(plan.updates.len(), 1);
        assert_eq!(plan.updates[0].0, "t1");
    }

    #[test]
    fn test_create_mode_validation() {
        let mut editor = GlossaryEditor::create("en", "vi");
        assert_eq!(editor.validate(), Err(ValidationError::MissingName));

        editor.metadata.name = "Legal".into();
        assert_eq!(editor.validate(), Err(ValidationError::NoValidTerms));

        editor.add_term("Contract", "Hợp đồng").unwrap();
        editor.add_term("Party", "Bên").unwrap();
        let second = editor.terms()[1].id.clone();
        editor
            .edit_term(&second, TermField::Source, "Contract")
            .unwrap();
        assert_eq!(
            editor.validate(),
            Err(ValidationError::DuplicateSources(vec!["Contract".into()]))
        );

        editor.toggle_deleted(&second).unwrap();
        assert!(editor.can_save());

        editor.metadata.target_language.clear();
        assert_eq!(editor.validate(), Err(ValidationError::MissingLanguages));
    }

    #[test]
    fn test_saving_guard() {
        let mut editor = GlossaryEditor::edit(&legal());
        editor.begin_save().unwrap();
        assert!(!editor.can_save());
        assert_eq!(editor.begin_save(), Err(ValidationError::SaveInProgress));
        editor.finish_save(Err(&SaveProgress::default()));
        assert!(editor.begin_save().is_ok());
    }

    #[test]
    fn test_import_skips_duplicates() {
        let mut editor = GlossaryEditor::edit(&legal());
        let summary = editor
            .import("contract, hợp đồng\nClause | Điều khoản\nclause, điều\nWitness")
            .unwrap();
        assert_eq!(
            summary,
            ImportSummary {
                imported: 2,
                skipped: 2
            }
        );
        let added: Vec<_> = editor.terms().iter().filter(|t| t.is_new).collect();
        assert_eq!(added.len(), 2);
        assert!(added.iter().all(|t| t.id.starts_with("imported-")));
        assert_eq!(added[1].target, "Witness");
    }

    #[test]
    fn test_import_errors() {
        let mut editor = GlossaryEditor::edit(&legal());
        assert_eq!(editor.import("\n  \n"), Err(ValidationError::EmptyImport));
        assert_eq!(
            editor.import("CONTRACT, x\nparty | y"),
            Err(ValidationError::AllDuplicates(2))
        );
        assert_eq!(editor.terms().len(), 2);
    }

    #[test]
    fn test_search_and_counts() {
        let mut editor = GlossaryEditor::edit(&legal());
        editor.add_term("Counterparty", "Đối tác").unwrap();
        assert_eq!(editor.search("PARTY").len(), 2);
        assert_eq!(editor.search("hợp").len(), 1);
        assert_eq!(editor.search("").len(), 3);
        assert_eq!(editor.active_count(), 3);
    }
}
