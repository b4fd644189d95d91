//! Glossary selection and term conflict detection
//!
//! A candidate glossary conflicts with the current selection when one of its
//! source terms (trimmed, case-sensitive) already appears in a selected
//! glossary. Conflicting candidates are held as pending until the user
//! includes or excludes them.

use std::collections::{HashMap, HashSet};

use crate::api::GlossaryApi;
use crate::config::MAX_SELECTED_GLOSSARIES;
use crate::error::{ApiError, AppError, ValidationError};
use crate::types::{Glossary, Term};

/// Examples listed in a conflict prompt
pub const CONFLICT_EXAMPLE_LIMIT: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct SelectedGlossary {
    pub id: String,
    pub name: String,
    pub terms: Vec<Term>,
}

impl From<Glossary> for SelectedGlossary {
    fn from(glossary: Glossary) -> Self {
        Self {
            id: glossary.id,
            name: glossary.name,
            terms: glossary.terms,
        }
    }
}

/// What the user is asked to confirm
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictDescriptor {
    pub glossary_id: String,
    pub glossary_name: String,
    /// Distinct candidate sources already present in the selection
    pub count: usize,
    pub examples: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionOutcome {
    Added { color_index: usize },
    Conflict(ConflictDescriptor),
    /// The fetch was abandoned (selection cleared) before it returned
    Abandoned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictDecision {
    Include,
    Exclude,
}

/// Count the candidate sources that collide with `selected`.
///
/// Returns the number of distinct colliding sources and the first few of them
/// in candidate order.
pub fn find_conflicts<'a, I>(candidate: &[Term], selected: I) -> (usize, Vec<String>)
where
    I: IntoIterator<Item = &'a Term>,
{
    let existing: HashSet<&str> = selected.into_iter().map(|t| t.source.trim()).collect();
    let mut seen = HashSet::new();
    let mut examples = Vec::new();

    for term in candidate {
        let source = term.source.trim();
        if existing.contains(source) && seen.insert(source) && examples.len() < CONFLICT_EXAMPLE_LIMIT {
            examples.push(source.to_string());
        }
    }
    (seen.len(), examples)
}

#[derive(Debug, Clone, PartialEq)]
pub struct GlossarySelection {
    selected: Vec<SelectedGlossary>,
    pending: Option<(SelectedGlossary, ConflictDescriptor)>,
    /// Glossary whose terms are being fetched
    fetching: Option<String>,
    max: usize,
}

impl Default for GlossarySelection {
    fn default() -> Self {
        Self::new(MAX_SELECTED_GLOSSARIES)
    }
}

impl GlossarySelection {
    pub fn new(max: usize) -> Self {
        Self {
            selected: Vec::new(),
            pending: None,
            fetching: None,
            max,
        }
    }

    pub fn selected(&self) -> &[SelectedGlossary] {
        &self.selected
    }

    pub fn ids(&self) -> Vec<String> {
        self.selected.iter().map(|g| g.id.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.selected.len() >= self.max
    }

    pub fn contains(&self, id: &str) -> bool {
        self.selected.iter().any(|g| g.id == id)
    }

    pub fn pending(&self) -> Option<&ConflictDescriptor> {
        self.pending.as_ref().map(|(_, descriptor)| descriptor)
    }

    pub fn fetching(&self) -> Option<&str> {
        self.fetching.as_deref()
    }

    /// Position in the selection, used to pick a highlight colour.
    pub fn color_index(&self, id: &str) -> Option<usize> {
        self.selected.iter().position(|g| g.id == id)
    }

    /// Refuse a selection before anything is fetched for it.
    pub fn check_capacity(&self, id: &str) -> Result<(), ValidationError> {
        if self.pending.is_some() {
            return Err(ValidationError::ConflictPending);
        }
        if self.contains(id) {
            return Err(ValidationError::AlreadySelected);
        }
        if self.is_full() {
            return Err(ValidationError::SelectionFull(self.max));
        }
        Ok(())
    }

    /// Add a fetched glossary, or hold it pending when its terms collide.
    pub fn propose(
        &mut self,
        candidate: SelectedGlossary,
    ) -> Result<SelectionOutcome, ValidationError> {
        self.check_capacity(&candidate.id)?;

        let (count, examples) = find_conflicts(
            &candidate.terms,
            self.selected.iter().flat_map(|g| g.terms.iter()),
        );
        if count == 0 {
            self.selected.push(candidate);
            return Ok(SelectionOutcome::Added {
                color_index: self.selected.len() - 1,
            });
        }

        let descriptor = ConflictDescriptor {
            glossary_id: candidate.id.clone(),
            glossary_name: candidate.name.clone(),
            count,
            examples,
        };
        tracing::debug!(
            glossary_id = %descriptor.glossary_id,
            conflicts = count,
            "Glossary selection awaiting confirmation"
        );
        self.pending = Some((candidate, descriptor.clone()));
        Ok(SelectionOutcome::Conflict(descriptor))
    }

    /// Mark `id` as being fetched. One fetch runs at a time; the selection
    /// itself stays editable meanwhile.
    pub fn begin_fetch(&mut self, id: &str) -> Result<(), ValidationError> {
        if self.fetching.is_some() {
            return Err(ValidationError::SelectionBusy);
        }
        self.check_capacity(id)?;
        self.fetching = Some(id.to_string());
        Ok(())
    }

    /// Apply a fetch started with [`begin_fetch`](Self::begin_fetch) to the
    /// selection as it is now. Capacity and conflicts are checked again.
    pub fn finish_fetch(
        &mut self,
        id: &str,
        fetched: Result<Glossary, ApiError>,
    ) -> Result<SelectionOutcome, AppError> {
        if self.fetching.as_deref() != Some(id) {
            tracing::debug!(glossary_id = id, "Dropping glossary fetched for an abandoned pick");
            return Ok(SelectionOutcome::Abandoned);
        }
        self.fetching = None;
        let glossary = fetched?;
        Ok(self.propose(glossary.into())?)
    }

    /// Forget an in-flight fetch, e.g. when the view that started it is gone.
    pub fn abandon_fetch(&mut self) {
        self.fetching = None;
    }

    /// Settle the pending candidate. Returns its colour index when included.
    pub fn resolve(&mut self, decision: ConflictDecision) -> Option<usize> {
        let (candidate, _) = self.pending.take()?;
        match decision {
            ConflictDecision::Include => {
                self.selected.push(candidate);
                Some(self.selected.len() - 1)
            }
            ConflictDecision::Exclude => None,
        }
    }

    /// Drop a glossary from the selection. Remaining ones are not re-checked.
    pub fn deselect(&mut self, id: &str) -> bool {
        let before = self.selected.len();
        self.selected.retain(|g| g.id != id);
        before != self.selected.len()
    }

    /// Re-hydrate a selection that was confirmed earlier.
    pub fn restore(&mut self, glossaries: Vec<SelectedGlossary>) {
        self.pending = None;
        self.selected = glossaries.into_iter().take(self.max).collect();
    }

    pub fn clear(&mut self) {
        self.selected.clear();
        self.pending = None;
        self.fetching = None;
    }

    /// Effective terms across the selection; a later glossary overrides an
    /// earlier one for the same source. Selection data is not touched.
    pub fn merged_terms(&self) -> Vec<Term> {
        let mut order: Vec<String> = Vec::new();
        let mut winners: HashMap<String, Term> = HashMap::new();
        for term in self.selected.iter().flat_map(|g| g.terms.iter()) {
            let key = term.source.trim().to_string();
            if !winners.contains_key(&key) {
                order.push(key.clone());
            }
            winners.insert(key, term.clone());
        }
        order
            .into_iter()
            .filter_map(|key| winners.remove(&key))
            .collect()
    }
}

/// Fetch a glossary and propose it, refusing early when the selection is full.
pub async fn select_glossary<A>(
    selection: &mut GlossarySelection,
    api: &A,
    glossary_id: &str,
) -> Result<SelectionOutcome, AppError>
where
    A: GlossaryApi + ?Sized,
{
    selection.begin_fetch(glossary_id)?;
    let fetched = api.get_glossary(glossary_id).await;
    selection.finish_fetch(glossary_id, fetched)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn term(id: &str, source: &str, target: &str) -> Term {
        Term {
            id: id.into(),
            source: source.into(),
            target: target.into(),
        }
    }

    fn glossary(id: &str, sources: &[&str]) -> SelectedGlossary {
        SelectedGlossary {
            id: id.into(),
            name: format!("Glossary {id}"),
            terms: sources
                .iter()
                .enumerate()
                .map(|(i, s)| term(&format!("{id}-{i}"), s, &format!("{s} ({id})")))
                .collect(),
        }
    }

    #[test]
    fn test_disjoint_glossaries_have_no_conflicts() {
        let mut selection = GlossarySelection::default();
        assert_eq!(
            selection.propose(glossary("a", &["contract", "party"])).unwrap(),
            SelectionOutcome::Added { color_index: 0 }
        );
        assert_eq!(
            selection.propose(glossary("b", &["invoice", "Contract"])).unwrap(),
            SelectionOutcome::Added { color_index: 1 }
        );
        assert!(selection.pending().is_none());
    }

    #[test]
    fn test_conflict_count_is_exact() {
        let mut selection = GlossarySelection::default();
        selection
            .propose(glossary("a", &["alpha", "beta", "gamma", "delta"]))
            .unwrap();

        let outcome = selection
            .propose(glossary("b", &[" alpha ", "beta", "gamma", "delta", "epsilon", "beta"]))
            .unwrap();
        let SelectionOutcome::Conflict(descriptor) = outcome else {
            panic!("expected a conflict");
        };
        assert_eq!(descriptor.count, 4);
        assert_eq!(descriptor.examples, vec!["alpha", "beta", "gamma"]);
        assert_eq!(selection.len(), 1);
    }

    #[test]
    fn test_include_and_exclude() {
        let mut selection = GlossarySelection::default();
        selection.propose(glossary("a", &["x"])).unwrap();

        selection.propose(glossary("b", &["x"])).unwrap();
        assert_eq!(
            selection.check_capacity("c"),
            Err(ValidationError::ConflictPending)
        );
        assert_eq!(selection.resolve(ConflictDecision::Exclude), None);
        assert_eq!(selection.ids(), vec!["a"]);

        selection.propose(glossary("b", &["x"])).unwrap();
        assert_eq!(selection.resolve(ConflictDecision::Include), Some(1));
        assert_eq!(selection.ids(), vec!["a", "b"]);
        assert_eq!(selection.resolve(ConflictDecision::Include), None);
    }

    #[test]
    fn test_capacity_limit() {
        let mut selection = GlossarySelection::default();
        for i in 0..5 {
            selection
                .propose(glossary(&format!("g{i}"), &[&format!("term{i}")]))
                .unwrap();
        }
        assert!(selection.is_full());
        assert_eq!(
            selection.propose(glossary("g5", &["other"])),
            Err(ValidationError::SelectionFull(5))
        );
        assert_eq!(
            selection.check_capacity("g0"),
            Err(ValidationError::AlreadySelected)
        );
    }

    #[test]
    fn test_deselect_does_not_recheck() {
        let mut selection = GlossarySelection::default();
        selection.propose(glossary("a", &["x"])).unwrap();
        selection.propose(glossary("b", &["x"])).unwrap();
        selection.resolve(ConflictDecision::Include);
        selection.propose(glossary("c", &["y"])).unwrap();

        assert!(selection.deselect("a"));
        assert!(!selection.deselect("a"));
        assert_eq!(selection.ids(), vec!["b", "c"]);
        assert_eq!(selection.color_index("c"), Some(1));
    }

    #[test]
    fn test_merged_terms_last_selected_wins() {
        let mut selection = GlossarySelection::default();
        selection.propose(glossary("a", &["x", "y"])).unwrap();
        selection.propose(glossary("b", &["x"])).unwrap();
        selection.resolve(ConflictDecision::Include);

        let merged = selection.merged_terms();
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].target, "x (b)");
        assert_eq!(merged[1].target, "y (a)");
        assert_eq!(selection.selected()[0].terms[0].target, "x (a)");
    }
}
