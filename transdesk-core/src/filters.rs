//! List filtering for the glossary and history pages

use chrono::{DateTime, Duration, NaiveDateTime, Utc};

use crate::types::{Glossary, HistoryEntry, JobStatus};

/// Glossaries whose name or description contains `query`, ignoring case.
pub fn filter_glossaries<'a>(glossaries: &'a [Glossary], query: &str) -> Vec<&'a Glossary> {
    let needle = query.trim().to_lowercase();
    glossaries
        .iter()
        .filter(|g| {
            needle.is_empty()
                || g.name.to_lowercase().contains(&needle)
                || g.description.to_lowercase().contains(&needle)
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateWindow {
    #[default]
    All,
    Today,
    Week,
    Month,
}

impl DateWindow {
    pub const ALL: [DateWindow; 4] = [
        DateWindow::All,
        DateWindow::Today,
        DateWindow::Week,
        DateWindow::Month,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DateWindow::All => "all",
            DateWindow::Today => "today",
            DateWindow::Week => "week",
            DateWindow::Month => "month",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DateWindow::All => "All time",
            DateWindow::Today => "Today",
            DateWindow::Week => "Last 7 days",
            DateWindow::Month => "Last month",
        }
    }

    pub fn parse(raw: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|w| w.as_str() == raw)
            .unwrap_or_default()
    }

    /// Earliest instant inside the window.
    fn start(self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            DateWindow::All => None,
            DateWindow::Today => now
                .date_naive()
                .and_hms_opt(0, 0, 0)
                .map(|midnight| midnight.and_utc()),
            DateWindow::Week => Some(now - Duration::days(7)),
            DateWindow::Month => Some(now - Duration::days(30)),
        }
    }
}

/// Accepts RFC 3339 and naive `YYYY-MM-DDTHH:MM:SS[.f]` (read as UTC).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HistoryFilter {
    pub query: String,
    pub status: Option<JobStatus>,
    pub language: Option<String>,
    pub window: DateWindow,
}

impl HistoryFilter {
    pub fn is_active(&self) -> bool {
        !self.query.trim().is_empty()
            || self.status.is_some()
            || self.language.is_some()
            || self.window != DateWindow::All
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn matches(&self, entry: &HistoryEntry, now: DateTime<Utc>) -> bool {
        let needle = self.query.trim().to_lowercase();
        if !needle.is_empty() && !entry.document_name.to_lowercase().contains(&needle) {
            return false;
        }
        if self.status.is_some_and(|status| status != entry.status) {
            return false;
        }
        if let Some(language) = &self.language {
            if entry.source_language != *language && entry.target_language != *language {
                return false;
            }
        }
        match self.window.start(now) {
            None => true,
            Some(start) => entry
                .submitted_at
                .as_deref()
                .and_then(parse_timestamp)
                .is_some_and(|submitted| submitted >= start),
        }
    }

    pub fn apply<'a>(&self, entries: &'a [HistoryEntry], now: DateTime<Utc>) -> Vec<&'a HistoryEntry> {
        entries.iter().filter(|e| self.matches(e, now)).collect()
    }
}
