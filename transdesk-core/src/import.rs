//! Bulk term import from pasted text or an uploaded `.txt`/`.csv` file
//!
//! One pair per line. A line containing `|` is split on `|`, otherwise on
//! `,`. Only the first two fields are used. A missing target defaults to the
//! source.

use std::collections::HashSet;

use crate::api::TermPair;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped: usize,
}

pub fn parse_term_lines(content: &str) -> Vec<TermPair> {
    content.lines().filter_map(parse_line).collect()
}

fn parse_line(line: &str) -> Option<TermPair> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let separator = if line.contains('|') { '|' } else { ',' };
    let mut fields = line.split(separator).map(str::trim);
    let source = fields.next().unwrap_or_default();
    if source.is_empty() {
        return None;
    }
    let target = fields.next().filter(|t| !t.is_empty()).unwrap_or(source);
    Some(TermPair {
        source: source.to_string(),
        target: target.to_string(),
    })
}

/// Split parsed pairs into the ones to add and a skip count.
///
/// A pair is skipped when its source matches, ignoring case, one of
/// `existing` or an earlier pair in the same batch.
pub fn dedupe_against<'a, I>(pairs: Vec<TermPair>, existing: I) -> (Vec<TermPair>, ImportSummary)
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen: HashSet<String> = existing
        .into_iter()
        .map(|s| s.trim().to_lowercase())
        .collect();
    let mut summary = ImportSummary::default();
    let mut accepted = Vec::with_capacity(pairs.len());

    for pair in pairs {
        if seen.insert(pair.source.to_lowercase()) {
            summary.imported += 1;
            accepted.push(pair);
        } else {
            summary.skipped += 1;
        }
    }
    (accepted, summary)
}
