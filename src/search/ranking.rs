//! Result ranking
//!
//! Converts classifier buckets into ranked sequences, sorted by
//! descending score with collection order breaking ties.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::record::Record;
use crate::search::classifier::{MatchEntry, SuggestionEntry};

/// One ranked result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hit {
    pub record: Record,
    pub score: i64,
    /// Fields that passed the substring test; empty for suggestions.
    pub matched_fields: Vec<String>,
}

/// Rank classified matches. Entries arrive in collection order (the
/// map is keyed by record index), and the sort is stable, so equal
/// scores keep that order.
pub fn rank_matches(entries: &BTreeMap<usize, MatchEntry>, records: &[Record]) -> Vec<Hit> {
    let mut ranked: Vec<Hit> = entries
        .iter()
        .map(|(&index, entry)| Hit {
            record: records[index].clone(),
            score: entry.score,
            matched_fields: entry.matched_fields.clone(),
        })
        .collect();
    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked
}

/// Rank classified suggestions, same ordering contract as matches.
pub fn rank_suggestions(
    entries: &BTreeMap<usize, SuggestionEntry>,
    records: &[Record],
) -> Vec<Hit> {
    let mut ranked: Vec<Hit> = entries
        .iter()
        .map(|(&index, entry)| Hit {
            record: records[index].clone(),
            score: entry.score,
            matched_fields: Vec::new(),
        })
        .collect();
    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked
}
