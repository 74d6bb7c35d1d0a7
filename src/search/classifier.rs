//! Match classifier
//!
//! Walks the record collection once per query and sorts every record
//! into one of three buckets: match (a searchable field contains the
//! query as a case-insensitive substring), suggestion (no containment,
//! but close enough by edit distance), or excluded.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use tracing::debug;

use crate::config::SessionConfig;
use crate::record::{Record, Value};
use crate::search::distance::{normalize, similarity};

/// A record that passed the substring test on at least one field.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchEntry {
    /// `100 - distance(field, query)`. When several fields match, the
    /// minimum across them is kept (ties toward worse similarity).
    pub score: i64,
    /// Names of the fields that passed the substring test, in field order.
    pub matched_fields: Vec<String>,
}

/// A record that failed the substring test but cleared the suggestion
/// threshold on its adjusted score.
#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionEntry {
    /// `(100 - distance(field, query)) - 50` for the last disqualifying
    /// field considered. Deliberately not aggregated across fields.
    pub score: i64,
}

/// Classifier output, keyed by record index in the source collection.
/// `BTreeMap` over ascending indices preserves collection order, which
/// the ranker relies on for stable tie-breaks.
#[derive(Debug, Default)]
pub struct Classification {
    pub matches: BTreeMap<usize, MatchEntry>,
    pub suggestions: BTreeMap<usize, SuggestionEntry>,
}

/// Classify every record against `query`.
///
/// Queries shorter than `min_key_length` chars skip the scan entirely
/// and classify nothing. The empty query is contained in every field,
/// so with the default `min_key_length` of 0 it matches every record.
pub fn classify(query: &str, records: &[Record], config: &SessionConfig) -> Classification {
    let mut result = Classification::default();

    if query.chars().count() < config.min_key_length {
        debug!(
            query_len = query.chars().count(),
            min_key_length = config.min_key_length,
            "query below minimum key length, skipping classification"
        );
        return result;
    }

    let needle = normalize(query);

    for (index, record) in records.iter().enumerate() {
        for (field, value) in record.fields() {
            let text = match value {
                Value::Text(text) => text,
                Value::Nested(_) => continue,
            };
            if !config.is_searchable(field) {
                continue;
            }

            if normalize(text).contains(&needle) {
                let score = similarity(text, query);
                match result.matches.entry(index) {
                    Entry::Occupied(mut occupied) => {
                        let entry = occupied.get_mut();
                        entry.score = entry.score.min(score);
                        entry.matched_fields.push(field.to_string());
                    }
                    Entry::Vacant(vacant) => {
                        vacant.insert(MatchEntry {
                            score,
                            matched_fields: vec![field.to_string()],
                        });
                    }
                }
            } else {
                let adjusted = similarity(text, query) - 50;
                if adjusted > config.suggestion_threshold {
                    // Last disqualifying field wins.
                    result
                        .suggestions
                        .insert(index, SuggestionEntry { score: adjusted });
                }
            }
        }
    }

    // A record can collect a suggestion score on one field and a match
    // on another; matches take precedence and the sets stay disjoint.
    let matched: Vec<usize> = result.matches.keys().copied().collect();
    for index in matched {
        result.suggestions.remove(&index);
    }

    debug!(
        matches = result.matches.len(),
        suggestions = result.suggestions.len(),
        "classification complete"
    );
    result
}
