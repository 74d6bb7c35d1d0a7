//! Session configuration
//!
//! Configuration is an owned, immutable value constructed per session.
//! There is no process-wide shared settings state; two sessions never
//! observe each other's configuration.

use std::collections::BTreeSet;

/// Ranking mode for a session.
///
/// Only `Substring` is implemented; the remaining modes are declared so
/// hosts asking for them get a fast, explicit failure at construction
/// rather than silently falling back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrioritySystem {
    /// Case-insensitive substring containment with edit-distance scoring.
    #[default]
    Substring,
    /// Unimplemented: rank purely by edit distance.
    Closest,
    /// Unimplemented: exact matches only.
    Match,
    /// Unimplemented: alphabetical ordering of matches.
    Alphabetical,
}

impl PrioritySystem {
    pub fn name(&self) -> &'static str {
        match self {
            PrioritySystem::Substring => "substring",
            PrioritySystem::Closest => "closest",
            PrioritySystem::Match => "match",
            PrioritySystem::Alphabetical => "alphabetical",
        }
    }
}

/// What the renderer does when a dot-path fails to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingFieldPolicy {
    /// Substitute an empty string, report through the diagnostics
    /// channel, and keep rendering the remaining segments.
    #[default]
    SubstituteEmpty,
    /// Abort the render with `SearchError::MissingField`.
    Fail,
}

/// Per-session configuration.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Top-level field names eligible for comparison against the query.
    /// Empty set means every string-valued field is searchable.
    pub searchable_fields: BTreeSet<String>,
    pub priority_system: PrioritySystem,
    /// Minimum adjusted score for a non-matching record to surface as a
    /// suggestion. Adjusted score is `(100 - distance) - 50`.
    pub suggestion_threshold: i64,
    /// Queries shorter than this (in chars) skip classification entirely.
    pub min_key_length: usize,
    /// Doubling this character forms the opening variable marker.
    pub template_open_delim: char,
    /// Doubling this character forms the closing variable marker.
    pub template_close_delim: char,
    /// When false, the query cycle skips the render phase.
    pub render_output: bool,
    pub missing_field_policy: MissingFieldPolicy,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            searchable_fields: BTreeSet::new(),
            priority_system: PrioritySystem::default(),
            suggestion_threshold: 48,
            min_key_length: 0,
            template_open_delim: '{',
            template_close_delim: '}',
            render_output: true,
            missing_field_policy: MissingFieldPolicy::default(),
        }
    }
}

impl SessionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_searchable_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.searchable_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_priority_system(mut self, system: PrioritySystem) -> Self {
        self.priority_system = system;
        self
    }

    pub fn with_suggestion_threshold(mut self, threshold: i64) -> Self {
        self.suggestion_threshold = threshold;
        self
    }

    pub fn with_min_key_length(mut self, length: usize) -> Self {
        self.min_key_length = length;
        self
    }

    pub fn with_template_delims(mut self, open: char, close: char) -> Self {
        self.template_open_delim = open;
        self.template_close_delim = close;
        self
    }

    pub fn with_render_output(mut self, render: bool) -> Self {
        self.render_output = render;
        self
    }

    pub fn with_missing_field_policy(mut self, policy: MissingFieldPolicy) -> Self {
        self.missing_field_policy = policy;
        self
    }

    /// Whether a top-level field name participates in classification.
    pub fn is_searchable(&self, field: &str) -> bool {
        self.searchable_fields.is_empty() || self.searchable_fields.contains(field)
    }
}
