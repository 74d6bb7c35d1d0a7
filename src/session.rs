//! Search session
//!
//! Orchestrates one query cycle at a time: refresh the record
//! collection through the host's hook, classify, rank both result
//! tiers, render ranked matches through the compiled template, and hand
//! the output to the emit hook. Execution is strictly sequential and
//! synchronous; a new query can only start after the previous cycle has
//! emitted, so there is never an in-flight computation to cancel.

use serde::Serialize;
use tracing::{debug, debug_span};

use crate::config::{PrioritySystem, SessionConfig};
use crate::error::SearchError;
use crate::record::Record;
use crate::search::classifier::classify;
use crate::search::ranking::{rank_matches, rank_suggestions, Hit};
use crate::template::{self, CompiledTemplate};

/// Host-supplied data source, invoked at the start of each query cycle
/// to replace the record collection wholesale.
pub type RefreshHook = Box<dyn FnMut() -> anyhow::Result<Vec<Record>>>;

/// Host-supplied consumer, invoked with the finished output of each
/// query cycle.
pub type EmitHook = Box<dyn FnMut(&RankedOutput)>;

/// Output of one query cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct RankedOutput {
    pub matches: Vec<Hit>,
    pub suggestions: Vec<Hit>,
    /// Concatenation of every ranked match rendered through the session
    /// template. `None` when rendering is disabled or no template is
    /// set. Suggestions are exposed as data but never rendered.
    pub rendered: Option<String>,
}

/// An incremental search session over an in-memory record collection.
pub struct Session {
    config: SessionConfig,
    records: Vec<Record>,
    template: Option<CompiledTemplate>,
    refresh_hook: Option<RefreshHook>,
    emit_hook: Option<EmitHook>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("config", &self.config)
            .field("records", &self.records)
            .field("template", &self.template)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Create a session from configuration.
    ///
    /// Fails fast with `UnsupportedMode` if the configuration asks for
    /// a priority system other than `Substring`; unimplemented modes
    /// are rejected here, never at query time.
    pub fn new(config: SessionConfig) -> Result<Self, SearchError> {
        if config.priority_system != PrioritySystem::Substring {
            return Err(SearchError::UnsupportedMode(
                config.priority_system.name().to_string(),
            ));
        }
        Ok(Self {
            config,
            records: Vec::new(),
            template: None,
            refresh_hook: None,
            emit_hook: None,
        })
    }

    /// Replace the record collection. A registered refresh hook takes
    /// precedence and replaces these records again on the next query.
    pub fn set_records(&mut self, records: Vec<Record>) {
        self.records = records;
    }

    /// Compile and install the output template. Surfaces
    /// `MalformedTemplate` immediately; the previous template (if any)
    /// stays installed on failure.
    pub fn set_template(&mut self, template: &str) -> Result<(), SearchError> {
        let compiled = template::compile(
            template,
            self.config.template_open_delim,
            self.config.template_close_delim,
        )?;
        self.template = Some(compiled);
        Ok(())
    }

    /// Register the data-source hook called at the start of each cycle.
    pub fn set_refresh_hook<F>(&mut self, hook: F)
    where
        F: FnMut() -> anyhow::Result<Vec<Record>> + 'static,
    {
        self.refresh_hook = Some(Box::new(hook));
    }

    /// Register the consumer hook called with each cycle's output.
    pub fn set_emit_hook<F>(&mut self, hook: F)
    where
        F: FnMut(&RankedOutput) + 'static,
    {
        self.emit_hook = Some(Box::new(hook));
    }

    /// Run one full query cycle and return its output.
    pub fn query(&mut self, text: &str) -> Result<RankedOutput, SearchError> {
        let span = debug_span!("query", query = %text);
        let _guard = span.enter();

        if let Some(refresh) = self.refresh_hook.as_mut() {
            self.records = refresh().map_err(SearchError::Refresh)?;
            debug!(records = self.records.len(), "record collection refreshed");
        }

        let classification = classify(text, &self.records, &self.config);
        let matches = rank_matches(&classification.matches, &self.records);
        let suggestions = rank_suggestions(&classification.suggestions, &self.records);

        let rendered = match (&self.template, self.config.render_output) {
            (Some(tpl), true) => {
                let mut output = String::new();
                for hit in &matches {
                    output.push_str(&template::render(
                        tpl,
                        &hit.record,
                        self.config.missing_field_policy,
                    )?);
                }
                Some(output)
            }
            _ => None,
        };

        let output = RankedOutput {
            matches,
            suggestions,
            rendered,
        };

        if let Some(emit) = self.emit_hook.as_mut() {
            emit(&output);
        }
        debug!(
            matches = output.matches.len(),
            suggestions = output.suggestions.len(),
            "query cycle complete"
        );
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Value;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn record(title: &str) -> Record {
        let mut record = Record::new();
        record.insert("title", Value::Text(title.to_string()));
        record
    }

    fn titles() -> Vec<Record> {
        vec![record("Red Fox"), record("Red Fax"), record("Blue Sky")]
    }

    #[test]
    fn test_unsupported_mode_fails_at_construction() {
        let config = SessionConfig::new().with_priority_system(PrioritySystem::Closest);
        let err = Session::new(config).unwrap_err();
        assert_eq!(err.to_string(), "Unsupported priority system: closest");
    }

    #[test]
    fn test_red_fox_classification() {
        let mut session = Session::new(SessionConfig::default()).unwrap();
        session.set_records(titles());

        let output = session.query("red fox").unwrap();
        assert_eq!(output.matches.len(), 1);
        assert_eq!(
            output.matches[0].record.get("title").and_then(Value::as_text),
            Some("Red Fox")
        );
        assert_eq!(output.suggestions.len(), 1);
        assert_eq!(
            output.suggestions[0]
                .record
                .get("title")
                .and_then(Value::as_text),
            Some("Red Fax")
        );
    }

    #[test]
    fn test_min_key_length_emits_empty_output() {
        let config = SessionConfig::new().with_min_key_length(3);
        let mut session = Session::new(config).unwrap();
        session.set_records(titles());

        let output = session.query("ab").unwrap();
        assert!(output.matches.is_empty());
        assert!(output.suggestions.is_empty());
    }

    #[test]
    fn test_rendered_output() {
        let mut session = Session::new(SessionConfig::default()).unwrap();
        session.set_records(vec![record("Red Fox"), record("Red Foxglove")]);
        session.set_template("<li>{{title}}</li>").unwrap();

        let output = session.query("red fox").unwrap();
        assert_eq!(
            output.rendered.as_deref(),
            Some("<li>Red Fox</li><li>Red Foxglove</li>")
        );
    }

    #[test]
    fn test_render_disabled() {
        let config = SessionConfig::new().with_render_output(false);
        let mut session = Session::new(config).unwrap();
        session.set_records(titles());
        session.set_template("{{title}}").unwrap();

        let output = session.query("red").unwrap();
        assert!(output.rendered.is_none());
        assert!(!output.matches.is_empty());
    }

    #[test]
    fn test_no_template_means_no_rendered_output() {
        let mut session = Session::new(SessionConfig::default()).unwrap();
        session.set_records(titles());
        let output = session.query("red").unwrap();
        assert!(output.rendered.is_none());
    }

    #[test]
    fn test_set_template_surfaces_malformed() {
        let mut session = Session::new(SessionConfig::default()).unwrap();
        assert!(session.set_template("{{broken").is_err());
    }

    #[test]
    fn test_refresh_hook_replaces_records() {
        let mut session = Session::new(SessionConfig::default()).unwrap();
        session.set_records(vec![record("stale")]);
        session.set_refresh_hook(|| Ok(vec![record("fresh fox")]));

        let output = session.query("fox").unwrap();
        assert_eq!(output.matches.len(), 1);
        assert_eq!(
            output.matches[0].record.get("title").and_then(Value::as_text),
            Some("fresh fox")
        );
    }

    #[test]
    fn test_refresh_hook_failure_aborts_cycle() {
        let mut session = Session::new(SessionConfig::default()).unwrap();
        session.set_refresh_hook(|| anyhow::bail!("backend down"));

        let err = session.query("fox").unwrap_err();
        assert_eq!(err.code(), "refresh_failed");
    }

    #[test]
    fn test_emit_hook_receives_output() {
        let seen: Rc<RefCell<Vec<usize>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);

        let mut session = Session::new(SessionConfig::default()).unwrap();
        session.set_records(titles());
        session.set_emit_hook(move |output| sink.borrow_mut().push(output.matches.len()));

        session.query("red fox").unwrap();
        session.query("blue").unwrap();
        assert_eq!(*seen.borrow(), vec![1, 1]);
    }

    #[test]
    fn test_cycles_do_not_carry_state() {
        let mut session = Session::new(SessionConfig::default()).unwrap();
        session.set_records(titles());

        let first = session.query("red").unwrap();
        assert_eq!(first.matches.len(), 2);

        // Nothing from the first pass leaks into the second.
        let second = session.query("no such thing at all").unwrap();
        assert!(second.matches.is_empty());
        assert!(second.suggestions.is_empty());
    }

    #[test]
    fn test_empty_query_matches_all_records() {
        let mut session = Session::new(SessionConfig::default()).unwrap();
        session.set_records(titles());
        let output = session.query("").unwrap();
        assert_eq!(output.matches.len(), 3);
    }
}
