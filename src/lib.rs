//! keysift: embeddable incremental text search
//!
//! Given a keystroke-driven query string and an in-memory record
//! collection, keysift filters and ranks records by edit-distance
//! similarity and optionally projects the ranked matches through a
//! `{{path}}` template. Results come in two tiers: matches (a
//! searchable field contains the query as a case-insensitive
//! substring) and suggestions (near misses within a configurable
//! edit-distance threshold).
//!
//! The library is synchronous and single-threaded by design. Input
//! capture, output placement, and data acquisition belong to the host:
//! the session receives a query string on demand, pulls fresh records
//! through a refresh hook, and hands each cycle's output to an emit
//! hook.
//!
//! ```
//! use keysift::{Record, Session, SessionConfig, Value};
//!
//! let mut session = Session::new(SessionConfig::default()).unwrap();
//! let mut record = Record::new();
//! record.insert("title", Value::Text("Red Fox".to_string()));
//! session.set_records(vec![record]);
//! session.set_template("<li>{{title}}</li>").unwrap();
//!
//! let output = session.query("red fox").unwrap();
//! assert_eq!(output.matches[0].score, 100);
//! assert_eq!(output.rendered.as_deref(), Some("<li>Red Fox</li>"));
//! ```

pub mod config;
pub mod error;
pub mod record;
pub mod search;
pub mod session;
pub mod template;

pub use config::{MissingFieldPolicy, PrioritySystem, SessionConfig};
pub use error::SearchError;
pub use record::{Record, Value};
pub use search::{Hit, MatchEntry, SuggestionEntry};
pub use session::{EmitHook, RankedOutput, RefreshHook, Session};
pub use template::{CompiledTemplate, TemplateSegment};
