//! Matching and ranking
//!
//! Edit-distance scoring, two-tier match/suggestion classification, and
//! deterministic ranking. The full record collection is rescanned on
//! every query; nothing is indexed or carried over between passes.

pub mod classifier;
pub mod distance;
pub mod ranking;


pub use classifier::{classify, Classification, MatchEntry, SuggestionEntry};
pub use distance::{distance, similarity};
pub use ranking::{rank_matches, rank_suggestions, Hit};
