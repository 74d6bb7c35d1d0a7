//! Error types for the search library

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Malformed template at byte {position}: {detail}")]
    MalformedTemplate { detail: String, position: usize },
    #[error("Missing field at path '{path}'")]
    MissingField { path: String },
    #[error("Unsupported priority system: {0}")]
    UnsupportedMode(String),
    #[error("Invalid record: {0}")]
    InvalidRecord(String),
    #[error("Refresh hook failed: {0}")]
    Refresh(#[source] anyhow::Error),
}

impl SearchError {
    /// Stable machine-readable code, suitable for host-side dispatch.
    pub fn code(&self) -> &'static str {
        match self {
            SearchError::MalformedTemplate { .. } => "malformed_template",
            SearchError::MissingField { .. } => "missing_field",
            SearchError::UnsupportedMode(_) => "unsupported_mode",
            SearchError::InvalidRecord(_) => "invalid_record",
            SearchError::Refresh(_) => "refresh_failed",
        }
    }
}
