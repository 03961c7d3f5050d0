//! Error types.
//!
//! Almost nothing in the grid fails: stale or invalid interactions are
//! absorbed as no-ops. The exceptions are edit commits, which the owner may
//! reject, and loading configuration.

use thiserror::Error;

/// Why an edit commit did not go through.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    /// No cell is in edit mode.
    #[error("no cell is being edited")]
    NotEditing,

    /// The column's edit callback or the owner rejected the value.
    /// The cell stays in edit mode.
    #[error("value for column '{column}' rejected: {reason}")]
    Rejected { column: String, reason: String },
}

impl EditError {
    pub fn rejected(column: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Rejected {
            column: column.into(),
            reason: reason.into(),
        }
    }
}

/// Configuration loading error.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config value for '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },
}
