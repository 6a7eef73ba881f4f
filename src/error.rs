//! Error types for calboard operations.

use thiserror::Error;

/// Errors that can occur in calboard operations.
///
/// There is no fatal class here: every failure leaves the store and the
/// persisted blob in their prior state.
#[derive(Error, Debug)]
pub enum CalboardError {
    #[error("end time must be after start time")]
    EndNotAfterStart,

    #[error("title must not be empty")]
    EmptyTitle,

    #[error("invalid {field} value: {value}")]
    BadTimestamp { field: &'static str, value: String },

    #[error("event not found: {0}")]
    NotFound(String),

    #[error("time range overlaps {} existing event(s)", .conflicting.len())]
    Overlap { conflicting: Vec<String> },

    #[error("no event dialog is open")]
    DialogClosed,

    #[error("no stored event is being edited")]
    NotEditing,

    #[error("no confirmation is pending")]
    NothingPending,

    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for calboard operations.
pub type CalboardResult<T> = Result<T, CalboardError>;
