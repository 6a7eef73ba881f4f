//! Overlap detection for proposed time ranges.
//!
//! A pure decision function consulted before any mutation that changes an
//! event's time range. Intervals are half-open `[start, end)`: two events
//! that merely touch at a boundary do not conflict.

use chrono::{DateTime, Utc};

use crate::event::Event;

/// Outcome of checking a proposed time range against the collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConflictResult {
    /// The range itself is malformed (`start >= end`). Always a hard
    /// rejection, never overridable.
    Invalid,
    /// The range overlaps the listed events. Callers may let the user
    /// override this.
    Conflict(Vec<String>),
    /// No overlap.
    Clear,
}

impl ConflictResult {
    pub fn is_clear(&self) -> bool {
        matches!(self, ConflictResult::Clear)
    }
}

/// Evaluate a proposed `[start, end)` range against every event in the
/// collection, skipping `exclude` (the event being edited or moved).
///
/// Overlap exists iff `start < e.end && end > e.start`. The scan is
/// pairwise over the whole collection, which is plenty at personal
/// calendar scale.
pub fn evaluate(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    events: &[Event],
    exclude: Option<&str>,
) -> ConflictResult {
    if start >= end {
        return ConflictResult::Invalid;
    }

    let conflicting: Vec<String> = events
        .iter()
        .filter(|e| exclude != Some(e.id.as_str()))
        .filter(|e| start < e.end && end > e.start)
        .map(|e| e.id.clone())
        .collect();

    if conflicting.is_empty() {
        ConflictResult::Clear
    } else {
        ConflictResult::Conflict(conflicting)
    }
}
