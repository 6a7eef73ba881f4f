//! Calendar event types.
//!
//! These types are the persistent data model of the board. The serde
//! representation is the wire format of the persisted blob: camelCase
//! keys, RFC3339 instants, lowercase recurrence values and capitalized
//! category names, so blobs written by earlier versions of the board
//! deserialize unchanged.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CalboardError, CalboardResult};

/// A scheduled calendar event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Unique identifier, assigned at creation and immutable afterwards.
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Start instant; every stored event satisfies `start < end`.
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Display category, used for coloring and filtering only.
    pub category: Category,

    // Recurrence metadata. Stored and round-tripped, never expanded
    // into instances.
    #[serde(default)]
    pub recurrence_type: RecurrenceType,
    /// Repeat every N units; meaningful only for `RecurrenceType::Custom`.
    #[serde(default = "default_interval")]
    pub recurrence_interval: u32,
    /// Days of week (0 = Sunday .. 6 = Saturday); meaningful only for
    /// `RecurrenceType::Custom`.
    #[serde(default)]
    pub recurrence_days_of_week: BTreeSet<u8>,
}

/// A proposed event that has not been stored yet.
///
/// Produced by the form layer, checked for conflicts, and turned into an
/// [`Event`] by the store once accepted.
#[derive(Debug, Clone, PartialEq)]
pub struct EventDraft {
    pub title: String,
    pub description: Option<String>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub category: Category,
    pub recurrence_type: RecurrenceType,
    pub recurrence_interval: u32,
    pub recurrence_days_of_week: BTreeSet<u8>,
}

impl EventDraft {
    /// Check the structural invariants every stored event must satisfy.
    pub fn validate(&self) -> CalboardResult<()> {
        if self.title.trim().is_empty() {
            return Err(CalboardError::EmptyTitle);
        }
        if self.start >= self.end {
            return Err(CalboardError::EndNotAfterStart);
        }
        Ok(())
    }

    /// Materialize the draft into a stored event under the given id.
    pub(crate) fn into_event(self, id: String) -> Event {
        Event {
            id,
            title: self.title,
            description: self.description,
            start: self.start,
            end: self.end,
            category: self.category,
            recurrence_type: self.recurrence_type,
            recurrence_interval: self.recurrence_interval,
            recurrence_days_of_week: self.recurrence_days_of_week,
        }
    }
}

/// Event category. Purely presentational: it drives display color and
/// filtering, never scheduling behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Work,
    Personal,
    Other,
}

impl Category {
    /// All categories, in display order.
    pub const ALL: [Category; 3] = [Category::Work, Category::Personal, Category::Other];

    /// Display color for events of this category.
    pub fn color(&self) -> &'static str {
        match self {
            Category::Work => "#3a87ad",
            Category::Personal => "#f0ad4e",
            Category::Other => "#5bc0de",
        }
    }
}

/// How an event repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurrenceType {
    #[default]
    None,
    Daily,
    Weekly,
    Monthly,
    Custom,
}

impl RecurrenceType {
    /// All recurrence choices, in display order.
    pub const ALL: [RecurrenceType; 5] = [
        RecurrenceType::None,
        RecurrenceType::Daily,
        RecurrenceType::Weekly,
        RecurrenceType::Monthly,
        RecurrenceType::Custom,
    ];

    /// Human-readable label for selection menus.
    pub fn label(&self) -> &'static str {
        match self {
            RecurrenceType::None => "None",
            RecurrenceType::Daily => "Daily",
            RecurrenceType::Weekly => "Weekly",
            RecurrenceType::Monthly => "Monthly",
            RecurrenceType::Custom => "Custom",
        }
    }
}

fn default_interval() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn make_draft() -> EventDraft {
        EventDraft {
            title: "Team Standup".to_string(),
            description: None,
            start: Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2024, 1, 1, 9, 30, 0).unwrap(),
            category: Category::Work,
            recurrence_type: RecurrenceType::None,
            recurrence_interval: 1,
            recurrence_days_of_week: BTreeSet::new(),
        }
    }

    // --- draft validation ---

    #[test]
    fn valid_draft_passes() {
        assert!(make_draft().validate().is_ok());
    }

    #[test]
    fn empty_title_rejected() {
        let mut draft = make_draft();
        draft.title = "   ".to_string();
        assert!(matches!(
            draft.validate(),
            Err(CalboardError::EmptyTitle)
        ));
    }

    #[test]
    fn end_before_start_rejected() {
        let mut draft = make_draft();
        draft.end = draft.start - chrono::Duration::hours(1);
        assert!(matches!(
            draft.validate(),
            Err(CalboardError::EndNotAfterStart)
        ));
    }

    #[test]
    fn zero_length_rejected() {
        let mut draft = make_draft();
        draft.end = draft.start;
        assert!(matches!(
            draft.validate(),
            Err(CalboardError::EndNotAfterStart)
        ));
    }

    // --- wire format ---

    #[test]
    fn serializes_with_camel_case_keys() {
        let event = make_draft().into_event("abc-123".to_string());
        let json = serde_json::to_string(&event).unwrap();

        assert!(json.contains("\"recurrenceType\":\"none\""));
        assert!(json.contains("\"recurrenceInterval\":1"));
        assert!(json.contains("\"recurrenceDaysOfWeek\":[]"));
        assert!(json.contains("\"category\":\"Work\""));
        assert!(json.contains("\"start\":\"2024-01-01T09:00:00Z\""));
    }

    #[test]
    fn parses_blob_written_by_original_board() {
        // Shape produced by the JS predecessor: millisecond instants,
        // empty-string description, numeric weekday array.
        let json = r#"{
            "id": "7f9a6c2e-1d4b-4f7a-9c3e-2b8d5e6f0a1b",
            "title": "Gym",
            "description": "",
            "start": "2024-05-04T17:00:00.000Z",
            "end": "2024-05-04T18:00:00.000Z",
            "category": "Personal",
            "recurrenceType": "custom",
            "recurrenceInterval": 2,
            "recurrenceDaysOfWeek": [1, 3, 5]
        }"#;

        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.title, "Gym");
        assert_eq!(event.category, Category::Personal);
        assert_eq!(event.recurrence_type, RecurrenceType::Custom);
        assert_eq!(event.recurrence_interval, 2);
        assert_eq!(
            event.recurrence_days_of_week,
            BTreeSet::from([1, 3, 5])
        );
        assert_eq!(
            event.start,
            Utc.with_ymd_and_hms(2024, 5, 4, 17, 0, 0).unwrap()
        );
    }

    #[test]
    fn missing_recurrence_fields_default() {
        let json = r#"{
            "id": "e1",
            "title": "Dentist",
            "start": "2024-02-01T08:00:00Z",
            "end": "2024-02-01T09:00:00Z",
            "category": "Other"
        }"#;

        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.recurrence_type, RecurrenceType::None);
        assert_eq!(event.recurrence_interval, 1);
        assert!(event.recurrence_days_of_week.is_empty());
        assert_eq!(event.description, None);
    }

    // --- display tables ---

    #[test]
    fn category_colors() {
        assert_eq!(Category::Work.color(), "#3a87ad");
        assert_eq!(Category::Personal.color(), "#f0ad4e");
        assert_eq!(Category::Other.color(), "#5bc0de");
    }

    #[test]
    fn recurrence_labels() {
        assert_eq!(RecurrenceType::None.label(), "None");
        assert_eq!(RecurrenceType::Custom.label(), "Custom");
    }
}
