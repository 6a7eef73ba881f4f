//! Editable form state for the event dialog.
//!
//! Holds the human-editable encodings of a candidate event: local-time
//! strings for the time fields (the `datetime-local` widget format) and
//! typed values for everything else. `to_draft` is the only way out, and
//! it validates before handing anything to the store.

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, Local, NaiveDateTime, TimeZone, Utc, Weekday};

use crate::error::{CalboardError, CalboardResult};
use crate::event::{Category, Event, EventDraft, RecurrenceType};

/// The `datetime-local` input encoding, minute precision, local zone.
const DATETIME_LOCAL_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Transient field state of an open event dialog.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    pub title: String,
    pub description: String,
    /// Local-time string, `DATETIME_LOCAL_FORMAT`.
    pub start: String,
    pub end: String,
    pub category: Category,
    pub recurrence_type: RecurrenceType,
    pub recurrence_interval: u32,
    pub recurrence_days_of_week: BTreeSet<u8>,
}

/// A single edit to one form field.
///
/// One variant per field kind, so every handler is explicit about what it
/// touches; the day toggle adds or removes exactly the toggled day.
#[derive(Debug, Clone, PartialEq)]
pub enum FormFieldChange {
    Title(String),
    Description(String),
    Start(String),
    End(String),
    Category(Category),
    RecurrenceType(RecurrenceType),
    RecurrenceInterval(u32),
    ToggleDay(Weekday, bool),
}

impl FormState {
    /// Fresh form for a new event starting at the given instant, one
    /// hour long, Work category, no recurrence.
    pub fn for_slot(start: DateTime<Utc>) -> Self {
        FormState {
            title: String::new(),
            description: String::new(),
            start: format_datetime_local(start),
            end: format_datetime_local(start + Duration::hours(1)),
            category: Category::Work,
            recurrence_type: RecurrenceType::None,
            recurrence_interval: 1,
            recurrence_days_of_week: BTreeSet::new(),
        }
    }

    /// Form pre-filled from an existing event, for editing.
    pub fn from_event(event: &Event) -> Self {
        FormState {
            title: event.title.clone(),
            description: event.description.clone().unwrap_or_default(),
            start: format_datetime_local(event.start),
            end: format_datetime_local(event.end),
            category: event.category,
            recurrence_type: event.recurrence_type,
            recurrence_interval: event.recurrence_interval.max(1),
            recurrence_days_of_week: event.recurrence_days_of_week.clone(),
        }
    }

    /// Apply one field edit.
    pub fn apply(&mut self, change: FormFieldChange) {
        match change {
            FormFieldChange::Title(value) => self.title = value,
            FormFieldChange::Description(value) => self.description = value,
            FormFieldChange::Start(value) => self.start = value,
            FormFieldChange::End(value) => self.end = value,
            FormFieldChange::Category(category) => self.category = category,
            FormFieldChange::RecurrenceType(recurrence) => self.recurrence_type = recurrence,
            FormFieldChange::RecurrenceInterval(interval) => {
                // The interval control has a floor of 1.
                self.recurrence_interval = interval.max(1);
            }
            FormFieldChange::ToggleDay(day, enabled) => {
                let day = day.num_days_from_sunday() as u8;
                if enabled {
                    self.recurrence_days_of_week.insert(day);
                } else {
                    self.recurrence_days_of_week.remove(&day);
                }
            }
        }
    }

    /// Parse and validate the fields into a draft.
    ///
    /// Fails without side effects if a time string does not parse, the
    /// title is empty, or the end does not come after the start.
    pub fn to_draft(&self) -> CalboardResult<EventDraft> {
        let start = parse_datetime_local("start", &self.start)?;
        let end = parse_datetime_local("end", &self.end)?;

        let description = match self.description.trim() {
            "" => None,
            _ => Some(self.description.clone()),
        };

        let draft = EventDraft {
            title: self.title.clone(),
            description,
            start,
            end,
            category: self.category,
            recurrence_type: self.recurrence_type,
            recurrence_interval: self.recurrence_interval,
            recurrence_days_of_week: self.recurrence_days_of_week.clone(),
        };
        draft.validate()?;
        Ok(draft)
    }
}

/// Render an instant in the local zone at minute precision.
pub fn format_datetime_local(instant: DateTime<Utc>) -> String {
    instant
        .with_timezone(&Local)
        .format(DATETIME_LOCAL_FORMAT)
        .to_string()
}

/// Parse a `datetime-local` string back into an instant.
///
/// An ambiguous local time (clocks falling back) maps to the earlier
/// instant; a nonexistent one (clocks springing forward) is rejected.
fn parse_datetime_local(field: &'static str, value: &str) -> CalboardResult<DateTime<Utc>> {
    let naive = NaiveDateTime::parse_from_str(value, DATETIME_LOCAL_FORMAT).map_err(|_| {
        CalboardError::BadTimestamp {
            field,
            value: value.to_string(),
        }
    })?;

    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| CalboardError::BadTimestamp {
            field,
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap()
    }

    fn filled_form() -> FormState {
        let mut form = FormState::for_slot(noon());
        form.apply(FormFieldChange::Title("Standup".to_string()));
        form
    }

    // --- defaults ---

    #[test]
    fn slot_form_defaults() {
        let form = FormState::for_slot(noon());
        assert!(form.title.is_empty());
        assert_eq!(form.category, Category::Work);
        assert_eq!(form.recurrence_type, RecurrenceType::None);
        assert_eq!(form.recurrence_interval, 1);
        assert!(form.recurrence_days_of_week.is_empty());
    }

    #[test]
    fn slot_form_spans_one_hour() {
        let draft = filled_form().to_draft().unwrap();
        assert_eq!(draft.start, noon());
        assert_eq!(draft.end, noon() + Duration::hours(1));
    }

    #[test]
    fn event_form_round_trips_times() {
        let draft = filled_form().to_draft().unwrap();
        let event = draft.clone().into_event("e1".to_string());

        let reparsed = FormState::from_event(&event).to_draft().unwrap();
        assert_eq!(reparsed.start, draft.start);
        assert_eq!(reparsed.end, draft.end);
        assert_eq!(reparsed.title, draft.title);
    }

    // --- field changes ---

    #[test]
    fn toggle_adds_and_removes_one_day() {
        let mut form = filled_form();
        form.apply(FormFieldChange::ToggleDay(Weekday::Mon, true));
        form.apply(FormFieldChange::ToggleDay(Weekday::Fri, true));
        assert_eq!(form.recurrence_days_of_week, BTreeSet::from([1, 5]));

        form.apply(FormFieldChange::ToggleDay(Weekday::Mon, false));
        assert_eq!(form.recurrence_days_of_week, BTreeSet::from([5]));
    }

    #[test]
    fn toggle_same_day_twice_keeps_one_entry() {
        let mut form = filled_form();
        form.apply(FormFieldChange::ToggleDay(Weekday::Sun, true));
        form.apply(FormFieldChange::ToggleDay(Weekday::Sun, true));
        assert_eq!(form.recurrence_days_of_week, BTreeSet::from([0]));
    }

    #[test]
    fn toggle_leaves_other_fields_alone() {
        let mut form = filled_form();
        let before = form.clone();
        form.apply(FormFieldChange::ToggleDay(Weekday::Wed, true));
        assert_eq!(form.title, before.title);
        assert_eq!(form.start, before.start);
        assert_eq!(form.recurrence_interval, before.recurrence_interval);
    }

    #[test]
    fn interval_clamps_to_one() {
        let mut form = filled_form();
        form.apply(FormFieldChange::RecurrenceInterval(0));
        assert_eq!(form.recurrence_interval, 1);
        form.apply(FormFieldChange::RecurrenceInterval(4));
        assert_eq!(form.recurrence_interval, 4);
    }

    // --- validation ---

    #[test]
    fn unparseable_start_is_rejected() {
        let mut form = filled_form();
        form.apply(FormFieldChange::Start("yesterday-ish".to_string()));
        assert!(matches!(
            form.to_draft(),
            Err(CalboardError::BadTimestamp { field: "start", .. })
        ));
    }

    #[test]
    fn end_before_start_is_rejected() {
        let mut form = filled_form();
        form.apply(FormFieldChange::Start("2024-01-15T10:00".to_string()));
        form.apply(FormFieldChange::End("2024-01-15T09:00".to_string()));
        assert!(matches!(
            form.to_draft(),
            Err(CalboardError::EndNotAfterStart)
        ));
    }

    #[test]
    fn empty_title_is_rejected() {
        let form = FormState::for_slot(noon());
        assert!(matches!(form.to_draft(), Err(CalboardError::EmptyTitle)));
    }

    #[test]
    fn blank_description_becomes_none() {
        let mut form = filled_form();
        form.apply(FormFieldChange::Description("  ".to_string()));
        assert_eq!(form.to_draft().unwrap().description, None);

        form.apply(FormFieldChange::Description("bring slides".to_string()));
        assert_eq!(
            form.to_draft().unwrap().description.as_deref(),
            Some("bring slides")
        );
    }
}
