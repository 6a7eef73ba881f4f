//! The event store: single source of truth for the board's events.
//!
//! Owns the collection exclusively and mediates every read and write
//! against the persisted blob. Callers are expected to have resolved
//! overlap conflicts (see [`crate::conflict`]) before mutating; the store
//! itself enforces only the structural invariants of stored events.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::{CalboardError, CalboardResult};
use crate::event::{Event, EventDraft};
use crate::storage::Storage;
use crate::view::EventQuery;

/// Name of the storage entry holding the serialized event collection.
const STORAGE_KEY: &str = "events";

/// Owns the event collection and persists it after every mutation.
pub struct EventStore<S: Storage> {
    storage: S,
    events: Vec<Event>,
}

impl<S: Storage> EventStore<S> {
    /// Load the collection from storage.
    ///
    /// An absent entry or an undecodable blob both yield an empty
    /// collection. Corrupt data is treated as "no data yet", never
    /// surfaced as an error.
    pub fn open(storage: S) -> Self {
        let events = storage
            .read(STORAGE_KEY)
            .ok()
            .flatten()
            .and_then(|blob| serde_json::from_str(&blob).ok())
            .unwrap_or_default();

        EventStore { storage, events }
    }

    /// All stored events, in insertion order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    /// Events matching a search/filter query, in insertion order.
    pub fn visible(&self, query: &EventQuery) -> Vec<&Event> {
        self.events.iter().filter(|e| query.matches(e)).collect()
    }

    /// Store a new event under a fresh id and persist.
    pub fn create(&mut self, draft: EventDraft) -> CalboardResult<Event> {
        draft.validate()?;

        let event = draft.into_event(Uuid::new_v4().to_string());

        let mut events = self.events.clone();
        events.push(event.clone());
        self.commit(events)?;

        Ok(event)
    }

    /// Replace the event with the given id, keeping the id, and persist.
    pub fn update(&mut self, id: &str, draft: EventDraft) -> CalboardResult<Event> {
        draft.validate()?;

        let position = self
            .events
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| CalboardError::NotFound(id.to_string()))?;

        let event = draft.into_event(id.to_string());

        let mut events = self.events.clone();
        events[position] = event.clone();
        self.commit(events)?;

        Ok(event)
    }

    /// Change only an event's time range (the drag-reschedule path).
    pub fn move_to(
        &mut self,
        id: &str,
        new_start: DateTime<Utc>,
        new_end: DateTime<Utc>,
    ) -> CalboardResult<Event> {
        let existing = self
            .get(id)
            .ok_or_else(|| CalboardError::NotFound(id.to_string()))?;

        let draft = EventDraft {
            title: existing.title.clone(),
            description: existing.description.clone(),
            start: new_start,
            end: new_end,
            category: existing.category,
            recurrence_type: existing.recurrence_type,
            recurrence_interval: existing.recurrence_interval,
            recurrence_days_of_week: existing.recurrence_days_of_week.clone(),
        };

        self.update(id, draft)
    }

    /// Remove the event with the given id and persist. Removing an id
    /// that is not present is a no-op.
    pub fn delete(&mut self, id: &str) -> CalboardResult<()> {
        if !self.events.iter().any(|e| e.id == id) {
            return Ok(());
        }

        let events: Vec<Event> = self
            .events
            .iter()
            .filter(|e| e.id != id)
            .cloned()
            .collect();
        self.commit(events)
    }

    /// Hand the underlying storage back (e.g. to reopen the store).
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Serialize and write the new collection, then adopt it. The write
    /// happens first so a storage failure leaves the prior state intact.
    fn commit(&mut self, events: Vec<Event>) -> CalboardResult<()> {
        let blob = serde_json::to_string(&events)?;
        self.storage.write(STORAGE_KEY, &blob)?;
        self.events = events;
        Ok(())
    }
}
