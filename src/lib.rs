//! Event store and scheduling rules for a single-user calendar board.
//!
//! This crate is the non-visual core of the board. The rendering layer
//! (grid, drag-and-drop, modal dialog) is an external caller that drives
//! it through three seams:
//! - [`EventStore`]: owns the event collection and persists it to a
//!   single keyed blob after every mutation
//! - [`conflict::evaluate`]: pure overlap detection for proposed time
//!   ranges
//! - [`FormController`]: the dialog's form state, validation, and the
//!   explicit confirmation protocol for overlaps and deletions

pub mod conflict;
pub mod controller;
pub mod error;
pub mod event;
pub mod form;
pub mod storage;
pub mod store;
pub mod view;

pub use conflict::ConflictResult;
pub use controller::{
    reschedule, ConfirmationRequest, EditorMode, FormController, Resolution, SaveOutcome,
};
pub use error::{CalboardError, CalboardResult};
pub use event::{Category, Event, EventDraft, RecurrenceType};
pub use form::{FormFieldChange, FormState};
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use store::EventStore;
pub use view::{CategoryFilter, EventQuery};
