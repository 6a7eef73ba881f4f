//! Dialog lifecycle and save/delete/reschedule flows.
//!
//! The controller sits between the rendering layer and the store. It owns
//! the open dialog's form state, runs validation and conflict evaluation
//! on submit, and models user confirmation as an explicit
//! request/response pair: a submit that needs the user's say-so returns a
//! [`ConfirmationRequest`], the store stays untouched, and the embedding
//! feeds the decision back through [`FormController::resolve`].

use chrono::{DateTime, Utc};

use crate::conflict::{self, ConflictResult};
use crate::error::{CalboardError, CalboardResult};
use crate::event::{Event, EventDraft};
use crate::form::{FormFieldChange, FormState};
use crate::storage::Storage;
use crate::store::EventStore;

/// Whether the open dialog creates a new event or edits a stored one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    /// Editing the stored event with this id.
    Edit(String),
}

/// A decision the user must make before the flow can continue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmationRequest {
    /// The candidate overlaps the listed events; saving anyway needs an
    /// explicit go-ahead.
    Overlap { conflicting: Vec<String> },
    /// Deleting the edited event needs an explicit go-ahead.
    Delete,
}

/// Result of a submit.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    /// The event was stored and the dialog closed.
    Saved(Event),
    /// The flow is paused on a user decision; nothing was stored.
    AwaitingConfirmation(ConfirmationRequest),
}

/// Result of feeding a confirmation decision back in.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Saved(Event),
    Deleted(String),
    /// The user declined; the dialog stays open, nothing changed.
    Abandoned,
}

/// A parked action waiting on the user's decision.
#[derive(Debug, Clone)]
enum PendingConfirmation {
    Overlap { draft: EventDraft },
    Delete,
}

#[derive(Debug, Clone)]
struct OpenDialog {
    mode: EditorMode,
    form: FormState,
    pending: Option<PendingConfirmation>,
}

/// Owns the event dialog: `Closed -> Open(create|edit) -> Closed`, with
/// the dialog staying open across validation failures and declined
/// confirmations.
#[derive(Debug, Clone, Default)]
pub struct FormController {
    dialog: Option<OpenDialog>,
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.dialog.is_some()
    }

    /// Field state of the open dialog, if any.
    pub fn form(&self) -> Option<&FormState> {
        self.dialog.as_ref().map(|d| &d.form)
    }

    pub fn mode(&self) -> Option<&EditorMode> {
        self.dialog.as_ref().map(|d| &d.mode)
    }

    /// Open the dialog for a new event at the selected slot.
    pub fn open_create(&mut self, slot_start: DateTime<Utc>) {
        self.dialog = Some(OpenDialog {
            mode: EditorMode::Create,
            form: FormState::for_slot(slot_start),
            pending: None,
        });
    }

    /// Open the dialog pre-filled from a stored event.
    pub fn open_edit(&mut self, event: &Event) {
        self.dialog = Some(OpenDialog {
            mode: EditorMode::Edit(event.id.clone()),
            form: FormState::from_event(event),
            pending: None,
        });
    }

    /// Apply a field edit to the open dialog.
    pub fn change(&mut self, change: FormFieldChange) -> CalboardResult<()> {
        let dialog = self.dialog.as_mut().ok_or(CalboardError::DialogClosed)?;
        // Editing a field drops any parked confirmation.
        dialog.pending = None;
        dialog.form.apply(change);
        Ok(())
    }

    /// Close the dialog, discarding the form. The store is untouched.
    pub fn cancel(&mut self) {
        self.dialog = None;
    }

    /// Validate the form, check for conflicts, and save if clear.
    ///
    /// On a validation failure the error is returned and the dialog stays
    /// open. On an overlap, the parsed draft is parked and the caller
    /// gets a [`ConfirmationRequest`] to put in front of the user; the
    /// store is only touched once [`Self::resolve`] approves.
    pub fn submit<S: Storage>(
        &mut self,
        store: &mut EventStore<S>,
    ) -> CalboardResult<SaveOutcome> {
        let dialog = self.dialog.as_mut().ok_or(CalboardError::DialogClosed)?;
        let draft = dialog.form.to_draft()?;

        let exclude = match &dialog.mode {
            EditorMode::Create => None,
            EditorMode::Edit(id) => Some(id.as_str()),
        };

        match conflict::evaluate(draft.start, draft.end, store.events(), exclude) {
            ConflictResult::Invalid => Err(CalboardError::EndNotAfterStart),
            ConflictResult::Conflict(conflicting) => {
                dialog.pending = Some(PendingConfirmation::Overlap { draft });
                Ok(SaveOutcome::AwaitingConfirmation(
                    ConfirmationRequest::Overlap { conflicting },
                ))
            }
            ConflictResult::Clear => {
                let event = apply_draft(&dialog.mode, store, draft)?;
                self.dialog = None;
                Ok(SaveOutcome::Saved(event))
            }
        }
    }

    /// Ask to delete the edited event. The deletion itself waits for the
    /// user's decision via [`Self::resolve`].
    pub fn request_delete(&mut self) -> CalboardResult<ConfirmationRequest> {
        let dialog = self.dialog.as_mut().ok_or(CalboardError::DialogClosed)?;
        if !matches!(dialog.mode, EditorMode::Edit(_)) {
            return Err(CalboardError::NotEditing);
        }
        dialog.pending = Some(PendingConfirmation::Delete);
        Ok(ConfirmationRequest::Delete)
    }

    /// Feed the user's decision on the pending confirmation back in.
    ///
    /// Declining leaves the dialog open with the form state intact and
    /// the store unchanged.
    pub fn resolve<S: Storage>(
        &mut self,
        store: &mut EventStore<S>,
        approved: bool,
    ) -> CalboardResult<Resolution> {
        let dialog = self.dialog.as_mut().ok_or(CalboardError::DialogClosed)?;
        let pending = dialog.pending.take().ok_or(CalboardError::NothingPending)?;

        if !approved {
            return Ok(Resolution::Abandoned);
        }

        match pending {
            PendingConfirmation::Overlap { draft } => {
                let event = apply_draft(&dialog.mode, store, draft)?;
                self.dialog = None;
                Ok(Resolution::Saved(event))
            }
            PendingConfirmation::Delete => {
                let id = match &dialog.mode {
                    EditorMode::Edit(id) => id.clone(),
                    EditorMode::Create => return Err(CalboardError::NotEditing),
                };
                store.delete(&id)?;
                self.dialog = None;
                Ok(Resolution::Deleted(id))
            }
        }
    }
}

/// Drag-drop reschedule. Unlike a dialog save, a conflicting move is
/// rejected outright rather than offered for override.
pub fn reschedule<S: Storage>(
    store: &mut EventStore<S>,
    id: &str,
    new_start: DateTime<Utc>,
    new_end: DateTime<Utc>,
) -> CalboardResult<Event> {
    match conflict::evaluate(new_start, new_end, store.events(), Some(id)) {
        ConflictResult::Invalid => Err(CalboardError::EndNotAfterStart),
        ConflictResult::Conflict(conflicting) => Err(CalboardError::Overlap { conflicting }),
        ConflictResult::Clear => store.move_to(id, new_start, new_end),
    }
}

fn apply_draft<S: Storage>(
    mode: &EditorMode,
    store: &mut EventStore<S>,
    draft: EventDraft,
) -> CalboardResult<Event> {
    match mode {
        EditorMode::Create => store.create(draft),
        EditorMode::Edit(id) => store.update(id, draft),
    }
}
