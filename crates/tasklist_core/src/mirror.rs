//! In-memory list mirror kept in step with the task store.
//!
//! # Responsibility
//! - Hold the ordered records the view renders; every view index refers here.
//! - Route add/delete through validation, the store, view notification and
//!   feedback, in that order.
//!
//! # Invariants
//! - After a successful operation every mirrored record has exactly one
//!   persisted counterpart.
//! - Positions are transient indices into the current sequence and are never
//!   persisted.
//! - Mutations take `&mut self`, so one finishes before the next begins.
//! - At most one mirrored record per store key.
//! - A failed store delete is reconciled by re-reading the store; if that
//!   read also fails, the removed record is put back at its position.

use crate::gesture::{DeleteGesture, GestureEvent};
use crate::model::record::{normalize_description, Record, ValidationError};
use crate::store::{StoreError, TaskStore};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type MirrorResult<T> = Result<T, MirrorError>;

/// Failure of a mirror operation.
#[derive(Debug)]
pub enum MirrorError {
    Validation(ValidationError),
    Store(StoreError),
    PositionOutOfBounds { position: usize, len: usize },
}

impl Display for MirrorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::PositionOutOfBounds { position, len } => {
                write!(f, "position {position} out of bounds for list of {len}")
            }
        }
    }
}

impl Error for MirrorError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::PositionOutOfBounds { .. } => None,
        }
    }
}

impl From<ValidationError> for MirrorError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for MirrorError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// View-layer hooks driven by the mirror.
pub trait ListView {
    /// The whole list must be redrawn.
    fn notify_list_changed(&mut self);
    /// Input was rejected; show `message` next to the input field.
    fn show_validation_error(&mut self, message: &str);
}

/// Audio/visual feedback on successful mutations.
pub trait FeedbackSink {
    fn on_add_feedback(&mut self);
    fn on_delete_feedback(&mut self);
}

/// View that ignores every signal.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopView;

impl ListView for NoopView {
    fn notify_list_changed(&mut self) {}
    fn show_validation_error(&mut self, _message: &str) {}
}

/// Feedback sink that plays nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentFeedback;

impl FeedbackSink for SilentFeedback {
    fn on_add_feedback(&mut self) {}
    fn on_delete_feedback(&mut self) {}
}

/// Ordered in-memory copy of the store for one view session.
pub struct ListMirror<S: TaskStore> {
    store: S,
    items: Vec<Record>,
    view: Box<dyn ListView>,
    feedback: Box<dyn FeedbackSink>,
}

impl<S: TaskStore> ListMirror<S> {
    /// Reads the store once and builds the session's mirror.
    pub fn load(
        store: S,
        view: Box<dyn ListView>,
        feedback: Box<dyn FeedbackSink>,
    ) -> MirrorResult<Self> {
        let items = store.list_all()?;
        info!(
            "event=mirror_load module=mirror status=ok backend={} count={}",
            store.backend_name(),
            items.len()
        );
        Ok(Self {
            store,
            items,
            view,
            feedback,
        })
    }

    /// Loads with no view or feedback attached.
    pub fn load_detached(store: S) -> MirrorResult<Self> {
        Self::load(store, Box::new(NoopView), Box::new(SilentFeedback))
    }

    /// Validates, persists and appends one item.
    ///
    /// When the store absorbed the item into an existing entry (same key),
    /// nothing is appended.
    ///
    /// # Errors
    /// - `Validation` for empty or whitespace-only input; the store is not
    ///   called and the view shows the validation message.
    /// - `Store` when persistence fails; the mirror is unchanged.
    pub fn add_item(&mut self, raw: &str) -> MirrorResult<Record> {
        let description = match normalize_description(raw) {
            Ok(description) => description,
            Err(err) => {
                self.view.show_validation_error(err.user_message());
                return Err(err.into());
            }
        };

        let record = match self.store.add(&description) {
            Ok(record) => record,
            Err(err) => {
                error!(
                    "event=mirror_add module=mirror status=error backend={} error={}",
                    self.store.backend_name(),
                    err
                );
                return Err(err.into());
            }
        };

        // Description-keyed backends absorb duplicates; keep one row per entry.
        let key = record.key();
        if !self.items.iter().any(|existing| existing.key() == key) {
            self.items.push(record.clone());
        }
        self.view.notify_list_changed();
        self.feedback.on_add_feedback();
        info!(
            "event=mirror_add module=mirror status=ok backend={} count={}",
            self.store.backend_name(),
            self.items.len()
        );
        Ok(record)
    }

    /// Removes the item at `position` locally, then from the store.
    ///
    /// # Errors
    /// - `PositionOutOfBounds` without any side effect.
    /// - `Store` after the mirror was reconciled with the store.
    pub fn delete_item(&mut self, position: usize) -> MirrorResult<Record> {
        if position >= self.items.len() {
            return Err(MirrorError::PositionOutOfBounds {
                position,
                len: self.items.len(),
            });
        }

        let record = self.items.remove(position);
        if let Err(err) = self.store.remove(&record.key()) {
            warn!(
                "event=mirror_delete module=mirror status=error backend={} position={} error={}",
                self.store.backend_name(),
                position,
                err
            );
            self.reconcile_after_failed_delete(position, record);
            self.view.notify_list_changed();
            return Err(err.into());
        }

        self.view.notify_list_changed();
        self.feedback.on_delete_feedback();
        info!(
            "event=mirror_delete module=mirror status=ok backend={} position={} count={}",
            self.store.backend_name(),
            position,
            self.items.len()
        );
        Ok(record)
    }

    /// Releases `gesture` and deletes its row on commit.
    ///
    /// The gesture is idle when this returns, including when it had already
    /// been released into `Committed` before the call.
    pub fn release_swipe(&mut self, gesture: &mut DeleteGesture) -> MirrorResult<Option<Record>> {
        let outcome = match gesture.release() {
            GestureEvent::Commit { position, .. } => self.delete_item(position).map(Some),
            GestureEvent::Aborted { .. } | GestureEvent::Ignored => Ok(None),
        };
        // Also clears a commit released earlier outside this call.
        gesture.finish();
        outcome
    }

    /// Replaces the mirror with a fresh read of the store.
    pub fn reload(&mut self) -> MirrorResult<()> {
        self.items = self.store.list_all()?;
        self.view.notify_list_changed();
        info!(
            "event=mirror_reconcile module=mirror status=ok reason=reload count={}",
            self.items.len()
        );
        Ok(())
    }

    pub fn items(&self) -> &[Record] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&Record> {
        self.items.get(position)
    }

    /// Descriptions in display order.
    pub fn descriptions(&self) -> Vec<&str> {
        self.items
            .iter()
            .map(|record| record.description.as_str())
            .collect()
    }

    /// Ends the session and hands the store back.
    pub fn into_store(self) -> S {
        self.store
    }

    fn reconcile_after_failed_delete(&mut self, position: usize, record: Record) {
        match self.store.list_all() {
            Ok(records) => {
                self.items = records;
                info!(
                    "event=mirror_reconcile module=mirror status=ok reason=delete_failed count={}",
                    self.items.len()
                );
            }
            Err(err) => {
                self.items.insert(position, record);
                error!(
                    "event=mirror_reconcile module=mirror status=error reason=delete_failed action=rollback error={}",
                    err
                );
            }
        }
    }
}
