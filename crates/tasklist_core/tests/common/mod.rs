#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tasklist_core::{FeedbackSink, ListView, Record, RecordKey, StoreResult, TaskStore};

/// One observable effect of a mirror operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signal {
    ListChanged,
    ValidationError(String),
    AddFeedback,
    DeleteFeedback,
}

/// Shared log of view and feedback signals.
#[derive(Debug, Clone, Default)]
pub struct Recorder(Rc<RefCell<Vec<Signal>>>);

impl Recorder {
    pub fn signals(&self) -> Vec<Signal> {
        self.0.borrow().clone()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

impl ListView for Recorder {
    fn notify_list_changed(&mut self) {
        self.0.borrow_mut().push(Signal::ListChanged);
    }

    fn show_validation_error(&mut self, message: &str) {
        self.0
            .borrow_mut()
            .push(Signal::ValidationError(message.to_string()));
    }
}

impl FeedbackSink for Recorder {
    fn on_add_feedback(&mut self) {
        self.0.borrow_mut().push(Signal::AddFeedback);
    }

    fn on_delete_feedback(&mut self) {
        self.0.borrow_mut().push(Signal::DeleteFeedback);
    }
}

/// Store wrapper counting calls that reach the backend.
pub struct CountingStore<S> {
    pub inner: S,
    pub adds: Cell<usize>,
    pub removes: Cell<usize>,
}

impl<S> CountingStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            adds: Cell::new(0),
            removes: Cell::new(0),
        }
    }
}

impl<S: TaskStore> TaskStore for CountingStore<S> {
    fn backend_name(&self) -> &'static str {
        self.inner.backend_name()
    }

    fn add(&self, description: &str) -> StoreResult<Record> {
        self.adds.set(self.adds.get() + 1);
        self.inner.add(description)
    }

    fn list_all(&self) -> StoreResult<Vec<Record>> {
        self.inner.list_all()
    }

    fn remove(&self, key: &RecordKey) -> StoreResult<()> {
        self.removes.set(self.removes.get() + 1);
        self.inner.remove(key)
    }
}
