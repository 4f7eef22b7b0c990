//! Core of the single-screen task list.
//! Persistence backends, the in-memory list mirror and the swipe-to-delete
//! gesture live here; rendering, audio and the app shell stay outside.

pub mod config;
pub mod db;
pub mod gesture;
pub mod logging;
pub mod mirror;
pub mod model;
pub mod prefs;
pub mod store;

pub use config::{open_store, BackendKind, StoreConfig};
pub use gesture::{
    DeleteGesture, DragFrame, GestureConfig, GestureEvent, GestureState, SwipeDirection,
};
pub use logging::{default_log_level, init_logging, logging_status, LogSettings, LoggingError};
pub use mirror::{
    FeedbackSink, ListMirror, ListView, MirrorError, MirrorResult, NoopView, SilentFeedback,
};
pub use model::record::{
    normalize_description, Record, RecordId, RecordKey, ValidationError,
    EMPTY_DESCRIPTION_MESSAGE,
};
pub use store::preference_store::PreferenceTaskStore;
pub use store::sqlite_store::SqliteTaskStore;
pub use store::{StoreError, StoreResult, TaskStore};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
