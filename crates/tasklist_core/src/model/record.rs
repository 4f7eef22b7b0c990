//! Record domain model.
//!
//! # Responsibility
//! - Define the persisted list item (`Record`) and the key used to remove it.
//! - Validate user-provided descriptions before any store call.
//!
//! # Invariants
//! - A record with `id = Some(_)` comes from a backend that assigns
//!   identifiers; its removal key is the identifier.
//! - A record with `id = None` is keyed by its description text.
//! - Persisted descriptions are never empty or whitespace-only.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned identifier of the relational backend.
pub type RecordId = i64;

/// User-facing message shown when an empty description is submitted.
pub const EMPTY_DESCRIPTION_MESSAGE: &str = "Write a task";

/// One item of the task list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Record {
    /// Present only for backends that assign identifiers.
    pub id: Option<RecordId>,
    /// Free text as entered by the user, trimmed.
    pub description: String,
}

impl Record {
    /// Creates a record carrying a store-assigned identifier.
    pub fn with_id(id: RecordId, description: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            description: description.into(),
        }
    }

    /// Creates a record whose identity is its description.
    pub fn keyed_by_description(description: impl Into<String>) -> Self {
        Self {
            id: None,
            description: description.into(),
        }
    }

    /// Returns the key a store uses to remove this record.
    pub fn key(&self) -> RecordKey {
        match self.id {
            Some(id) => RecordKey::Id(id),
            None => RecordKey::Description(self.description.clone()),
        }
    }
}

/// Removal key. Each backend indexes by exactly one variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordKey {
    Id(RecordId),
    Description(String),
}

impl Display for RecordKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Id(id) => write!(f, "id:{id}"),
            // Description text stays out of messages that may reach logs.
            Self::Description(text) => write!(f, "description(len={})", text.chars().count()),
        }
    }
}

/// Input validation failures raised before the store is touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    EmptyDescription,
}

impl ValidationError {
    /// Message suitable for direct display next to the input field.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::EmptyDescription => EMPTY_DESCRIPTION_MESSAGE,
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyDescription => write!(f, "description must not be empty"),
        }
    }
}

impl Error for ValidationError {}

/// Trims `raw` and rejects empty results.
///
/// Returns the trimmed text that callers must persist.
pub fn normalize_description(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyDescription);
    }
    Ok(trimmed.to_string())
}
