//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record persisted between runs.
//! - Enforce construction-time validation for user-entered text.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - `status` only moves `Pending -> Completed`, never back.
//! - `created_date` carries whole-second precision, so persisted and
//!   in-memory values compare equal after a round-trip.

use chrono::{Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for every task in a store.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TaskId = Uuid;

/// Completion state of a task.
///
/// Serialized with capitalized variant names (`"Pending"`, `"Completed"`),
/// the exact spelling used in persisted task documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    /// Created and not yet completed.
    Pending,
    /// Finished; terminal state.
    Completed,
}

impl TaskStatus {
    /// Stable text form used in listings and persisted documents.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Completed => "Completed",
        }
    }
}

impl Display for TaskStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Validation failure for user-entered task fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Title is empty after trimming surrounding whitespace.
    EmptyTitle,
    /// Description is empty after trimming surrounding whitespace.
    EmptyDescription,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title cannot be empty"),
            Self::EmptyDescription => write!(f, "description cannot be empty"),
        }
    }
}

impl Error for TaskValidationError {}

/// A single to-do item with identity, descriptive text, and completion
/// status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Stable global ID used as the sole lookup key.
    pub id: TaskId,
    /// Short summary line; trimmed, never empty.
    pub title: String,
    /// Free-form body text; trimmed, never empty.
    pub description: String,
    /// Current completion state.
    pub status: TaskStatus,
    /// Local wall-clock creation time, whole seconds.
    #[serde(with = "created_date_format")]
    pub created_date: NaiveDateTime,
}

impl Task {
    /// Creates a task with a generated id and the current local time.
    ///
    /// # Contract
    /// - `title` and `description` are trimmed before validation.
    /// - Status starts at `TaskStatus::Pending`.
    ///
    /// # Errors
    /// - `TaskValidationError` when either trimmed field is empty; no task
    ///   is constructed.
    pub fn new(title: &str, description: &str) -> Result<Self, TaskValidationError> {
        Self::with_id(Uuid::new_v4(), title, description)
    }

    /// Creates a task with a caller-provided stable ID.
    ///
    /// Used where identity already exists externally (tests, imports).
    pub fn with_id(
        id: TaskId,
        title: &str,
        description: &str,
    ) -> Result<Self, TaskValidationError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(TaskValidationError::EmptyTitle);
        }
        let description = description.trim();
        if description.is_empty() {
            return Err(TaskValidationError::EmptyDescription);
        }

        Ok(Self {
            id,
            title: title.to_string(),
            description: description.to_string(),
            status: TaskStatus::Pending,
            created_date: now_to_seconds(),
        })
    }

    /// Re-checks field invariants on an already-constructed task.
    ///
    /// Persistence read paths call this instead of trusting file content.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.title.trim().is_empty() {
            return Err(TaskValidationError::EmptyTitle);
        }
        if self.description.trim().is_empty() {
            return Err(TaskValidationError::EmptyDescription);
        }
        Ok(())
    }

    /// Moves the task to `Completed`.
    ///
    /// Idempotent; there is no reverse transition.
    pub fn mark_completed(&mut self) {
        self.status = TaskStatus::Completed;
    }

    /// Returns whether the task has been completed.
    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }

    /// Creation time rendered in the persisted `YYYY-MM-DD HH:MM:SS` form.
    pub fn created_date_text(&self) -> String {
        self.created_date.format(created_date_format::FORMAT).to_string()
    }
}

/// Current local time truncated to whole seconds.
fn now_to_seconds() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

/// Serde adapter for the `YYYY-MM-DD HH:MM:SS` wire form of `created_date`.
mod created_date_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&value, FORMAT).map_err(serde::de::Error::custom)
    }
}
