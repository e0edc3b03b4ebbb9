//! In-memory task store with write-through persistence.
//!
//! # Responsibility
//! - Own the authoritative ordered task sequence.
//! - Persist the full sequence through a `TaskArchive` after every mutation.
//!
//! # Invariants
//! - Task ids are unique within the store.
//! - Ordering is insertion order and survives save/load.
//! - A mutating call either fully succeeds (memory and archive updated) or
//!   leaves the prior in-memory state intact and returns an error.

use crate::model::task::{Task, TaskId, TaskValidationError};
use crate::repo::task_archive::{ArchiveError, TaskArchive};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Store error wrapping validation, lookup, and persistence failures.
#[derive(Debug)]
pub enum StoreError {
    Validation(TaskValidationError),
    NotFound(TaskId),
    Archive(ArchiveError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "task not found: {id}"),
            Self::Archive(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) => None,
            Self::Archive(err) => Some(err),
        }
    }
}

impl From<TaskValidationError> for StoreError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<ArchiveError> for StoreError {
    fn from(value: ArchiveError) -> Self {
        Self::Archive(value)
    }
}

/// Ordered task collection persisted through an archive.
///
/// The store exclusively owns the in-memory sequence; the archive is a pure
/// serialization view of it.
pub struct TaskStore<A: TaskArchive> {
    archive: A,
    tasks: Vec<Task>,
}

impl<A: TaskArchive> TaskStore<A> {
    /// Loads the persisted sequence and takes ownership of the archive.
    ///
    /// # Errors
    /// Propagates archive failures unchanged, so callers can decide between
    /// aborting and recovering with [`TaskStore::with_tasks`].
    pub fn load(archive: A) -> StoreResult<Self> {
        let tasks = archive.load()?;
        Ok(Self { archive, tasks })
    }

    /// Builds a store over a caller-provided sequence.
    ///
    /// Recovery path for callers that substituted content after a failed
    /// load; nothing is persisted until the next mutation.
    pub fn with_tasks(archive: A, tasks: Vec<Task>) -> Self {
        Self { archive, tasks }
    }

    /// Creates and appends a task, then persists the sequence.
    ///
    /// # Contract
    /// - `title` and `description` are trimmed and must be non-empty.
    /// - The new task starts as `TaskStatus::Pending` at the end of the
    ///   list.
    ///
    /// # Errors
    /// - `StoreError::Validation` when either trimmed field is empty.
    /// - `StoreError::Archive` when the save fails; the appended task is
    ///   removed again first.
    pub fn add(&mut self, title: &str, description: &str) -> StoreResult<Task> {
        let task = Task::new(title, description)?;

        self.tasks.push(task.clone());
        if let Err(err) = self.archive.save(&self.tasks) {
            self.tasks.pop();
            return Err(err.into());
        }

        info!("event=task_add module=store status=ok id={}", task.id);
        Ok(task)
    }

    /// Returns all tasks in insertion order.
    pub fn list(&self) -> &[Task] {
        &self.tasks
    }

    /// Finds a task by id via linear scan.
    pub fn find_by_id(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Marks a task completed and persists the sequence.
    ///
    /// Marking an already-completed task succeeds and changes nothing.
    ///
    /// # Errors
    /// - `StoreError::NotFound` when no task has `id`.
    /// - `StoreError::Archive` when the save fails; the previous status is
    ///   restored first.
    pub fn mark_complete(&mut self, id: TaskId) -> StoreResult<Task> {
        let index = self.position(id).ok_or(StoreError::NotFound(id))?;

        let previous = self.tasks[index].status;
        self.tasks[index].mark_completed();
        if let Err(err) = self.archive.save(&self.tasks) {
            self.tasks[index].status = previous;
            return Err(err.into());
        }

        info!("event=task_complete module=store status=ok id={id}");
        Ok(self.tasks[index].clone())
    }

    /// Removes a task and persists the sequence.
    ///
    /// Relative order of the remaining tasks is preserved.
    ///
    /// # Errors
    /// - `StoreError::NotFound` when no task has `id`.
    /// - `StoreError::Archive` when the save fails; the task is reinserted
    ///   at its original position first.
    pub fn delete(&mut self, id: TaskId) -> StoreResult<Task> {
        let index = self.position(id).ok_or(StoreError::NotFound(id))?;

        let removed = self.tasks.remove(index);
        if let Err(err) = self.archive.save(&self.tasks) {
            self.tasks.insert(index, removed);
            return Err(err.into());
        }

        info!("event=task_delete module=store status=ok id={id}");
        Ok(removed)
    }

    /// Number of tasks currently in the store.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns whether the store holds no tasks.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    fn position(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| task.id == id)
    }
}
