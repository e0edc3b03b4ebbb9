//! Task archive contracts and JSON file implementation.
//!
//! # Responsibility
//! - Provide load/save of the full task sequence behind a storage seam.
//! - Keep file-format details inside the persistence boundary.
//!
//! # Invariants
//! - Read paths must reject invalid persisted state instead of masking it.
//! - `save` rewrites the entire document; there are no partial writes.
//! - A missing backing file is an empty archive, not an error.

use crate::model::task::{Task, TaskId, TaskValidationError};
use log::{debug, error, info};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

pub type ArchiveResult<T> = Result<T, ArchiveError>;

/// Persistence failure for the task archive.
#[derive(Debug)]
pub enum ArchiveError {
    /// Backing file exists but could not be read.
    Read { path: PathBuf, source: io::Error },
    /// Backing file could not be written.
    Write { path: PathBuf, source: io::Error },
    /// Backing file content is not a valid task document.
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// Task sequence could not be serialized.
    Serialize(serde_json::Error),
    /// A persisted record fails task field validation.
    InvalidTask {
        id: TaskId,
        source: TaskValidationError,
    },
    /// Two persisted records share one id.
    DuplicateTaskId(TaskId),
}

impl ArchiveError {
    /// Whether the failure concerns file content rather than file access.
    ///
    /// Content failures mean the file is present but unusable; callers may
    /// reasonably continue with a substitute sequence. Access failures leave
    /// the data possibly intact, so recovery would risk overwriting it.
    pub fn is_content_error(&self) -> bool {
        matches!(
            self,
            Self::Malformed { .. } | Self::InvalidTask { .. } | Self::DuplicateTaskId(_)
        )
    }
}

impl Display for ArchiveError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "failed to read task file `{}`: {source}", path.display())
            }
            Self::Write { path, source } => {
                write!(f, "failed to write task file `{}`: {source}", path.display())
            }
            Self::Malformed { path, source } => {
                write!(f, "malformed task file `{}`: {source}", path.display())
            }
            Self::Serialize(err) => write!(f, "failed to serialize tasks: {err}"),
            Self::InvalidTask { id, source } => {
                write!(f, "invalid persisted task {id}: {source}")
            }
            Self::DuplicateTaskId(id) => write!(f, "duplicate task id in archive: {id}"),
        }
    }
}

impl Error for ArchiveError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read { source, .. } | Self::Write { source, .. } => Some(source),
            Self::Malformed { source, .. } => Some(source),
            Self::Serialize(err) => Some(err),
            Self::InvalidTask { source, .. } => Some(source),
            Self::DuplicateTaskId(_) => None,
        }
    }
}

/// Storage seam for the full task sequence.
pub trait TaskArchive {
    /// Loads every persisted task in stored order.
    fn load(&self) -> ArchiveResult<Vec<Task>>;

    /// Replaces the persisted document with `tasks`, in order.
    fn save(&self, tasks: &[Task]) -> ArchiveResult<()>;
}

/// JSON-file-backed task archive.
///
/// The document is a single pretty-printed array of task objects; every
/// save rewrites it in full.
pub struct JsonTaskArchive {
    path: PathBuf,
}

impl JsonTaskArchive {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TaskArchive for JsonTaskArchive {
    fn load(&self) -> ArchiveResult<Vec<Task>> {
        let started_at = Instant::now();

        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                info!("event=archive_load module=repo status=ok mode=absent count=0");
                return Ok(Vec::new());
            }
            Err(err) => {
                error!(
                    "event=archive_load module=repo status=error error_code=read_failed error={err}"
                );
                return Err(ArchiveError::Read {
                    path: self.path.clone(),
                    source: err,
                });
            }
        };

        let tasks: Vec<Task> = match serde_json::from_str(&data) {
            Ok(tasks) => tasks,
            Err(err) => {
                error!(
                    "event=archive_load module=repo status=error error_code=malformed error={err}"
                );
                return Err(ArchiveError::Malformed {
                    path: self.path.clone(),
                    source: err,
                });
            }
        };

        if let Err(err) = check_store_invariants(&tasks) {
            error!("event=archive_load module=repo status=error error_code=invalid_task error={err}");
            return Err(err);
        }

        info!(
            "event=archive_load module=repo status=ok mode=file count={} duration_ms={}",
            tasks.len(),
            started_at.elapsed().as_millis()
        );
        Ok(tasks)
    }

    fn save(&self, tasks: &[Task]) -> ArchiveResult<()> {
        let started_at = Instant::now();

        let serialized = serde_json::to_string_pretty(tasks).map_err(ArchiveError::Serialize)?;
        if let Err(err) = fs::write(&self.path, serialized) {
            error!(
                "event=archive_save module=repo status=error error_code=write_failed error={err}"
            );
            return Err(ArchiveError::Write {
                path: self.path.clone(),
                source: err,
            });
        }

        debug!(
            "event=archive_save module=repo status=ok count={} duration_ms={}",
            tasks.len(),
            started_at.elapsed().as_millis()
        );
        Ok(())
    }
}

/// Rejects persisted sequences that violate store invariants.
fn check_store_invariants(tasks: &[Task]) -> ArchiveResult<()> {
    let mut seen = HashSet::new();
    for task in tasks {
        task.validate().map_err(|source| ArchiveError::InvalidTask {
            id: task.id,
            source,
        })?;
        if !seen.insert(task.id) {
            return Err(ArchiveError::DuplicateTaskId(task.id));
        }
    }
    Ok(())
}
