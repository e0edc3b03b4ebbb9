//! Persistence layer abstractions and the JSON file implementation.
//!
//! # Responsibility
//! - Define the storage contract for the full task sequence.
//! - Isolate file-format details from store orchestration.
//!
//! # Invariants
//! - Archive reads validate persisted state instead of trusting it.
//! - Archive writes replace the whole document in one operation.

pub mod task_archive;
