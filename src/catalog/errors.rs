//! Catalog store errors
//!
//! Store failures always propagate to the caller; they are never degraded
//! into empty reads. Corruption names the byte offset so an operator can
//! inspect the log.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for catalog store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Catalog store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store file or its directory could not be opened or created
    #[error("failed to open catalog store at {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Appending a record (or its fsync) failed
    #[error("failed to append catalog version {version}: {source}")]
    Append {
        version: u64,
        #[source]
        source: io::Error,
    },

    /// Reading the record log failed
    #[error("failed to read catalog store: {0}")]
    Read(#[source] io::Error),

    /// The record log is damaged; the store refuses to serve from it
    #[error("catalog store corrupted at byte {offset}: {reason}")]
    Corrupted { offset: u64, reason: String },

    /// A concurrent writer advanced the log first; the caller may retry
    #[error("catalog version conflict: expected to write version {attempted}, log already holds {found}")]
    VersionConflict { attempted: u64, found: u64 },
}

impl StoreError {
    /// Whether the caller may retry the operation verbatim.
    pub fn is_conflict(&self) -> bool {
        matches!(self, StoreError::VersionConflict { .. })
    }
}
