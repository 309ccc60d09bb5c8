//! Pack service errors
//!
//! Validation failures surface to the client as 400s; store failures
//! propagate as 500s. Cache failures never appear here: the service logs
//! them and degrades to store-only reads.

use thiserror::Error;

use crate::allocator::MAX_TARGET;
use crate::catalog::StoreError;

/// Result type for pack service operations
pub type PackResult<T> = Result<T, PackError>;

/// Pack service errors
#[derive(Debug, Error)]
pub enum PackError {
    // ==================
    // Validation
    // ==================
    /// Catalog update with no sizes
    #[error("pack sizes cannot be empty")]
    EmptySizes,

    /// A size outside [1, 2147483647]
    #[error("pack size {0} is out of range (must be between 1 and 2147483647)")]
    SizeOutOfRange(i64),

    /// The same size listed twice
    #[error("duplicate pack size: {0}")]
    DuplicateSize(i64),

    /// An order outside [1, 2147483647]
    #[error("items value {0} is out of range (must be between 1 and 2147483647)")]
    ItemsOutOfRange(i64),

    /// An order whose search ceiling exceeds what the allocator will solve
    #[error(
        "order of {items} items against a largest pack of {max_size} exceeds \
         the solvable ceiling of {MAX_TARGET}"
    )]
    OrderTooLarge { items: u32, max_size: u32 },

    // ==================
    // Persistence
    // ==================
    /// The catalog store failed
    #[error("catalog store error: {0}")]
    Store(#[from] StoreError),
}

impl PackError {
    /// Whether this error is an input-validation failure (client error).
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            PackError::EmptySizes
                | PackError::SizeOutOfRange(_)
                | PackError::DuplicateSize(_)
                | PackError::ItemsOutOfRange(_)
                | PackError::OrderTooLarge { .. }
        )
    }
}
