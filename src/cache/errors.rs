//! Cache errors
//!
//! `NotFound` is control flow: the service falls back to the store on it.
//! `Backend` covers genuine cache failures, which the service logs and
//! degrades around rather than surfacing.

use thiserror::Error;

/// Result type for cache operations
pub type CacheResult<T> = Result<T, CacheError>;

/// Catalog cache errors
#[derive(Debug, Clone, Error)]
pub enum CacheError {
    /// The key has no live entry (miss or expired)
    #[error("cache key not found: {0}")]
    NotFound(String),

    /// The cache backend failed
    #[error("cache backend failed: {0}")]
    Backend(String),
}

impl CacheError {
    /// Whether this is the miss signal rather than a failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CacheError::NotFound(_))
    }
}
