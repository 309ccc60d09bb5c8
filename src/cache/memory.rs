//! In-memory TTL cache
//!
//! Entries carry an absolute deadline and are reclaimed lazily: a read
//! past the deadline removes the entry and reports a miss. Hit, miss, and
//! expiry counts are kept for observability only.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use parking_lot::RwLock;

use super::errors::{CacheError, CacheResult};
use super::CatalogCache;

struct CacheEntry {
    value: Vec<u32>,
    expires_at: Instant,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Passive cache statistics.
#[derive(Debug, Default)]
pub struct CacheStats {
    hits: AtomicU64,
    misses: AtomicU64,
    expirations: AtomicU64,
}

impl CacheStats {
    /// Number of reads served from a live entry.
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// Number of reads that found no entry.
    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    /// Number of entries reclaimed past their deadline.
    pub fn expirations(&self) -> u64 {
        self.expirations.load(Ordering::Relaxed)
    }
}

/// In-memory implementation of [`CatalogCache`].
///
/// Safe for concurrent use across handler tasks.
#[derive(Default)]
pub struct InMemoryTtlCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    stats: CacheStats,
}

impl InMemoryTtlCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cache statistics.
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Number of entries currently held, expired ones included until read.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl CatalogCache for InMemoryTtlCache {
    fn get(&self, key: &str) -> CacheResult<Vec<u32>> {
        let now = Instant::now();

        {
            let entries = self.entries.read();
            match entries.get(key) {
                Some(entry) if !entry.is_expired(now) => {
                    self.stats.hits.fetch_add(1, Ordering::Relaxed);
                    return Ok(entry.value.clone());
                }
                Some(_) => {}
                None => {
                    self.stats.misses.fetch_add(1, Ordering::Relaxed);
                    return Err(CacheError::NotFound(key.to_string()));
                }
            }
        }

        // The entry exists but is past its deadline: reclaim under the
        // write lock, re-checking in case a racing set refreshed it.
        let mut entries = self.entries.write();
        match entries.get(key) {
            Some(entry) if !entry.is_expired(now) => {
                self.stats.hits.fetch_add(1, Ordering::Relaxed);
                Ok(entry.value.clone())
            }
            Some(_) => {
                entries.remove(key);
                self.stats.expirations.fetch_add(1, Ordering::Relaxed);
                self.stats.misses.fetch_add(1, Ordering::Relaxed);
                Err(CacheError::NotFound(key.to_string()))
            }
            None => {
                self.stats.misses.fetch_add(1, Ordering::Relaxed);
                Err(CacheError::NotFound(key.to_string()))
            }
        }
    }

    fn set(&self, key: &str, value: &[u32], ttl: Duration) -> CacheResult<()> {
        let entry = CacheEntry {
            value: value.to_vec(),
            expires_at: Instant::now() + ttl,
        };
        self.entries.write().insert(key.to_string(), entry);
        Ok(())
    }

    fn delete(&self, key: &str) -> CacheResult<()> {
        self.entries.write().remove(key);
        Ok(())
    }
}
