//! Metrics registry
//!
//! Counters only, monotonically increasing, reset on process start.
//! All counters use relaxed atomics; exact ordering across counters is
//! not needed for passive observability.

use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::{json, Value};

/// Operational counters for the pack service.
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    /// Catalog reads served from the cache
    cache_hits: AtomicU64,
    /// Catalog reads that missed the cache
    cache_misses: AtomicU64,
    /// Catalog reads answered by the store
    store_reads: AtomicU64,
    /// Catalog versions written
    catalog_updates: AtomicU64,
    /// Allocations computed
    calculations: AtomicU64,
    /// Requests rejected by input validation
    validation_rejections: AtomicU64,
}

impl MetricsRegistry {
    /// Create a registry with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a catalog read served from the cache.
    pub fn record_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a catalog read that missed the cache.
    pub fn record_cache_miss(&self) {
        self.cache_misses.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a catalog read answered by the store.
    pub fn record_store_read(&self) {
        self.store_reads.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a catalog version written.
    pub fn record_catalog_update(&self) {
        self.catalog_updates.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a computed allocation.
    pub fn record_calculation(&self) {
        self.calculations.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a request rejected by validation.
    pub fn record_validation_rejection(&self) {
        self.validation_rejections.fetch_add(1, Ordering::Relaxed);
    }

    /// Cache hits so far.
    pub fn cache_hits(&self) -> u64 {
        self.cache_hits.load(Ordering::Relaxed)
    }

    /// Cache misses so far.
    pub fn cache_misses(&self) -> u64 {
        self.cache_misses.load(Ordering::Relaxed)
    }

    /// Store reads so far.
    pub fn store_reads(&self) -> u64 {
        self.store_reads.load(Ordering::Relaxed)
    }

    /// Catalog updates so far.
    pub fn catalog_updates(&self) -> u64 {
        self.catalog_updates.load(Ordering::Relaxed)
    }

    /// Calculations so far.
    pub fn calculations(&self) -> u64 {
        self.calculations.load(Ordering::Relaxed)
    }

    /// Validation rejections so far.
    pub fn validation_rejections(&self) -> u64 {
        self.validation_rejections.load(Ordering::Relaxed)
    }

    /// Snapshot of all counters as JSON.
    pub fn to_json(&self) -> Value {
        json!({
            "cache_hits": self.cache_hits(),
            "cache_misses": self.cache_misses(),
            "store_reads": self.store_reads(),
            "catalog_updates": self.catalog_updates(),
            "calculations": self.calculations(),
            "validation_rejections": self.validation_rejections(),
        })
    }
}
