//! Pack service orchestration
//!
//! Read path: cache -> store fallback -> write-through repopulation.
//! Update path: validate -> store write -> best-effort cache invalidation.
//! Calculation: validate -> read active catalog -> allocator.
//!
//! Cache write and delete failures are logged and swallowed; the service
//! keeps working against the store alone. Store failures always propagate.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use crate::allocator::{self, Allocation};
use crate::cache::CatalogCache;
use crate::catalog::CatalogStore;
use crate::observability::{Logger, MetricsRegistry};

use super::errors::{PackError, PackResult};

/// Cache key under which the active catalog is stored.
pub const ACTIVE_CATALOG_KEY: &str = "pack-sizes:active";

/// How long a cached catalog stays live.
pub const CATALOG_TTL: Duration = Duration::from_secs(3600);

const MIN_PACK_SIZE: i64 = 1;
const MAX_PACK_SIZE: i64 = 2_147_483_647;
const MIN_ITEMS: i64 = 1;
const MAX_ITEMS: i64 = 2_147_483_647;

/// The pack service, generic over its store and cache capabilities.
pub struct PackService<S, C> {
    store: S,
    cache: C,
    metrics: Arc<MetricsRegistry>,
    ttl: Duration,
}

impl<S: CatalogStore, C: CatalogCache> PackService<S, C> {
    /// Create a service over the given store and cache with the default
    /// catalog TTL.
    pub fn new(store: S, cache: C, metrics: Arc<MetricsRegistry>) -> Self {
        Self::with_ttl(store, cache, metrics, CATALOG_TTL)
    }

    /// Create a service with a custom catalog TTL.
    pub fn with_ttl(store: S, cache: C, metrics: Arc<MetricsRegistry>, ttl: Duration) -> Self {
        Self {
            store,
            cache,
            metrics,
            ttl,
        }
    }

    /// The active catalog, read through the cache.
    ///
    /// On a cache hit the store is not touched. On a miss (or a degraded
    /// cache read) the store answers and the cache is repopulated with
    /// the configured TTL ([`CATALOG_TTL`] by default); a failed
    /// repopulation is logged, not surfaced. Returns an empty catalog
    /// before the first update.
    pub fn get_pack_sizes(&self) -> PackResult<Vec<u32>> {
        match self.cache.get(ACTIVE_CATALOG_KEY) {
            Ok(sizes) => {
                self.metrics.record_cache_hit();
                return Ok(sizes);
            }
            Err(err) => {
                self.metrics.record_cache_miss();
                if !err.is_not_found() {
                    Logger::warn(
                        "cache_get_failed",
                        &[("key", ACTIVE_CATALOG_KEY), ("error", &err.to_string())],
                    );
                }
            }
        }

        let sizes = self.store.get_active()?;
        self.metrics.record_store_read();

        if let Err(err) = self.cache.set(ACTIVE_CATALOG_KEY, &sizes, self.ttl) {
            Logger::warn(
                "cache_set_failed",
                &[("key", ACTIVE_CATALOG_KEY), ("error", &err.to_string())],
            );
        }

        Ok(sizes)
    }

    /// Write a new catalog version and invalidate the cache.
    ///
    /// Validates that sizes are non-empty, in range, and free of
    /// duplicates. The cache delete after a successful write is
    /// best-effort; readers refill on their next miss. Returns the new
    /// version number.
    pub fn update_pack_sizes(&self, sizes: &[i64]) -> PackResult<u64> {
        let validated = self.validate_sizes(sizes)?;

        let version = self.store.put_new(&validated)?;
        self.metrics.record_catalog_update();
        Logger::info(
            "catalog_updated",
            &[
                ("version", &version.to_string()),
                ("size_count", &validated.len().to_string()),
            ],
        );

        if let Err(err) = self.cache.delete(ACTIVE_CATALOG_KEY) {
            Logger::warn(
                "cache_delete_failed",
                &[("key", ACTIVE_CATALOG_KEY), ("error", &err.to_string())],
            );
        }

        Ok(version)
    }

    /// Compute the optimal allocation for an order of `items`.
    ///
    /// The active catalog is a snapshot for this call. An empty catalog
    /// yields the empty allocation; orders the allocator will not solve
    /// are rejected up front rather than degraded.
    pub fn calculate(&self, items: i64) -> PackResult<Allocation> {
        if !(MIN_ITEMS..=MAX_ITEMS).contains(&items) {
            return Err(self.reject(PackError::ItemsOutOfRange(items)));
        }
        let items = items as u32;

        let sizes = self.get_pack_sizes()?;
        if sizes.is_empty() {
            return Ok(Allocation::empty());
        }

        if !allocator::solvable(&sizes, items) {
            let max_size = sizes.iter().copied().max().unwrap_or(0);
            return Err(self.reject(PackError::OrderTooLarge { items, max_size }));
        }

        let allocation = allocator::allocate(&sizes, items);
        self.metrics.record_calculation();
        Ok(allocation)
    }

    fn validate_sizes(&self, sizes: &[i64]) -> PackResult<Vec<u32>> {
        if sizes.is_empty() {
            return Err(self.reject(PackError::EmptySizes));
        }

        let mut seen = HashSet::with_capacity(sizes.len());
        let mut validated = Vec::with_capacity(sizes.len());
        for &size in sizes {
            if !(MIN_PACK_SIZE..=MAX_PACK_SIZE).contains(&size) {
                return Err(self.reject(PackError::SizeOutOfRange(size)));
            }
            if !seen.insert(size) {
                return Err(self.reject(PackError::DuplicateSize(size)));
            }
            validated.push(size as u32);
        }

        Ok(validated)
    }

    fn reject(&self, err: PackError) -> PackError {
        self.metrics.record_validation_rejection();
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::InMemoryTtlCache;
    use crate::catalog::InMemoryCatalogStore;

    fn service_with(
        sizes: &[u32],
    ) -> PackService<InMemoryCatalogStore, InMemoryTtlCache> {
        PackService::new(
            InMemoryCatalogStore::with_catalog(sizes),
            InMemoryTtlCache::new(),
            Arc::new(MetricsRegistry::new()),
        )
    }

    fn empty_service() -> PackService<InMemoryCatalogStore, InMemoryTtlCache> {
        PackService::new(
            InMemoryCatalogStore::new(),
            InMemoryTtlCache::new(),
            Arc::new(MetricsRegistry::new()),
        )
    }

    // ==================== Read Path Tests ====================

    #[test]
    fn test_get_pack_sizes_reads_store() {
        let service = service_with(&[250, 500, 1000]);
        assert_eq!(service.get_pack_sizes().unwrap(), vec![250, 500, 1000]);
    }

    #[test]
    fn test_first_run_returns_empty_catalog() {
        let service = empty_service();
        assert_eq!(service.get_pack_sizes().unwrap(), Vec::<u32>::new());
    }

    #[test]
    fn test_update_then_read_round_trip() {
        let service = empty_service();
        service.update_pack_sizes(&[250, 500]).unwrap();
        assert_eq!(service.get_pack_sizes().unwrap(), vec![250, 500]);
    }

    #[test]
    fn test_update_returns_ascending_versions() {
        let service = empty_service();
        assert_eq!(service.update_pack_sizes(&[250]).unwrap(), 1);
        assert_eq!(service.update_pack_sizes(&[500]).unwrap(), 2);
    }

    // ==================== Update Validation Tests ====================

    #[test]
    fn test_update_rejects_empty() {
        let service = empty_service();
        let err = service.update_pack_sizes(&[]).unwrap_err();
        assert!(matches!(err, PackError::EmptySizes));
    }

    #[test]
    fn test_update_rejects_duplicates() {
        let service = empty_service();
        let err = service.update_pack_sizes(&[250, 500, 250]).unwrap_err();
        assert!(matches!(err, PackError::DuplicateSize(250)));
    }

    #[test]
    fn test_update_rejects_out_of_range_sizes() {
        let service = empty_service();
        for bad in [0i64, -100, 2_147_483_648] {
            let err = service.update_pack_sizes(&[250, bad]).unwrap_err();
            assert!(matches!(err, PackError::SizeOutOfRange(_)), "{}", bad);
        }
    }

    #[test]
    fn test_update_accepts_max_boundary() {
        let service = empty_service();
        assert!(service
            .update_pack_sizes(&[250, 500, 2_147_483_647])
            .is_ok());
    }

    #[test]
    fn test_rejected_update_does_not_write() {
        let service = empty_service();
        let _ = service.update_pack_sizes(&[250, 250]);
        assert_eq!(service.get_pack_sizes().unwrap(), Vec::<u32>::new());
    }

    // ==================== Calculation Tests ====================

    #[test]
    fn test_calculate_simple_order() {
        let service = service_with(&[250, 500, 1000]);
        let allocation = service.calculate(251).unwrap();
        assert_eq!(allocation.total_items(), 500);
        assert_eq!(allocation.total_packs(), 1);
    }

    #[test]
    fn test_calculate_rejects_zero_items() {
        let service = service_with(&[250]);
        let err = service.calculate(0).unwrap_err();
        assert!(matches!(err, PackError::ItemsOutOfRange(0)));
    }

    #[test]
    fn test_calculate_rejects_items_over_max() {
        let service = service_with(&[250]);
        let err = service.calculate(2_147_483_648).unwrap_err();
        assert!(matches!(err, PackError::ItemsOutOfRange(_)));
    }

    #[test]
    fn test_calculate_rejects_unsolvable_ceiling() {
        let service = service_with(&[250, 500]);
        let err = service.calculate(9_999_999).unwrap_err();
        assert!(matches!(err, PackError::OrderTooLarge { .. }));
        assert!(err.is_validation());
    }

    #[test]
    fn test_calculate_single_huge_size_is_solvable() {
        let service = service_with(&[2_147_483_647]);
        let allocation = service.calculate(5).unwrap();
        assert_eq!(allocation.total_packs(), 1);
    }

    #[test]
    fn test_calculate_empty_catalog_returns_empty_allocation() {
        let service = empty_service();
        let allocation = service.calculate(100).unwrap();
        assert!(allocation.is_empty());
    }

    // ==================== Metrics Tests ====================

    #[test]
    fn test_metrics_observe_read_path() {
        let metrics = Arc::new(MetricsRegistry::new());
        let service = PackService::new(
            InMemoryCatalogStore::with_catalog(&[250, 500]),
            InMemoryTtlCache::new(),
            Arc::clone(&metrics),
        );

        service.get_pack_sizes().unwrap(); // miss -> store
        service.get_pack_sizes().unwrap(); // hit

        assert_eq!(metrics.cache_misses(), 1);
        assert_eq!(metrics.store_reads(), 1);
        assert_eq!(metrics.cache_hits(), 1);
    }

    #[test]
    fn test_metrics_observe_rejections() {
        let metrics = Arc::new(MetricsRegistry::new());
        let service = PackService::new(
            InMemoryCatalogStore::new(),
            InMemoryTtlCache::new(),
            Arc::clone(&metrics),
        );

        let _ = service.update_pack_sizes(&[]);
        let _ = service.calculate(0);

        assert_eq!(metrics.validation_rejections(), 2);
    }
}
