//! In-memory catalog store
//!
//! Backs tests and embedded use with the same contract as the file store:
//! append-only history, gap-free versions, highest active version wins.

use parking_lot::Mutex;

use super::errors::StoreResult;
use super::record::CatalogRecord;
use super::store::CatalogStore;

/// In-memory implementation of [`CatalogStore`].
#[derive(Default)]
pub struct InMemoryCatalogStore {
    versions: Mutex<Vec<CatalogRecord>>,
}

impl InMemoryCatalogStore {
    /// Create an empty store (no active catalog, as on first run).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with one active version.
    pub fn with_catalog(sizes: &[u32]) -> Self {
        let store = Self::new();
        store
            .versions
            .lock()
            .push(CatalogRecord::active(1, sizes.to_vec()));
        store
    }

    /// Number of versions held, history included.
    pub fn version_count(&self) -> usize {
        self.versions.lock().len()
    }
}

impl CatalogStore for InMemoryCatalogStore {
    fn get_active(&self) -> StoreResult<Vec<u32>> {
        let versions = self.versions.lock();
        Ok(versions
            .iter()
            .rev()
            .find(|record| record.active)
            .map(|record| record.sizes.clone())
            .unwrap_or_default())
    }

    fn put_new(&self, sizes: &[u32]) -> StoreResult<u64> {
        let mut versions = self.versions.lock();
        let next = versions.last().map_or(0, |record| record.version) + 1;
        versions.push(CatalogRecord::active(next, sizes.to_vec()));
        Ok(next)
    }
}
