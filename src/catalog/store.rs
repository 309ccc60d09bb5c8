//! Append-only catalog store with fsync enforcement
//!
//! A catalog update is a single record appended to `catalog/versions.dat`;
//! the fsync after the append is the commit point. The active catalog is
//! the highest-versioned record written active, so a crash can never leave
//! two active versions: either the new record is fully on disk and wins,
//! or it is absent (a torn tail is caught by checksum) and the prior
//! version still wins.
//!
//! Writers are serialized by an internal mutex. Before appending, the
//! store re-checks that the log has not grown behind its back; if another
//! handle advanced it, the append fails with a version conflict for the
//! caller to retry.

use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use super::errors::{StoreError, StoreResult};
use super::record::{CatalogRecord, MIN_RECORD_SIZE};

/// Capability interface of the versioned catalog store.
///
/// `get_active` returns the sizes of the currently active version, or an
/// empty sequence before the first update. `put_new` writes the next
/// version (deactivating the prior one) and returns its number.
pub trait CatalogStore: Send + Sync {
    fn get_active(&self) -> StoreResult<Vec<u32>>;
    fn put_new(&self, sizes: &[u32]) -> StoreResult<u64>;
}

impl<T: CatalogStore + ?Sized> CatalogStore for &T {
    fn get_active(&self) -> StoreResult<Vec<u32>> {
        (**self).get_active()
    }

    fn put_new(&self, sizes: &[u32]) -> StoreResult<u64> {
        (**self).put_new(sizes)
    }
}

impl<T: CatalogStore + ?Sized> CatalogStore for std::sync::Arc<T> {
    fn get_active(&self) -> StoreResult<Vec<u32>> {
        (**self).get_active()
    }

    fn put_new(&self, sizes: &[u32]) -> StoreResult<u64> {
        (**self).put_new(sizes)
    }
}

/// File-backed catalog store maintaining `<data_dir>/catalog/versions.dat`.
pub struct FileCatalogStore {
    inner: Mutex<StoreInner>,
}

struct StoreInner {
    store_path: PathBuf,
    file: File,
    current_offset: u64,
    /// Full version history, rebuilt on open. Catalogs are small.
    versions: BTreeMap<u64, CatalogRecord>,
    /// Highest version written active, if any.
    active_version: Option<u64>,
}

impl FileCatalogStore {
    /// Opens or creates the catalog store under the given data directory.
    ///
    /// Creates `<data_dir>/catalog/versions.dat` if missing and rebuilds
    /// in-memory state by scanning existing records. Any damaged record
    /// fails the open.
    pub fn open(data_dir: &Path) -> StoreResult<Self> {
        let catalog_dir = data_dir.join("catalog");
        let store_path = catalog_dir.join("versions.dat");

        if !catalog_dir.exists() {
            fs::create_dir_all(&catalog_dir).map_err(|e| StoreError::Open {
                path: catalog_dir.clone(),
                source: e,
            })?;
        }

        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&store_path)
            .map_err(|e| StoreError::Open {
                path: store_path.clone(),
                source: e,
            })?;

        let mut inner = StoreInner {
            store_path,
            file,
            current_offset: 0,
            versions: BTreeMap::new(),
            active_version: None,
        };
        inner.scan_from(0)?;

        Ok(Self {
            inner: Mutex::new(inner),
        })
    }

    /// Number of versions in the log (history rows included).
    pub fn version_count(&self) -> usize {
        self.inner.lock().versions.len()
    }

    /// Highest version number written, zero before the first update.
    pub fn last_version(&self) -> u64 {
        self.inner.lock().last_version()
    }

    /// Path of the record log.
    pub fn path(&self) -> PathBuf {
        self.inner.lock().store_path.clone()
    }
}

impl CatalogStore for FileCatalogStore {
    fn get_active(&self) -> StoreResult<Vec<u32>> {
        let inner = self.inner.lock();
        Ok(inner
            .active_version
            .and_then(|v| inner.versions.get(&v))
            .map(|record| record.sizes.clone())
            .unwrap_or_default())
    }

    fn put_new(&self, sizes: &[u32]) -> StoreResult<u64> {
        let mut inner = self.inner.lock();

        // Another handle on the same log may have advanced it. Catch up
        // and report a conflict instead of writing a duplicate version.
        let disk_len = inner.disk_len()?;
        if disk_len != inner.current_offset {
            let attempted = inner.last_version() + 1;
            let stale_offset = inner.current_offset;
            inner.scan_from(stale_offset)?;
            return Err(StoreError::VersionConflict {
                attempted,
                found: inner.last_version(),
            });
        }

        let next = inner.last_version() + 1;
        let record = CatalogRecord::active(next, sizes.to_vec());
        inner.append(record)?;
        Ok(next)
    }
}

impl StoreInner {
    fn last_version(&self) -> u64 {
        self.versions.keys().next_back().copied().unwrap_or(0)
    }

    fn disk_len(&self) -> StoreResult<u64> {
        Ok(fs::metadata(&self.store_path)
            .map_err(StoreError::Read)?
            .len())
    }

    /// Appends a record and fsyncs. The fsync is the commit point.
    fn append(&mut self, record: CatalogRecord) -> StoreResult<()> {
        let serialized = record.serialize();

        self.file
            .write_all(&serialized)
            .map_err(|e| StoreError::Append {
                version: record.version,
                source: e,
            })?;

        self.file.sync_all().map_err(|e| StoreError::Append {
            version: record.version,
            source: e,
        })?;

        self.current_offset += serialized.len() as u64;
        self.apply(record);
        Ok(())
    }

    /// Scans the log from `offset` to its end, folding records into state.
    fn scan_from(&mut self, offset: u64) -> StoreResult<()> {
        let mut file = File::open(&self.store_path).map_err(StoreError::Read)?;
        let mut data = Vec::new();
        file.read_to_end(&mut data).map_err(StoreError::Read)?;

        let mut cursor = offset as usize;
        while cursor < data.len() {
            let remaining = data.len() - cursor;
            if remaining < MIN_RECORD_SIZE {
                return Err(StoreError::Corrupted {
                    offset: cursor as u64,
                    reason: format!(
                        "truncated log: {} bytes remaining, minimum record size is {}",
                        remaining, MIN_RECORD_SIZE
                    ),
                });
            }

            let (record, consumed) =
                CatalogRecord::deserialize(&data[cursor..]).map_err(|e| StoreError::Corrupted {
                    offset: cursor as u64,
                    reason: e.to_string(),
                })?;

            let expected = self.last_version() + 1;
            if record.version != expected {
                return Err(StoreError::Corrupted {
                    offset: cursor as u64,
                    reason: format!(
                        "version sequence broken: found {}, expected {}",
                        record.version, expected
                    ),
                });
            }

            self.apply(record);
            cursor += consumed;
        }

        self.current_offset = data.len() as u64;
        Ok(())
    }

    /// Folds one record into in-memory state. The highest-versioned active
    /// record wins; earlier versions are logically superseded.
    fn apply(&mut self, record: CatalogRecord) {
        if record.active && self.active_version.map_or(true, |v| record.version > v) {
            self.active_version = Some(record.version);
        }
        self.versions.insert(record.version, record);
    }
}
