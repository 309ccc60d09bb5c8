//! Versioned catalog store
//!
//! The catalog store holds the canonical persistent history of pack-size
//! catalogs as an append-only record log with no in-place updates.
//!
//! # Design Principles
//!
//! - Append-only (history rows are never deleted)
//! - Checksum-verified on every scan
//! - One record append is the commit point of an update
//! - Highest-versioned active record wins for reads
//! - Version numbers form a gap-free ascending sequence
//!
//! # Invariants Enforced
//!
//! - At most one active version at any time
//! - A successful `put_new` leaves exactly one active version
//! - Corruption halts the store rather than serving damaged data

mod errors;
mod memory;
mod record;
mod store;

pub use errors::{StoreError, StoreResult};
pub use memory::InMemoryCatalogStore;
pub use record::CatalogRecord;
pub use store::{CatalogStore, FileCatalogStore};
