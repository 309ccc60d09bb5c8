//! Pack service
//!
//! Orchestrates the pack-allocation workflow: input validation, the
//! read-through cache on the active catalog, store fallback, and allocator
//! invocation. The store and cache stay dumb capability providers and the
//! allocator stays pure; every policy decision lives here.

mod errors;
mod pack_service;

pub use errors::{PackError, PackResult};
pub use pack_service::{PackService, ACTIVE_CATALOG_KEY, CATALOG_TTL};
