//! Pack allocation optimizer
//!
//! Given a catalog of allowable pack sizes and an order of N items, computes
//! the multiset of whole packs that covers the order (sum >= N) while
//! lexicographically minimizing (total items shipped, total pack count).
//!
//! # Design Principles
//!
//! - Pure: no I/O, no shared state, table allocated per call
//! - Total: invalid inputs produce the empty allocation, never an error
//! - One algorithm for all input regimes (dense DP + parent pointers)
//! - Deterministic tie-break: descending size scan, strict improvement only
//!
//! # Invariants Enforced
//!
//! - Cover: total items of a non-empty result >= requested items
//! - Membership: every returned size is drawn from the input catalog
//! - Optimality: no allocation ships fewer total items; no allocation with
//!   equal total items uses fewer packs

mod solution;
mod solver;

pub use solution::{Allocation, Pack};
pub use solver::{allocate, solvable, MAX_TARGET};
