//! packcalc - a pack allocation service
//!
//! Answers one question: given a catalog of allowable pack sizes and an
//! order for N items, which multiset of whole packs should ship? The
//! chosen packs cover the order while lexicographically minimizing
//! (total items shipped, total pack count).

pub mod allocator;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod http_server;
pub mod observability;
pub mod service;
