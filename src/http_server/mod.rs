//! HTTP server
//!
//! The transport surface over the pack service:
//!
//! - `GET  /api/pack-sizes` — the active catalog
//! - `POST /api/pack-sizes` — write a new catalog version
//! - `POST /api/calculate`  — allocate packs for an order
//! - `GET  /health`         — liveness
//! - `GET  /metrics`        — counter snapshot
//!
//! Handlers translate service results into JSON envelopes; every error
//! body is `{"error": "..."}` with the status chosen by the error kind.

mod config;
mod errors;
mod observability_routes;
mod pack_routes;
mod server;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ErrorResponse};
pub use pack_routes::{pack_routes, PackState};
pub use server::HttpServer;
