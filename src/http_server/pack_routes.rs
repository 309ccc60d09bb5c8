//! Pack API routes
//!
//! HTTP endpoints for catalog reads, catalog updates, and allocation
//! requests, mounted under `/api`.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::allocator::Pack;
use crate::cache::InMemoryTtlCache;
use crate::catalog::FileCatalogStore;
use crate::observability::MetricsRegistry;
use crate::service::PackService;

use super::errors::ApiError;

/// Shared pack service state.
pub struct PackState {
    pub service: PackService<FileCatalogStore, InMemoryTtlCache>,
    pub metrics: Arc<MetricsRegistry>,
}

/// Pack routes with shared state.
pub fn pack_routes(state: Arc<PackState>) -> Router {
    Router::new()
        .route(
            "/pack-sizes",
            get(get_pack_sizes_handler).post(update_pack_sizes_handler),
        )
        .route("/calculate", post(calculate_handler))
        .with_state(state)
}

// ==================
// Request/Response Types
// ==================

#[derive(Debug, Serialize)]
pub struct PackSizesResponse {
    pub sizes: Vec<u32>,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePackSizesRequest {
    pub sizes: Vec<i64>,
}

#[derive(Debug, Deserialize)]
pub struct CalculateRequest {
    pub items: i64,
}

#[derive(Debug, Serialize)]
pub struct CalculateResponse {
    pub packs: Vec<Pack>,
}

// ==================
// Handlers
// ==================

/// GET /api/pack-sizes — the active catalog.
async fn get_pack_sizes_handler(
    State(state): State<Arc<PackState>>,
) -> Result<Json<PackSizesResponse>, ApiError> {
    let sizes = state.service.get_pack_sizes()?;
    Ok(Json(PackSizesResponse { sizes }))
}

/// POST /api/pack-sizes — write a new catalog version.
async fn update_pack_sizes_handler(
    State(state): State<Arc<PackState>>,
    body: Result<Json<UpdatePackSizesRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(request) = body.map_err(|e| ApiError::InvalidBody(e.body_text()))?;
    state.service.update_pack_sizes(&request.sizes)?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/calculate — allocate packs for an order.
async fn calculate_handler(
    State(state): State<Arc<PackState>>,
    body: Result<Json<CalculateRequest>, JsonRejection>,
) -> Result<Json<CalculateResponse>, ApiError> {
    let Json(request) = body.map_err(|e| ApiError::InvalidBody(e.body_text()))?;
    let allocation = state.service.calculate(request.items)?;
    Ok(Json(CalculateResponse {
        packs: allocation.packs().to_vec(),
    }))
}
