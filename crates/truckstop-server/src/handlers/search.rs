//! Search endpoints.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    Json,
};
use serde::Deserialize;
use truckstop_core::{Coordinate, VendingRecord};

use super::super::AppState;
use crate::error::ApiError;

/// Optional status filter for name search.
#[derive(Debug, Deserialize)]
pub struct StatusParams {
    pub status: Option<String>,
}

/// Body of a nearest-search request.
#[derive(Debug, Clone, Deserialize)]
pub struct NearestRequest {
    pub latitude: f64,
    pub longitude: f64,
    /// Consider every permit, not only approved ones.
    #[serde(default)]
    pub include_all_statuses: bool,
}

/// Records whose operator name contains the path term.
pub async fn search_by_name(
    State(state): State<AppState>,
    Path(term): Path<String>,
    Query(params): Query<StatusParams>,
) -> Result<Json<Vec<VendingRecord>>, ApiError> {
    let records = tokio::task::spawn_blocking(move || {
        state.text.search_by_name(&term, params.status.as_deref())
    })
    .await??;
    Ok(Json(records))
}

/// Records whose address contains the path term.
pub async fn search_by_address(
    State(state): State<AppState>,
    Path(term): Path<String>,
) -> Result<Json<Vec<VendingRecord>>, ApiError> {
    let records =
        tokio::task::spawn_blocking(move || state.text.search_by_address(&term)).await??;
    Ok(Json(records))
}

/// The five permits closest to the posted coordinate.
pub async fn search_nearest(
    State(state): State<AppState>,
    payload: Result<Json<NearestRequest>, JsonRejection>,
) -> Result<Json<Vec<VendingRecord>>, ApiError> {
    let Json(request) = payload?;
    let origin = Coordinate::new(request.latitude, request.longitude)
        .validate()
        .map_err(|e| ApiError::Unprocessable(e.to_string()))?;

    let records = state
        .nearest
        .find_nearest(origin, request.include_all_statuses)
        .await?;
    Ok(Json(records))
}
