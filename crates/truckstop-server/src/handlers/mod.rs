mod search;

pub use search::{search_by_address, search_by_name, search_nearest, NearestRequest};

use axum::{http::StatusCode, response::IntoResponse};

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    StatusCode::OK
}
