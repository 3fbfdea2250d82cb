//! Distance Matrix client and fallback behaviour against a fake API.

mod common;

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use common::fake_distance_matrix::FakeDistanceMatrix;
use common::ORIGIN;
use truckstop_core::Coordinate;
use truckstop_search::{
    CompositeProvider, DistanceError, DistanceMatrixClient, DistanceProvider, GeodesicProvider,
    RouteDistance,
};

const DESTINATION: Coordinate = Coordinate::new(37.8046, -122.4494);

fn client(api: &FakeDistanceMatrix) -> DistanceMatrixClient {
    DistanceMatrixClient::new("test-key", Duration::from_secs(5), 4)
        .unwrap()
        .with_base_url(api.base_url())
}

fn composite(api: &FakeDistanceMatrix) -> CompositeProvider {
    CompositeProvider::new(Some(Arc::new(client(api))))
}

#[tokio::test]
async fn test_remote_distance_is_converted_to_miles() {
    let api = FakeDistanceMatrix::with_meters(3218.688).await.unwrap();

    let miles = client(&api)
        .walking_distance(ORIGIN, DESTINATION)
        .await
        .unwrap();
    assert!((miles - 2.0).abs() < 1e-9, "got {miles}");
}

#[tokio::test]
async fn test_request_parameters() {
    let api = FakeDistanceMatrix::with_meters(100.0).await.unwrap();
    client(&api)
        .walking_distance(ORIGIN, DESTINATION)
        .await
        .unwrap();

    let requests = api.requests().await;
    assert_eq!(requests.len(), 1);
    let params = &requests[0];
    assert_eq!(params["origins"], "37.7749,-122.4194");
    assert_eq!(params["destinations"], "37.8046,-122.4494");
    assert_eq!(params["mode"], "walking");
    assert_eq!(params["units"], "imperial");
    assert_eq!(params["key"], "test-key");
}

#[tokio::test]
async fn test_http_error_is_reported() {
    let api = FakeDistanceMatrix::start(StatusCode::INTERNAL_SERVER_ERROR, "boom")
        .await
        .unwrap();

    let result = client(&api).walking_distance(ORIGIN, DESTINATION).await;
    assert!(matches!(result, Err(DistanceError::Http { .. })));
}

#[tokio::test]
async fn test_malformed_body_is_reported() {
    let api = FakeDistanceMatrix::start(StatusCode::OK, "not json")
        .await
        .unwrap();

    let result = client(&api).walking_distance(ORIGIN, DESTINATION).await;
    assert!(matches!(result, Err(DistanceError::Parse { .. })));
}

#[tokio::test]
async fn test_composite_uses_remote_value() {
    let api = FakeDistanceMatrix::with_meters(1609.344).await.unwrap();

    let miles = composite(&api).distance(ORIGIN, DESTINATION).await;
    assert!((miles - 1.0).abs() < 1e-9, "got {miles}");
}

#[tokio::test]
async fn test_composite_falls_back_on_http_error() {
    let api = FakeDistanceMatrix::start(StatusCode::SERVICE_UNAVAILABLE, "")
        .await
        .unwrap();

    let miles = composite(&api).distance(ORIGIN, DESTINATION).await;
    assert_eq!(miles, GeodesicProvider::miles(ORIGIN, DESTINATION));
}

#[tokio::test]
async fn test_composite_falls_back_on_denied_request() {
    let body = r#"{"status": "REQUEST_DENIED", "error_message": "invalid key", "rows": []}"#;
    let api = FakeDistanceMatrix::start(StatusCode::OK, body).await.unwrap();

    let miles = composite(&api).distance(ORIGIN, DESTINATION).await;
    assert_eq!(miles, GeodesicProvider::miles(ORIGIN, DESTINATION));
}

#[tokio::test]
async fn test_composite_falls_back_on_malformed_body() {
    let api = FakeDistanceMatrix::start(StatusCode::OK, "{\"rows\": 3}")
        .await
        .unwrap();

    let miles = composite(&api).distance(ORIGIN, DESTINATION).await;
    assert_eq!(miles, GeodesicProvider::miles(ORIGIN, DESTINATION));
}

#[tokio::test]
async fn test_composite_falls_back_when_unreachable() {
    let api = FakeDistanceMatrix::with_meters(1.0).await.unwrap();
    let client = DistanceMatrixClient::new("test-key", Duration::from_secs(1), 4)
        .unwrap()
        .with_base_url("http://127.0.0.1:1");
    let provider = CompositeProvider::new(Some(Arc::new(client)));

    let miles = provider.distance(ORIGIN, DESTINATION).await;
    assert_eq!(miles, GeodesicProvider::miles(ORIGIN, DESTINATION));
    assert!(api.requests().await.is_empty());
}
