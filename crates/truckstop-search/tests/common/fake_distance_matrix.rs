//! Fake Distance Matrix API for integration tests.
//!
//! Serves `GET /maps/api/distancematrix/json` on a random 127.0.0.1 port.
//! Destinations registered with [`FakeDistanceMatrix::route`] get their own
//! distance and response delay; everything else gets the canned status code
//! and body. The query string of every request is remembered.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use truckstop_core::Coordinate;

struct ApiState {
    status: StatusCode,
    body: String,
    /// Metres and delay, keyed by the `destinations` parameter.
    routes: HashMap<String, (f64, Duration)>,
    requests: Vec<HashMap<String, String>>,
}

/// Handle to the running fake server.
pub struct FakeDistanceMatrix {
    addr: SocketAddr,
    state: Arc<Mutex<ApiState>>,
}

impl FakeDistanceMatrix {
    /// Start a server that answers every request with `status` and `body`.
    pub async fn start(status: StatusCode, body: impl Into<String>) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let state = Arc::new(Mutex::new(ApiState {
            status,
            body: body.into(),
            routes: HashMap::new(),
            requests: Vec::new(),
        }));

        let app = Router::new()
            .route("/maps/api/distancematrix/json", get(distance_matrix))
            .with_state(state.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Ok(Self { addr, state })
    }

    /// Start a server that reports a walking distance of `meters`.
    pub async fn with_meters(meters: f64) -> std::io::Result<Self> {
        Self::start(StatusCode::OK, walking_body(meters)).await
    }

    /// Answer requests for `destination` with `meters`, after `delay`.
    pub async fn route(&self, destination: Coordinate, meters: f64, delay: Duration) {
        self.state
            .lock()
            .await
            .routes
            .insert(destination.to_string(), (meters, delay));
    }

    /// Base URL for the API (e.g. `http://127.0.0.1:PORT`).
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Query parameters of every request received so far.
    pub async fn requests(&self) -> Vec<HashMap<String, String>> {
        self.state.lock().await.requests.clone()
    }
}

fn walking_body(meters: f64) -> String {
    serde_json::json!({
        "status": "OK",
        "origin_addresses": ["origin"],
        "destination_addresses": ["destination"],
        "rows": [{"elements": [{
            "status": "OK",
            "distance": {"text": "walk", "value": meters},
            "duration": {"text": "a while", "value": 600}
        }]}]
    })
    .to_string()
}

async fn distance_matrix(
    State(state): State<Arc<Mutex<ApiState>>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let (route, status, body) = {
        let mut state = state.lock().await;
        let route = params
            .get("destinations")
            .and_then(|destination| state.routes.get(destination))
            .copied();
        state.requests.push(params);
        (route, state.status, state.body.clone())
    };

    let json = [("content-type", "application/json")];
    match route {
        Some((meters, delay)) => {
            tokio::time::sleep(delay).await;
            (StatusCode::OK, json, walking_body(meters)).into_response()
        }
        None => (status, json, body).into_response(),
    }
}
