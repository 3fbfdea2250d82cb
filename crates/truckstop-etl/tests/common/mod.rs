//! Fake SF OpenData endpoint for ingest tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::Mutex;

pub const RESOURCE_PATH: &str = "/resource/rqzj-sfat.json";

/// Six published rows: four usable, one without coordinates, one without
/// a status. Coordinates are strings, as Socrata serves them.
pub const PERMIT_ROWS: &str = r#"[
    {"applicant": "Test Truck 1", "address": "123 Test St", "status": "APPROVED",
     "latitude": "37.7848", "longitude": "-122.4294", "facilitytype": "Truck"},
    {"applicant": "Test Truck 2", "address": "456 Test Ave", "status": "approved",
     "latitude": "37.7947", "longitude": "-122.4394"},
    {"applicant": "Food Truck 4", "address": "101 Unit Ct", "status": "REQUESTED",
     "latitude": 37.8145, "longitude": -122.4594},
    {"address": "202 Food Dr", "status": "EXPIRED",
     "latitude": "37.8244", "longitude": "-122.4694"},
    {"applicant": "Nowhere Cart", "address": "1 Lost Way", "status": "APPROVED"},
    {"applicant": "Limbo Tacos", "address": "2 Lost Way",
     "latitude": "37.8", "longitude": "-122.4"}
]"#;

struct ApiState {
    status: StatusCode,
    body: String,
    requests: Vec<HashMap<String, String>>,
}

/// Handle to the running fake endpoint.
pub struct FakeSocrata {
    addr: SocketAddr,
    state: Arc<Mutex<ApiState>>,
}

impl FakeSocrata {
    /// Start a server that answers every request with `status` and `body`.
    pub async fn start(status: StatusCode, body: impl Into<String>) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let state = Arc::new(Mutex::new(ApiState {
            status,
            body: body.into(),
            requests: Vec::new(),
        }));

        let app = Router::new()
            .route(RESOURCE_PATH, get(resource))
            .with_state(state.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Ok(Self { addr, state })
    }

    /// Full dataset URL on this server.
    pub fn dataset_url(&self) -> String {
        format!("http://{}{}", self.addr, RESOURCE_PATH)
    }

    /// Query parameters of every request received so far.
    pub async fn requests(&self) -> Vec<HashMap<String, String>> {
        self.state.lock().await.requests.clone()
    }
}

async fn resource(
    State(state): State<Arc<Mutex<ApiState>>>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    let mut state = state.lock().await;
    state.requests.push(params);
    (
        state.status,
        [("content-type", "application/json")],
        state.body.clone(),
    )
}
