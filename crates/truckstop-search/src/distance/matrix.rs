//! Google Distance Matrix client.
//!
//! Requests the walking-route distance for a single origin/destination pair.
//! The API reports `distance.value` in metres regardless of the `units`
//! parameter; the client converts to miles so both distance sources agree.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use truckstop_core::Coordinate;

use super::{RequestLimiter, RouteDistance, METERS_PER_MILE};
use crate::error::{DistanceError, DistanceResult};

const DISTANCE_MATRIX_API_BASE: &str = "https://maps.googleapis.com";
const DISTANCE_MATRIX_PATH: &str = "/maps/api/distancematrix/json";
const SOURCE_NAME: &str = "Distance Matrix";
const STATUS_OK: &str = "OK";

// ---------------------------------------------------------------------------
// API response types (private)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct MatrixResponse {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    rows: Vec<MatrixRow>,
}

#[derive(Debug, Deserialize)]
struct MatrixRow {
    #[serde(default)]
    elements: Vec<MatrixElement>,
}

#[derive(Debug, Deserialize)]
struct MatrixElement {
    status: String,
    #[serde(default)]
    distance: Option<MatrixDistance>,
}

#[derive(Debug, Deserialize)]
struct MatrixDistance {
    /// Metres.
    value: f64,
}

/// Google Distance Matrix API client.
#[derive(Debug, Clone)]
pub struct DistanceMatrixClient {
    http: Client,
    api_key: String,
    base_url: String,
    limiter: RequestLimiter,
}

impl DistanceMatrixClient {
    /// Create a new client.
    ///
    /// `timeout` bounds each request; `max_in_flight` caps concurrent
    /// requests across all searches sharing this client.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(
        api_key: impl Into<String>,
        timeout: Duration,
        max_in_flight: usize,
    ) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent("truckstop/0.1.0 (https://github.com/oxur/truckstop)")
            .build()?;

        Ok(Self {
            http,
            api_key: api_key.into(),
            base_url: DISTANCE_MATRIX_API_BASE.to_string(),
            limiter: RequestLimiter::new(max_in_flight),
        })
    }

    /// Point the client at a different host (for tests and proxies).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    async fn request(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> DistanceResult<MatrixResponse> {
        let _permit = self.limiter.acquire().await?;

        let response = self
            .http
            .get(format!("{}{}", self.base_url, DISTANCE_MATRIX_PATH))
            .query(&[
                ("origins", origin.to_string().as_str()),
                ("destinations", destination.to_string().as_str()),
                ("mode", "walking"),
                ("units", "imperial"),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?
            .error_for_status()
            .map_err(|e| DistanceError::Http {
                source_name: SOURCE_NAME.to_string(),
                message: e.to_string(),
            })?;

        response.json().await.map_err(|e| DistanceError::Parse {
            source_name: SOURCE_NAME.to_string(),
            message: e.to_string(),
        })
    }
}

/// Pull the single element's distance out of a response, in miles.
fn extract_miles(response: MatrixResponse) -> DistanceResult<f64> {
    if response.status != STATUS_OK {
        return Err(DistanceError::Status {
            source_name: SOURCE_NAME.to_string(),
            status: response.status,
            message: response.error_message,
        });
    }

    let element = response
        .rows
        .into_iter()
        .next()
        .and_then(|row| row.elements.into_iter().next())
        .ok_or_else(|| DistanceError::Parse {
            source_name: SOURCE_NAME.to_string(),
            message: "response contained no elements".to_string(),
        })?;

    if element.status != STATUS_OK {
        return Err(DistanceError::Status {
            source_name: SOURCE_NAME.to_string(),
            status: element.status,
            message: None,
        });
    }

    let meters = element
        .distance
        .map(|d| d.value)
        .filter(|m| m.is_finite() && *m >= 0.0)
        .ok_or_else(|| DistanceError::Parse {
            source_name: SOURCE_NAME.to_string(),
            message: "element has no usable distance".to_string(),
        })?;

    Ok(meters / METERS_PER_MILE)
}

#[async_trait]
impl RouteDistance for DistanceMatrixClient {
    fn name(&self) -> &str {
        SOURCE_NAME
    }

    async fn walking_distance(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> DistanceResult<f64> {
        extract_miles(self.request(origin, destination).await?)
    }
}
