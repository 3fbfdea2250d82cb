//! Distance providers.
//!
//! All distances are in statute miles. Remote sources that report metres
//! convert before returning.

pub mod composite;
pub mod geodesic;
pub mod limiter;
pub mod matrix;

use async_trait::async_trait;
use truckstop_core::Coordinate;

use crate::error::DistanceResult;

pub use composite::CompositeProvider;
pub use geodesic::GeodesicProvider;
pub use limiter::RequestLimiter;
pub use matrix::DistanceMatrixClient;

/// Metres in one statute mile.
pub const METERS_PER_MILE: f64 = 1609.344;

/// Infallible distance computation used by the nearest search.
#[async_trait]
pub trait DistanceProvider: Send + Sync + std::fmt::Debug {
    /// Distance in miles from `origin` to `destination`.
    async fn distance(&self, origin: Coordinate, destination: Coordinate) -> f64;
}

/// A remote routing service that may fail.
#[async_trait]
pub trait RouteDistance: Send + Sync + std::fmt::Debug {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Walking-route distance in miles from `origin` to `destination`.
    async fn walking_distance(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> DistanceResult<f64>;
}
