//! Local geodesic distance on the WGS-84 ellipsoid.

use async_trait::async_trait;
use geo::{Distance, Geodesic, Point};
use truckstop_core::Coordinate;

use super::{DistanceProvider, METERS_PER_MILE};

/// Geodesic distance provider; always available, never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeodesicProvider;

impl GeodesicProvider {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Geodesic distance in miles between two coordinates.
    #[must_use]
    pub fn miles(origin: Coordinate, destination: Coordinate) -> f64 {
        Geodesic::distance(point(origin), point(destination)) / METERS_PER_MILE
    }
}

#[async_trait]
impl DistanceProvider for GeodesicProvider {
    async fn distance(&self, origin: Coordinate, destination: Coordinate) -> f64 {
        Self::miles(origin, destination)
    }
}

/// `geo` points are (x, y), i.e. (longitude, latitude).
fn point(coordinate: Coordinate) -> Point<f64> {
    Point::new(coordinate.longitude, coordinate.latitude)
}
