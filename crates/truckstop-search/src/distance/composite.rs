//! Try-remote-then-fallback distance provider.

use std::sync::Arc;

use async_trait::async_trait;
use truckstop_core::Coordinate;

use super::{DistanceProvider, GeodesicProvider, RouteDistance};

/// Distance provider that asks a remote routing service first and falls
/// back to the geodesic distance on any failure.
///
/// Remote failures are logged and absorbed per call; they never reach the
/// caller. With no remote configured, every call goes straight to the
/// fallback.
#[derive(Debug, Clone)]
pub struct CompositeProvider {
    remote: Option<Arc<dyn RouteDistance>>,
    fallback: GeodesicProvider,
}

impl CompositeProvider {
    #[must_use]
    pub fn new(remote: Option<Arc<dyn RouteDistance>>) -> Self {
        Self {
            remote,
            fallback: GeodesicProvider::new(),
        }
    }

    /// Provider that only ever computes geodesic distances.
    #[must_use]
    pub fn fallback_only() -> Self {
        Self::new(None)
    }

    /// Name of the remote source, if one is configured.
    #[must_use]
    pub fn remote_name(&self) -> Option<&str> {
        self.remote.as_deref().map(|remote| remote.name())
    }
}

#[async_trait]
impl DistanceProvider for CompositeProvider {
    async fn distance(&self, origin: Coordinate, destination: Coordinate) -> f64 {
        if let Some(remote) = &self.remote {
            match remote.walking_distance(origin, destination).await {
                Ok(miles) => return miles,
                Err(e) => {
                    log::warn!(
                        "{} lookup {} -> {} failed: {}. Falling back to geodesic distance.",
                        remote.name(),
                        origin,
                        destination,
                        e
                    );
                }
            }
        }

        self.fallback.distance(origin, destination).await
    }
}
