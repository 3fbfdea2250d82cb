//! Search orchestration for truckstop.
//!
//! Text search over operator names and addresses, and nearest-vendor search
//! ranked by a pluggable [`DistanceProvider`]. The default provider asks the
//! Google Distance Matrix API for walking distances and falls back to a
//! local geodesic computation whenever the remote call fails.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod distance;
pub mod error;
pub mod nearest;
pub mod text;

pub use distance::{
    CompositeProvider, DistanceMatrixClient, DistanceProvider, GeodesicProvider, RouteDistance,
};
pub use error::{DistanceError, DistanceResult, SearchError, SearchResult};
pub use nearest::{NearestSearch, DEFAULT_CONCURRENCY, NEAREST_LIMIT};
pub use text::TextSearch;
