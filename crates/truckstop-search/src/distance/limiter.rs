//! Bound on concurrent requests to a remote distance source.

use std::sync::Arc;

use tokio::sync::{OwnedSemaphorePermit, Semaphore};

use crate::error::{DistanceError, DistanceResult};

/// Process-wide cap on in-flight requests to one remote source.
///
/// Every nearest search fans out one request per candidate; the limiter
/// keeps the total across concurrent searches below `max_in_flight`.
#[derive(Debug, Clone)]
pub struct RequestLimiter {
    semaphore: Arc<Semaphore>,
    max_in_flight: usize,
}

impl RequestLimiter {
    /// Creates a limiter allowing `max_in_flight` concurrent requests
    /// (at least one).
    pub fn new(max_in_flight: usize) -> Self {
        let max_in_flight = max_in_flight.max(1);
        Self {
            semaphore: Arc::new(Semaphore::new(max_in_flight)),
            max_in_flight,
        }
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight
    }

    /// Waits for a request slot. The slot is released when the permit drops.
    pub async fn acquire(&self) -> DistanceResult<OwnedSemaphorePermit> {
        Arc::clone(&self.semaphore)
            .acquire_owned()
            .await
            .map_err(|_| DistanceError::LimiterClosed)
    }
}
