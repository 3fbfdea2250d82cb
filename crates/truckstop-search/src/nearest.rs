//! Nearest-vendor search.

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use truckstop_core::model::STATUS_APPROVED;
use truckstop_core::{Coordinate, RecordStore, VendingRecord};

use crate::distance::DistanceProvider;
use crate::error::SearchResult;

/// Maximum number of records a nearest search returns.
pub const NEAREST_LIMIT: usize = 5;

/// Default number of distance computations run at once per search.
pub const DEFAULT_CONCURRENCY: usize = 8;

/// Ranks store records by distance from an origin.
#[derive(Debug, Clone)]
pub struct NearestSearch {
    store: Arc<dyn RecordStore>,
    distance: Arc<dyn DistanceProvider>,
    limit: usize,
    concurrency: usize,
}

impl NearestSearch {
    pub fn new(store: Arc<dyn RecordStore>, distance: Arc<dyn DistanceProvider>) -> Self {
        Self {
            store,
            distance,
            limit: NEAREST_LIMIT,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    /// Set how many distance computations may be in flight per search.
    #[must_use]
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// The records nearest to `origin`, closest first.
    ///
    /// Only `APPROVED` permits are candidates unless `include_all_statuses`
    /// is set. Returns at most [`NEAREST_LIMIT`] records, each carrying its
    /// distance in miles.
    pub async fn find_nearest(
        &self,
        origin: Coordinate,
        include_all_statuses: bool,
    ) -> SearchResult<Vec<VendingRecord>> {
        let status = (!include_all_statuses).then_some(STATUS_APPROVED);
        let store = Arc::clone(&self.store);
        let candidates =
            tokio::task::spawn_blocking(move || store.all_with_status(status)).await??;

        log::debug!(
            "Ranking {} candidates from {} (all statuses: {})",
            candidates.len(),
            origin,
            include_all_statuses
        );

        // `buffered` yields in input order, so distances line up with
        // candidates whatever order the computations finish in.
        let distances: Vec<f64> = stream::iter(candidates.iter().map(VendingRecord::coordinate))
            .map(|destination| self.distance.distance(origin, destination))
            .buffered(self.concurrency)
            .collect()
            .await;

        Ok(rank_by_distance(candidates, distances, self.limit))
    }
}

/// Attach distances, sort ascending and keep the first `limit`.
///
/// The sort is stable: records at equal distance keep their scan order.
fn rank_by_distance(
    candidates: Vec<VendingRecord>,
    distances: Vec<f64>,
    limit: usize,
) -> Vec<VendingRecord> {
    let mut ranked: Vec<(f64, VendingRecord)> = distances.into_iter().zip(candidates).collect();
    ranked.sort_by(|a, b| a.0.total_cmp(&b.0));
    ranked
        .into_iter()
        .take(limit)
        .map(|(miles, record)| record.with_distance(miles))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::GeodesicProvider;
    use crate::error::SearchError;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;
    use std::thread::{self, ThreadId};
    use truckstop_core::Result as StoreResult;

    fn record(name: &str) -> VendingRecord {
        VendingRecord::new(name, "1 MAIN ST", "APPROVED", 0.0, 0.0)
    }

    /// Store that remembers which thread scanned it, and can be told to panic.
    #[derive(Debug, Default)]
    struct ThreadStore {
        scanned_on: Mutex<Option<ThreadId>>,
        panic: AtomicBool,
    }

    impl RecordStore for ThreadStore {
        fn find_by_name_substring(
            &self,
            _term: &str,
            _status: Option<&str>,
        ) -> StoreResult<Vec<VendingRecord>> {
            Ok(Vec::new())
        }

        fn find_by_address_substring(&self, _term: &str) -> StoreResult<Vec<VendingRecord>> {
            Ok(Vec::new())
        }

        fn all_with_status(&self, _status: Option<&str>) -> StoreResult<Vec<VendingRecord>> {
            *self.scanned_on.lock().unwrap() = Some(thread::current().id());
            assert!(!self.panic.load(Ordering::SeqCst), "scan failed");
            Ok(vec![record("only")])
        }
    }

    fn search_over(store: &Arc<ThreadStore>) -> NearestSearch {
        NearestSearch::new(
            Arc::clone(store) as Arc<dyn RecordStore>,
            Arc::new(GeodesicProvider::new()),
        )
    }

    #[tokio::test]
    async fn test_candidates_are_read_off_the_async_thread() {
        let store = Arc::new(ThreadStore::default());

        let results = search_over(&store)
            .find_nearest(Coordinate::new(0.0, 0.0), false)
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
        let scanned_on = store.scanned_on.lock().unwrap().unwrap();
        assert_ne!(scanned_on, thread::current().id());
    }

    #[tokio::test]
    async fn test_failed_scan_task_is_an_error() {
        let store = Arc::new(ThreadStore::default());
        store.panic.store(true, Ordering::SeqCst);

        let result = search_over(&store)
            .find_nearest(Coordinate::new(0.0, 0.0), false)
            .await;
        assert!(matches!(result, Err(SearchError::Task(_))));
    }

    #[test]
    fn test_rank_sorts_and_truncates() {
        let candidates = ["a", "b", "c", "d", "e", "f", "g"].map(record).to_vec();
        let distances = vec![7.0, 1.0, 6.0, 2.0, 5.0, 3.0, 4.0];

        let ranked = rank_by_distance(candidates, distances, NEAREST_LIMIT);
        let names: Vec<_> = ranked.iter().map(|r| r.operator_name.as_str()).collect();
        assert_eq!(names, ["b", "d", "f", "g", "e"]);
        assert_eq!(ranked[0].distance, Some(1.0));
    }

    #[test]
    fn test_rank_ties_keep_scan_order() {
        let candidates = ["first", "second", "third"].map(record).to_vec();
        let ranked = rank_by_distance(candidates, vec![2.0, 1.0, 2.0], NEAREST_LIMIT);
        let names: Vec<_> = ranked.iter().map(|r| r.operator_name.as_str()).collect();
        assert_eq!(names, ["second", "first", "third"]);
    }

    #[test]
    fn test_rank_fewer_than_limit() {
        let ranked = rank_by_distance(vec![record("only")], vec![0.5], NEAREST_LIMIT);
        assert_eq!(ranked.len(), 1);
    }

    #[test]
    fn test_rank_empty() {
        assert!(rank_by_distance(Vec::new(), Vec::new(), NEAREST_LIMIT).is_empty());
    }
}
