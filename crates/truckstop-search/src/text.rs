//! Substring search over operator names and addresses.

use std::sync::Arc;

use truckstop_core::model::normalize_status;
use truckstop_core::{RecordStore, VendingRecord};

use crate::error::SearchResult;

/// Name and address search. Results are untruncated and in store scan order.
#[derive(Debug, Clone)]
pub struct TextSearch {
    store: Arc<dyn RecordStore>,
}

impl TextSearch {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Records whose operator name contains `term`, ignoring case.
    ///
    /// A blank `status` is the same as no status filter.
    pub fn search_by_name(
        &self,
        term: &str,
        status: Option<&str>,
    ) -> SearchResult<Vec<VendingRecord>> {
        let term = term.to_lowercase();
        let status = status.map(normalize_status).filter(|s| !s.is_empty());

        log::debug!("Name search for {:?} (status: {:?})", term, status);
        Ok(self.store.find_by_name_substring(&term, status.as_deref())?)
    }

    /// Records whose address contains `term`, ignoring case.
    pub fn search_by_address(&self, term: &str) -> SearchResult<Vec<VendingRecord>> {
        let term = term.to_uppercase();

        log::debug!("Address search for {:?}", term);
        Ok(self.store.find_by_address_substring(&term)?)
    }
}
