//! Read-only record store queried by the search orchestrators.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::model::VendingRecord;
use crate::schema::Database;

/// Lookup operations over normalized vending records.
///
/// Callers pass terms already in the canonical case of the field they
/// match (lower-case for operator names, upper-case for addresses and
/// statuses). Results come back in the store's scan order.
pub trait RecordStore: Send + Sync + std::fmt::Debug {
    /// Records whose operator name contains `term`, optionally restricted to
    /// an exact status.
    fn find_by_name_substring(
        &self,
        term: &str,
        status: Option<&str>,
    ) -> Result<Vec<VendingRecord>>;

    /// Records whose address contains `term`.
    fn find_by_address_substring(&self, term: &str) -> Result<Vec<VendingRecord>>;

    /// All records, or only those with exactly `status`.
    fn all_with_status(&self, status: Option<&str>) -> Result<Vec<VendingRecord>>;
}

/// [`RecordStore`] backed by the SQLite database at a path.
///
/// Each query opens its own read-only connection, so concurrent requests
/// never share a connection.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    db_path: PathBuf,
}

impl SqliteStore {
    #[must_use]
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    #[must_use]
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    fn open(&self) -> Result<Database> {
        Database::open_read_only(&self.db_path)
    }
}

impl RecordStore for SqliteStore {
    fn find_by_name_substring(
        &self,
        term: &str,
        status: Option<&str>,
    ) -> Result<Vec<VendingRecord>> {
        self.open()?.find_by_operator_substring(term, status)
    }

    fn find_by_address_substring(&self, term: &str) -> Result<Vec<VendingRecord>> {
        self.open()?.find_by_address_substring(term)
    }

    fn all_with_status(&self, status: Option<&str>) -> Result<Vec<VendingRecord>> {
        self.open()?.all_with_status(status)
    }
}
