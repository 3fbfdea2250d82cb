use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One completed population of the record store from a dataset snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestRun {
    /// Where the snapshot came from (URL or file path).
    pub source: String,

    /// Number of records written.
    pub record_count: usize,

    pub ingested_at: DateTime<Utc>,
}

impl IngestRun {
    #[must_use]
    pub fn new(source: impl Into<String>, record_count: usize) -> Self {
        Self {
            source: source.into(),
            record_count,
            ingested_at: Utc::now(),
        }
    }
}
