//! Populating the record store from the permit dataset.

pub mod sfgov;

pub use sfgov::{PermitRow, SfGovClient};

use std::fmt;
use std::path::{Path, PathBuf};

use truckstop_core::schema::Database;
use truckstop_core::{IngestRun, VendingRecord};

use crate::config::Config;
use crate::error::{IngestError, IngestResult};

/// Where permit rows come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    /// A Socrata resource endpoint.
    Remote { url: String, row_limit: usize },
    /// A local JSON snapshot with the same row shape.
    File(PathBuf),
}

impl DatasetSource {
    /// The remote dataset named by the configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::Remote {
            url: config.dataset_url.clone(),
            row_limit: config.dataset_row_limit,
        }
    }

    async fn fetch_rows(&self) -> IngestResult<Vec<PermitRow>> {
        match self {
            Self::Remote { url, row_limit } => {
                SfGovClient::new(url.clone(), *row_limit)?.fetch().await
            }
            Self::File(path) => {
                log::info!("Reading permit snapshot {}", path.display());
                let bytes = tokio::fs::read(path).await?;
                sfgov::parse_rows(&bytes, &path.display().to_string())
            }
        }
    }
}

impl fmt::Display for DatasetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote { url, .. } => f.write_str(url),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// What an ingest call did.
#[derive(Debug, Clone, PartialEq)]
pub enum IngestOutcome {
    /// The store was already populated; nothing was fetched.
    Skipped(IngestRun),
    /// A fresh snapshot was written.
    Ingested { run: IngestRun, dropped: usize },
}

impl IngestOutcome {
    #[must_use]
    pub const fn run(&self) -> &IngestRun {
        match self {
            Self::Skipped(run) | Self::Ingested { run, .. } => run,
        }
    }
}

/// Loads the permit dataset into the database at a path.
#[derive(Debug, Clone)]
pub struct Ingestor {
    db_path: PathBuf,
    source: DatasetSource,
}

impl Ingestor {
    pub fn new(db_path: impl Into<PathBuf>, source: DatasetSource) -> Self {
        Self {
            db_path: db_path.into(),
            source,
        }
    }

    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.database_path.clone(), DatasetSource::from_config(config))
    }

    /// Replace the configured source.
    #[must_use]
    pub fn with_source(mut self, source: DatasetSource) -> Self {
        self.source = source;
        self
    }

    #[must_use]
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    #[must_use]
    pub const fn source(&self) -> &DatasetSource {
        &self.source
    }

    /// Populate the store unless an earlier ingest already did.
    pub async fn ensure_ready(&self) -> IngestResult<IngestOutcome> {
        let existing = self.open_database()?.latest_ingest()?;
        if let Some(run) = existing {
            log::info!(
                "Record store ready: {} records from {} ({})",
                run.record_count,
                run.source,
                run.ingested_at.format("%Y-%m-%d %H:%M:%S UTC")
            );
            return Ok(IngestOutcome::Skipped(run));
        }

        log::info!("Record store is empty; ingesting from {}", self.source);
        self.run().await
    }

    /// Fetch the dataset and replace whatever the store holds.
    pub async fn run(&self) -> IngestResult<IngestOutcome> {
        let rows = self.source.fetch_rows().await?;
        let fetched = rows.len();

        let records: Vec<VendingRecord> =
            rows.into_iter().filter_map(PermitRow::into_record).collect();
        let dropped = fetched - records.len();
        log::info!(
            "Fetched {} rows: {} kept, {} dropped for missing coordinates or status",
            fetched,
            records.len(),
            dropped
        );

        if records.is_empty() {
            return Err(IngestError::Empty {
                source_name: self.source.to_string(),
            });
        }

        let run = self
            .open_database()?
            .replace_records(&records, &self.source.to_string())?;
        log::info!(
            "Stored {} records in {}",
            run.record_count,
            self.db_path.display()
        );

        Ok(IngestOutcome::Ingested { run, dropped })
    }

    fn open_database(&self) -> IngestResult<Database> {
        if let Some(parent) = self.db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(Database::open(&self.db_path)?)
    }
}
