//! Ingest error types.

use thiserror::Error;

/// Errors that can occur while populating the record store.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The dataset source answered with a non-success status.
    #[error("HTTP error from {source_name}: {message}")]
    Http {
        source_name: String,
        message: String,
    },

    /// The dataset could not be parsed.
    #[error("parse error from {source_name}: {message}")]
    Parse {
        source_name: String,
        message: String,
    },

    /// No usable rows were left after filtering.
    #[error("{source_name} yielded no usable records")]
    Empty { source_name: String },

    /// An error propagated from `reqwest`.
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),

    /// An error propagated from the core domain layer.
    #[error("database error: {0}")]
    Database(#[from] truckstop_core::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for ingest results.
pub type IngestResult<T> = std::result::Result<T, IngestError>;
