//! Error types for distance lookups and search orchestration.

use thiserror::Error;

/// Errors from a remote distance source.
///
/// These never leave [`crate::CompositeProvider`]: every variant triggers
/// the geodesic fallback.
#[derive(Debug, Error)]
pub enum DistanceError {
    /// The HTTP request failed or returned a non-success status code.
    #[error("HTTP error from {source_name}: {message}")]
    Http {
        source_name: String,
        message: String,
    },

    /// The service answered, but with a non-`OK` status.
    #[error("{source_name} returned status {status}")]
    Status {
        source_name: String,
        status: String,
        message: Option<String>,
    },

    /// The response could not be parsed or held no usable distance.
    #[error("parse error from {source_name}: {message}")]
    Parse {
        source_name: String,
        message: String,
    },

    /// An error propagated from `reqwest` (connect failure, timeout, ...).
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),

    /// The shared request limiter was shut down.
    #[error("request limiter closed")]
    LimiterClosed,
}

/// Convenience alias for remote distance results.
pub type DistanceResult<T> = std::result::Result<T, DistanceError>;

/// Errors surfaced by the search orchestrators.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The record store could not be queried.
    #[error("record store error: {0}")]
    Store(#[from] truckstop_core::Error),

    /// A blocking store query panicked or was cancelled.
    #[error("store task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Convenience alias for search results.
pub type SearchResult<T> = std::result::Result<T, SearchError>;
