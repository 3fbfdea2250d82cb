//! Configuration and dataset ingest for truckstop.
//!
//! Loads layered configuration and populates the record store from the
//! SF OpenData mobile food facility permit dataset.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod config;
pub mod error;
pub mod ingest;

pub use config::Config;
pub use error::{IngestError, IngestResult};
pub use ingest::{DatasetSource, IngestOutcome, Ingestor, SfGovClient};
