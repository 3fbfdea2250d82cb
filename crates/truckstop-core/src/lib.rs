//! Core domain model for truckstop.
//!
//! This crate defines the vending-permit record and its normalization
//! rules, the SQLite schema, and the read-only [`RecordStore`] the search
//! orchestrators query.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod error;
pub mod model;
pub mod schema;
pub mod store;

pub use error::{Error, Result};
pub use model::{Coordinate, IngestRun, VendingRecord};
pub use store::{RecordStore, SqliteStore};
