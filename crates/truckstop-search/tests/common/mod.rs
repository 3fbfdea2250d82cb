//! Shared fixtures for search integration tests.

#![allow(dead_code)]

pub mod fake_distance_matrix;

use std::sync::Arc;

use tempfile::TempDir;
use truckstop_core::schema::Database;
use truckstop_core::{Coordinate, RecordStore, SqliteStore, VendingRecord};

/// Origin every fixture record is measured from.
pub const ORIGIN: Coordinate = Coordinate::new(37.7749, -122.4194);

const FIXTURE: [(&str, &str, &str); 6] = [
    ("Test Truck 1", "123 Test St", "APPROVED"),
    ("Test Truck 2", "456 Test Ave", "APPROVED"),
    ("Test Truck 3", "789 Test Blvd", "EXPIRED"),
    ("Food Truck 4", "101 Unit Ct", "REQUESTED"),
    ("Foodies 5", "202 Food Dr", "APPROVED"),
    ("Tacos 6", "303 Test Ln", "EXPIRED"),
];

/// Six records, each farther from [`ORIGIN`] than the one before.
pub fn fixture_records() -> Vec<VendingRecord> {
    FIXTURE
        .iter()
        .zip(1_u32..)
        .map(|((name, address, status), i)| {
            let step = f64::from(i);
            VendingRecord::new(
                name,
                address,
                status,
                ORIGIN.latitude + 0.0099 * step,
                ORIGIN.longitude - 0.01 * step,
            )
        })
        .collect()
}

/// A store holding [`fixture_records`]. Keep the `TempDir` alive for as long
/// as the store is used.
pub fn fixture_store() -> (TempDir, Arc<dyn RecordStore>) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("trucks.db");
    Database::open(&path)
        .unwrap()
        .replace_records(&fixture_records(), "fixture")
        .unwrap();
    (dir, Arc::new(SqliteStore::new(path)))
}
