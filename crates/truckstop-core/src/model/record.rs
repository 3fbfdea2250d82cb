use serde::{Deserialize, Serialize};

use crate::model::Coordinate;

/// Status value the nearest search filters on by default.
pub const STATUS_APPROVED: &str = "APPROVED";

/// Canonical form of an operator name: trimmed, lower-case.
#[must_use]
pub fn normalize_operator(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Canonical form of a street address: trimmed, upper-case.
#[must_use]
pub fn normalize_address(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Canonical form of a permit status: trimmed, upper-case.
///
/// Status is an open set (`APPROVED`, `EXPIRED`, `REQUESTED`, ...), so it
/// stays a string rather than an enum.
#[must_use]
pub fn normalize_status(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// A mobile food vending permit.
///
/// Text fields are normalized once, when the record is built at ingest;
/// stored values are always in canonical case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendingRecord {
    /// Permit holder, lower-case.
    pub operator_name: String,

    /// Street address, upper-case.
    pub address: String,

    /// Permit lifecycle status, upper-case.
    pub status: String,

    pub latitude: f64,
    pub longitude: f64,

    /// Distance in miles from a nearest-search origin.
    ///
    /// Only set on the per-request copies returned by nearest search; never
    /// persisted. Serialized as `null` when absent.
    #[serde(default)]
    pub distance: Option<f64>,
}

impl VendingRecord {
    /// Build a record, normalizing all text fields.
    #[must_use]
    pub fn new(
        operator_name: &str,
        address: &str,
        status: &str,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            operator_name: normalize_operator(operator_name),
            address: normalize_address(address),
            status: normalize_status(status),
            latitude,
            longitude,
            distance: None,
        }
    }

    /// The record's stored position.
    #[must_use]
    pub const fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }

    /// Copy of this record carrying a computed distance.
    #[must_use]
    pub fn with_distance(mut self, miles: f64) -> Self {
        self.distance = Some(miles);
        self
    }

    /// Whether this record has the given (already normalized) status.
    #[must_use]
    pub fn has_status(&self, status: &str) -> bool {
        self.status == status
    }
}
