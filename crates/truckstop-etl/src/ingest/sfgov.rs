//! SF OpenData (Socrata) permit dataset client.
//!
//! The resource endpoint returns a JSON array of rows. Socrata encodes
//! numeric columns as strings, so coordinates are accepted either way.

use reqwest::Client;
use serde::{Deserialize, Deserializer};
use truckstop_core::{Coordinate, VendingRecord};

use crate::error::{IngestError, IngestResult};

/// Socrata's page size parameter; the default page is only 1000 rows.
const LIMIT_PARAM: &str = "$limit";

// ---------------------------------------------------------------------------
// Dataset row (raw)
// ---------------------------------------------------------------------------

/// One permit row as published. Every field may be absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PermitRow {
    #[serde(default)]
    pub applicant: Option<String>,

    #[serde(default)]
    pub address: Option<String>,

    #[serde(default)]
    pub status: Option<String>,

    #[serde(default, deserialize_with = "number_or_string")]
    pub latitude: Option<f64>,

    #[serde(default, deserialize_with = "number_or_string")]
    pub longitude: Option<f64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Number(f64),
    Text(String),
}

fn number_or_string<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<RawNumber>::deserialize(deserializer)? {
        Some(RawNumber::Number(n)) => Some(n),
        Some(RawNumber::Text(s)) => s.trim().parse().ok(),
        None => None,
    })
}

impl PermitRow {
    /// Normalize into a storable record.
    ///
    /// Returns `None` when the status is blank or either coordinate is
    /// missing or out of range. A missing applicant or address becomes an
    /// empty string.
    #[must_use]
    pub fn into_record(self) -> Option<VendingRecord> {
        let status = self.status.filter(|s| !s.trim().is_empty())?;
        let coordinate = Coordinate::new(self.latitude?, self.longitude?)
            .validate()
            .ok()?;

        Some(VendingRecord::new(
            self.applicant.as_deref().unwrap_or_default(),
            self.address.as_deref().unwrap_or_default(),
            &status,
            coordinate.latitude,
            coordinate.longitude,
        ))
    }
}

/// Parse a JSON array of permit rows.
pub fn parse_rows(bytes: &[u8], source_name: &str) -> IngestResult<Vec<PermitRow>> {
    serde_json::from_slice(bytes).map_err(|e| IngestError::Parse {
        source_name: source_name.to_string(),
        message: e.to_string(),
    })
}

/// Client for the permit dataset's resource endpoint.
#[derive(Debug, Clone)]
pub struct SfGovClient {
    http: Client,
    url: String,
    row_limit: usize,
}

impl SfGovClient {
    /// Create a new client.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(url: impl Into<String>, row_limit: usize) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .user_agent("truckstop/0.1.0 (https://github.com/oxur/truckstop)")
            .build()?;

        Ok(Self {
            http,
            url: url.into(),
            row_limit,
        })
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch every published row, up to the row limit.
    pub async fn fetch(&self) -> IngestResult<Vec<PermitRow>> {
        log::info!("Fetching permit dataset from {}", self.url);

        let response = self
            .http
            .get(&self.url)
            .query(&[(LIMIT_PARAM, self.row_limit.to_string())])
            .send()
            .await?
            .error_for_status()
            .map_err(|e| IngestError::Http {
                source_name: self.url.clone(),
                message: e.to_string(),
            })?;

        let bytes = response.bytes().await?;
        parse_rows(&bytes, &self.url)
    }
}
