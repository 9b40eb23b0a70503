//! Measurement record as returned by the Measurement Store
//!
//! The store owns validation of the readings; this side accepts any integer
//! and only checks the JSON shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::FetchError;

/// One stored blood pressure + heart rate reading
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Measurement {
    /// Record id, unique within the store
    pub id: i64,
    pub patient_id: String,
    /// mmHg
    pub systolic: i64,
    /// mmHg
    pub diastolic: i64,
    /// Beats per minute
    pub heart_rate: i64,
    /// When the reading was taken
    pub measured_at: DateTime<Utc>,
    /// When the store ingested it (expected to be >= `measured_at`)
    pub received_at: DateTime<Utc>,
}

/// Decode a response body into measurements, preserving order
pub fn decode_measurements(body: &str) -> Result<Vec<Measurement>, FetchError> {
    serde_json::from_str(body).map_err(FetchError::from)
}
