//! Data Transfer Objects for the HTTP API.
//!
//! Route payloads live in [`crate::routes`] and are re-exported here.

use serde::{Deserialize, Serialize};

pub use crate::api::{FlatSeries, FlatValue, RangeSummary, StartSummary, StationList};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// API version
    pub version: String,
    /// Database connection status
    pub database: String,
}
