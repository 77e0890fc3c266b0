//! Public API surface.
//!
//! Consolidates the response types served over HTTP. All types derive
//! Serialize/Deserialize.

pub use crate::models::{
    DateRange, Measurement, PrecipitationRow, Station, TemperatureRow, TemperatureStats,
};
pub use crate::routes::series::{FlatSeries, FlatValue};
pub use crate::routes::temperature::{RangeSummary, StartSummary};

/// Response of `/api/v1.0/stations`.
pub type StationList = Vec<String>;
