//! Climate observation records and the row shapes returned by queries.
//!
//! Dates are kept as the ISO `YYYY-MM-DD` strings stored in the dataset so
//! that query results are projected into responses without reformatting.

use serde::{Deserialize, Serialize};

/// Station the `/api/v1.0/tobs` route reports on.
pub const MOST_ACTIVE_STATION: &str = "USC00519281";

/// One climate observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Identifier of the observing station
    pub station: String,
    /// Observation date, ISO formatted
    pub date: String,
    /// Precipitation amount; missing readings are `None`
    pub prcp: Option<f64>,
    /// Temperature observation
    pub tobs: f64,
}

impl Measurement {
    pub fn new(
        station: impl Into<String>,
        date: impl Into<String>,
        prcp: Option<f64>,
        tobs: f64,
    ) -> Self {
        Self {
            station: station.into(),
            date: date.into(),
            prcp,
            tobs,
        }
    }
}

/// One weather-observation site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    /// Unique station identifier (e.g. "USC00519397")
    pub station: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
}

impl Station {
    /// Station with only an identifier; descriptive fields are zeroed.
    pub fn with_id(station: impl Into<String>) -> Self {
        Self {
            station: station.into(),
            name: String::new(),
            latitude: 0.0,
            longitude: 0.0,
            elevation: 0.0,
        }
    }
}

/// `(date, prcp)` projection of a measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrecipitationRow {
    pub date: String,
    pub prcp: Option<f64>,
}

impl From<(String, Option<f64>)> for PrecipitationRow {
    fn from((date, prcp): (String, Option<f64>)) -> Self {
        Self { date, prcp }
    }
}

/// `(date, tobs)` projection of a measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureRow {
    pub date: String,
    pub tobs: f64,
}

impl From<(String, f64)> for TemperatureRow {
    fn from((date, tobs): (String, f64)) -> Self {
        Self { date, tobs }
    }
}

/// MIN/AVG/MAX of `tobs` over a date range.
///
/// Aggregates over an empty selection are SQL NULL, hence every field is optional.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TemperatureStats {
    pub min: Option<f64>,
    pub avg: Option<f64>,
    pub max: Option<f64>,
}

impl TemperatureStats {
    /// Aggregate an iterator of temperature observations.
    pub fn from_observations<I>(observations: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let mut count = 0usize;
        let mut sum = 0.0;
        let mut min: Option<f64> = None;
        let mut max: Option<f64> = None;

        for tobs in observations {
            count += 1;
            sum += tobs;
            min = Some(min.map_or(tobs, |m| m.min(tobs)));
            max = Some(max.map_or(tobs, |m| m.max(tobs)));
        }

        Self {
            min,
            avg: (count > 0).then(|| sum / count as f64),
            max,
        }
    }
}
