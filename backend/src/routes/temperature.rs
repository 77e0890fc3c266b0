use serde::{Deserialize, Serialize};

use crate::models::TemperatureStats;

/// Response of `/api/v1.0/<start>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartSummary {
    pub start_date: String,
    #[serde(rename = "TMIN")]
    pub tmin: Option<f64>,
    #[serde(rename = "TAVG")]
    pub tavg: Option<f64>,
    #[serde(rename = "TMAX")]
    pub tmax: Option<f64>,
}

impl StartSummary {
    pub fn new(start_date: String, stats: TemperatureStats) -> Self {
        Self {
            start_date,
            tmin: stats.min,
            tavg: stats.avg,
            tmax: stats.max,
        }
    }
}

/// Response of `/api/v1.0/<start>/<end>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeSummary {
    pub start_date: String,
    pub end_date: String,
    #[serde(rename = "TMIN")]
    pub tmin: Option<f64>,
    #[serde(rename = "TAVG")]
    pub tavg: Option<f64>,
    #[serde(rename = "TMAX")]
    pub tmax: Option<f64>,
}

impl RangeSummary {
    pub fn new(start_date: String, end_date: String, stats: TemperatureStats) -> Self {
        Self {
            start_date,
            end_date,
            tmin: stats.min,
            tavg: stats.avg,
            tmax: stats.max,
        }
    }
}
