//! How `<start>`/`<end>` path segments turn into a query window.
//!
//! The published API accepts the segments but always queries the fixed
//! literals 2016-08-23 / 2017-08-23 ([`DateParamMode::Legacy`]). Deployments
//! that want the segments honored opt into [`DateParamMode::Honor`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::climate::ClimateError;
use crate::models::{legacy_range_end, legacy_range_start, parse_iso_date, DateRange};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateParamMode {
    /// Path values are discarded in favor of the fixed literals.
    #[default]
    Legacy,
    /// Path values are parsed as `YYYY-MM-DD` and queried.
    Honor,
}

impl FromStr for DateParamMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "legacy" | "fixed" => Ok(Self::Legacy),
            "honor" | "honour" | "path" => Ok(Self::Honor),
            _ => Err(format!("Unknown date parameter mode: {}", s)),
        }
    }
}

impl fmt::Display for DateParamMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Legacy => write!(f, "legacy"),
            Self::Honor => write!(f, "honor"),
        }
    }
}

fn parse_segment(value: &str) -> Result<NaiveDate, ClimateError> {
    parse_iso_date(value).map_err(|_| ClimateError::InvalidDate {
        value: value.to_string(),
    })
}

impl DateParamMode {
    /// Window for `/api/v1.0/<start>`.
    pub fn resolve_start(&self, start: &str) -> Result<DateRange, ClimateError> {
        match self {
            Self::Legacy => Ok(DateRange::starting(legacy_range_start())),
            Self::Honor => Ok(DateRange::starting(parse_segment(start)?)),
        }
    }

    /// Window for `/api/v1.0/<start>/<end>`.
    pub fn resolve_range(&self, start: &str, end: &str) -> Result<DateRange, ClimateError> {
        match self {
            Self::Legacy => Ok(DateRange::between(legacy_range_start(), legacy_range_end())),
            Self::Honor => {
                let start = parse_segment(start)?;
                let end = parse_segment(end)?;
                if end < start {
                    return Err(ClimateError::InvertedRange { start, end });
                }
                Ok(DateRange::between(start, end))
            }
        }
    }
}
