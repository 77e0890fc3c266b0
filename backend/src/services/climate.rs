//! Climate query operations.
//!
//! One function per route. Each issues a single repository query and shapes
//! the rows into the response type; the repository has already released its
//! connection by the time shaping starts.

use chrono::NaiveDate;

use super::date_policy::DateParamMode;
use crate::api::{FlatSeries, RangeSummary, StartSummary, StationList};
use crate::db::repository::{FullRepository, RepositoryError, RepositoryResult};
use crate::models::{format_iso_date, year_ago, MOST_ACTIVE_STATION};
use crate::routes::series::{flatten_precipitation, flatten_temperatures};

/// Errors surfaced by the climate operations.
#[derive(Debug, thiserror::Error)]
pub enum ClimateError {
    /// A path segment is not a `YYYY-MM-DD` date (only in honor mode).
    #[error("invalid date '{value}', expected YYYY-MM-DD")]
    InvalidDate { value: String },

    /// The end of the requested range precedes its start (only in honor mode).
    #[error("end date {end} precedes start date {start}")]
    InvertedRange { start: NaiveDate, end: NaiveDate },

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Check the store answers queries.
pub async fn health_check<R: FullRepository + ?Sized>(repo: &R) -> RepositoryResult<bool> {
    repo.health_check().await
}

/// Previous year of precipitation, raveled to `[date, prcp, ...]`.
pub async fn precipitation<R: FullRepository + ?Sized>(repo: &R) -> RepositoryResult<FlatSeries> {
    let rows = repo.fetch_precipitation(year_ago()).await?;
    Ok(flatten_precipitation(rows))
}

/// Every station identifier.
pub async fn stations<R: FullRepository + ?Sized>(repo: &R) -> RepositoryResult<StationList> {
    repo.list_station_ids().await
}

/// Previous year of temperature observations at the most active station,
/// raveled to `[date, tobs, ...]`.
pub async fn temperature_observations<R: FullRepository + ?Sized>(
    repo: &R,
) -> RepositoryResult<FlatSeries> {
    let rows = repo
        .fetch_temperature_observations(MOST_ACTIVE_STATION, year_ago())
        .await?;
    Ok(flatten_temperatures(rows))
}

/// MIN/AVG/MAX temperature from a start date onward.
pub async fn temperature_from<R: FullRepository + ?Sized>(
    repo: &R,
    mode: DateParamMode,
    start: &str,
) -> Result<StartSummary, ClimateError> {
    let range = mode.resolve_start(start)?;
    let stats = repo.fetch_temperature_stats(range).await?;
    Ok(StartSummary::new(format_iso_date(range.start), stats))
}

/// MIN/AVG/MAX temperature between two dates, inclusive.
pub async fn temperature_between<R: FullRepository + ?Sized>(
    repo: &R,
    mode: DateParamMode,
    start: &str,
    end: &str,
) -> Result<RangeSummary, ClimateError> {
    let range = mode.resolve_range(start, end)?;
    let stats = repo.fetch_temperature_stats(range).await?;
    let end_date = range.end.unwrap_or(range.start);
    Ok(RangeSummary::new(
        format_iso_date(range.start),
        format_iso_date(end_date),
        stats,
    ))
}
