//! Repository trait for reads against the `measurement` table.

use async_trait::async_trait;
use chrono::NaiveDate;

use super::error::RepositoryResult;
use crate::models::{DateRange, PrecipitationRow, TemperatureRow, TemperatureStats};

/// Read-only queries over climate measurements.
///
/// Each call runs exactly one query on its own connection.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait MeasurementRepository: Send + Sync {
    /// Check that the store answers a trivial query.
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// `date, prcp` for every measurement on or after `since`, ascending by date.
    async fn fetch_precipitation(&self, since: NaiveDate) -> RepositoryResult<Vec<PrecipitationRow>>;

    /// `date, tobs` for one station on or after `since`, ascending by date.
    ///
    /// # Arguments
    /// * `station` - Station identifier to filter on
    /// * `since` - Inclusive lower bound on the observation date
    async fn fetch_temperature_observations(
        &self,
        station: &str,
        since: NaiveDate,
    ) -> RepositoryResult<Vec<TemperatureRow>>;

    /// MIN/AVG/MAX of `tobs` across all stations within `range`.
    async fn fetch_temperature_stats(&self, range: DateRange) -> RepositoryResult<TemperatureStats>;
}
