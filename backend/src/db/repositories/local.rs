//! In-memory local repository implementation.
//!
//! Holds measurements and stations in `Vec`s and answers the same queries as
//! the SQLite store, including SQL's NULL-on-empty aggregate semantics. Used
//! by unit/integration tests and for running the server without a database
//! file.

use async_trait::async_trait;
use chrono::NaiveDate;
use parking_lot::RwLock;
use std::sync::Arc;

use crate::db::repository::*;
use crate::models::*;

/// In-memory local repository.
///
/// # Example
/// ```
/// use surfsup::db::repositories::LocalRepository;
/// use surfsup::models::{Measurement, Station};
///
/// let repo = LocalRepository::new();
/// repo.insert_station(Station::with_id("USC00519281"));
/// repo.insert_measurement(Measurement::new("USC00519281", "2017-08-23", Some(0.0), 81.0));
/// assert_eq!(repo.measurement_count(), 1);
/// ```
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    measurements: Vec<Measurement>,
    stations: Vec<Station>,
    // Connection health
    is_healthy: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            measurements: Vec::new(),
            stations: Vec::new(),
            is_healthy: true,
        }
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData::default())),
        }
    }

    /// Create a repository pre-populated with rows.
    pub fn with_data(measurements: Vec<Measurement>, stations: Vec<Station>) -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData {
                measurements,
                stations,
                is_healthy: true,
            })),
        }
    }

    pub fn insert_measurement(&self, measurement: Measurement) {
        self.data.write().measurements.push(measurement);
    }

    pub fn insert_station(&self, station: Station) {
        self.data.write().stations.push(station);
    }

    pub fn measurement_count(&self) -> usize {
        self.data.read().measurements.len()
    }

    /// Simulate losing the connection: every query then fails.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().is_healthy = healthy;
    }

    fn ensure_connected(&self, operation: &str) -> RepositoryResult<()> {
        if self.data.read().is_healthy {
            Ok(())
        } else {
            Err(RepositoryError::connection_with_context(
                "local repository is marked unhealthy",
                ErrorContext::new(operation),
            ))
        }
    }

    /// Rows matching `filter`, projected with `map`, ordered by date.
    ///
    /// The sort is stable so equal dates keep insertion order.
    fn select_by_date<T, F, M>(&self, filter: F, map: M) -> Vec<T>
    where
        F: Fn(&Measurement) -> bool,
        M: Fn(&Measurement) -> T,
    {
        let data = self.data.read();
        let mut matched: Vec<&Measurement> =
            data.measurements.iter().filter(|m| filter(m)).collect();
        matched.sort_by(|a, b| a.date.cmp(&b.date));
        matched.into_iter().map(map).collect()
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MeasurementRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.data.read().is_healthy)
    }

    async fn fetch_precipitation(&self, since: NaiveDate) -> RepositoryResult<Vec<PrecipitationRow>> {
        self.ensure_connected("fetch_precipitation")?;
        let window = DateRange::starting(since);
        Ok(self.select_by_date(
            |m| window.contains(&m.date),
            |m| PrecipitationRow {
                date: m.date.clone(),
                prcp: m.prcp,
            },
        ))
    }

    async fn fetch_temperature_observations(
        &self,
        station: &str,
        since: NaiveDate,
    ) -> RepositoryResult<Vec<TemperatureRow>> {
        self.ensure_connected("fetch_temperature_observations")?;
        let window = DateRange::starting(since);
        Ok(self.select_by_date(
            |m| m.station == station && window.contains(&m.date),
            |m| TemperatureRow {
                date: m.date.clone(),
                tobs: m.tobs,
            },
        ))
    }

    async fn fetch_temperature_stats(&self, range: DateRange) -> RepositoryResult<TemperatureStats> {
        self.ensure_connected("fetch_temperature_stats")?;
        let data = self.data.read();
        Ok(TemperatureStats::from_observations(
            data.measurements
                .iter()
                .filter(|m| range.contains(&m.date))
                .map(|m| m.tobs),
        ))
    }
}

#[async_trait]
impl StationRepository for LocalRepository {
    async fn list_station_ids(&self) -> RepositoryResult<Vec<String>> {
        self.ensure_connected("list_station_ids")?;
        Ok(self
            .data
            .read()
            .stations
            .iter()
            .map(|s| s.station.clone())
            .collect())
    }
}
