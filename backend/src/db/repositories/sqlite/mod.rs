//! SQLite repository implementation using Diesel.
//!
//! ## Features
//!
//! - Connection pooling with r2d2, one checked-out connection per query
//! - Connections forced read-only when opened (`PRAGMA query_only`)
//! - Declared schema validated against the database file at startup
//!
//! Connection settings come from [`SqliteConfig`].

use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::dsl::{avg, max, min};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use diesel::sql_query;
use log::debug;
use std::collections::HashSet;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task;

use crate::db::config::SqliteConfig;
use crate::db::repository::{
    ErrorContext, MeasurementRepository, RepositoryError, RepositoryResult, StationRepository,
};
use crate::models::{
    format_iso_date, DateRange, PrecipitationRow, TemperatureRow, TemperatureStats,
};

mod models;
mod schema;

use models::ColumnInfo;
use schema::{measurement, station, REQUIRED_COLUMNS};

type SqlitePool = Pool<ConnectionManager<SqliteConnection>>;

/// Pool health statistics.
#[derive(Debug, Clone, Default)]
pub struct PoolStats {
    /// Number of connections currently in use
    pub connections_in_use: u32,
    /// Number of idle connections
    pub idle_connections: u32,
    /// Maximum pool size
    pub max_size: u32,
    /// Total queries executed
    pub total_queries: u64,
    /// Total failed queries
    pub failed_queries: u64,
}

/// Marks every pooled connection read-only when it is opened.
#[derive(Debug, Clone, Copy)]
struct ReadOnlySession;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ReadOnlySession {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        sql_query("PRAGMA query_only = ON")
            .execute(conn)
            .map(|_| ())
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Diesel-backed, read-only repository over the climate SQLite file.
#[derive(Clone, Debug)]
pub struct SqliteRepository {
    pool: SqlitePool,
    config: SqliteConfig,
    total_queries: Arc<AtomicU64>,
    failed_queries: Arc<AtomicU64>,
}

impl SqliteRepository {
    /// Open the pool and validate the schema.
    ///
    /// # Returns
    /// * `Ok(SqliteRepository)` on success
    /// * `Err(RepositoryError)` if the file is missing, a connection cannot be
    ///   opened, or a required table/column is absent
    pub fn new(config: SqliteConfig) -> RepositoryResult<Self> {
        config.validate().map_err(|e| {
            RepositoryError::configuration_with_context(e, ErrorContext::new("open_database"))
        })?;

        let path = config.database_path().to_string();

        // SQLite would otherwise create an empty file and fail later on the first query.
        if path != ":memory:" && !path.starts_with("file:") && !Path::new(&path).exists() {
            return Err(RepositoryError::configuration_with_context(
                format!("database file '{}' does not exist", path),
                ErrorContext::new("open_database"),
            ));
        }

        let manager = ConnectionManager::<SqliteConnection>::new(&path);
        let pool = Pool::builder()
            .max_size(config.max_pool_size)
            .connection_timeout(Duration::from_secs(config.connection_timeout_sec))
            .connection_customizer(Box::new(ReadOnlySession))
            .build(manager)
            .map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new("create_pool")
                        .with_details(format!("path={}, max_size={}", path, config.max_pool_size)),
                )
            })?;

        {
            let mut conn = pool.get().map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new("get_connection_for_schema_check"),
                )
            })?;
            Self::validate_schema(&mut conn)?;
        }

        debug!("Opened SQLite repository at {}", path);

        Ok(Self {
            pool,
            config,
            total_queries: Arc::new(AtomicU64::new(0)),
            failed_queries: Arc::new(AtomicU64::new(0)),
        })
    }

    /// Check that every column the queries read exists.
    fn validate_schema(conn: &mut SqliteConnection) -> RepositoryResult<()> {
        for (table, columns) in REQUIRED_COLUMNS {
            let present: HashSet<String> = sql_query(format!("PRAGMA table_info({})", table))
                .load::<ColumnInfo>(conn)
                .map_err(|e| RepositoryError::from(e).with_operation("validate_schema"))?
                .into_iter()
                .map(|c| c.name)
                .collect();

            if present.is_empty() {
                return Err(RepositoryError::schema_with_context(
                    format!("table '{}' not found", table),
                    ErrorContext::new("validate_schema").with_entity(*table),
                ));
            }

            let missing: Vec<&str> = columns
                .iter()
                .copied()
                .filter(|c| !present.contains(*c))
                .collect();
            if !missing.is_empty() {
                return Err(RepositoryError::schema_with_context(
                    format!("missing column(s) {}", missing.join(", ")),
                    ErrorContext::new("validate_schema").with_entity(*table),
                ));
            }
        }
        Ok(())
    }

    /// Run one operation on a freshly checked-out connection.
    ///
    /// The connection goes back to the pool when the closure returns, before
    /// the caller shapes or serializes anything.
    async fn with_conn<T, F>(&self, operation: &'static str, f: F) -> RepositoryResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut SqliteConnection) -> RepositoryResult<T> + Send + 'static,
    {
        let pool = self.pool.clone();
        let total_queries = self.total_queries.clone();
        let failed_queries = self.failed_queries.clone();

        task::spawn_blocking(move || {
            let mut conn = pool.get().map_err(|e| {
                failed_queries.fetch_add(1, Ordering::Relaxed);
                RepositoryError::from(e).with_operation(operation)
            })?;

            total_queries.fetch_add(1, Ordering::Relaxed);
            f(&mut conn).map_err(|e| {
                failed_queries.fetch_add(1, Ordering::Relaxed);
                e.with_operation(operation)
            })
        })
        .await
        .map_err(|e| {
            RepositoryError::internal_with_context(
                format!("Task join error: {}", e),
                ErrorContext::new("spawn_blocking"),
            )
        })?
    }

    /// Get pool health statistics.
    pub fn get_pool_stats(&self) -> PoolStats {
        let state = self.pool.state();
        PoolStats {
            connections_in_use: state.connections - state.idle_connections,
            idle_connections: state.idle_connections,
            max_size: self.config.max_pool_size,
            total_queries: self.total_queries.load(Ordering::Relaxed),
            failed_queries: self.failed_queries.load(Ordering::Relaxed),
        }
    }
}

#[async_trait]
impl MeasurementRepository for SqliteRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        self.with_conn("health_check", |conn| {
            sql_query("SELECT 1")
                .execute(conn)
                .map(|_| true)
                .map_err(RepositoryError::from)
        })
        .await
    }

    async fn fetch_precipitation(&self, since: NaiveDate) -> RepositoryResult<Vec<PrecipitationRow>> {
        let since = format_iso_date(since);
        self.with_conn("fetch_precipitation", move |conn| {
            let rows: Vec<(String, Option<f64>)> = measurement::table
                .select((measurement::date, measurement::prcp))
                .filter(measurement::date.ge(since))
                .order(measurement::date.asc())
                .load(conn)?;
            debug!("fetch_precipitation returned {} rows", rows.len());
            Ok(rows.into_iter().map(PrecipitationRow::from).collect())
        })
        .await
    }

    async fn fetch_temperature_observations(
        &self,
        station_id: &str,
        since: NaiveDate,
    ) -> RepositoryResult<Vec<TemperatureRow>> {
        let station_id = station_id.to_string();
        let since = format_iso_date(since);
        self.with_conn("fetch_temperature_observations", move |conn| {
            let rows: Vec<(String, f64)> = measurement::table
                .select((measurement::date, measurement::tobs))
                .filter(measurement::date.ge(since))
                .filter(measurement::station.eq(station_id))
                .order(measurement::date.asc())
                .load(conn)?;
            Ok(rows.into_iter().map(TemperatureRow::from).collect())
        })
        .await
    }

    async fn fetch_temperature_stats(&self, range: DateRange) -> RepositoryResult<TemperatureStats> {
        let start = format_iso_date(range.start);
        let end = range.end.map(format_iso_date);
        self.with_conn("fetch_temperature_stats", move |conn| {
            let aggregates = measurement::table.select((
                min(measurement::tobs),
                avg(measurement::tobs),
                max(measurement::tobs),
            ));
            let (tmin, tavg, tmax): (Option<f64>, Option<f64>, Option<f64>) = match end {
                Some(end) => aggregates
                    .filter(measurement::date.between(start, end))
                    .get_result(conn)?,
                None => aggregates
                    .filter(measurement::date.ge(start))
                    .get_result(conn)?,
            };
            Ok(TemperatureStats {
                min: tmin,
                avg: tavg,
                max: tmax,
            })
        })
        .await
    }
}

#[async_trait]
impl StationRepository for SqliteRepository {
    async fn list_station_ids(&self) -> RepositoryResult<Vec<String>> {
        self.with_conn("list_station_ids", |conn| {
            let ids: Vec<String> = station::table.select(station::station_id).load(conn)?;
            Ok(ids)
        })
        .await
    }
}
