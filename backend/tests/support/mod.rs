#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use surfsup::db::repositories::LocalRepository;
use surfsup::db::FullRepository;
use surfsup::http::{create_router, AppState};
use surfsup::models::{Measurement, Station};
use surfsup::services::DateParamMode;

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// Restores the previous values on unwind and serializes access to the
/// process environment across parallel tests.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

// =============================================================================
// Fixtures
// =============================================================================

pub const MOST_ACTIVE: &str = "USC00519281";
pub const OTHER: &str = "USC00519397";

/// A small dataset straddling the 2016-08-23 cutoff.
///
/// Five measurements fall on or after the cutoff, three of them at the most
/// active station; one has a NULL precipitation.
pub fn sample_measurements() -> Vec<Measurement> {
    vec![
        Measurement::new(OTHER, "2010-01-01", Some(0.08), 65.0),
        Measurement::new(MOST_ACTIVE, "2016-08-22", Some(0.2), 77.0),
        Measurement::new(MOST_ACTIVE, "2016-08-23", Some(1.79), 77.0),
        Measurement::new(OTHER, "2016-08-23", Some(0.0), 81.0),
        Measurement::new(MOST_ACTIVE, "2017-01-15", None, 66.0),
        Measurement::new(MOST_ACTIVE, "2017-08-18", Some(0.06), 79.0),
        Measurement::new(OTHER, "2017-08-23", Some(0.0), 81.0),
    ]
}

pub fn sample_stations() -> Vec<Station> {
    vec![
        Station {
            station: OTHER.to_string(),
            name: "WAIKIKI 717.2, HI US".to_string(),
            latitude: 21.2716,
            longitude: -157.8168,
            elevation: 3.0,
        },
        Station {
            station: MOST_ACTIVE.to_string(),
            name: "WAIHEE 837.5, HI US".to_string(),
            latitude: 21.45167,
            longitude: -157.84889,
            elevation: 32.9,
        },
        Station::with_id("USC00513117"),
    ]
}

pub fn sample_repository() -> LocalRepository {
    LocalRepository::with_data(sample_measurements(), sample_stations())
}

/// SQL that builds the two tables and loads the sample rows.
pub fn sample_sql() -> String {
    let mut sql = String::from(
        "CREATE TABLE measurement (id INTEGER PRIMARY KEY, station TEXT, date TEXT, prcp FLOAT, tobs FLOAT);
         CREATE TABLE station (id INTEGER PRIMARY KEY, station TEXT, name TEXT, latitude FLOAT, longitude FLOAT, elevation FLOAT);\n",
    );
    for m in sample_measurements() {
        let prcp = m.prcp.map_or("NULL".to_string(), |p| p.to_string());
        sql.push_str(&format!(
            "INSERT INTO measurement (station, date, prcp, tobs) VALUES ('{}', '{}', {}, {});\n",
            m.station, m.date, prcp, m.tobs
        ));
    }
    for s in sample_stations() {
        sql.push_str(&format!(
            "INSERT INTO station (station, name, latitude, longitude, elevation) VALUES ('{}', '{}', {}, {}, {});\n",
            s.station, s.name, s.latitude, s.longitude, s.elevation
        ));
    }
    sql
}

// =============================================================================
// HTTP helpers
// =============================================================================

pub fn app_with(repo: Arc<dyn FullRepository>, mode: DateParamMode) -> Router {
    create_router(AppState::new(repo).with_date_params(mode))
}

pub fn sample_app() -> Router {
    app_with(Arc::new(sample_repository()), DateParamMode::Legacy)
}

/// Issue a GET and return the status with the body as text.
pub async fn get(app: Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

/// Issue a GET, assert 200 and parse the body as JSON.
pub async fn get_json(app: Router, uri: &str) -> serde_json::Value {
    let (status, body) = get(app, uri).await;
    assert_eq!(status, StatusCode::OK, "GET {} returned {}: {}", uri, status, body);
    serde_json::from_str(&body).unwrap()
}

/// Write a SQLite file holding the sample rows and return its path.
#[cfg(feature = "sqlite-repo")]
pub fn sqlite_fixture(dir: &tempfile::TempDir, sql: &str) -> String {
    use diesel::connection::SimpleConnection;
    use diesel::{Connection, SqliteConnection};

    let path = dir.path().join("hawaii.sqlite");
    let path = path.to_string_lossy().to_string();
    let mut conn = SqliteConnection::establish(&path).unwrap();
    conn.batch_execute(sql).unwrap();
    path
}
