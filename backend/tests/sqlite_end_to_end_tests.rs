//! Full requests against a SQLite file built in a temp directory.

#![cfg(feature = "sqlite-repo")]

mod support;

use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::json;
use tempfile::TempDir;

use surfsup::db::{
    FullRepository, RepositoryError, RepositoryFactory, RepositoryType, SqliteConfig,
};
use surfsup::services::DateParamMode;
use support::{app_with, get, get_json, sample_sql, sqlite_fixture, MOST_ACTIVE, OTHER};

async fn sample_store(dir: &TempDir) -> Arc<dyn FullRepository> {
    let path = sqlite_fixture(dir, &sample_sql());
    let config = SqliteConfig::with_url(path);
    RepositoryFactory::create(RepositoryType::Sqlite, Some(&config))
        .await
        .unwrap()
}

#[tokio::test]
async fn test_stations_from_file() {
    let dir = TempDir::new().unwrap();
    let repo = sample_store(&dir).await;
    let body = get_json(app_with(repo, DateParamMode::Legacy), "/api/v1.0/stations").await;
    assert_eq!(body, json!([OTHER, MOST_ACTIVE, "USC00513117"]));
}

#[tokio::test]
async fn test_precipitation_from_file() {
    let dir = TempDir::new().unwrap();
    let repo = sample_store(&dir).await;
    let body = get_json(app_with(repo, DateParamMode::Legacy), "/api/v1.0/precipitation").await;
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 10);

    let dates: Vec<&str> = items.iter().step_by(2).map(|v| v.as_str().unwrap()).collect();
    assert_eq!(
        dates,
        ["2016-08-23", "2016-08-23", "2017-01-15", "2017-08-18", "2017-08-23"]
    );
    // NULL precipitation survives as null
    assert_eq!(items[5], json!(null));
}

#[tokio::test]
async fn test_tobs_from_file() {
    let dir = TempDir::new().unwrap();
    let repo = sample_store(&dir).await;
    let body = get_json(app_with(repo, DateParamMode::Legacy), "/api/v1.0/tobs").await;
    assert_eq!(
        body,
        json!(["2016-08-23", 77.0, "2017-01-15", 66.0, "2017-08-18", 79.0])
    );
}

#[tokio::test]
async fn test_summaries_from_file() {
    let dir = TempDir::new().unwrap();
    let repo = sample_store(&dir).await;

    let start = get_json(app_with(repo.clone(), DateParamMode::Legacy), "/api/v1.0/2015-01-01").await;
    assert_eq!(
        start,
        json!({"start_date": "2016-08-23", "TMIN": 66.0, "TAVG": 76.8, "TMAX": 81.0})
    );

    let range = get_json(app_with(repo, DateParamMode::Legacy), "/api/v1.0/x/y").await;
    assert_eq!(range["end_date"], json!("2017-08-23"));
    assert_eq!(range["TAVG"], json!(76.8));
}

#[tokio::test]
async fn test_empty_tables_give_empty_results() {
    let dir = TempDir::new().unwrap();
    let sql = "
        CREATE TABLE measurement (id INTEGER PRIMARY KEY, station TEXT, date TEXT, prcp FLOAT, tobs FLOAT);
        CREATE TABLE station (id INTEGER PRIMARY KEY, station TEXT, name TEXT, latitude FLOAT, longitude FLOAT, elevation FLOAT);
    ";
    let config = SqliteConfig::with_url(sqlite_fixture(&dir, sql));
    let repo = RepositoryFactory::create(RepositoryType::Sqlite, Some(&config))
        .await
        .unwrap();
    let app = || app_with(repo.clone(), DateParamMode::Legacy);

    assert_eq!(get_json(app(), "/api/v1.0/stations").await, json!([]));
    assert_eq!(get_json(app(), "/api/v1.0/precipitation").await, json!([]));
    assert_eq!(
        get_json(app(), "/api/v1.0/a").await,
        json!({"start_date": "2016-08-23", "TMIN": null, "TAVG": null, "TMAX": null})
    );
}

#[tokio::test]
async fn test_missing_file_fails_at_startup() {
    let dir = TempDir::new().unwrap();
    let config = SqliteConfig::with_url(dir.path().join("absent.sqlite").to_string_lossy());
    let result = RepositoryFactory::create(RepositoryType::Sqlite, Some(&config)).await;
    assert!(matches!(result, Err(RepositoryError::ConfigurationError { .. })));
    // nothing was created
    assert!(!dir.path().join("absent.sqlite").exists());
}

#[tokio::test]
async fn test_missing_table_fails_at_startup() {
    let dir = TempDir::new().unwrap();
    let sql = "CREATE TABLE station (id INTEGER PRIMARY KEY, station TEXT, name TEXT, latitude FLOAT, longitude FLOAT, elevation FLOAT);";
    let config = SqliteConfig::with_url(sqlite_fixture(&dir, sql));
    let result = RepositoryFactory::create(RepositoryType::Sqlite, Some(&config)).await;
    assert!(matches!(result, Err(RepositoryError::SchemaError { .. })));
}

#[tokio::test]
async fn test_config_file_points_at_store() {
    let dir = TempDir::new().unwrap();
    let db_path = sqlite_fixture(&dir, &sample_sql());
    let config_path = dir.path().join("repository.toml");
    std::fs::write(
        &config_path,
        format!(
            "[repository]\ntype = \"sqlite\"\n\n[sqlite]\ndatabase_url = \"{}\"\nmax_connections = 2\n",
            db_path.replace('\\', "\\\\")
        ),
    )
    .unwrap();

    let repo = RepositoryFactory::from_config_file(&config_path).await.unwrap();
    assert!(repo.health_check().await.unwrap());
    let (status, _) = get(app_with(repo, DateParamMode::Legacy), "/api/v1.0/tobs").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_zero_timeout_in_config_file_is_configuration_error() {
    let dir = TempDir::new().unwrap();
    let db_path = sqlite_fixture(&dir, &sample_sql());
    let config_path = dir.path().join("repository.toml");
    std::fs::write(
        &config_path,
        format!(
            "[repository]\ntype = \"sqlite\"\n\n[sqlite]\ndatabase_url = \"{}\"\nconnect_timeout = 0\n",
            db_path.replace('\\', "\\\\")
        ),
    )
    .unwrap();

    let result = RepositoryFactory::from_config_file(&config_path).await;
    assert!(matches!(result, Err(RepositoryError::ConfigurationError { .. })));
}
