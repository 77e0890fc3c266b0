//! SurfsUp HTTP Server Binary
//!
//! Serves the climate API over the Hawaii observations database.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin surfsup-server
//!
//! # Different database, honor path dates
//! DATABASE_URL=/data/hawaii.sqlite SURFSUP_DATE_PARAMS=honor \
//!   cargo run --bin surfsup-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 127.0.0.1)
//! - `PORT`: Server port (default: 5000)
//! - `DATABASE_URL` / `SURFSUP_DATABASE`: SQLite file (default: resources/hawaii.sqlite)
//! - `REPOSITORY_TYPE`: `sqlite` (default) or `local`
//! - `SURFSUP_DATE_PARAMS`: `legacy` (default) or `honor`
//! - `RUST_LOG`: Log level (default: info)
//!
//! A `repository.toml` in the working directory (or `backend/`) takes the
//! place of the repository variables and may carry a `[server]` table.

use std::env;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use surfsup::db::{RepositoryConfig, RepositoryFactory};
use surfsup::http::{create_router, AppState, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting SurfsUp HTTP Server");

    let config_path = RepositoryConfig::find_default_location();

    let repository = match &config_path {
        Some(path) => {
            info!("Loading repository configuration from {}", path.display());
            RepositoryFactory::from_config_file(path).await?
        }
        None => RepositoryFactory::from_env().await?,
    };
    info!("Repository initialized successfully");

    let server_config = match &config_path {
        Some(path) => ServerConfig::from_file(path)?,
        None => ServerConfig::default(),
    }
    .with_env_overrides()?;
    info!("Path date parameters: {}", server_config.date_params);

    let state = AppState::new(repository).with_date_params(server_config.date_params);
    let app = create_router(state);

    let addr = server_config.bind_addr()?;
    info!("Server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
