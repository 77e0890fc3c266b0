//! Router configuration for the HTTP API.

use axum::{routing::get, Router};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
///
/// The static `/api/v1.0/*` routes win over the `{start}` capture.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        .route("/precipitation", get(handlers::precipitation))
        .route("/stations", get(handlers::stations))
        .route("/tobs", get(handlers::tobs))
        .route("/{start}", get(handlers::temperature_from))
        .route("/{start}/{end}", get(handlers::temperature_between));

    Router::new()
        .route("/", get(handlers::welcome))
        .route("/health", get(handlers::health_check))
        .nest("/api/v1.0", api_v1)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
