//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to one route and delegates to
//! [`crate::services::climate`].

use axum::{extract::State, http::Uri, response::Html, Json};
use percent_encoding::percent_decode_str;

use super::dto::{FlatSeries, HealthResponse, RangeSummary, StartSummary, StationList};
use super::error::AppError;
use super::state::AppState;
use crate::routes::landing;
use crate::services::climate;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// The last `N` segments of the request path, percent-decoded with invalid
/// UTF-8 replaced by U+FFFD.
///
/// The date routes answer for any segment, so they read the raw URI instead
/// of going through `Path`, which rejects undecodable segments.
fn trailing_segments<const N: usize>(uri: &Uri) -> [String; N] {
    let mut raw = uri.path().rsplit('/');
    let mut segments: [String; N] = std::array::from_fn(|_| String::new());
    for slot in segments.iter_mut().rev() {
        if let Some(segment) = raw.next() {
            *slot = percent_decode_str(segment).decode_utf8_lossy().into_owned();
        }
    }
    segments
}

// =============================================================================
// Landing & Health
// =============================================================================

/// GET /
///
/// List all available api routes.
pub async fn welcome() -> Html<String> {
    Html(landing::welcome_text())
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match climate::health_check(state.repository.as_ref()).await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1.0".to_string(),
        database: db_status,
    }))
}

// =============================================================================
// Climate queries
// =============================================================================

/// GET /api/v1.0/precipitation
pub async fn precipitation(State(state): State<AppState>) -> HandlerResult<FlatSeries> {
    let series = climate::precipitation(state.repository.as_ref()).await?;
    Ok(Json(series))
}

/// GET /api/v1.0/stations
pub async fn stations(State(state): State<AppState>) -> HandlerResult<StationList> {
    let ids = climate::stations(state.repository.as_ref()).await?;
    Ok(Json(ids))
}

/// GET /api/v1.0/tobs
///
/// Dates and temperature observations of the most active station for the previous year.
pub async fn tobs(State(state): State<AppState>) -> HandlerResult<FlatSeries> {
    let series = climate::temperature_observations(state.repository.as_ref()).await?;
    Ok(Json(series))
}

/// GET /api/v1.0/{start}
pub async fn temperature_from(
    State(state): State<AppState>,
    uri: Uri,
) -> HandlerResult<StartSummary> {
    let [start] = trailing_segments(&uri);
    let summary =
        climate::temperature_from(state.repository.as_ref(), state.date_params, &start).await?;
    Ok(Json(summary))
}

/// GET /api/v1.0/{start}/{end}
pub async fn temperature_between(
    State(state): State<AppState>,
    uri: Uri,
) -> HandlerResult<RangeSummary> {
    let [start, end] = trailing_segments(&uri);
    let summary = climate::temperature_between(
        state.repository.as_ref(),
        state.date_params,
        &start,
        &end,
    )
    .await?;
    Ok(Json(summary))
}
