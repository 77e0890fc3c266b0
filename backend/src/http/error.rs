//! HTTP error handling.
//!
//! Failures answer with a bare status line body; details go to the log only.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, warn};

use crate::db::repository::RepositoryError;
use crate::services::ClimateError;

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Invalid request (only reachable when path dates are honored)
    BadRequest(String),
    /// Repository error
    Repository(RepositoryError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        match self {
            AppError::BadRequest(msg) => {
                warn!(%msg, "rejected request");
                (status, msg).into_response()
            }
            AppError::Repository(e) => {
                error!(error = %e, "repository error");
                let reason = status.canonical_reason().unwrap_or("Error");
                (status, reason.to_string()).into_response()
            }
        }
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        AppError::Repository(err)
    }
}

impl From<ClimateError> for AppError {
    fn from(err: ClimateError) -> Self {
        match err {
            ClimateError::Repository(e) => AppError::Repository(e),
            other => AppError::BadRequest(other.to_string()),
        }
    }
}
