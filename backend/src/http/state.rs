//! Application state for the HTTP server.

use std::sync::Arc;

use crate::db::repository::FullRepository;
use crate::services::DateParamMode;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Repository instance for database operations
    pub repository: Arc<dyn FullRepository>,
    /// Whether `<start>`/`<end>` path segments are used or discarded
    pub date_params: DateParamMode,
}

impl AppState {
    /// Create a new application state with the given repository and legacy date handling.
    pub fn new(repository: Arc<dyn FullRepository>) -> Self {
        Self {
            repository,
            date_params: DateParamMode::default(),
        }
    }

    pub fn with_date_params(mut self, mode: DateParamMode) -> Self {
        self.date_params = mode;
        self
    }
}
