//! Application state for the HTTP server.

use std::sync::Arc;

use crate::config::SchedulingSettings;
use crate::db::repository::FullRepository;
use crate::services::DivisionLocks;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Repository instance for database operations
    pub repository: Arc<dyn FullRepository>,
    /// Serializes schedule generation per division
    pub locks: DivisionLocks,
    pub scheduling: Arc<SchedulingSettings>,
}

impl AppState {
    /// Create a new application state with default scheduling settings.
    pub fn new(repository: Arc<dyn FullRepository>) -> Self {
        Self::with_settings(repository, SchedulingSettings::default())
    }

    pub fn with_settings(repository: Arc<dyn FullRepository>, scheduling: SchedulingSettings) -> Self {
        Self {
            repository,
            locks: DivisionLocks::new(),
            scheduling: Arc::new(scheduling),
        }
    }
}
