/// Shared application state
use crate::config::ApiSettings;
use grunge_core::types::{PageRequest, Pagination};
use grunge_storage::Database;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub api: Arc<ApiSettings>,
}

impl AppState {
    pub fn new(db: Arc<Database>, api: ApiSettings) -> Self {
        Self {
            db,
            api: Arc::new(api),
        }
    }

    /// Apply the configured page sizes to a client's request
    pub fn pagination(&self, request: PageRequest) -> Pagination {
        request.resolve(self.api.default_page_size, self.api.max_page_size)
    }
}
