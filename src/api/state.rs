use std::sync::Arc;

use crate::config::AppConfig;
use crate::models::StatDirections;
use crate::storage::StorageConfig;

#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<StorageConfig>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            storage: Arc::new(config.storage()),
            config: Arc::new(config),
        }
    }

    pub fn directions(&self) -> StatDirections {
        self.config.ranking.directions()
    }
}
