use std::sync::Arc;

use crate::{config::Config, services::Recommender};

/// Shared application state
///
/// Immutable after startup; concurrent requests each run their own pipeline.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub recommender: Arc<Recommender>,
}

impl AppState {
    pub fn new(config: Config, recommender: Recommender) -> Self {
        Self {
            config: Arc::new(config),
            recommender: Arc::new(recommender),
        }
    }

    /// State wired to the real catalog and language services
    pub fn from_config(config: Config) -> Self {
        let recommender = Recommender::from_config(&config);
        Self::new(config, recommender)
    }
}
