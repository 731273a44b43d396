//! Application state

use common::Config;
use processor::{MetricsScheduler, PipelineConfig};

/// Shared application state
pub struct AppState {
    pub scheduler: MetricsScheduler,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            scheduler: MetricsScheduler::new(PipelineConfig::from(config)),
        }
    }
}
