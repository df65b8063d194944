//! Application state shared across handlers

use std::sync::Arc;

use guardian_core::WeatherProvider;

use crate::config_reload::ReloadableConfig;

/// Cloned into every request; both fields are cheap handles.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: ReloadableConfig,
    pub provider: Arc<dyn WeatherProvider>,
}

impl AppState {
    pub fn new(config: ReloadableConfig, provider: Arc<dyn WeatherProvider>) -> Self {
        Self { config, provider }
    }
}
