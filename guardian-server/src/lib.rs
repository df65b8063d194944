//! HTTP surface of the weather API guardian.
//!
//! One route, `GET /api/weather/{city}`, forwards the city to OpenWeatherMap
//! with a server-held key and relays the JSON (or a problem response).

use std::{path::PathBuf, sync::Arc};

use guardian_core::{Config, ConfigError, OpenWeatherProvider};

pub mod cli;
pub mod config_reload;
pub mod error;
pub mod gateway;
pub mod problem;
pub mod routes;
pub mod state;

pub use config_reload::{ReloadableConfig, spawn_config_reload_handler};
pub use error::GatewayError;
pub use problem::Problem;
pub use state::AppState;

/// Startup gate plus wiring: refuses a config without a usable API key,
/// otherwise builds the shared provider and state.
pub fn build_state(config: Config, source: Option<PathBuf>) -> Result<AppState, ConfigError> {
    config.require_api_key()?;

    let provider = Arc::new(OpenWeatherProvider::new());
    Ok(AppState::new(ReloadableConfig::new(config, source), provider))
}
