//! Core library for the weather API guardian.
//!
//! This crate defines:
//! - Configuration & credential handling
//! - The outbound weather provider capability and its OpenWeatherMap implementation
//! - Shared request/response models
//!
//! It is used by `guardian-server`, which owns the HTTP surface.

pub mod config;
pub mod model;
pub mod provider;

pub use config::{Config, ConfigError, ServerConfig, WeatherApiConfig};
pub use model::{WeatherRequest, WeatherResponse};
pub use provider::{ProviderError, WeatherProvider, openweather::OpenWeatherProvider};
