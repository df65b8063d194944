//! `GET /api/weather/{city}`

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use guardian_core::{WeatherRequest, WeatherResponse};
use tracing::{debug, error, instrument, warn};

use crate::{error::GatewayError, state::AppState};

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Forward `city` to the weather provider with the server-held key and relay
/// the answer. Successful bodies are passed through byte for byte.
#[instrument(skip(state))]
pub async fn get_weather(
    State(state): State<AppState>,
    Path(city): Path<String>,
) -> Result<Response, GatewayError> {
    // Read per request so a reload that drops the key is noticed.
    let config = state.config.load();
    let Some(api_key) = config.weather_api.api_key() else {
        error!("Weather API key is missing from the configuration");
        return Err(GatewayError::MissingApiKey);
    };

    let request = WeatherRequest::new(&config.weather_api.base_url, city, api_key);

    match state.provider.get_weather(&request).await {
        Ok(WeatherResponse::Success { status, body }) => {
            debug!(status, bytes = body.len(), "Relaying weather provider response");
            Ok(([(header::CONTENT_TYPE, JSON_CONTENT_TYPE)], body).into_response())
        }
        Ok(WeatherResponse::Rejected { status, reason }) => {
            warn!(status, "Weather provider rejected the request");
            Err(GatewayError::Upstream { status, reason })
        }
        Err(e) => {
            warn!("Weather provider call failed: {e}");
            Err(e.into())
        }
    }
}
