use async_trait::async_trait;
use hyper::ext::ReasonPhrase;
use reqwest::{Client, Response, StatusCode};
use tracing::{debug, instrument};

use crate::{
    model::{WeatherRequest, WeatherResponse},
    provider::ProviderError,
};

use super::WeatherProvider;

const UNITS: &str = "metric";
const LANG: &str = "fr";

/// OpenWeatherMap "current weather" caller.
///
/// Holds a single `reqwest::Client`; cloning the provider shares its pool.
/// The endpoint is taken from each request so a config reload redirects calls.
#[derive(Debug, Clone, Default)]
pub struct OpenWeatherProvider {
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new() -> Self {
        Self::with_client(Client::new())
    }

    pub fn with_client(http: Client) -> Self {
        Self { http }
    }

    /// `{base}/weather?q=..&appid=..&units=metric&lang=fr`, with `q` and `appid`
    /// percent-encoded as opaque query values.
    pub fn weather_url(request: &WeatherRequest) -> String {
        format!(
            "{}/weather?q={}&appid={}&units={UNITS}&lang={LANG}",
            request.base_url.trim_end_matches('/'),
            urlencoding::encode(&request.city),
            urlencoding::encode(&request.api_key),
        )
    }
}

/// The phrase the upstream actually sent. hyper only records it when it
/// differs from the canonical one for the code.
fn reason_phrase(res: &Response, status: StatusCode) -> Option<String> {
    res.extensions()
        .get::<ReasonPhrase>()
        .and_then(|phrase| std::str::from_utf8(phrase.as_bytes()).ok())
        .map(str::to_string)
        .or_else(|| status.canonical_reason().map(str::to_string))
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    #[instrument(skip_all, fields(city = %request.city))]
    async fn get_weather(&self, request: &WeatherRequest) -> Result<WeatherResponse, ProviderError> {
        let url = Self::weather_url(request);

        // The URL carries the key, so it is stripped before any message leaves here.
        let res = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(ProviderError::describe(e.without_url())))?;

        let status = res.status();
        debug!(status = status.as_u16(), "OpenWeather responded");

        if !status.is_success() {
            return Ok(WeatherResponse::Rejected {
                status: status.as_u16(),
                reason: reason_phrase(&res, status),
            });
        }

        let body = res
            .text()
            .await
            .map_err(|e| ProviderError::Body(ProviderError::describe(e.without_url())))?;

        Ok(WeatherResponse::Success { status: status.as_u16(), body })
    }
}
