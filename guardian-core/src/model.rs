/// One outbound lookup: where to send it, the city exactly as the caller sent
/// it, and the key to inject. All three come from the per-request config snapshot.
#[derive(Debug, Clone)]
pub struct WeatherRequest {
    pub base_url: String,
    pub city: String,
    pub api_key: String,
}

impl WeatherRequest {
    pub fn new(base_url: impl Into<String>, city: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), city: city.into(), api_key: api_key.into() }
    }
}

/// What came back from the provider once the transport succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WeatherResponse {
    /// 2xx: the raw body, never parsed.
    Success { status: u16, body: String },

    /// Anything outside 2xx. The body is not read.
    Rejected { status: u16, reason: Option<String> },
}
