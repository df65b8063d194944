use crate::{WeatherRequest, WeatherResponse};
use async_trait::async_trait;
use std::fmt::Debug;
use thiserror::Error;

pub mod openweather;

#[derive(Debug, Error)]
pub enum ProviderError {
    /// The request never produced a response (DNS, connect, TLS, timeout...).
    #[error("{0}")]
    Transport(String),

    /// A 2xx response arrived but its body could not be read.
    #[error("{0}")]
    Body(String),
}

impl ProviderError {
    /// Flatten an error and its sources into one `a: b: c` line.
    pub(crate) fn describe<E>(err: E) -> String
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        format!("{:#}", anyhow::Error::new(err))
    }
}

/// Outbound caller for the upstream weather endpoint.
///
/// Implementations are shared across concurrent requests, so they must reuse
/// their connection pool rather than build a client per call.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn get_weather(&self, request: &WeatherRequest) -> Result<WeatherResponse, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Error)]
    #[error("outer")]
    struct Outer(#[source] Inner);

    #[derive(Debug, Error)]
    #[error("inner cause")]
    struct Inner;

    #[test]
    fn describe_includes_source_chain() {
        let msg = ProviderError::describe(Outer(Inner));
        assert_eq!(msg, "outer: inner cause");
    }

    #[test]
    fn provider_error_displays_message_only() {
        let err = ProviderError::Transport("connection refused".into());
        assert_eq!(err.to_string(), "connection refused");
    }
}
