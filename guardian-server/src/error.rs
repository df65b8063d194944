//! Gateway failures and their problem-details rendering

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use guardian_core::ProviderError;
use thiserror::Error;

use crate::problem::Problem;

pub const MISSING_KEY_DETAIL: &str = "The weather API key is missing from the configuration.";
pub const REMOTE_CALL_TITLE: &str = "Weather API call failed";
pub const UPSTREAM_TITLE: &str = "External weather provider error";

#[derive(Debug, Error)]
pub enum GatewayError {
    /// The key was present at startup but is blank now.
    #[error("weather API key missing at request time")]
    MissingApiKey,

    #[error("transport failure: {0}")]
    Transport(String),

    #[error("upstream body unreadable: {0}")]
    Body(String),

    /// Upstream answered outside 2xx.
    #[error("upstream returned {status}")]
    Upstream { status: u16, reason: Option<String> },
}

impl From<ProviderError> for GatewayError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Transport(msg) => Self::Transport(msg),
            ProviderError::Body(msg) => Self::Body(msg),
        }
    }
}

impl GatewayError {
    pub fn to_problem(&self) -> Problem {
        match self {
            Self::MissingApiKey => Problem::internal(MISSING_KEY_DETAIL),
            Self::Transport(msg) => Problem::new(StatusCode::SERVICE_UNAVAILABLE, REMOTE_CALL_TITLE, msg.clone()),
            Self::Body(msg) => Problem::new(StatusCode::BAD_GATEWAY, REMOTE_CALL_TITLE, msg.clone()),
            Self::Upstream { status, reason } => {
                let detail = match reason {
                    Some(reason) => format!("{status} {reason}"),
                    None => status.to_string(),
                };
                // Codes outside 100..=999 cannot be sent back as-is.
                let code = StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY);
                Problem::new(code, UPSTREAM_TITLE, detail)
            }
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        self.to_problem().into_response()
    }
}
