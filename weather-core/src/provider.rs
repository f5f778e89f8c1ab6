use async_trait::async_trait;
use std::fmt::Debug;
use thiserror::Error;

use crate::{ForecastRequest, WeatherSnapshot};

pub mod weatherapi;

/// Why a fetch produced no snapshot.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The provider understood the request but has no data for it (e.g. unknown city).
    #[error("provider error {code}: {message}")]
    Domain { code: i64, message: String },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// The two failure classes the dashboard distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Domain,
    Transport,
}

impl ProviderError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ProviderError::Domain { .. } => FailureKind::Domain,
            ProviderError::Transport(_)
            | ProviderError::Status { .. }
            | ProviderError::Decode(_) => FailureKind::Transport,
        }
    }
}

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn forecast(&self, request: &ForecastRequest) -> Result<WeatherSnapshot, ProviderError>;
}
