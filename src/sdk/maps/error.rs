use super::polyline::PolylineError;
use super::status::OutcomeStatus;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MapsError {
    #[error("Underlying request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to parse JSON response: {0}")]
    Parse(#[from] serde_json::Error),

    // The provider answered, but with an error or an empty result set.
    // `status` is already normalized, never the provider's own vocabulary.
    #[error("{message}")]
    Provider {
        status: OutcomeStatus,
        message: String,
    },

    #[error("Failed to decode polyline: {0}")]
    Decode(#[from] PolylineError),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("{0}")]
    MissingParams(String),

    #[error("{0}")]
    InvalidData(String),
}

impl MapsError {
    pub fn provider(status: OutcomeStatus, message: impl Into<String>) -> Self {
        Self::Provider {
            status,
            message: message.into(),
        }
    }

    /// The outcome status a caller should branch on for this error.
    pub fn status(&self) -> OutcomeStatus {
        match self {
            Self::Transport(_) | Self::Parse(_) | Self::Decode(_) => OutcomeStatus::Failed,
            Self::Provider { status, .. } => *status,
            Self::MissingParams(_) => OutcomeStatus::MissingParams,
            Self::InvalidData(_) => OutcomeStatus::InvalidData,
            Self::Configuration(_) => OutcomeStatus::Unknown,
        }
    }
}
