use super::error::MapsError;
use serde::Serialize;
use std::fmt;

pub const OK_MESSAGE: &str = "request sent successfully";
pub const EMPTY_FIELD_MESSAGE: &str = "you cannot send empty values";
pub const DENIED_MESSAGE: &str = "access denied";
pub const UNAVAILABLE_MESSAGE: &str = "provider unavailable";

/// Result of any gateway operation: `Ok` is always `OutcomeStatus::Ok`,
/// an error carries every other status through `MapsError::status`.
pub type Outcome<T> = Result<T, MapsError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OutcomeStatus {
    Ok,
    ZeroResults,
    Failed,
    InvalidData,
    MissingParams,
    Denied,
    Unknown,
}

impl OutcomeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::ZeroResults => "ZERO_RESULTS",
            Self::Failed => "FAILED",
            Self::InvalidData => "INVALID_DATA",
            Self::MissingParams => "MISSING_PARAMS",
            Self::Denied => "DENIED",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for OutcomeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn status_of<T>(outcome: &Outcome<T>) -> OutcomeStatus {
    match outcome {
        Ok(_) => OutcomeStatus::Ok,
        Err(e) => e.status(),
    }
}

/// What a provider told us once its body parsed: how many usable records
/// came back, its own error text if any, whether it refused access and
/// whether the HTTP exchange itself failed.
///
/// Transport and parse failures never get this far; they are `FAILED`
/// through `MapsError::status`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProviderSignal<'a> {
    pub results: usize,
    pub description: Option<&'a str>,
    pub denied: bool,
    /// Non-2xx HTTP status that was not a denial.
    pub http_error: Option<u16>,
}

impl<'a> ProviderSignal<'a> {
    pub fn new(results: usize) -> Self {
        Self {
            results,
            ..Self::default()
        }
    }

    /// Blank descriptions count as absent; any other is kept as given.
    pub fn with_description(mut self, description: Option<&'a str>) -> Self {
        self.description = description.filter(|d| !d.trim().is_empty());
        self
    }

    pub fn with_denied(mut self, denied: bool) -> Self {
        self.denied = denied;
        self
    }

    pub fn with_http_status(mut self, code: u16) -> Self {
        self.http_error = (!(200..300).contains(&code)).then_some(code);
        self
    }

    /// `subject` is the caller's input, used when the provider gave no reason.
    pub fn normalize(&self, subject: impl fmt::Display) -> Result<(), MapsError> {
        if self.results > 0 {
            return Ok(());
        }
        if self.denied {
            let message = self.description.unwrap_or(DENIED_MESSAGE);
            return Err(MapsError::provider(OutcomeStatus::Denied, message));
        }
        // A broken service is not an empty answer.
        if let Some(code) = self.http_error {
            let message = self
                .description
                .map(str::to_string)
                .unwrap_or_else(|| format!("{} (HTTP {})", UNAVAILABLE_MESSAGE, code));
            return Err(MapsError::provider(OutcomeStatus::Failed, message));
        }
        match self.description {
            Some(description) => Err(MapsError::provider(
                OutcomeStatus::ZeroResults,
                description,
            )),
            None => Err(MapsError::provider(
                OutcomeStatus::ZeroResults,
                format!("No results for {}", subject),
            )),
        }
    }
}
