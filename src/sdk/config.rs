use crate::sdk::maps::error::MapsError;
use std::{env, fmt, time::Duration};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Clone)]
pub struct MapsConfig {
    /// Provider selector, checked when the gateway is built.
    pub provider: String,
    pub api_key: String,
    /// Replaces every provider host, e.g. to point at a proxy or a stub.
    pub base_url: Option<String>,
    pub timeout: Duration,
}

impl MapsConfig {
    pub fn new(provider: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            api_key: api_key.into(),
            base_url: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn from_env() -> Result<Self, MapsError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads `MAPS_PROVIDER`, `MAPS_API_KEY`, `MAPS_BASE_URL` and
    /// `MAPS_TIMEOUT_SECS` through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, MapsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| MapsError::Configuration(format!("{} is not set", key)))
        };

        let mut config = Self::new(required("MAPS_PROVIDER")?, required("MAPS_API_KEY")?);

        if let Some(base_url) = lookup("MAPS_BASE_URL").filter(|v| !v.trim().is_empty()) {
            config = config.with_base_url(base_url);
        }
        if let Some(secs) = lookup("MAPS_TIMEOUT_SECS") {
            let secs = secs.trim().parse::<u64>().map_err(|_| {
                MapsError::Configuration(format!("MAPS_TIMEOUT_SECS is not a number: {}", secs))
            })?;
            if secs == 0 {
                return Err(MapsError::Configuration(
                    "MAPS_TIMEOUT_SECS must be at least 1".to_string(),
                ));
            }
            config = config.with_timeout(Duration::from_secs(secs));
        }

        Ok(config)
    }
}

// Hand-written so the credential never ends up in a log line.
impl fmt::Debug for MapsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapsConfig")
            .field("provider", &self.provider)
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}
