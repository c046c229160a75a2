pub mod google;
pub mod here;
mod http;

pub use google::GoogleMaps;
pub use here::{HereEndpoints, HereMaps};

use super::error::MapsError;
use std::{fmt, str::FromStr};

/// The backends a gateway can be configured with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    GoogleMaps,
    HereMaps,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GoogleMaps => "google_maps",
            Self::HereMaps => "here_maps",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = MapsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "google_maps" => Ok(Self::GoogleMaps),
            "here_maps" => Ok(Self::HereMaps),
            other => Err(MapsError::Configuration(format!(
                "invalid provider \"{}\", expected google_maps or here_maps",
                other
            ))),
        }
    }
}
