use super::entity::{Coordinate, Place, Route, RouteSummary};
use super::error::MapsError;
use super::provider::{GoogleMaps, HereEndpoints, HereMaps, ProviderKind};
use super::service::MapsProvider;
use super::status::{status_of, Outcome, EMPTY_FIELD_MESSAGE};
use crate::sdk::config::MapsConfig;
use std::sync::Arc;

/// Entry point for callers: one provider, chosen when the gateway is built.
#[derive(Clone)]
pub struct MapsGateway {
    provider: Arc<dyn MapsProvider>,
}

impl MapsGateway {
    /// Builds the adapter named by `config.provider`.
    ///
    /// An unknown selector fails here, before any gateway exists.
    pub fn new(config: &MapsConfig) -> Result<Self, MapsError> {
        let kind: ProviderKind = config.provider.parse()?;
        let provider: Arc<dyn MapsProvider> = match kind {
            ProviderKind::GoogleMaps => {
                let mut google = GoogleMaps::new(config.api_key.clone(), config.timeout)?;
                if let Some(base_url) = &config.base_url {
                    google = google.with_base_url(base_url.as_str());
                }
                Arc::new(google)
            }
            ProviderKind::HereMaps => {
                let mut here = HereMaps::new(config.api_key.clone(), config.timeout)?;
                if let Some(base_url) = &config.base_url {
                    here = here.with_endpoints(HereEndpoints::with_base_url(base_url));
                }
                Arc::new(here)
            }
        };
        log::info!("Maps gateway using {} ({})", provider.name(), kind);
        Ok(Self { provider })
    }

    pub fn with_provider(provider: Arc<dyn MapsProvider>) -> Self {
        Self { provider }
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    pub async fn geocode(&self, address: &str) -> Outcome<Place> {
        let address = required(address)?;
        let outcome = self.provider.geocode(address).await;
        self.report("geocode", &outcome);
        outcome
    }

    pub async fn reverse_geocode(&self, location: Coordinate) -> Outcome<Place> {
        let outcome = self.provider.reverse_geocode(location).await;
        self.report("reverse_geocode", &outcome);
        outcome
    }

    pub async fn search_nearby(&self, query: &str, location: Coordinate) -> Outcome<Vec<Place>> {
        let query = required(query)?;
        let outcome = self.provider.search_nearby(query, location).await;
        self.report("search_nearby", &outcome);
        outcome
    }

    pub async fn distance(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Outcome<RouteSummary> {
        let outcome = self.provider.distance(origin, destination).await;
        self.report("distance", &outcome);
        outcome
    }

    pub async fn route(&self, origin: Coordinate, destination: Coordinate) -> Outcome<Route> {
        let outcome = self.provider.route(origin, destination).await;
        self.report("route", &outcome);
        outcome
    }

    fn report<T>(&self, operation: &str, outcome: &Outcome<T>) {
        match outcome {
            Ok(_) => log::debug!("[{}] {} -> OK", self.provider.name(), operation),
            Err(e) => log::warn!(
                "[{}] {} -> {}: {}",
                self.provider.name(),
                operation,
                status_of(outcome),
                e
            ),
        }
    }
}

fn required(value: &str) -> Result<&str, MapsError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(MapsError::MissingParams(EMPTY_FIELD_MESSAGE.to_string()));
    }
    Ok(trimmed)
}
