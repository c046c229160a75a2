use super::http::{build_client, get_json, Fetched};
use crate::sdk::maps::entity::{Coordinate, Place, Route, RouteSummary};
use crate::sdk::maps::error::MapsError;
use crate::sdk::maps::polyline;
use crate::sdk::maps::service::MapsProvider;
use crate::sdk::maps::status::{Outcome, OutcomeStatus, ProviderSignal};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

const TRANSPORT_MODE: &str = "bicycle";
const LANG: &str = "en-US";

/// HERE splits its APIs across hosts, so each operation has its own URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HereEndpoints {
    pub geocode: String,
    pub reverse: String,
    pub search: String,
    pub routes: String,
}

impl Default for HereEndpoints {
    fn default() -> Self {
        Self {
            geocode: "https://geocode.search.hereapi.com/v1/geocode".to_string(),
            reverse: "https://revgeocode.search.hereapi.com/v1/revgeocode".to_string(),
            search: "https://autosuggest.search.hereapi.com/v1/autosuggest".to_string(),
            routes: "https://router.hereapi.com/v8/routes".to_string(),
        }
    }
}

impl HereEndpoints {
    /// Every API under one host, keeping the public paths.
    pub fn with_base_url(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            geocode: format!("{}/v1/geocode", base),
            reverse: format!("{}/v1/revgeocode", base),
            search: format!("{}/v1/autosuggest", base),
            routes: format!("{}/v8/routes", base),
        }
    }
}

// --- Data Structures for parsing HERE responses ---
#[derive(Deserialize, Default)]
struct ErrorFields {
    error_description: Option<String>,
    title: Option<String>,
}

impl ErrorFields {
    fn description(&self) -> Option<&str> {
        self.error_description
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .or(self.title.as_deref())
    }
}

#[derive(Deserialize)]
struct ItemsResponse {
    #[serde(default)]
    items: Vec<Item>,
    #[serde(flatten)]
    error: ErrorFields,
}
#[derive(Deserialize)]
struct Item {
    #[serde(default)]
    title: String,
    address: Option<AddressLabel>,
    position: Option<Coordinate>,
}
#[derive(Deserialize)]
struct AddressLabel {
    #[serde(default)]
    label: String,
}

#[derive(Deserialize)]
struct RoutesResponse {
    #[serde(default)]
    routes: Vec<HereRoute>,
    #[serde(default)]
    notices: Vec<Notice>,
    #[serde(flatten)]
    error: ErrorFields,
}
#[derive(Deserialize)]
struct Notice {
    title: Option<String>,
}
#[derive(Deserialize)]
struct HereRoute {
    #[serde(default)]
    sections: Vec<Section>,
}
#[derive(Deserialize)]
struct Section {
    summary: SectionSummary,
    polyline: Option<String>,
}
#[derive(Deserialize, Clone, Copy)]
#[serde(try_from = "RawSectionSummary")]
struct SectionSummary(RouteSummary);
#[derive(Deserialize)]
struct RawSectionSummary {
    duration: f64,
    length: f64,
}

impl TryFrom<RawSectionSummary> for SectionSummary {
    type Error = MapsError;

    fn try_from(raw: RawSectionSummary) -> Result<Self, Self::Error> {
        RouteSummary::new(raw.duration, raw.length).map(Self)
    }
}

impl Item {
    // Autosuggest mixes places with query suggestions, which have no position.
    fn into_place(self) -> Option<Place> {
        let location = self.position?;
        Some(Place {
            name: self.title,
            address: self.address.map(|a| a.label).unwrap_or_default(),
            location,
        })
    }
}

impl RoutesResponse {
    fn description(&self) -> Option<&str> {
        self.error.description().or_else(|| {
            self.notices
                .iter()
                .find_map(|notice| notice.title.as_deref())
        })
    }
}

fn is_denied(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS
    )
}

pub struct HereMaps {
    client: Client,
    api_key: String,
    endpoints: HereEndpoints,
}

impl HereMaps {
    pub const NAME: &'static str = "HERE MAPS";

    pub fn new(api_key: String, timeout: Duration) -> Result<Self, MapsError> {
        Ok(Self {
            client: build_client(timeout)?,
            api_key,
            endpoints: HereEndpoints::default(),
        })
    }

    pub fn with_endpoints(mut self, endpoints: HereEndpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    async fn places(
        &self,
        url: &str,
        mut query: Vec<(&str, String)>,
        subject: &str,
    ) -> Outcome<Vec<Place>> {
        query.push(("apiKey", self.api_key.clone()));
        let Fetched { status, body } =
            get_json::<ItemsResponse>(&self.client, Self::NAME, url, &query).await?;

        let places: Vec<Place> = body.items.into_iter().filter_map(Item::into_place).collect();
        ProviderSignal::new(places.len())
            .with_description(body.error.description())
            .with_denied(is_denied(status))
            .with_http_status(status.as_u16())
            .normalize(subject)?;
        Ok(places)
    }

    async fn first_place(
        &self,
        url: &str,
        query: Vec<(&str, String)>,
        subject: &str,
    ) -> Outcome<Place> {
        let places = self.places(url, query, subject).await?;
        places.into_iter().next().ok_or_else(|| {
            MapsError::provider(
                OutcomeStatus::ZeroResults,
                format!("No results for {}", subject),
            )
        })
    }

    /// The first route's sections. `return` selects what HERE includes.
    async fn sections(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        returns: &str,
    ) -> Outcome<Vec<Section>> {
        let query = vec![
            ("origin", origin.to_string()),
            ("destination", destination.to_string()),
            ("transportMode", TRANSPORT_MODE.to_string()),
            ("return", returns.to_string()),
            ("apiKey", self.api_key.clone()),
        ];
        let Fetched { status, body } =
            get_json::<RoutesResponse>(&self.client, Self::NAME, &self.endpoints.routes, &query)
                .await?;

        let subject = format!("{} -> {}", origin, destination);
        ProviderSignal::new(body.routes.len())
            .with_description(body.description())
            .with_denied(is_denied(status))
            .with_http_status(status.as_u16())
            .normalize(&subject)?;

        body.routes
            .into_iter()
            .next()
            .map(|route| route.sections)
            .filter(|sections| !sections.is_empty())
            .ok_or_else(|| {
                MapsError::provider(
                    OutcomeStatus::Unknown,
                    "Route for origin or destination has no sections",
                )
            })
    }
}

#[async_trait]
impl MapsProvider for HereMaps {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn geocode(&self, address: &str) -> Outcome<Place> {
        log::debug!("[PROVIDER] Calling here geocode for address: \"{}\"", address);
        let query = vec![("q", address.to_string())];
        self.first_place(&self.endpoints.geocode, query, address)
            .await
    }

    async fn reverse_geocode(&self, location: Coordinate) -> Outcome<Place> {
        log::debug!("[PROVIDER] Calling here reverse_geocode for {}", location);
        let at = location.to_string();
        let query = vec![("at", at.clone()), ("lang", LANG.to_string())];
        self.first_place(&self.endpoints.reverse, query, &at).await
    }

    async fn search_nearby(&self, query: &str, location: Coordinate) -> Outcome<Vec<Place>> {
        log::debug!(
            "[PROVIDER] Calling here search_nearby for \"{}\" near {}",
            query,
            location
        );
        let params = vec![
            ("at", location.to_string()),
            ("q", query.to_string()),
            ("lang", LANG.to_string()),
        ];
        self.places(&self.endpoints.search, params, query).await
    }

    async fn distance(&self, origin: Coordinate, destination: Coordinate) -> Outcome<RouteSummary> {
        log::debug!(
            "[PROVIDER] Calling here distance for {} -> {}",
            origin,
            destination
        );
        let sections = self.sections(origin, destination, "summary").await?;
        Ok(sections.iter().map(|s| s.summary.0).sum())
    }

    async fn route(&self, origin: Coordinate, destination: Coordinate) -> Outcome<Route> {
        log::debug!(
            "[PROVIDER] Calling here route for {} -> {}",
            origin,
            destination
        );
        let sections = self
            .sections(origin, destination, "polyline,summary")
            .await?;

        let mut summary = RouteSummary::default();
        let mut path = Vec::new();
        for section in sections {
            summary = summary + section.summary.0;

            let encoded = section.polyline.ok_or_else(|| {
                MapsError::provider(OutcomeStatus::Unknown, "Route section has no polyline")
            })?;
            let points = polyline::flexible::decode(&encoded).map_err(|e| {
                log::error!("Failed to decode here polyline \"{}\": {}", encoded, e);
                e
            })?;
            path.extend(points);
        }

        Ok(Route {
            summary,
            polyline: path,
        })
    }
}
