use super::http::{build_client, get_json, Fetched};
use crate::sdk::maps::entity::{non_negative, Coordinate, Place, Route, RouteSummary};
use crate::sdk::maps::error::MapsError;
use crate::sdk::maps::polyline;
use crate::sdk::maps::service::MapsProvider;
use crate::sdk::maps::status::{Outcome, OutcomeStatus, ProviderSignal};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api";
const TRAVEL_MODE: &str = "driving";
const DENIED_STATUSES: [&str; 3] = ["REQUEST_DENIED", "OVER_QUERY_LIMIT", "OVER_DAILY_LIMIT"];

// --- Data Structures for parsing Google responses ---
#[derive(Deserialize)]
struct PlacesResponse {
    #[serde(default)]
    results: Vec<PlaceResult>,
    #[serde(default)]
    status: String,
    error_message: Option<String>,
}
#[derive(Deserialize)]
struct PlaceResult {
    name: Option<String>,
    #[serde(default)]
    formatted_address: String,
    geometry: Geometry,
}
#[derive(Deserialize)]
struct Geometry {
    location: Coordinate,
}

#[derive(Deserialize)]
struct MatrixResponse {
    #[serde(default)]
    rows: Vec<MatrixRow>,
    #[serde(default)]
    status: String,
    error_message: Option<String>,
}
#[derive(Deserialize)]
struct MatrixRow {
    #[serde(default)]
    elements: Vec<MatrixElement>,
}
#[derive(Deserialize)]
struct MatrixElement {
    #[serde(default)]
    status: String,
    distance: Option<Measure>,
    duration: Option<Measure>,
}

#[derive(Deserialize)]
struct DirectionsResponse {
    #[serde(default)]
    routes: Vec<DirectionsRoute>,
    #[serde(default)]
    status: String,
    error_message: Option<String>,
}
#[derive(Deserialize)]
struct DirectionsRoute {
    #[serde(default)]
    legs: Vec<Leg>,
    overview_polyline: OverviewPolyline,
}
#[derive(Deserialize)]
struct Leg {
    distance: Measure,
    duration: Measure,
}
#[derive(Deserialize)]
struct OverviewPolyline {
    points: String,
}
#[derive(Deserialize, Clone, Copy)]
#[serde(try_from = "RawMeasure")]
struct Measure {
    value: f64,
}
#[derive(Deserialize)]
struct RawMeasure {
    value: f64,
}

impl TryFrom<RawMeasure> for Measure {
    type Error = MapsError;

    fn try_from(raw: RawMeasure) -> Result<Self, Self::Error> {
        Ok(Self {
            value: non_negative("value", raw.value)?,
        })
    }
}

fn signal<'a>(
    http: StatusCode,
    status: &str,
    error_message: &'a Option<String>,
    results: usize,
) -> ProviderSignal<'a> {
    ProviderSignal::new(results)
        .with_description(error_message.as_deref())
        .with_denied(DENIED_STATUSES.contains(&status))
        .with_http_status(http.as_u16())
}

impl PlaceResult {
    // Geocoding results carry no name, so fall back to the first address line.
    fn into_place(self) -> Place {
        let name = self
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| first_segment(&self.formatted_address));
        Place {
            name,
            address: self.formatted_address,
            location: self.geometry.location,
        }
    }
}

fn first_segment(address: &str) -> String {
    address.split(',').next().unwrap_or_default().trim().to_string()
}

pub struct GoogleMaps {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GoogleMaps {
    pub const NAME: &'static str = "GOOGLE MAPS";

    pub fn new(api_key: String, timeout: Duration) -> Result<Self, MapsError> {
        Ok(Self {
            client: build_client(timeout)?,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        path: &str,
        mut query: Vec<(&str, String)>,
    ) -> Result<Fetched<T>, MapsError> {
        query.push(("key", self.api_key.clone()));
        let url = format!("{}{}", self.base_url, path);
        get_json(&self.client, Self::NAME, &url, &query).await
    }

    async fn first_place(&self, query: Vec<(&str, String)>, subject: &str) -> Outcome<Place> {
        let Fetched { status, body } = self
            .fetch::<PlacesResponse>("/geocode/json", query)
            .await?;
        signal(status, &body.status, &body.error_message, body.results.len())
            .normalize(subject)?;

        body.results
            .into_iter()
            .next()
            .map(PlaceResult::into_place)
            .ok_or_else(|| {
                MapsError::provider(
                    OutcomeStatus::ZeroResults,
                    format!("No results for {}", subject),
                )
            })
    }
}

#[async_trait]
impl MapsProvider for GoogleMaps {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn geocode(&self, address: &str) -> Outcome<Place> {
        log::debug!("[PROVIDER] Calling google geocode for address: \"{}\"", address);
        self.first_place(vec![("address", address.to_string())], address)
            .await
    }

    async fn reverse_geocode(&self, location: Coordinate) -> Outcome<Place> {
        log::debug!("[PROVIDER] Calling google reverse_geocode for {}", location);
        let latlng = location.to_string();
        self.first_place(vec![("latlng", latlng.clone())], &latlng)
            .await
    }

    async fn search_nearby(&self, query: &str, location: Coordinate) -> Outcome<Vec<Place>> {
        log::debug!(
            "[PROVIDER] Calling google search_nearby for \"{}\" near {}",
            query,
            location
        );
        let params = vec![("query", query.to_string()), ("location", location.to_string())];
        let Fetched { status, body } = self
            .fetch::<PlacesResponse>("/place/textsearch/json", params)
            .await?;
        signal(status, &body.status, &body.error_message, body.results.len())
            .normalize(query)?;

        Ok(body.results.into_iter().map(PlaceResult::into_place).collect())
    }

    async fn distance(&self, origin: Coordinate, destination: Coordinate) -> Outcome<RouteSummary> {
        log::debug!(
            "[PROVIDER] Calling google distance for {} -> {}",
            origin,
            destination
        );
        let params = vec![
            ("origins", origin.to_string()),
            ("destinations", destination.to_string()),
            ("mode", TRAVEL_MODE.to_string()),
        ];
        let Fetched { status, body } = self
            .fetch::<MatrixResponse>("/distancematrix/json", params)
            .await?;
        let subject = format!("{} -> {}", origin, destination);
        signal(status, &body.status, &body.error_message, body.rows.len())
            .normalize(&subject)?;

        let element = body
            .rows
            .into_iter()
            .next()
            .and_then(|row| row.elements.into_iter().next());

        // Element status is per pair: NOT_FOUND or ZERO_RESULTS when no road links them.
        match element {
            Some(MatrixElement {
                status,
                distance: Some(distance),
                duration: Some(duration),
            }) if status.is_empty() || status == "OK" => Ok(RouteSummary {
                duration: duration.value,
                distance: distance.value,
            }),
            _ => Err(MapsError::provider(
                OutcomeStatus::ZeroResults,
                "failed to calculate distance",
            )),
        }
    }

    async fn route(&self, origin: Coordinate, destination: Coordinate) -> Outcome<Route> {
        log::debug!(
            "[PROVIDER] Calling google route for {} -> {}",
            origin,
            destination
        );
        let params = vec![
            ("origin", origin.to_string()),
            ("destination", destination.to_string()),
            ("mode", TRAVEL_MODE.to_string()),
        ];
        let Fetched { status, body } = self
            .fetch::<DirectionsResponse>("/directions/json", params)
            .await?;
        let subject = format!("{} -> {}", origin, destination);
        signal(status, &body.status, &body.error_message, body.routes.len())
            .normalize(&subject)?;

        let route = body
            .routes
            .into_iter()
            .next()
            .filter(|route| !route.legs.is_empty())
            .ok_or_else(|| {
                MapsError::provider(
                    OutcomeStatus::Unknown,
                    "Route for origin or destination has no legs",
                )
            })?;

        let summary = route
            .legs
            .iter()
            .map(|leg| RouteSummary {
                duration: leg.duration.value,
                distance: leg.distance.value,
            })
            .sum();

        let polyline = polyline::google::decode(&route.overview_polyline.points).map_err(|e| {
            log::error!(
                "Failed to decode google polyline \"{}\": {}",
                route.overview_polyline.points,
                e
            );
            e
        })?;

        Ok(Route { summary, polyline })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_falls_back_to_first_address_line() {
        let result: PlaceResult = serde_json::from_value(serde_json::json!({
            "formatted_address": "1600 Amphitheatre Pkwy, Mountain View, CA 94043, USA",
            "geometry": { "location": { "lat": 37.4224764, "lng": -122.0842499 } }
        }))
        .unwrap();
        let place = result.into_place();
        assert_eq!(place.name, "1600 Amphitheatre Pkwy");
        assert_eq!(place.location, Coordinate::new(37.4224764, -122.0842499).unwrap());
    }

    #[test]
    fn quota_statuses_are_denials() {
        let message = Some("You have exceeded your daily request quota".to_string());
        let err = signal(StatusCode::OK, "OVER_QUERY_LIMIT", &message, 0)
            .normalize("x")
            .unwrap_err();
        assert_eq!(err.status(), OutcomeStatus::Denied);
        assert_eq!(err.to_string(), "You have exceeded your daily request quota");

        let err = signal(StatusCode::OK, "INVALID_REQUEST", &None, 0)
            .normalize("x")
            .unwrap_err();
        assert_eq!(err.status(), OutcomeStatus::ZeroResults);
    }

    #[test]
    fn negative_measures_fail_to_parse() {
        let leg = serde_json::from_value::<Leg>(serde_json::json!({
            "distance": { "value": -500 },
            "duration": { "value": 60 }
        }));
        assert!(leg.is_err());

        let measure: Measure = serde_json::from_value(serde_json::json!({ "value": 0 })).unwrap();
        assert_eq!(measure.value, 0.0);
    }
}
