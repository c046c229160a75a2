use super::entity::{Coordinate, Place, Route, RouteSummary};
use super::status::Outcome;
use async_trait::async_trait;

#[async_trait]
pub trait MapsProvider: Send + Sync {
    /// Display name of the backend, for diagnostics only.
    fn name(&self) -> &'static str;

    /// Resolves a free-form address to its best matching place.
    async fn geocode(&self, address: &str) -> Outcome<Place>;

    /// Finds the place closest to a coordinate.
    async fn reverse_geocode(&self, location: Coordinate) -> Outcome<Place>;

    /// Text search biased towards `location`. Returns every match.
    async fn search_nearby(&self, query: &str, location: Coordinate) -> Outcome<Vec<Place>>;

    /// Travel duration and distance between two points.
    async fn distance(&self, origin: Coordinate, destination: Coordinate)
        -> Outcome<RouteSummary>;

    /// Like `distance`, plus the decoded path.
    async fn route(&self, origin: Coordinate, destination: Coordinate) -> Outcome<Route>;
}
