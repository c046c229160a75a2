use super::error::MapsError;
use serde::{Deserialize, Serialize};
use std::{fmt, iter::Sum, ops::Add, str::FromStr};

/// Latitude and longitude in degrees, always within range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate")]
pub struct Coordinate {
    lat: f64,
    lng: f64,
}

#[derive(Deserialize)]
struct RawCoordinate {
    lat: f64,
    lng: f64,
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = MapsError;

    fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
        Coordinate::new(raw.lat, raw.lng)
    }
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Result<Self, MapsError> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(MapsError::InvalidData(format!(
                "The key value is invalid 'lat': {}",
                lat
            )));
        }
        if !lng.is_finite() || !(-180.0..=180.0).contains(&lng) {
            return Err(MapsError::InvalidData(format!(
                "The key value is invalid 'lng': {}",
                lng
            )));
        }
        Ok(Self { lat, lng })
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }
}

// Six decimals, the "lat,lng" form both providers take as a query value.
impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6},{:.6}", self.lat, self.lng)
    }
}

impl FromStr for Coordinate {
    type Err = MapsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lng) = s.split_once(',').ok_or_else(|| {
            MapsError::InvalidData(format!("Expected \"lat,lng\", got \"{}\"", s))
        })?;
        let lat = lat
            .trim()
            .parse::<f64>()
            .map_err(|_| MapsError::InvalidData("The key value is invalid 'lat'".into()))?;
        let lng = lng
            .trim()
            .parse::<f64>()
            .map_err(|_| MapsError::InvalidData("The key value is invalid 'lng'".into()))?;
        Coordinate::new(lat, lng)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Place {
    pub name: String,
    pub address: String,
    pub location: Coordinate,
}

/// Seconds and meters, as reported by the provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct RouteSummary {
    pub duration: f64,
    pub distance: f64,
}

impl RouteSummary {
    pub fn new(duration: f64, distance: f64) -> Result<Self, MapsError> {
        Ok(Self {
            duration: non_negative("duration", duration)?,
            distance: non_negative("distance", distance)?,
        })
    }
}

/// Provider measures (seconds, meters) must be finite and not below zero.
pub(crate) fn non_negative(key: &str, value: f64) -> Result<f64, MapsError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(MapsError::InvalidData(format!(
            "The key value is invalid '{}': {}",
            key, value
        )))
    }
}

impl Add for RouteSummary {
    type Output = RouteSummary;

    fn add(self, other: RouteSummary) -> RouteSummary {
        RouteSummary {
            duration: self.duration + other.duration,
            distance: self.distance + other.distance,
        }
    }
}

impl Sum for RouteSummary {
    fn sum<I: Iterator<Item = RouteSummary>>(iter: I) -> Self {
        iter.fold(RouteSummary::default(), Add::add)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    pub summary: RouteSummary,
    pub polyline: Vec<Coordinate>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdk::maps::status::OutcomeStatus;

    #[test]
    fn rejects_out_of_range_values() {
        assert!(Coordinate::new(90.0, 180.0).is_ok());
        assert!(Coordinate::new(-90.0, -180.0).is_ok());

        let err = Coordinate::new(90.5, 0.0).unwrap_err();
        assert_eq!(err.status(), OutcomeStatus::InvalidData);
        assert!(Coordinate::new(0.0, -180.1).is_err());
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn parses_and_prints_lat_lng_pairs() {
        let coord: Coordinate = "19.432608, -99.133209".parse().unwrap();
        assert_eq!(coord.lat(), 19.432608);
        assert_eq!(coord.lng(), -99.133209);
        assert_eq!(coord.to_string(), "19.432608,-99.133209");

        assert!("19.4".parse::<Coordinate>().is_err());
        assert!("north,west".parse::<Coordinate>().is_err());
    }

    #[test]
    fn deserialization_enforces_range() {
        let ok: Coordinate = serde_json::from_str(r#"{"lat": 1.5, "lng": 2.5}"#).unwrap();
        assert_eq!(ok, Coordinate::new(1.5, 2.5).unwrap());

        let bad = serde_json::from_str::<Coordinate>(r#"{"lat": 100.0, "lng": 2.5}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn summaries_reject_negative_measures() {
        assert!(RouteSummary::new(0.0, 0.0).is_ok());
        let err = RouteSummary::new(-60.0, 500.0).unwrap_err();
        assert_eq!(err.status(), OutcomeStatus::InvalidData);
        assert_eq!(err.to_string(), "The key value is invalid 'duration': -60");
        assert!(RouteSummary::new(60.0, f64::INFINITY).is_err());
    }

    #[test]
    fn summaries_add_up() {
        let total: RouteSummary = [
            RouteSummary { duration: 60.0, distance: 1000.0 },
            RouteSummary { duration: 30.0, distance: 250.0 },
        ]
        .into_iter()
        .sum();
        assert_eq!(total, RouteSummary { duration: 90.0, distance: 1250.0 });
    }
}
