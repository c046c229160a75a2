//! Round-trip properties of both polyline codecs over generated paths.

use maps_gateway::sdk::maps::polyline::{flexible, google};
use maps_gateway::Coordinate;
use proptest::prelude::*;

/// Paths already on the `scale` grid, so a round trip must be exact.
fn grid_path(scale: f64) -> impl Strategy<Value = Vec<Coordinate>> {
    let lat_max = (90.0 * scale) as i64;
    let lng_max = (180.0 * scale) as i64;
    prop::collection::vec((-lat_max..=lat_max, -lng_max..=lng_max), 0..48).prop_map(
        move |ticks| {
            ticks
                .into_iter()
                .map(|(lat, lng)| Coordinate::new(lat as f64 / scale, lng as f64 / scale).unwrap())
                .collect()
        },
    )
}

fn any_path() -> impl Strategy<Value = Vec<Coordinate>> {
    prop::collection::vec((-90.0f64..=90.0, -180.0f64..=180.0), 0..48).prop_map(|pairs| {
        pairs
            .into_iter()
            .map(|(lat, lng)| Coordinate::new(lat, lng).unwrap())
            .collect()
    })
}

fn precision_and_path() -> impl Strategy<Value = (u32, Vec<Coordinate>)> {
    (0u32..=10).prop_flat_map(|precision| {
        (Just(precision), grid_path(10f64.powi(precision as i32)))
    })
}

proptest! {
    #[test]
    fn google_round_trips_grid_paths(path in grid_path(1e5)) {
        let decoded = google::decode(&google::encode(&path)).unwrap();
        prop_assert_eq!(decoded, path);
    }

    #[test]
    fn google_round_trip_stays_within_half_a_unit(path in any_path()) {
        let decoded = google::decode(&google::encode(&path)).unwrap();
        prop_assert_eq!(decoded.len(), path.len());
        for (d, p) in decoded.iter().zip(&path) {
            prop_assert!((d.lat() - p.lat()).abs() <= 0.5e-5 + 1e-9, "{:?} vs {:?}", d, p);
            prop_assert!((d.lng() - p.lng()).abs() <= 0.5e-5 + 1e-9, "{:?} vs {:?}", d, p);
        }
    }

    #[test]
    fn flexible_round_trips_at_every_precision((precision, path) in precision_and_path()) {
        let encoded = flexible::encode(&path, precision).unwrap();
        let decoded = flexible::decode_full(&encoded).unwrap();
        prop_assert_eq!(decoded.header.precision, precision);
        prop_assert_eq!(decoded.coordinates, path);
        prop_assert!(decoded.third.is_empty());
    }
}
