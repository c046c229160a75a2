//! Google encoded polyline: fixed 1e5 precision, characters offset by 63.

use super::{accumulate, to_unsigned, write_value, PolylineError, Values};
use crate::sdk::maps::entity::Coordinate;

const PRECISION: f64 = 1e5;
const OFFSET: u8 = 63;

fn digit(byte: u8) -> Option<u64> {
    match byte {
        b'?'..=b'~' => Some(u64::from(byte - OFFSET)),
        _ => None,
    }
}

fn char_for(group: u64) -> char {
    (group as u8 + OFFSET) as char
}

pub fn decode(encoded: &str) -> Result<Vec<Coordinate>, PolylineError> {
    let mut values = Values::new(encoded, digit);
    let mut points = Vec::new();
    let (mut lat, mut lng) = (0i64, 0i64);

    while let Some(dlat) = values.next() {
        lat = accumulate(lat, dlat?)?;
        lng = accumulate(lng, values.required()?)?;

        let (lat, lng) = (lat as f64 / PRECISION, lng as f64 / PRECISION);
        let point =
            Coordinate::new(lat, lng).map_err(|_| PolylineError::OutOfRange { lat, lng })?;
        points.push(point);
    }

    Ok(points)
}

pub fn encode(points: &[Coordinate]) -> String {
    let mut out = String::new();
    let (mut prev_lat, mut prev_lng) = (0i64, 0i64);

    for point in points {
        let lat = (point.lat() * PRECISION).round() as i64;
        let lng = (point.lng() * PRECISION).round() as i64;
        write_value(&mut out, to_unsigned(lat - prev_lat), char_for);
        write_value(&mut out, to_unsigned(lng - prev_lng), char_for);
        prev_lat = lat;
        prev_lng = lng;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "_p~iF~ps|U_ulLnnqC_mqNvxq`@";

    fn coord(lat: f64, lng: f64) -> Coordinate {
        Coordinate::new(lat, lng).unwrap()
    }

    fn assert_close(actual: &[Coordinate], expected: &[Coordinate]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a.lat() - e.lat()).abs() < 1e-5, "{:?} != {:?}", a, e);
            assert!((a.lng() - e.lng()).abs() < 1e-5, "{:?} != {:?}", a, e);
        }
    }

    #[test]
    fn decodes_reference_sample() {
        let points = decode(SAMPLE).unwrap();
        assert_close(
            &points,
            &[
                coord(38.5, -120.2),
                coord(40.7, -120.95),
                coord(43.252, -126.453),
            ],
        );
    }

    #[test]
    fn encodes_reference_sample() {
        let points = [
            coord(38.5, -120.2),
            coord(40.7, -120.95),
            coord(43.252, -126.453),
        ];
        assert_eq!(encode(&points), SAMPLE);
    }

    #[test]
    fn empty_string_is_an_empty_path() {
        assert_eq!(decode("").unwrap(), Vec::new());
    }

    #[test]
    fn rejects_truncated_input() {
        // Cut in the middle of the last longitude group.
        assert_eq!(
            decode("_p~iF~ps|U_ulLnnqC_mqNvx"),
            Err(PolylineError::Truncated)
        );
        // A latitude with no longitude.
        assert_eq!(decode("_p~iF"), Err(PolylineError::Truncated));
    }

    #[test]
    fn rejects_characters_outside_the_alphabet() {
        assert!(matches!(
            decode("_p~iF ps|U"),
            Err(PolylineError::InvalidCharacter { ch: ' ', position: 5 })
        ));
    }

    #[test]
    fn rejects_runaway_groups() {
        let endless = "~".repeat(20);
        assert_eq!(decode(&endless), Err(PolylineError::Overflow));
    }
}
