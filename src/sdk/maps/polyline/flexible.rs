//! HERE flexible polyline.
//!
//! The string opens with two unsigned values: the format version, then a
//! header packing the 2D precision (bits 0-3), the third dimension kind
//! (bits 4-6) and the third dimension precision (bits 7-10). Points follow as
//! lat/lng deltas, plus one third-dimension delta per point when present.

use super::{accumulate, to_unsigned, write_value, PolylineError, Values};
use crate::sdk::maps::entity::Coordinate;

pub const FORMAT_VERSION: u64 = 1;
const MAX_PRECISION: u32 = 15;
const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

fn digit(byte: u8) -> Option<u64> {
    let value = match byte {
        b'A'..=b'Z' => byte - b'A',
        b'a'..=b'z' => byte - b'a' + 26,
        b'0'..=b'9' => byte - b'0' + 52,
        b'-' => 62,
        b'_' => 63,
        _ => return None,
    };
    Some(u64::from(value))
}

fn char_for(group: u64) -> char {
    ALPHABET[group as usize] as char
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThirdDimension {
    Absent,
    Level,
    Altitude,
    Elevation,
    Custom1,
    Custom2,
}

impl ThirdDimension {
    fn from_code(code: u64) -> Result<Self, PolylineError> {
        match code {
            0 => Ok(Self::Absent),
            1 => Ok(Self::Level),
            2 => Ok(Self::Altitude),
            3 => Ok(Self::Elevation),
            6 => Ok(Self::Custom1),
            7 => Ok(Self::Custom2),
            other => Err(PolylineError::InvalidHeader(format!(
                "reserved third dimension {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub precision: u32,
    pub third_dimension: ThirdDimension,
    pub third_precision: u32,
}

impl Header {
    fn parse(value: u64) -> Result<Self, PolylineError> {
        if value >> 11 != 0 {
            return Err(PolylineError::InvalidHeader(format!(
                "unexpected bits in header {:#x}",
                value
            )));
        }
        Ok(Self {
            precision: (value & 15) as u32,
            third_dimension: ThirdDimension::from_code((value >> 4) & 7)?,
            third_precision: ((value >> 7) & 15) as u32,
        })
    }
}

/// A decoded flexible polyline with its header and any third-dimension values.
#[derive(Debug, Clone, PartialEq)]
pub struct FlexiblePolyline {
    pub header: Header,
    pub coordinates: Vec<Coordinate>,
    /// One value per coordinate, empty when the header has no third dimension.
    pub third: Vec<f64>,
}

pub fn decode(encoded: &str) -> Result<Vec<Coordinate>, PolylineError> {
    decode_full(encoded).map(|polyline| polyline.coordinates)
}

pub fn decode_full(encoded: &str) -> Result<FlexiblePolyline, PolylineError> {
    let mut values = Values::new(encoded, digit);

    let version = values.next().ok_or(PolylineError::MissingHeader)??;
    if version != FORMAT_VERSION {
        return Err(PolylineError::UnsupportedVersion(version));
    }
    let header = Header::parse(values.next().ok_or(PolylineError::MissingHeader)??)?;

    let scale = 10f64.powi(header.precision as i32);
    let third_scale = 10f64.powi(header.third_precision as i32);
    let has_third = header.third_dimension != ThirdDimension::Absent;

    let mut coordinates = Vec::new();
    let mut third = Vec::new();
    let (mut lat, mut lng, mut z) = (0i64, 0i64, 0i64);

    while let Some(dlat) = values.next() {
        lat = accumulate(lat, dlat?)?;
        lng = accumulate(lng, values.required()?)?;
        if has_third {
            z = accumulate(z, values.required()?)?;
            third.push(z as f64 / third_scale);
        }

        let (lat, lng) = (lat as f64 / scale, lng as f64 / scale);
        let point =
            Coordinate::new(lat, lng).map_err(|_| PolylineError::OutOfRange { lat, lng })?;
        coordinates.push(point);
    }

    Ok(FlexiblePolyline {
        header,
        coordinates,
        third,
    })
}

/// Encodes a 2D path. `precision` is the number of decimal digits kept.
pub fn encode(points: &[Coordinate], precision: u32) -> Result<String, PolylineError> {
    if precision > MAX_PRECISION {
        return Err(PolylineError::InvalidHeader(format!(
            "precision {} exceeds {}",
            precision, MAX_PRECISION
        )));
    }

    let mut out = String::new();
    write_value(&mut out, FORMAT_VERSION, char_for);
    write_value(&mut out, u64::from(precision), char_for);

    let scale = 10f64.powi(precision as i32);
    let (mut prev_lat, mut prev_lng) = (0i64, 0i64);
    for point in points {
        let lat = (point.lat() * scale).round() as i64;
        let lng = (point.lng() * scale).round() as i64;
        write_value(&mut out, to_unsigned(lat - prev_lat), char_for);
        write_value(&mut out, to_unsigned(lng - prev_lng), char_for);
        prev_lat = lat;
        prev_lng = lng;
    }

    Ok(out)
}
