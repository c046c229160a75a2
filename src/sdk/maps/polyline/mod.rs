//! Decoders for the compact path encodings providers return with routes.
//!
//! Both schemes pack zig-zag encoded deltas into 5-bit groups, one printable
//! character per group with `0x20` as the continuation bit. They differ in the
//! character alphabet and in how the scale is chosen: [`google`] uses a fixed
//! 1e5, [`flexible`] reads precision from a versioned header.

pub mod flexible;
pub mod google;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PolylineError {
    #[error("polyline ends in the middle of a value")]
    Truncated,

    #[error("invalid character {ch:?} at position {position}")]
    InvalidCharacter { ch: char, position: usize },

    #[error("encoded value does not fit in 64 bits")]
    Overflow,

    #[error("missing flexible polyline header")]
    MissingHeader,

    #[error("unsupported flexible polyline version {0}")]
    UnsupportedVersion(u64),

    #[error("invalid flexible polyline header: {0}")]
    InvalidHeader(String),

    #[error("decoded point ({lat}, {lng}) is out of range")]
    OutOfRange { lat: f64, lng: f64 },
}

/// Unsigned values read group by group from an encoded string.
///
/// `digit` maps one input byte to its 6-bit group, or `None` when the byte
/// is not part of the alphabet.
pub(crate) struct Values<'a> {
    bytes: &'a [u8],
    pos: usize,
    digit: fn(u8) -> Option<u64>,
}

impl<'a> Values<'a> {
    pub(crate) fn new(encoded: &'a str, digit: fn(u8) -> Option<u64>) -> Self {
        Self {
            bytes: encoded.as_bytes(),
            pos: 0,
            digit,
        }
    }

    /// Next value that must exist, e.g. the longitude after a latitude.
    pub(crate) fn required(&mut self) -> Result<u64, PolylineError> {
        self.next().unwrap_or(Err(PolylineError::Truncated))
    }
}

impl Iterator for Values<'_> {
    type Item = Result<u64, PolylineError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.bytes.len() {
            return None;
        }

        let mut result: u64 = 0;
        let mut shift: u32 = 0;
        loop {
            let Some(&byte) = self.bytes.get(self.pos) else {
                return Some(Err(PolylineError::Truncated));
            };
            let position = self.pos;
            self.pos += 1;

            let Some(group) = (self.digit)(byte) else {
                return Some(Err(PolylineError::InvalidCharacter {
                    ch: byte as char,
                    position,
                }));
            };
            if shift >= u64::BITS {
                return Some(Err(PolylineError::Overflow));
            }
            result |= (group & 0x1f) << shift;
            if group & 0x20 == 0 {
                return Some(Ok(result));
            }
            shift += 5;
        }
    }
}

/// Undo zig-zag: the low bit is the sign flag.
pub(crate) fn to_signed(value: u64) -> i64 {
    let magnitude = (value >> 1) as i64;
    if value & 1 == 1 {
        !magnitude
    } else {
        magnitude
    }
}

pub(crate) fn to_unsigned(value: i64) -> u64 {
    let shifted = (value << 1) as u64;
    if value < 0 {
        !shifted
    } else {
        shifted
    }
}

/// Append `value` as 5-bit groups, least significant first.
pub(crate) fn write_value(out: &mut String, mut value: u64, char_for: fn(u64) -> char) {
    while value >= 0x20 {
        out.push(char_for((value & 0x1f) | 0x20));
        value >>= 5;
    }
    out.push(char_for(value));
}

pub(crate) fn accumulate(total: i64, delta: u64) -> Result<i64, PolylineError> {
    total
        .checked_add(to_signed(delta))
        .ok_or(PolylineError::Overflow)
}
