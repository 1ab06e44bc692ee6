//! Geographic coordinate validation for imaging requests.
//!
//! Bounds are inclusive on both axes. NaN and infinite values never fall
//! inside a range, so they are rejected without a separate check.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const LATITUDE_RANGE: RangeInclusive<f64> = -90.0..=90.0;
pub const LONGITUDE_RANGE: RangeInclusive<f64> = -180.0..=180.0;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordinateError {
    #[error("latitude {0} out of range [-90, 90]")]
    LatitudeOutOfRange(f64),

    #[error("longitude {0} out of range [-180, 180]")]
    LongitudeOutOfRange(f64),

    #[error("{axis} is not a number: \"{input}\"")]
    NotANumber { axis: &'static str, input: String },
}

/// Returns `true` iff both values lie within their inclusive bounds.
#[must_use]
pub fn is_valid_coordinate(latitude: f64, longitude: f64) -> bool {
    LATITUDE_RANGE.contains(&latitude) && LONGITUDE_RANGE.contains(&longitude)
}

/// A latitude/longitude pair identifying an imaging target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Creates a validated coordinate.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinateError::LatitudeOutOfRange`] or
    /// [`CoordinateError::LongitudeOutOfRange`] naming the first axis that
    /// fails its bound.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordinateError> {
        if !LATITUDE_RANGE.contains(&latitude) {
            return Err(CoordinateError::LatitudeOutOfRange(latitude));
        }
        if !LONGITUDE_RANGE.contains(&longitude) {
            return Err(CoordinateError::LongitudeOutOfRange(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        is_valid_coordinate(self.latitude, self.longitude)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.latitude, self.longitude)
    }
}

/// Parses manually entered text into a validated [`Coordinate`].
///
/// # Errors
///
/// Returns [`CoordinateError::NotANumber`] when either input does not parse
/// as a float, otherwise whatever [`Coordinate::new`] returns.
pub fn parse_coordinate(latitude: &str, longitude: &str) -> Result<Coordinate, CoordinateError> {
    let parse_axis = |axis: &'static str, raw: &str| -> Result<f64, CoordinateError> {
        raw.trim()
            .parse::<f64>()
            .map_err(|_| CoordinateError::NotANumber {
                axis,
                input: raw.to_string(),
            })
    };

    let lat = parse_axis("latitude", latitude)?;
    let lon = parse_axis("longitude", longitude)?;
    Coordinate::new(lat, lon)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_typical_coordinate() {
        assert!(is_valid_coordinate(45.0, -122.0));
    }

    #[test]
    fn rejects_latitude_above_ninety() {
        assert!(!is_valid_coordinate(91.0, 0.0));
    }

    #[test]
    fn rejects_longitude_below_minus_one_eighty() {
        assert!(!is_valid_coordinate(0.0, -181.0));
    }

    #[test]
    fn boundaries_are_inclusive() {
        for (lat, lon) in [
            (90.0, 180.0),
            (-90.0, -180.0),
            (90.0, -180.0),
            (-90.0, 180.0),
        ] {
            assert!(is_valid_coordinate(lat, lon), "({lat}, {lon})");
        }
    }

    #[test]
    fn out_of_range_latitude_fails_for_any_longitude() {
        for lon in [-180.0, -45.5, 0.0, 120.0, 180.0, 500.0] {
            assert!(!is_valid_coordinate(90.000_001, lon));
            assert!(!is_valid_coordinate(-90.000_001, lon));
        }
    }

    #[test]
    fn out_of_range_longitude_fails_for_any_latitude() {
        for lat in [-90.0, -12.0, 0.0, 33.3, 90.0, -400.0] {
            assert!(!is_valid_coordinate(lat, 180.5));
            assert!(!is_valid_coordinate(lat, -180.5));
        }
    }

    #[test]
    fn nan_and_infinity_are_invalid() {
        assert!(!is_valid_coordinate(f64::NAN, 0.0));
        assert!(!is_valid_coordinate(0.0, f64::NAN));
        assert!(!is_valid_coordinate(f64::INFINITY, 0.0));
        assert!(!is_valid_coordinate(0.0, f64::NEG_INFINITY));
    }

    #[test]
    fn new_reports_failing_axis() {
        assert_eq!(
            Coordinate::new(91.0, 0.0),
            Err(CoordinateError::LatitudeOutOfRange(91.0))
        );
        assert_eq!(
            Coordinate::new(0.0, -181.0),
            Err(CoordinateError::LongitudeOutOfRange(-181.0))
        );
    }

    #[test]
    fn new_rejects_nan() {
        assert!(matches!(
            Coordinate::new(f64::NAN, 10.0),
            Err(CoordinateError::LatitudeOutOfRange(_))
        ));
    }

    #[test]
    fn parse_coordinate_trims_whitespace() {
        let coord = parse_coordinate(" 43.4723 ", "-80.5449").unwrap();
        assert!((coord.latitude - 43.4723).abs() < f64::EPSILON);
        assert!((coord.longitude + 80.5449).abs() < f64::EPSILON);
    }

    #[test]
    fn parse_coordinate_rejects_text() {
        let err = parse_coordinate("north", "10").unwrap_err();
        assert!(matches!(err, CoordinateError::NotANumber { axis: "latitude", .. }));
    }

    #[test]
    fn parse_coordinate_rejects_literal_nan() {
        assert!(parse_coordinate("NaN", "0").is_err());
    }

    #[test]
    fn display_uses_six_decimals() {
        let coord = Coordinate::new(1.5, -2.25).unwrap();
        assert_eq!(coord.to_string(), "(1.500000, -2.250000)");
    }
}
