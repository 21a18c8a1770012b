//! Geographic coordinates in degrees.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CoordinateError, CoordinateResult};

/// A validated (latitude, longitude) pair in degrees.
///
/// Latitude is in [-90, 90]. Longitude is accepted in either the
/// [-180, 180) or the [0, 360) convention, so anything in [-180, 360)
/// is valid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinate {
    lat: f64,
    lon: f64,
}

impl GeoCoordinate {
    /// Create a coordinate, rejecting values outside the valid ranges.
    pub fn new(lat: f64, lon: f64) -> CoordinateResult<Self> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(CoordinateError::LatitudeOutOfRange(lat));
        }
        if !(-180.0..360.0).contains(&lon) {
            return Err(CoordinateError::LongitudeOutOfRange(lon));
        }
        Ok(Self { lat, lon })
    }

    /// Latitude in degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees, as given.
    pub fn lon(&self) -> f64 {
        self.lon
    }

    /// Longitude mapped into [0, 360).
    pub fn normalized_longitude(&self) -> f64 {
        normalize_longitude(self.lon)
    }

    /// Cache key with both components quantized to micro-degrees.
    pub fn quantized(&self) -> (i64, i64) {
        (
            (self.lat * 1e6).round() as i64,
            (self.normalized_longitude() * 1e6).round() as i64,
        )
    }
}

/// Map any longitude into [0, 360).
pub fn normalize_longitude(lon: f64) -> f64 {
    let wrapped = lon.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

impl FromStr for GeoCoordinate {
    type Err = CoordinateError;

    /// Parse a "lat,lon" string.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 2 {
            return Err(CoordinateError::InvalidFormat(s.to_string()));
        }

        let lat: f64 = parts[0]
            .parse()
            .map_err(|_| CoordinateError::InvalidNumber(parts[0].to_string()))?;
        let lon: f64 = parts[1]
            .parse()
            .map_err(|_| CoordinateError::InvalidNumber(parts[1].to_string()))?;

        Self::new(lat, lon)
    }
}

impl fmt::Display for GeoCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_longitude() {
        assert_eq!(normalize_longitude(0.0), 0.0);
        assert_eq!(normalize_longitude(-90.0), 270.0);
        assert_eq!(normalize_longitude(359.5), 359.5);
        assert!((normalize_longitude(-0.1) - 359.9).abs() < 1e-9);
        assert_eq!(normalize_longitude(-1e-20), 0.0);
    }

    #[test]
    fn test_rejects_bad_latitude() {
        assert_eq!(
            GeoCoordinate::new(91.0, 0.0),
            Err(CoordinateError::LatitudeOutOfRange(91.0))
        );
        assert!(GeoCoordinate::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn test_rejects_bad_longitude() {
        assert!(GeoCoordinate::new(0.0, 360.0).is_err());
        assert!(GeoCoordinate::new(0.0, -180.5).is_err());
        assert!(GeoCoordinate::new(0.0, -180.0).is_ok());
    }

    #[test]
    fn test_quantized_matches_across_conventions() {
        let a = GeoCoordinate::new(10.0, -90.0).unwrap();
        let b = GeoCoordinate::new(10.0, 270.0).unwrap();
        assert_eq!(a.quantized(), b.quantized());
    }
}
