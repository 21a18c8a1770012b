//! Error types for geographic coordinates.

use thiserror::Error;

/// Result type alias using CoordinateError.
pub type CoordinateResult<T> = Result<T, CoordinateError>;

/// Errors raised when building or parsing a coordinate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordinateError {
    #[error("Latitude {0} outside [-90, 90]")]
    LatitudeOutOfRange(f64),

    #[error("Longitude {0} outside [-180, 360)")]
    LongitudeOutOfRange(f64),

    #[error("Invalid coordinate format: {0}. Expected 'lat,lon'")]
    InvalidFormat(String),

    #[error("Invalid number in coordinate: {0}")]
    InvalidNumber(String),
}
