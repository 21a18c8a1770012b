//! Offset lookup at arbitrary geographic coordinates.
//!
//! Coordinates are converted to fractional grid indices from the grid
//! origin and spacing, then blended bilinearly from the four surrounding
//! vertices. Longitude always wraps modulo 360; latitude never does.

use geoid_common::GeoCoordinate;
use tracing::debug;

use crate::interpolation::{bilinear_interpolate, VERTEX_TOLERANCE};
use crate::types::{OffsetGrid, OutOfRangeWarning, Sample};

/// Sample the grid, returning 0 for coordinates outside its coverage.
pub fn sample(grid: &OffsetGrid, coord: GeoCoordinate) -> Sample {
    sample_or(grid, coord, 0.0)
}

/// Sample the grid, returning `default` for coordinates outside its
/// coverage.
///
/// Out-of-range lookups never fail; the returned [`Sample`] carries an
/// [`OutOfRangeWarning`] instead.
pub fn sample_or(grid: &OffsetGrid, coord: GeoCoordinate, default: f64) -> Sample {
    let spec = grid.spec();
    let last_row = (spec.rows - 1) as f64;
    let last_col = (spec.columns - 1) as f64;
    let wrap = spec.wraps_longitude();

    let y = spec.fractional_row(coord.lat());
    if y < -VERTEX_TOLERANCE || y > last_row + VERTEX_TOLERANCE {
        return out_of_range(grid, coord, default);
    }

    let mut x = spec.fractional_col(coord.lon());
    if !wrap && x > last_col + VERTEX_TOLERANCE {
        // Just west of the origin column normalizes to a full turn away
        if 360.0 / spec.spacing - x <= VERTEX_TOLERANCE {
            x = 0.0;
        } else {
            return out_of_range(grid, coord, default);
        }
    }

    let y = y.clamp(0.0, last_row);
    let x = if wrap { x } else { x.min(last_col) };

    let result = bilinear_interpolate(grid.values(), spec.columns, spec.rows, x, y, wrap);
    if result.exact {
        Sample::exact(result.value)
    } else {
        Sample::interpolated(result.value)
    }
}

/// Convert an orthometric height (above the geoid) to an ellipsoidal
/// height: h = H + N.
pub fn ellipsoidal_height(grid: &OffsetGrid, coord: GeoCoordinate, orthometric_m: f64) -> f64 {
    orthometric_m + grid.sample_meters(coord)
}

/// Convert an ellipsoidal height to an orthometric height: H = h - N.
pub fn orthometric_height(grid: &OffsetGrid, coord: GeoCoordinate, ellipsoidal_m: f64) -> f64 {
    ellipsoidal_m - grid.sample_meters(coord)
}

fn out_of_range(grid: &OffsetGrid, coord: GeoCoordinate, default: f64) -> Sample {
    let warning = OutOfRangeWarning {
        coordinate: coord,
        coverage: grid.spec().bounds(),
    };
    debug!(
        lat = coord.lat(),
        lon = coord.lon(),
        "Coordinate outside offset grid coverage"
    );
    Sample::out_of_range(default, warning)
}
