//! Layouts of regular lat/lon offset grids.

use crate::bounds::GeoBounds;
use crate::coord::normalize_longitude;
use serde::{Deserialize, Serialize};

/// Tolerance used when deciding whether a longitude span closes the globe.
const WRAP_TOLERANCE_DEG: f64 = 1e-6;

/// Layout of a regular lat/lon grid.
///
/// Rows run north to south starting at `origin_lat`; columns run west to
/// east starting at `origin_lon`. Both axes share one `spacing`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    /// Number of rows (latitude direction)
    pub rows: usize,
    /// Number of columns (longitude direction)
    pub columns: usize,
    /// Latitude of row 0, degrees
    pub origin_lat: f64,
    /// Longitude of column 0, degrees
    pub origin_lon: f64,
    /// Cell spacing in degrees
    pub spacing: f64,
}

impl GridSpec {
    /// Create a new grid layout.
    pub fn new(rows: usize, columns: usize, origin_lat: f64, origin_lon: f64, spacing: f64) -> Self {
        Self {
            rows,
            columns,
            origin_lat,
            origin_lon,
            spacing,
        }
    }

    /// Check the structural invariants of the grid.
    pub fn validate(&self) -> Result<(), String> {
        if self.rows == 0 || self.columns == 0 {
            return Err(format!(
                "grid must have at least one row and column, got {}x{}",
                self.rows, self.columns
            ));
        }
        if self.rows.checked_mul(self.columns).is_none() {
            return Err(format!(
                "grid of {}x{} points is too large to address",
                self.rows, self.columns
            ));
        }
        if !(self.spacing.is_finite() && self.spacing > 0.0) {
            return Err(format!("spacing must be > 0, got {}", self.spacing));
        }
        if !(-90.0..=90.0).contains(&self.origin_lat) {
            return Err(format!("origin latitude {} outside [-90, 90]", self.origin_lat));
        }
        if !(-180.0..360.0).contains(&self.origin_lon) {
            return Err(format!(
                "origin longitude {} outside [-180, 360)",
                self.origin_lon
            ));
        }
        if self.south_lat() < -90.0 - WRAP_TOLERANCE_DEG {
            return Err(format!(
                "grid extends to latitude {} south of the pole",
                self.south_lat()
            ));
        }
        if self.columns as f64 * self.spacing > 360.0 + WRAP_TOLERANCE_DEG {
            return Err(format!(
                "grid spans {} degrees of longitude",
                self.columns as f64 * self.spacing
            ));
        }
        Ok(())
    }

    /// Total number of grid points. Only meaningful for a validated spec.
    pub fn expected_len(&self) -> usize {
        self.rows.saturating_mul(self.columns)
    }

    /// Latitude of the last row.
    pub fn south_lat(&self) -> f64 {
        self.origin_lat - (self.rows.saturating_sub(1)) as f64 * self.spacing
    }

    /// Covered latitude range as (south, north).
    pub fn latitude_coverage(&self) -> (f64, f64) {
        (self.south_lat(), self.origin_lat)
    }

    /// True when the columns close the full 360 degrees, so the last
    /// column neighbours the first.
    pub fn wraps_longitude(&self) -> bool {
        (self.columns as f64 * self.spacing - 360.0).abs() < WRAP_TOLERANCE_DEG
    }

    /// Bounds spanned by the grid vertices.
    pub fn bounds(&self) -> GeoBounds {
        let last_lon = self.origin_lon + (self.columns.saturating_sub(1)) as f64 * self.spacing;
        GeoBounds::new(self.south_lat(), self.origin_lon, self.origin_lat, last_lon)
    }

    /// Fractional row index for a latitude (may fall outside `0..rows`).
    pub fn fractional_row(&self, lat: f64) -> f64 {
        (self.origin_lat - lat) / self.spacing
    }

    /// Fractional column index for a longitude, measured eastward from the
    /// origin column after wrapping into [0, 360).
    pub fn fractional_col(&self, lon: f64) -> f64 {
        let offset = normalize_longitude(normalize_longitude(lon) - normalize_longitude(self.origin_lon));
        offset / self.spacing
    }

    /// Convert a grid index to coordinates.
    pub fn vertex(&self, row: usize, col: usize) -> Option<GridVertex> {
        if row >= self.rows || col >= self.columns {
            return None;
        }

        Some(GridVertex {
            lat: self.origin_lat - row as f64 * self.spacing,
            lon: self.origin_lon + col as f64 * self.spacing,
            row,
            col,
        })
    }

    /// Get the 1D array index for a 2D grid position (row-major).
    pub fn flat_index(&self, row: usize, col: usize) -> usize {
        row * self.columns + col
    }
}

/// A grid vertex with both indices and coordinates.
#[derive(Debug, Clone, Copy)]
pub struct GridVertex {
    pub lat: f64,
    pub lon: f64,
    pub row: usize,
    pub col: usize,
}

/// Known geoid offset grid layouts.
pub mod grids {
    use super::*;

    /// EGM96 0.25° global grid, as shipped in `EGM96.dat`
    pub fn egm96_quarter_degree() -> GridSpec {
        GridSpec::new(721, 1440, 90.0, 0.0, 0.25)
    }

    /// EGM96 0.5° global grid
    pub fn egm96_half_degree() -> GridSpec {
        GridSpec::new(361, 720, 90.0, 0.0, 0.5)
    }
}
