//! Core types for offset grids and sample results.

use std::fmt;

use geoid_common::{GeoBounds, GeoCoordinate, GridSpec};
use serde::Serialize;

use crate::config::{GridFormat, OffsetUnits};
use crate::error::{OffsetGridError, Result};

/// An immutable grid of raw geoid offsets.
///
/// Values are stored row-major, rows north to south, columns west to east.
/// Nothing mutates the grid after construction, so it can be shared
/// across threads behind an `Arc` without locking.
#[derive(Debug, Clone)]
pub struct OffsetGrid {
    spec: GridSpec,
    units: OffsetUnits,
    values: Vec<i16>,
}

impl OffsetGrid {
    /// Build a grid from decoded samples.
    ///
    /// Fails if the format is invalid or the sample count does not match
    /// `rows * columns`.
    pub fn new(format: GridFormat, values: Vec<i16>) -> Result<Self> {
        format.validate().map_err(OffsetGridError::config)?;

        let expected = format.spec.expected_len();
        if values.len() != expected {
            return Err(OffsetGridError::invalid_metadata(format!(
                "{} samples for a {}x{} grid (expected {})",
                values.len(),
                format.spec.rows,
                format.spec.columns,
                expected
            )));
        }

        Ok(Self {
            spec: format.spec,
            units: format.units,
            values,
        })
    }

    /// Grid geometry.
    pub fn spec(&self) -> &GridSpec {
        &self.spec
    }

    /// Units of the raw samples.
    pub fn units(&self) -> OffsetUnits {
        self.units
    }

    /// Raw samples in row-major order.
    pub fn values(&self) -> &[i16] {
        &self.values
    }

    pub fn rows(&self) -> usize {
        self.spec.rows
    }

    pub fn columns(&self) -> usize {
        self.spec.columns
    }

    /// Raw stored value at a vertex.
    pub fn raw(&self, row: usize, col: usize) -> Option<i16> {
        if row >= self.spec.rows || col >= self.spec.columns {
            return None;
        }
        Some(self.values[self.spec.flat_index(row, col)])
    }

    /// Sample the grid at a coordinate, in raw units.
    pub fn sample(&self, coord: GeoCoordinate) -> Sample {
        crate::sampler::sample(self, coord)
    }

    /// Sample the grid at a coordinate and convert to meters.
    ///
    /// Out-of-range coordinates yield 0.
    pub fn sample_meters(&self, coord: GeoCoordinate) -> f64 {
        self.sample(coord).meters(self.units)
    }

    /// Summary statistics over all samples, in raw units.
    pub fn stats(&self) -> GridStats {
        let mut min = i16::MAX;
        let mut max = i16::MIN;
        let mut sum = 0i64;

        for &v in &self.values {
            min = min.min(v);
            max = max.max(v);
            sum += v as i64;
        }

        GridStats {
            min,
            max,
            mean: sum as f64 / self.values.len() as f64,
        }
    }
}

/// Summary statistics of a grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridStats {
    pub min: i16,
    pub max: i16,
    pub mean: f64,
}

/// Outcome of a single grid lookup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sample {
    /// Offset in raw grid units, or the default when out of range.
    pub value: f64,
    /// How the value was obtained.
    pub status: SampleStatus,
}

impl Sample {
    pub(crate) fn exact(value: f64) -> Self {
        Self {
            value,
            status: SampleStatus::Exact,
        }
    }

    pub(crate) fn interpolated(value: f64) -> Self {
        Self {
            value,
            status: SampleStatus::Interpolated,
        }
    }

    pub(crate) fn out_of_range(default: f64, warning: OutOfRangeWarning) -> Self {
        Self {
            value: default,
            status: SampleStatus::OutOfRange(warning),
        }
    }

    /// True when the coordinate fell outside the grid.
    pub fn is_out_of_range(&self) -> bool {
        matches!(self.status, SampleStatus::OutOfRange(_))
    }

    /// The advisory attached to an out-of-range lookup.
    pub fn warning(&self) -> Option<&OutOfRangeWarning> {
        match &self.status {
            SampleStatus::OutOfRange(w) => Some(w),
            _ => None,
        }
    }

    /// Value converted to meters.
    pub fn meters(&self, units: OffsetUnits) -> f64 {
        self.value * units.meters_per_unit()
    }
}

/// How a sample value was produced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SampleStatus {
    /// The coordinate sits on a grid vertex.
    Exact,
    /// Bilinear blend of the four surrounding vertices.
    Interpolated,
    /// Outside the grid coverage; the value is the caller's default.
    OutOfRange(OutOfRangeWarning),
}

/// Advisory raised when a coordinate lies outside the grid coverage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OutOfRangeWarning {
    pub coordinate: GeoCoordinate,
    pub coverage: GeoBounds,
}

impl fmt::Display for OutOfRangeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "coordinate {} outside grid coverage lat [{}, {}] lon [{}, {}]",
            self.coordinate,
            self.coverage.south,
            self.coverage.north,
            self.coverage.west,
            self.coverage.east
        )
    }
}

/// Offsets sampled over a regular lattice, in meters.
#[derive(Debug, Clone)]
pub struct RegionSamples {
    /// Values row-major, north row first.
    pub data: Vec<f64>,
    pub width: usize,
    pub height: usize,
    pub bounds: GeoBounds,
    /// Lattice points that fell outside the grid (stored as 0).
    pub out_of_range: usize,
}

impl RegionSamples {
    /// Value at a lattice position.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.height || col >= self.width {
            return None;
        }
        Some(self.data[row * self.width + col])
    }

    /// Minimum and maximum sampled values.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.data.iter().fold(None, |acc, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }
}

/// Statistics about cache usage.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
    pub capacity: usize,
    pub evictions: u64,
}

impl CacheStats {
    /// Calculate the cache hit rate (0.0 - 1.0).
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toy_format() -> GridFormat {
        GridFormat::new(GridSpec::new(2, 3, 90.0, 0.0, 1.0), OffsetUnits::Centimeters)
    }

    #[test]
    fn test_new_rejects_wrong_length() {
        let result = OffsetGrid::new(toy_format(), vec![0; 5]);
        assert!(matches!(result, Err(OffsetGridError::InvalidMetadata(_))));
    }

    #[test]
    fn test_new_rejects_bad_spec() {
        let format = GridFormat::new(GridSpec::new(2, 3, 90.0, 0.0, -1.0), OffsetUnits::Meters);
        let result = OffsetGrid::new(format, vec![0; 6]);
        assert!(matches!(result, Err(OffsetGridError::Config(_))));
    }

    #[test]
    fn test_raw_lookup() {
        let grid = OffsetGrid::new(toy_format(), vec![1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(grid.raw(0, 0), Some(1));
        assert_eq!(grid.raw(1, 2), Some(6));
        assert_eq!(grid.raw(2, 0), None);
        assert_eq!(grid.raw(0, 3), None);
    }

    #[test]
    fn test_stats() {
        let grid = OffsetGrid::new(toy_format(), vec![-10, 0, 10, 20, 30, 40]).unwrap();
        let stats = grid.stats();
        assert_eq!(stats.min, -10);
        assert_eq!(stats.max, 40);
        assert!((stats.mean - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_sample_meters_conversion() {
        let sample = Sample::exact(250.0);
        assert!((sample.meters(OffsetUnits::Centimeters) - 2.5).abs() < 1e-12);
        assert!((sample.meters(OffsetUnits::Decimeters) - 25.0).abs() < 1e-12);
        assert!((sample.meters(OffsetUnits::Meters) - 250.0).abs() < 1e-12);
    }

    #[test]
    fn test_cache_stats_hit_rate() {
        let mut stats = CacheStats::default();
        assert!((stats.hit_rate() - 0.0).abs() < f64::EPSILON);

        stats.hits = 80;
        stats.misses = 20;
        assert!((stats.hit_rate() - 0.8).abs() < f64::EPSILON);
    }
}
