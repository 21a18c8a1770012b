//! Globe state the offsets are applied to.
//!
//! The context is built once at startup and passed explicitly to whatever
//! needs terrain heights; nothing here is global.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use geoid_common::GeoCoordinate;
use offset_grid::{load_with_format, CacheStats, CachedSampler, GridFormat, OffsetGrid, Sample};
use tracing::info;

/// Source of terrain heights above the geoid, in meters.
pub trait ElevationSource: Send + Sync {
    /// Height of the terrain at a coordinate.
    fn elevation(&self, coord: GeoCoordinate) -> f64;

    /// Short name for logs and reports.
    fn name(&self) -> &str;
}

/// Terrain at a constant height everywhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatElevation {
    height_m: f64,
}

impl FlatElevation {
    pub fn new(height_m: f64) -> Self {
        Self { height_m }
    }
}

impl ElevationSource for FlatElevation {
    fn elevation(&self, _coord: GeoCoordinate) -> f64 {
        self.height_m
    }

    fn name(&self) -> &str {
        "flat"
    }
}

enum OffsetLookup {
    Direct(Arc<OffsetGrid>),
    Cached(CachedSampler),
}

impl OffsetLookup {
    fn grid(&self) -> &Arc<OffsetGrid> {
        match self {
            Self::Direct(grid) => grid,
            Self::Cached(sampler) => sampler.grid(),
        }
    }

    fn sample(&self, coord: GeoCoordinate) -> Sample {
        match self {
            Self::Direct(grid) => grid.sample(coord),
            Self::Cached(sampler) => sampler.sample(coord),
        }
    }
}

struct AppliedOffsets {
    source: Option<PathBuf>,
    lookup: OffsetLookup,
}

/// Terrain plus optional geoid offsets.
pub struct GlobeContext {
    terrain: Box<dyn ElevationSource>,
    offsets: Option<AppliedOffsets>,
}

impl GlobeContext {
    /// Create a globe with terrain only.
    pub fn new(terrain: Box<dyn ElevationSource>) -> Self {
        Self {
            terrain,
            offsets: None,
        }
    }

    /// Load an offset grid from `path` and apply it to the globe.
    ///
    /// On failure the globe is left as it was, so the caller can decide to
    /// carry on without offsets.
    pub fn apply_egm96_offsets(
        &mut self,
        path: &Path,
        format: &GridFormat,
        cache_size: usize,
    ) -> offset_grid::Result<()> {
        let grid = load_with_format(path, format)?;
        self.install(Arc::new(grid), Some(path.to_path_buf()), cache_size);
        Ok(())
    }

    /// Apply an already loaded grid.
    pub fn apply_grid(&mut self, grid: Arc<OffsetGrid>, cache_size: usize) {
        self.install(grid, None, cache_size);
    }

    fn install(&mut self, grid: Arc<OffsetGrid>, source: Option<PathBuf>, cache_size: usize) {
        let lookup = if cache_size > 0 {
            OffsetLookup::Cached(CachedSampler::new(grid, cache_size))
        } else {
            OffsetLookup::Direct(grid)
        };

        info!(
            terrain = self.terrain.name(),
            cache_size,
            "Applied geoid offsets to globe"
        );
        self.offsets = Some(AppliedOffsets { source, lookup });
    }

    pub fn has_offsets(&self) -> bool {
        self.offsets.is_some()
    }

    /// File the offsets were loaded from, if any.
    pub fn offsets_source(&self) -> Option<&Path> {
        self.offsets.as_ref().and_then(|o| o.source.as_deref())
    }

    /// The applied grid, if any.
    pub fn grid(&self) -> Option<&Arc<OffsetGrid>> {
        self.offsets.as_ref().map(|o| o.lookup.grid())
    }

    pub fn terrain(&self) -> &dyn ElevationSource {
        self.terrain.as_ref()
    }

    /// Geoid offset at a coordinate, when offsets are applied.
    pub fn offset(&self, coord: GeoCoordinate) -> Option<Sample> {
        self.offsets.as_ref().map(|o| o.lookup.sample(coord))
    }

    /// Terrain height with the geoid offset added, in meters.
    ///
    /// Without offsets this is the plain terrain height.
    pub fn elevation(&self, coord: GeoCoordinate) -> f64 {
        let terrain = self.terrain.elevation(coord);
        match (&self.offsets, self.offset(coord)) {
            (Some(o), Some(sample)) => terrain + sample.meters(o.lookup.grid().units()),
            _ => terrain,
        }
    }

    /// Cache statistics when lookups are cached.
    pub fn cache_stats(&self) -> Option<CacheStats> {
        match self.offsets.as_ref().map(|o| &o.lookup) {
            Some(OffsetLookup::Cached(sampler)) => Some(sampler.stats()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use offset_grid::{OffsetGridError, OffsetUnits};
    use test_utils::{fixtures::toy, temp_test_dir, write_grid_file};

    fn toy_format() -> GridFormat {
        GridFormat::new(toy::spec(), OffsetUnits::Centimeters)
    }

    fn coord(lat: f64, lon: f64) -> GeoCoordinate {
        GeoCoordinate::new(lat, lon).unwrap()
    }

    #[test]
    fn test_elevation_without_offsets() {
        let globe = GlobeContext::new(Box::new(FlatElevation::new(250.0)));
        assert!(!globe.has_offsets());
        assert!(globe.offset(coord(88.5, 1.5)).is_none());
        assert_eq!(globe.elevation(coord(88.5, 1.5)), 250.0);
    }

    #[test]
    fn test_apply_offsets_from_file() {
        let dir = temp_test_dir();
        let path = write_grid_file(dir.path(), "EGM96.dat", &toy::values());

        let mut globe = GlobeContext::new(Box::new(FlatElevation::new(10.0)));
        globe.apply_egm96_offsets(&path, &toy_format(), 16).unwrap();

        assert!(globe.has_offsets());
        assert_eq!(globe.offsets_source(), Some(path.as_path()));

        // 100 cm at the centre of the block
        let (lat, lon) = toy::BLOCK_CENTER;
        assert!((globe.elevation(coord(lat, lon)) - 11.0).abs() < 1e-9);
        assert!(globe.cache_stats().is_some());
    }

    #[test]
    fn test_failed_load_leaves_globe_unchanged() {
        let dir = temp_test_dir();
        let mut globe = GlobeContext::new(Box::new(FlatElevation::default()));

        let err = globe
            .apply_egm96_offsets(&dir.path().join("missing.dat"), &toy_format(), 16)
            .unwrap_err();

        assert!(matches!(err, OffsetGridError::Io { .. }));
        assert!(!globe.has_offsets());
    }

    #[test]
    fn test_uncached_lookup() {
        let grid = OffsetGrid::new(toy_format(), toy::values()).unwrap();
        let mut globe = GlobeContext::new(Box::new(FlatElevation::default()));
        globe.apply_grid(Arc::new(grid), 0);

        assert!(globe.cache_stats().is_none());
        let sample = globe.offset(coord(89.5, 1.0)).unwrap();
        assert!((sample.value - 50.0).abs() < 1e-9);
        assert!(globe.offsets_source().is_none());
    }

    #[test]
    fn test_out_of_range_adds_nothing() {
        let grid = OffsetGrid::new(toy_format(), toy::values()).unwrap();
        let mut globe = GlobeContext::new(Box::new(FlatElevation::new(5.0)));
        globe.apply_grid(Arc::new(grid), 8);

        assert_eq!(globe.elevation(coord(-45.0, 100.0)), 5.0);
        assert!(globe.offset(coord(-45.0, 100.0)).unwrap().is_out_of_range());
    }
}
