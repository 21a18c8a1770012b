//! JSON report of offsets and heights for the requested points.

use geoid_common::{GeoBounds, GeoCoordinate};
use offset_grid::{sample_region, CacheStats, GridStats, Sample};
use serde::Serialize;
use tracing::warn;

use crate::context::GlobeContext;

#[derive(Debug, Serialize)]
pub struct Report {
    pub offsets_applied: bool,
    pub offsets_source: Option<String>,
    pub terrain: String,
    pub grid: Option<GridSummary>,
    pub points: Vec<PointReport>,
    pub region: Option<RegionReport>,
    pub cache: Option<CacheStats>,
}

#[derive(Debug, Serialize)]
pub struct GridSummary {
    pub rows: usize,
    pub columns: usize,
    pub spacing_deg: f64,
    pub units: String,
    pub stats: GridStats,
}

#[derive(Debug, Serialize)]
pub struct PointReport {
    pub coordinate: GeoCoordinate,
    /// Geoid offset in meters; absent without offsets or out of range.
    pub offset_m: Option<f64>,
    pub sample: Option<Sample>,
    pub terrain_m: f64,
    pub elevation_m: f64,
}

#[derive(Debug, Serialize)]
pub struct RegionReport {
    pub bounds: GeoBounds,
    pub width: usize,
    pub height: usize,
    pub min_offset_m: Option<f64>,
    pub max_offset_m: Option<f64>,
    pub out_of_range: usize,
}

/// Region request: bounds plus lattice size.
#[derive(Debug, Clone, Copy)]
pub struct RegionRequest {
    pub bounds: GeoBounds,
    pub width: usize,
    pub height: usize,
}

/// Collect the report for a set of points and an optional region.
pub fn build_report(
    globe: &GlobeContext,
    points: &[GeoCoordinate],
    region: Option<RegionRequest>,
) -> offset_grid::Result<Report> {
    let grid = globe.grid().map(|grid| GridSummary {
        rows: grid.rows(),
        columns: grid.columns(),
        spacing_deg: grid.spec().spacing,
        units: grid.units().to_string(),
        stats: grid.stats(),
    });

    let points = points
        .iter()
        .map(|&coord| {
            let sample = globe.offset(coord);
            let offset_m = match (sample, globe.grid()) {
                (Some(s), Some(grid)) if !s.is_out_of_range() => Some(s.meters(grid.units())),
                _ => None,
            };
            if let Some(warning) = sample.as_ref().and_then(|s| s.warning()) {
                warn!(%warning, "Point outside offset grid");
            }

            // Sampled once per point; reuse the offset
            let terrain_m = globe.terrain().elevation(coord);
            PointReport {
                coordinate: coord,
                offset_m,
                sample,
                terrain_m,
                elevation_m: terrain_m + offset_m.unwrap_or(0.0),
            }
        })
        .collect();

    let region = match (region, globe.grid()) {
        (Some(req), Some(grid)) => {
            let samples = sample_region(grid, &req.bounds, req.width, req.height)?;
            let range = samples.value_range();
            Some(RegionReport {
                bounds: req.bounds,
                width: samples.width,
                height: samples.height,
                min_offset_m: range.map(|r| r.0),
                max_offset_m: range.map(|r| r.1),
                out_of_range: samples.out_of_range,
            })
        }
        (Some(_), None) => {
            warn!("Region requested but no offsets are applied");
            None
        }
        (None, _) => None,
    };

    Ok(Report {
        offsets_applied: globe.has_offsets(),
        offsets_source: globe.offsets_source().map(|p| p.display().to_string()),
        terrain: globe.terrain().name().to_string(),
        grid,
        points,
        region,
        cache: globe.cache_stats(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::FlatElevation;
    use offset_grid::{GridFormat, OffsetGrid, OffsetUnits};
    use std::sync::Arc;
    use test_utils::fixtures::toy;

    fn toy_globe() -> GlobeContext {
        let grid = OffsetGrid::new(
            GridFormat::new(toy::spec(), OffsetUnits::Centimeters),
            toy::values(),
        )
        .unwrap();
        let mut globe = GlobeContext::new(Box::new(FlatElevation::new(100.0)));
        globe.apply_grid(Arc::new(grid), 32);
        globe
    }

    #[test]
    fn test_report_points() {
        let globe = toy_globe();
        let points = [
            GeoCoordinate::new(88.5, 1.5).unwrap(),
            GeoCoordinate::new(0.0, 0.0).unwrap(),
        ];

        let report = build_report(&globe, &points, None).unwrap();

        assert!(report.offsets_applied);
        assert_eq!(report.points.len(), 2);
        assert!((report.points[0].offset_m.unwrap() - 1.0).abs() < 1e-9);
        assert!((report.points[0].elevation_m - 101.0).abs() < 1e-9);
        assert_eq!(report.points[1].offset_m, None);
        assert_eq!(report.points[1].elevation_m, 100.0);
        assert_eq!(report.grid.as_ref().unwrap().rows, 4);

        let cache = report.cache.unwrap();
        assert_eq!(cache.misses, 2);
        assert_eq!(cache.hits, 0);
    }

    #[test]
    fn test_report_elevation_matches_globe() {
        let globe = toy_globe();
        let points = [
            GeoCoordinate::new(89.5, 1.0).unwrap(),
            GeoCoordinate::new(-10.0, 1.0).unwrap(),
        ];

        let report = build_report(&globe, &points, None).unwrap();
        for point in &report.points {
            assert!((point.elevation_m - globe.elevation(point.coordinate)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_report_region() {
        let globe = toy_globe();
        let region = RegionRequest {
            bounds: GeoBounds::new(87.0, 0.0, 90.0, 3.0),
            width: 4,
            height: 4,
        };

        let report = build_report(&globe, &[], Some(region)).unwrap();
        let region = report.region.unwrap();
        assert_eq!(region.out_of_range, 0);
        assert_eq!(region.min_offset_m, Some(0.0));
        assert!((region.max_offset_m.unwrap() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_report_without_offsets() {
        let globe = GlobeContext::new(Box::new(FlatElevation::new(3.0)));
        let region = RegionRequest {
            bounds: GeoBounds::global(),
            width: 2,
            height: 2,
        };

        let report = build_report(&globe, &[GeoCoordinate::new(1.0, 2.0).unwrap()], Some(region))
            .unwrap();

        assert!(!report.offsets_applied);
        assert!(report.grid.is_none());
        assert!(report.region.is_none());
        assert_eq!(report.points[0].elevation_m, 3.0);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["terrain"], "flat");
    }
}
