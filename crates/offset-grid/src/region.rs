//! Sampling offsets over a regular lattice.

use geoid_common::coord::normalize_longitude;
use geoid_common::{GeoBounds, GeoCoordinate};
use rayon::prelude::*;
use tracing::debug;

use crate::error::{OffsetGridError, Result};
use crate::sampler::sample;
use crate::types::{OffsetGrid, RegionSamples};

/// Sample a `width x height` lattice spanning `bounds`, corners included.
///
/// Values are in meters, rows ordered north to south. Rows are computed in
/// parallel; the grid is only read. Lattice points outside the grid
/// coverage are stored as 0 and counted in `out_of_range`.
pub fn sample_region(
    grid: &OffsetGrid,
    bounds: &GeoBounds,
    width: usize,
    height: usize,
) -> Result<RegionSamples> {
    if width == 0 || height == 0 {
        return Err(OffsetGridError::config(format!(
            "region size must be non-zero, got {}x{}",
            width, height
        )));
    }
    if bounds.south > bounds.north
        || !(-90.0..=90.0).contains(&bounds.south)
        || !(-90.0..=90.0).contains(&bounds.north)
    {
        return Err(OffsetGridError::config(format!(
            "invalid region latitude range [{}, {}]",
            bounds.south, bounds.north
        )));
    }

    let lat_step = step(bounds.height(), height);
    let lon_step = step(bounds.width(), width);
    let meters_per_unit = grid.units().meters_per_unit();

    let mut data = vec![0.0f64; width * height];
    let out_of_range: usize = data
        .par_chunks_mut(width)
        .enumerate()
        .map(|(row, out)| {
            let lat = (bounds.north - row as f64 * lat_step).clamp(-90.0, 90.0);
            let mut missed = 0;

            for (col, value) in out.iter_mut().enumerate() {
                let lon = normalize_longitude(bounds.west + col as f64 * lon_step);
                let s = match GeoCoordinate::new(lat, lon) {
                    Ok(coord) => sample(grid, coord),
                    Err(_) => {
                        missed += 1;
                        continue;
                    }
                };
                if s.is_out_of_range() {
                    missed += 1;
                } else {
                    *value = s.value * meters_per_unit;
                }
            }

            missed
        })
        .sum();

    debug!(
        width,
        height,
        out_of_range,
        "Sampled offset region"
    );

    Ok(RegionSamples {
        data,
        width,
        height,
        bounds: *bounds,
        out_of_range,
    })
}

fn step(extent: f64, count: usize) -> f64 {
    if count > 1 {
        extent / (count - 1) as f64
    } else {
        0.0
    }
}
