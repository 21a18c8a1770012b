//! Sampler that memoizes lookups for repeatedly queried coordinates.

use std::sync::{Arc, Mutex, MutexGuard};

use geoid_common::GeoCoordinate;

use super::offset_cache::OffsetCache;
use crate::sampler;
use crate::types::{CacheStats, OffsetGrid, Sample, SampleStatus};

/// Shares one grid and caches samples keyed by quantized coordinate.
///
/// Tessellation revisits the same vertices every frame, which is where
/// this pays off. The lock guards only the cache; the grid is read
/// without synchronization.
pub struct CachedSampler {
    grid: Arc<OffsetGrid>,
    cache: Mutex<OffsetCache>,
}

impl CachedSampler {
    /// Wrap a grid with a cache of `capacity` entries.
    pub fn new(grid: Arc<OffsetGrid>, capacity: usize) -> Self {
        Self {
            grid,
            cache: Mutex::new(OffsetCache::new(capacity)),
        }
    }

    /// The underlying grid.
    pub fn grid(&self) -> &Arc<OffsetGrid> {
        &self.grid
    }

    /// Sample in raw grid units, consulting the cache first.
    pub fn sample(&self, coord: GeoCoordinate) -> Sample {
        let key = coord.quantized();

        if let Some(mut hit) = self.lock().get(&key) {
            // Keys are normalized, so the hit may come from another spelling
            if let SampleStatus::OutOfRange(warning) = &mut hit.status {
                warning.coordinate = coord;
            }
            return hit;
        }

        let sample = sampler::sample(&self.grid, coord);
        self.lock().insert(key, sample);
        sample
    }

    /// Sample and convert to meters.
    pub fn sample_meters(&self, coord: GeoCoordinate) -> f64 {
        self.sample(coord).meters(self.grid.units())
    }

    /// Get cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.lock().stats()
    }

    fn lock(&self) -> MutexGuard<'_, OffsetCache> {
        // A panic while holding the lock cannot leave the cache inconsistent
        self.cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GridFormat, OffsetUnits};
    use geoid_common::GridSpec;

    fn grid() -> Arc<OffsetGrid> {
        let format = GridFormat::new(GridSpec::new(2, 2, 1.0, 0.0, 1.0), OffsetUnits::Centimeters);
        Arc::new(OffsetGrid::new(format, vec![0, 100, 200, 300]).unwrap())
    }

    #[test]
    fn test_cached_matches_direct() {
        let grid = grid();
        let sampler = CachedSampler::new(grid.clone(), 8);
        let coord = GeoCoordinate::new(0.5, 0.5).unwrap();

        let first = sampler.sample(coord);
        let second = sampler.sample(coord);

        assert_eq!(first, grid.sample(coord));
        assert_eq!(first, second);
        assert!((sampler.sample_meters(coord) - 1.5).abs() < 1e-9);

        let stats = sampler.stats();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 2);
    }

    #[test]
    fn test_out_of_range_hit_reports_current_coordinate() {
        let sampler = CachedSampler::new(grid(), 8);
        let west = GeoCoordinate::new(0.5, -90.0).unwrap();
        let east = GeoCoordinate::new(0.5, 270.0).unwrap();

        let first = sampler.sample(west);
        let second = sampler.sample(east);

        assert_eq!(sampler.stats().hits, 1);
        assert_eq!(first.warning().unwrap().coordinate, west);
        assert_eq!(second.warning().unwrap().coordinate, east);
        assert_eq!(second.value, first.value);
    }

    #[test]
    fn test_shared_across_threads() {
        let sampler = Arc::new(CachedSampler::new(grid(), 64));

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let sampler = sampler.clone();
                std::thread::spawn(move || {
                    let coord = GeoCoordinate::new(0.25 * i as f64, 0.5).unwrap();
                    sampler.sample(coord).value
                })
            })
            .collect();

        for handle in handles {
            let value = handle.join().unwrap();
            assert!((0.0..=300.0).contains(&value));
        }
    }
}
