//! Geoid offset grid loading and sampling.
//!
//! This crate reads EGM96-style geoid offset grids (headerless files of
//! signed 16-bit big-endian samples) and answers offset queries at
//! arbitrary coordinates by bilinear interpolation.
//!
//! # Architecture
//!
//! ```text
//! loader::load_with_format(path, format)
//!      │
//!      ├─► Check file length == rows × columns × 2
//!      │
//!      └─► Decode i16 samples into OffsetGrid (immutable)
//!               │
//!               ├─► sampler::sample(coord)      single point, raw units
//!               ├─► region::sample_region(...)  lattice, meters, parallel
//!               └─► CachedSampler               LRU over repeat queries
//! ```
//!
//! # Example
//!
//! ```ignore
//! use offset_grid::{load, GeoCoordinate};
//!
//! let grid = load("config/EGM96.dat")?;
//! let sample = grid.sample(GeoCoordinate::new(27.9881, 86.9250)?);
//! println!("N = {:.2} m", sample.meters(grid.units()));
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod interpolation;
pub mod loader;
pub mod region;
pub mod sampler;
pub mod types;

// Re-export commonly used types at crate root
pub use cache::{CachedSampler, OffsetCache};
pub use config::{GridFormat, OffsetUnits};
pub use error::{OffsetGridError, Result};
pub use geoid_common::{GeoBounds, GeoCoordinate, GridSpec};
pub use loader::{from_bytes, load, load_with_format};
pub use region::sample_region;
pub use sampler::{ellipsoidal_height, orthometric_height, sample, sample_or};
pub use types::{
    CacheStats, GridStats, OffsetGrid, OutOfRangeWarning, RegionSamples, Sample, SampleStatus,
};
