//! Common geographic types shared across the geoid-offsets workspace.

pub mod bounds;
pub mod coord;
pub mod error;
pub mod grid;

pub use bounds::{BoundsParseError, GeoBounds};
pub use coord::GeoCoordinate;
pub use error::{CoordinateError, CoordinateResult};
pub use grid::{GridSpec, GridVertex};
