//! Geographic bounding boxes.

use serde::{Deserialize, Serialize};

/// A latitude/longitude box in degrees.
///
/// `west` may be greater than `east` when the box crosses the
/// antimeridian (or the 0/360 seam).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl GeoBounds {
    /// Create a new bounding box from its edges.
    pub fn new(south: f64, west: f64, north: f64, east: f64) -> Self {
        Self {
            south,
            west,
            north,
            east,
        }
    }

    /// Whole-globe bounds.
    pub fn global() -> Self {
        Self::new(-90.0, -180.0, 90.0, 180.0)
    }

    /// Parse a "south,west,north,east" string.
    pub fn from_str_degrees(s: &str) -> Result<Self, BoundsParseError> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(BoundsParseError::InvalidFormat(s.to_string()));
        }

        let mut edges = [0.0f64; 4];
        for (edge, part) in edges.iter_mut().zip(&parts) {
            *edge = part
                .parse()
                .map_err(|_| BoundsParseError::InvalidNumber(part.to_string()))?;
        }

        let bounds = Self::new(edges[0], edges[1], edges[2], edges[3]);
        if bounds.south > bounds.north {
            return Err(BoundsParseError::Inverted(s.to_string()));
        }
        if !(-90.0..=90.0).contains(&bounds.south) || !(-90.0..=90.0).contains(&bounds.north) {
            return Err(BoundsParseError::InvalidFormat(s.to_string()));
        }

        Ok(bounds)
    }

    /// Latitude extent in degrees.
    pub fn height(&self) -> f64 {
        self.north - self.south
    }

    /// Longitude extent in degrees, accounting for seam crossing.
    pub fn width(&self) -> f64 {
        if self.east >= self.west {
            self.east - self.west
        } else {
            self.east + 360.0 - self.west
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BoundsParseError {
    #[error("Invalid bounds format: {0}. Expected 'south,west,north,east'")]
    InvalidFormat(String),

    #[error("Invalid number in bounds: {0}")]
    InvalidNumber(String),

    #[error("South edge is north of north edge: {0}")]
    Inverted(String),
}
