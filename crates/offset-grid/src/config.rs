//! Format configuration for offset grid files.

use std::path::Path;

use geoid_common::grid::{grids, GridSpec};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{OffsetGridError, Result};

/// Bytes per stored sample (signed 16-bit).
pub const SAMPLE_SIZE_BYTES: usize = 2;

/// Layout and units of an offset grid file.
///
/// The file itself carries no header, so everything needed to decode it
/// lives here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridFormat {
    /// Grid geometry.
    pub spec: GridSpec,

    /// Units of the raw stored samples.
    #[serde(default)]
    pub units: OffsetUnits,
}

impl Default for GridFormat {
    fn default() -> Self {
        Self {
            spec: grids::egm96_quarter_degree(),
            units: OffsetUnits::Centimeters,
        }
    }
}

impl GridFormat {
    /// Create a format from a grid spec and units.
    pub fn new(spec: GridSpec, units: OffsetUnits) -> Self {
        Self { spec, units }
    }

    /// Load configuration from environment variables on top of the defaults.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Override fields from environment variables, keeping current values
    /// for anything unset or unparsable.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(val) = std::env::var("EGM_GRID_ROWS") {
            if let Ok(rows) = val.parse() {
                self.spec.rows = rows;
            }
        }

        if let Ok(val) = std::env::var("EGM_GRID_COLUMNS") {
            if let Ok(columns) = val.parse() {
                self.spec.columns = columns;
            }
        }

        if let Ok(val) = std::env::var("EGM_GRID_SPACING") {
            if let Ok(spacing) = val.parse() {
                self.spec.spacing = spacing;
            }
        }

        if let Ok(val) = std::env::var("EGM_GRID_ORIGIN_LAT") {
            if let Ok(lat) = val.parse() {
                self.spec.origin_lat = lat;
            }
        }

        if let Ok(val) = std::env::var("EGM_GRID_ORIGIN_LON") {
            if let Ok(lon) = val.parse() {
                self.spec.origin_lon = lon;
            }
        }

        if let Ok(val) = std::env::var("EGM_GRID_UNITS") {
            match OffsetUnits::parse(&val) {
                Some(units) => self.units = units,
                None => warn!(units = %val, "Ignoring unknown EGM_GRID_UNITS"),
            }
        }

        self
    }

    /// Load a format description from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents =
            std::fs::read_to_string(path).map_err(|e| OffsetGridError::io(path, e))?;
        let format: GridFormat = serde_yaml::from_str(&contents)?;
        format.validate().map_err(OffsetGridError::config)?;
        Ok(format)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> std::result::Result<(), String> {
        self.spec.validate()?;
        if self.spec.expected_len().checked_mul(SAMPLE_SIZE_BYTES).is_none() {
            return Err(format!(
                "{}x{} grid exceeds the addressable file size",
                self.spec.rows, self.spec.columns
            ));
        }
        Ok(())
    }

    /// Number of bytes a file in this format must contain. Only meaningful
    /// for a validated format.
    pub fn expected_byte_len(&self) -> usize {
        self.spec.expected_len().saturating_mul(SAMPLE_SIZE_BYTES)
    }
}

/// Units of the raw 16-bit samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OffsetUnits {
    /// Centimeters (EGM96.dat).
    #[default]
    Centimeters,
    /// Decimeters.
    Decimeters,
    /// Meters.
    Meters,
}

impl OffsetUnits {
    /// Parse from string (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "cm" | "centimeters" => Some(Self::Centimeters),
            "dm" | "decimeters" => Some(Self::Decimeters),
            "m" | "meters" => Some(Self::Meters),
            _ => None,
        }
    }

    /// Multiplier converting one raw unit into meters.
    pub fn meters_per_unit(&self) -> f64 {
        match self {
            Self::Centimeters => 0.01,
            Self::Decimeters => 0.1,
            Self::Meters => 1.0,
        }
    }

    /// Get the unit name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Centimeters => "centimeters",
            Self::Decimeters => "decimeters",
            Self::Meters => "meters",
        }
    }
}

impl std::fmt::Display for OffsetUnits {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
