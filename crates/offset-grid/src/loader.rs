//! Loading offset grids from headerless big-endian files.
//!
//! The file is a flat run of signed 16-bit big-endian samples in row-major
//! order. Its dimensions come from a [`GridFormat`], so the only check the
//! file itself allows is that its length is exactly `rows * columns * 2`.

use std::path::Path;
use std::time::Instant;

use bytes::{Buf, Bytes};
use tracing::{debug, info};

use crate::config::GridFormat;
use crate::error::{OffsetGridError, Result};
use crate::types::OffsetGrid;

/// Load a grid using the default EGM96 0.25° format.
pub fn load(path: impl AsRef<Path>) -> Result<OffsetGrid> {
    load_with_format(path, &GridFormat::default())
}

/// Load a grid in the given format.
///
/// The file size is checked before reading, and again on the bytes read,
/// so a truncated or oversized file never yields a partial grid.
pub fn load_with_format(path: impl AsRef<Path>, format: &GridFormat) -> Result<OffsetGrid> {
    let path = path.as_ref();
    format.validate().map_err(OffsetGridError::config)?;

    let start = Instant::now();
    let expected = format.expected_byte_len();

    let metadata = std::fs::metadata(path).map_err(|e| OffsetGridError::io(path, e))?;
    if metadata.len() != expected as u64 {
        return Err(OffsetGridError::format(expected, metadata.len() as usize));
    }

    let raw = std::fs::read(path).map_err(|e| OffsetGridError::io(path, e))?;
    debug!(path = %path.display(), bytes = raw.len(), "Read offset grid file");

    let grid = from_bytes(Bytes::from(raw), format)?;
    let stats = grid.stats();

    info!(
        path = %path.display(),
        rows = grid.rows(),
        columns = grid.columns(),
        units = %grid.units(),
        min = stats.min,
        max = stats.max,
        duration_ms = start.elapsed().as_millis() as u64,
        "Loaded geoid offset grid"
    );

    Ok(grid)
}

/// Decode a grid from an in-memory buffer.
pub fn from_bytes(mut data: Bytes, format: &GridFormat) -> Result<OffsetGrid> {
    format.validate().map_err(OffsetGridError::config)?;

    let expected = format.expected_byte_len();
    if data.len() != expected {
        return Err(OffsetGridError::format(expected, data.len()));
    }

    let mut values = Vec::with_capacity(format.spec.expected_len());
    while data.has_remaining() {
        values.push(data.get_i16());
    }

    OffsetGrid::new(*format, values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OffsetUnits;
    use geoid_common::GridSpec;

    fn format_2x2() -> GridFormat {
        GridFormat::new(GridSpec::new(2, 2, 90.0, 0.0, 1.0), OffsetUnits::Centimeters)
    }

    #[test]
    fn test_decodes_big_endian() {
        let data = Bytes::from_static(&[0x00, 0x01, 0xFF, 0xFF, 0x7F, 0xFF, 0x80, 0x00]);
        let grid = from_bytes(data, &format_2x2()).unwrap();
        assert_eq!(grid.values(), &[1, -1, i16::MAX, i16::MIN]);
    }

    #[test]
    fn test_rejects_short_buffer() {
        let data = Bytes::from_static(&[0, 1, 0, 2, 0, 3, 0]);
        let err = from_bytes(data, &format_2x2()).unwrap_err();
        assert!(matches!(err, OffsetGridError::Format { expected: 8, actual: 7 }));
    }

    #[test]
    fn test_rejects_long_buffer() {
        let data = Bytes::from(vec![0u8; 10]);
        let err = from_bytes(data, &format_2x2()).unwrap_err();
        assert!(err.is_format());
    }

    #[test]
    fn test_rejects_invalid_format() {
        let format = GridFormat::new(GridSpec::new(0, 2, 90.0, 0.0, 1.0), OffsetUnits::Meters);
        let err = from_bytes(Bytes::new(), &format).unwrap_err();
        assert!(matches!(err, OffsetGridError::Config(_)));
    }

    #[test]
    fn test_rejects_overflowing_dimensions() {
        let points = GridSpec::new(usize::MAX / 2, 4, 90.0, 0.0, 1e-300);
        let err = from_bytes(Bytes::new(), &GridFormat::new(points, OffsetUnits::Meters))
            .unwrap_err();
        assert!(matches!(err, OffsetGridError::Config(_)));

        // Point count fits but the byte length does not
        let bytes = GridSpec::new(usize::MAX / 2 + 1, 1, 90.0, 0.0, 1e-300);
        let err = from_bytes(Bytes::new(), &GridFormat::new(bytes, OffsetUnits::Meters))
            .unwrap_err();
        assert!(matches!(err, OffsetGridError::Config(_)));

        let err = load_with_format("/nonexistent/huge.dat", &GridFormat::new(bytes, OffsetUnits::Meters))
            .unwrap_err();
        assert!(matches!(err, OffsetGridError::Config(_)));
    }
}
