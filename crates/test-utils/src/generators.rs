//! Generators for synthetic offset grids and their on-disk encoding.

use std::path::{Path, PathBuf};

/// Creates a grid with predictable values.
///
/// Each cell value is `col * 100 + row`, so a cell can be identified from
/// its value. Stays inside `i16` for grids up to 300 columns x 100 rows.
///
/// # Example
///
/// ```
/// use test_utils::create_test_grid;
///
/// let grid = create_test_grid(5, 10);
/// assert_eq!(grid.len(), 50);
/// assert_eq!(grid[1], 100); // row=0, col=1
/// assert_eq!(grid[10], 1);  // row=1, col=0
/// ```
pub fn create_test_grid(rows: usize, columns: usize) -> Vec<i16> {
    let mut data = Vec::with_capacity(rows * columns);
    for row in 0..rows {
        for col in 0..columns {
            data.push((col * 100 + row) as i16);
        }
    }
    data
}

/// Creates a smooth, geoid-like field in centimeters.
///
/// Values stay within roughly ±100 m, the range of real EGM96 offsets, and
/// vary with both latitude and longitude so interpolation is exercised on
/// every axis.
pub fn create_geoid_like_grid(rows: usize, columns: usize) -> Vec<i16> {
    let mut data = Vec::with_capacity(rows * columns);
    for row in 0..rows {
        let lat = std::f64::consts::PI * row as f64 / rows.max(2).saturating_sub(1) as f64;
        for col in 0..columns {
            let lon = 2.0 * std::f64::consts::PI * col as f64 / columns.max(1) as f64;
            let cm = 6000.0 * lat.sin() * (2.0 * lon).cos() + 3000.0 * (3.0 * lon).sin();
            data.push(cm.round() as i16);
        }
    }
    data
}

/// Encodes samples as big-endian 16-bit integers, the on-disk grid layout.
pub fn encode_be_i16(values: &[i16]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_be_bytes()).collect()
}

/// Writes samples as a grid file named `name` inside `dir`.
pub fn write_grid_file(dir: &Path, name: &str, values: &[i16]) -> PathBuf {
    write_raw_file(dir, name, &encode_be_i16(values))
}

/// Writes arbitrary bytes, for building malformed grid files.
pub fn write_raw_file(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, bytes).expect("Failed to write test grid file");
    path
}
