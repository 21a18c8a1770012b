//! Tests for coordinate parsing and grid geometry.

use geoid_common::grid::grids;
use geoid_common::{CoordinateError, GeoCoordinate, GridSpec};

// ============================================================================
// Coordinate parsing
// ============================================================================

#[test]
fn test_parse_coordinate() {
    let coord: GeoCoordinate = "35.25,-97.5".parse().unwrap();
    assert_eq!(coord.lat(), 35.25);
    assert_eq!(coord.lon(), -97.5);
    assert_eq!(coord.normalized_longitude(), 262.5);
}

#[test]
fn test_parse_coordinate_with_spaces() {
    let coord: GeoCoordinate = " -45.0 , 359.75 ".parse().unwrap();
    assert_eq!(coord.lat(), -45.0);
    assert_eq!(coord.lon(), 359.75);
}

#[test]
fn test_parse_coordinate_too_few_parts() {
    let result = "35.0".parse::<GeoCoordinate>();
    assert!(matches!(result, Err(CoordinateError::InvalidFormat(_))));
}

#[test]
fn test_parse_coordinate_too_many_parts() {
    let result = "35.0,10.0,5.0".parse::<GeoCoordinate>();
    assert!(matches!(result, Err(CoordinateError::InvalidFormat(_))));
}

#[test]
fn test_parse_coordinate_not_a_number() {
    let result = "north,10.0".parse::<GeoCoordinate>();
    assert_eq!(result, Err(CoordinateError::InvalidNumber("north".to_string())));
}

#[test]
fn test_parse_coordinate_out_of_range() {
    let result = "-95.0,10.0".parse::<GeoCoordinate>();
    assert_eq!(result, Err(CoordinateError::LatitudeOutOfRange(-95.0)));
}

#[test]
fn test_coordinate_serde() {
    let coord = GeoCoordinate::new(12.5, 200.0).unwrap();
    let json = serde_json::to_string(&coord).unwrap();
    assert_eq!(json, r#"{"lat":12.5,"lon":200.0}"#);
}

// ============================================================================
// Grid geometry
// ============================================================================

#[test]
fn test_vertices_round_trip_through_fractional_indices() {
    let grid = grids::egm96_half_degree();

    for &(row, col) in &[(0, 0), (1, 1), (180, 360), (360, 719), (200, 3)] {
        let v = grid.vertex(row, col).unwrap();
        assert!((grid.fractional_row(v.lat) - row as f64).abs() < 1e-9);
        assert!((grid.fractional_col(v.lon) - col as f64).abs() < 1e-9);
    }
}

#[test]
fn test_fractional_col_with_offset_origin() {
    // Grid whose first column sits at -180
    let grid = GridSpec::new(181, 360, 90.0, -180.0, 1.0);
    assert!(grid.wraps_longitude());
    assert!((grid.fractional_col(-180.0) - 0.0).abs() < 1e-9);
    assert!((grid.fractional_col(0.0) - 180.0).abs() < 1e-9);
    assert!((grid.fractional_col(179.5) - 359.5).abs() < 1e-9);
}

#[test]
fn test_flat_index_is_row_major() {
    let grid = GridSpec::new(3, 5, 90.0, 0.0, 1.0);
    assert_eq!(grid.flat_index(0, 0), 0);
    assert_eq!(grid.flat_index(0, 4), 4);
    assert_eq!(grid.flat_index(1, 0), 5);
    assert_eq!(grid.flat_index(2, 4), 14);
}
