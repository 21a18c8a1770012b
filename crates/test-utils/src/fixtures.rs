//! Common test fixtures for offset grid tests.

/// The 4x4 toy grid: a block of 100s ringed by 0s.
pub mod toy {
    use geoid_common::GridSpec;

    #[rustfmt::skip]
    pub const VALUES: [[i16; 4]; 4] = [
        [0,   0,   0, 0],
        [0, 100, 100, 0],
        [0, 100, 100, 0],
        [0,   0,   0, 0],
    ];

    /// 1° spacing from (90, 0); rows cover 90..87, columns 0..3.
    pub fn spec() -> GridSpec {
        GridSpec::new(4, 4, 90.0, 0.0, 1.0)
    }

    /// Row-major samples.
    pub fn values() -> Vec<i16> {
        VALUES.iter().flatten().copied().collect()
    }

    /// Centre of the "100" block (between rows 1-2 and columns 1-2).
    pub const BLOCK_CENTER: (f64, f64) = (88.5, 1.5);

    /// Halfway between row 0 (a 0) and row 1 (a 100) on column 1.
    pub const HALFWAY_EDGE: (f64, f64) = (89.5, 1.0);
}

/// Common grid layouts for testing.
pub mod grid {
    use geoid_common::GridSpec;

    /// Coarse global grid at 5° (37 x 72), wraps in longitude.
    pub fn global_5deg() -> GridSpec {
        GridSpec::new(37, 72, 90.0, 0.0, 5.0)
    }

    /// Coarse global grid at 2.5° (73 x 144), wraps in longitude.
    pub fn global_2p5deg() -> GridSpec {
        GridSpec::new(73, 144, 90.0, 0.0, 2.5)
    }

    /// Regional 10x10 grid at 1° over the northern mid-latitudes.
    pub fn regional_10x10() -> GridSpec {
        GridSpec::new(10, 10, 50.0, 10.0, 1.0)
    }
}

/// Well-known coordinates as (lat, lon) in degrees.
pub mod points {
    pub const NORTH_POLE: (f64, f64) = (90.0, 0.0);
    pub const SOUTH_POLE: (f64, f64) = (-90.0, 0.0);
    pub const MOUNT_EVEREST: (f64, f64) = (27.9881, 86.9250);
    pub const ANTIMERIDIAN_EAST: (f64, f64) = (10.0, 179.9);
    pub const ANTIMERIDIAN_WEST: (f64, f64) = (10.0, -179.9);
}
