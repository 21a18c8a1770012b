//! Bilinear interpolation over raw offset samples.

/// Fractional index distance below which a coordinate counts as sitting on
/// a grid line.
pub const VERTEX_TOLERANCE: f64 = 1e-9;

/// Result of interpolating at a fractional grid position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interpolated {
    pub value: f64,
    /// True when both indices landed on grid lines and no blending happened.
    pub exact: bool,
}

/// Bilinear interpolation.
///
/// `x` is the fractional column and `y` the fractional row; both must
/// already lie inside the grid (`0..=columns-1`, `0..=rows-1`), except that
/// `x` may reach up to `columns` when `wrap` is set, in which case the
/// last column blends into column 0.
pub fn bilinear_interpolate(
    data: &[i16],
    columns: usize,
    rows: usize,
    x: f64,
    y: f64,
    wrap: bool,
) -> Interpolated {
    let x = snap_to_grid_line(x);
    let y = snap_to_grid_line(y);

    let mut x0 = x.floor() as usize;
    let y0 = (y.floor() as usize).min(rows - 1);
    let mut xf = x - x0 as f64;
    let yf = y - y0 as f64;

    if x0 >= columns {
        // Snapped onto the seam of a wrapping grid
        x0 = if wrap { 0 } else { columns - 1 };
        xf = 0.0;
    }

    let x1 = if x0 + 1 < columns {
        x0 + 1
    } else if wrap {
        0
    } else {
        x0
    };
    let y1 = (y0 + 1).min(rows - 1);

    let at = |row: usize, col: usize| data[row * columns + col] as f64;

    if xf == 0.0 && yf == 0.0 {
        return Interpolated {
            value: at(y0, x0),
            exact: true,
        };
    }

    let v00 = at(y0, x0);
    let v10 = at(y0, x1);
    let v01 = at(y1, x0);
    let v11 = at(y1, x1);

    // Bilinear interpolation formula
    let top = v00 * (1.0 - xf) + v10 * xf;
    let bottom = v01 * (1.0 - xf) + v11 * xf;

    Interpolated {
        value: top * (1.0 - yf) + bottom * yf,
        exact: false,
    }
}

/// Round an index onto the nearest grid line when it is within tolerance.
fn snap_to_grid_line(v: f64) -> f64 {
    let rounded = v.round();
    if (v - rounded).abs() < VERTEX_TOLERANCE {
        rounded
    } else {
        v
    }
}
