//! Height interpolation between grid nodes

use std::fmt;

use super::height_field::HeightField;
use crate::errors::{WarpError, WarpResult};

/// How a height is derived from the surrounding grid nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ElevationInterpolation {
    /// Value of the closest node
    Nearest,
    /// Remainder-weighted mean of the four surrounding nodes
    Average,
    /// Bilinear blend of the four surrounding nodes
    #[default]
    Bilinear,
    /// Plane through the triangle of the cell that holds the point
    Triangulate,
    /// Catmull-Rom spline through the surrounding 4x4 nodes
    Cubic,
}

impl ElevationInterpolation {
    /// Parse an interpolation name (case-insensitive)
    pub fn from_name(name: &str) -> WarpResult<Self> {
        match name.trim().to_lowercase().as_str() {
            "nearest" => Ok(ElevationInterpolation::Nearest),
            "average" => Ok(ElevationInterpolation::Average),
            "bilinear" => Ok(ElevationInterpolation::Bilinear),
            "triangulate" => Ok(ElevationInterpolation::Triangulate),
            "cubic" | "bicubic" => Ok(ElevationInterpolation::Cubic),
            other => Err(WarpError::ParseError(format!("Unknown elevation interpolation: {}", other))),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ElevationInterpolation::Nearest => "nearest",
            ElevationInterpolation::Average => "average",
            ElevationInterpolation::Bilinear => "bilinear",
            ElevationInterpolation::Triangulate => "triangulate",
            ElevationInterpolation::Cubic => "cubic",
        }
    }
}

impl fmt::Display for ElevationInterpolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Interpolate a height at a fractional grid position
///
/// # Arguments
/// * `field` - The height field to sample
/// * `col` - Fractional column (0 = first column)
/// * `row` - Fractional row (0 = southern row)
/// * `interpolation` - Interpolation method
///
/// # Returns
/// The interpolated height. Positions outside the grid are clamped to the
/// nearest edge node; an empty field yields 0.
pub fn interpolate_height(field: &HeightField, col: f64, row: f64, interpolation: ElevationInterpolation) -> f32 {
    if field.columns() == 0 || field.rows() == 0 || !col.is_finite() || !row.is_finite() {
        return 0.0;
    }

    let cell = Cell::around(field, col, row);
    match interpolation {
        ElevationInterpolation::Nearest => nearest(field, col, row),
        ElevationInterpolation::Average => average(field, &cell, col, row),
        ElevationInterpolation::Bilinear => bilinear(field, &cell, col, row),
        ElevationInterpolation::Triangulate => triangulate(field, &cell, col, row),
        ElevationInterpolation::Cubic => cubic(field, col, row),
    }
}

/// The grid cell surrounding a position, clamped to the grid
struct Cell {
    col_min: u32,
    col_max: u32,
    row_min: u32,
    row_max: u32,
}

impl Cell {
    fn around(field: &HeightField, col: f64, row: f64) -> Self {
        let last_col = field.columns() as i64 - 1;
        let last_row = field.rows() as i64 - 1;
        Cell {
            col_min: (col.floor() as i64).clamp(0, last_col) as u32,
            col_max: (col.ceil() as i64).clamp(0, last_col) as u32,
            row_min: (row.floor() as i64).clamp(0, last_row) as u32,
            row_max: (row.ceil() as i64).clamp(0, last_row) as u32,
        }
    }

    fn corners(&self, field: &HeightField) -> (f64, f64, f64, f64) {
        (
            field.get_height(self.col_min, self.row_min) as f64,
            field.get_height(self.col_max, self.row_min) as f64,
            field.get_height(self.col_min, self.row_max) as f64,
            field.get_height(self.col_max, self.row_max) as f64,
        )
    }
}

fn nearest(field: &HeightField, col: f64, row: f64) -> f32 {
    let c = (col.round() as i64).clamp(0, field.columns() as i64 - 1) as u32;
    let r = (row.round() as i64).clamp(0, field.rows() as i64 - 1) as u32;
    field.get_height(c, r)
}

fn average(field: &HeightField, cell: &Cell, col: f64, row: f64) -> f32 {
    let (ll, lr, ul, ur) = cell.corners(field);
    let x_rem = (col - cell.col_min as f64).clamp(0.0, 1.0);
    let y_rem = (row - cell.row_min as f64).clamp(0.0, 1.0);

    let w00 = (1.0 - y_rem) * (1.0 - x_rem);
    let w01 = (1.0 - y_rem) * x_rem;
    let w10 = y_rem * (1.0 - x_rem);
    let w11 = y_rem * x_rem;
    let total = w00 + w01 + w10 + w11;

    ((w00 * ll + w01 * lr + w10 * ul + w11 * ur) / total) as f32
}

fn bilinear(field: &HeightField, cell: &Cell, col: f64, row: f64) -> f32 {
    let (ll, lr, ul, ur) = cell.corners(field);
    let (c0, c1) = (cell.col_min as f64, cell.col_max as f64);
    let (r0, r1) = (cell.row_min as f64, cell.row_max as f64);

    let height = if cell.col_min == cell.col_max && cell.row_min == cell.row_max {
        ll
    } else if cell.col_min == cell.col_max {
        (r1 - row) * ll + (row - r0) * ul
    } else if cell.row_min == cell.row_max {
        (c1 - col) * ll + (col - c0) * lr
    } else {
        let bottom = (c1 - col) * ll + (col - c0) * lr;
        let top = (c1 - col) * ul + (col - c0) * ur;
        (r1 - row) * bottom + (row - r0) * top
    };
    height as f32
}

fn triangulate(field: &HeightField, cell: &Cell, col: f64, row: f64) -> f32 {
    if cell.col_min == cell.col_max || cell.row_min == cell.row_max {
        return bilinear(field, cell, col, row);
    }

    let (ll, lr, ul, ur) = cell.corners(field);
    let dx = col - cell.col_min as f64;
    let dy = row - cell.row_min as f64;

    // The cell is split along the ll-ur diagonal.
    let height = if dx > dy {
        ll + dx * (lr - ll) + dy * (ur - lr)
    } else {
        ll + dx * (ur - ul) + dy * (ul - ll)
    };
    height as f32
}

fn cubic(field: &HeightField, col: f64, row: f64) -> f32 {
    let last_col = field.columns() as i64 - 1;
    let last_row = field.rows() as i64 - 1;
    let col = col.clamp(0.0, last_col as f64);
    let row = row.clamp(0.0, last_row as f64);

    let ci = col.floor() as i64;
    let ri = row.floor() as i64;
    let tx = col - ci as f64;
    let ty = row - ri as f64;

    let mut row_values = [0.0f64; 4];
    for (j, value) in row_values.iter_mut().enumerate() {
        let r = (ri + j as i64 - 1).clamp(0, last_row) as u32;
        let mut p = [0.0f64; 4];
        for (i, node) in p.iter_mut().enumerate() {
            let c = (ci + i as i64 - 1).clamp(0, last_col) as u32;
            *node = field.get_height(c, r) as f64;
        }
        *value = catmull_rom(p, tx);
    }

    catmull_rom(row_values, ty) as f32
}

/// Catmull-Rom spline between `p[1]` and `p[2]`
fn catmull_rom(p: [f64; 4], t: f64) -> f64 {
    let t2 = t * t;
    let t3 = t2 * t;

    let a = -0.5 * p[0] + 1.5 * p[1] - 1.5 * p[2] + 0.5 * p[3];
    let b = p[0] - 2.5 * p[1] + 2.0 * p[2] - 0.5 * p[3];
    let c = -0.5 * p[0] + 0.5 * p[2];

    a * t3 + b * t2 + c * t + p[1]
}
