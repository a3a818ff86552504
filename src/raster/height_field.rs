//! Regular grid of elevation values

use super::interpolation::{interpolate_height, ElevationInterpolation};
use super::raster_trait::Raster;
use crate::coordinate::Point;
use crate::errors::{WarpError, WarpResult};

/// Elevation samples on a regular grid
///
/// Heights are stored row-major with row 0 at the southern edge. The grid
/// node `(col, row)` sits at `origin + (col * x_interval, row * y_interval)`.
#[derive(Debug, Clone, PartialEq)]
pub struct HeightField {
    columns: u32,
    rows: u32,
    heights: Vec<f32>,
    origin: Point,
    x_interval: f64,
    y_interval: f64,
    border_width: u32,
}

impl HeightField {
    /// Create a flat height field with unit spacing at the origin
    pub fn new(columns: u32, rows: u32) -> Self {
        HeightField {
            columns,
            rows,
            heights: vec![0.0; columns as usize * rows as usize],
            origin: Point::new(0.0, 0.0),
            x_interval: 1.0,
            y_interval: 1.0,
            border_width: 0,
        }
    }

    /// Create a height field from row-major heights
    ///
    /// # Arguments
    /// * `columns` - Number of columns
    /// * `rows` - Number of rows
    /// * `heights` - Exactly `columns * rows` values, southern row first
    pub fn from_heights(columns: u32, rows: u32, heights: Vec<f32>) -> WarpResult<Self> {
        let expected = columns as usize * rows as usize;
        if heights.len() != expected {
            return Err(WarpError::ParseError(format!(
                "Height field of {}x{} needs {} values, got {}",
                columns, rows, expected, heights.len())));
        }

        let mut field = HeightField::new(columns, rows);
        field.heights = heights;
        Ok(field)
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn heights(&self) -> &[f32] {
        &self.heights
    }

    /// Height at a grid node
    pub fn get_height(&self, col: u32, row: u32) -> f32 {
        self.heights[self.index(col, row)]
    }

    /// Set the height at a grid node
    pub fn set_height(&mut self, col: u32, row: u32, value: f32) {
        let index = self.index(col, row);
        self.heights[index] = value;
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn set_origin(&mut self, origin: Point) {
        self.origin = origin;
    }

    pub fn x_interval(&self) -> f64 {
        self.x_interval
    }

    pub fn set_x_interval(&mut self, interval: f64) {
        self.x_interval = interval;
    }

    pub fn y_interval(&self) -> f64 {
        self.y_interval
    }

    pub fn set_y_interval(&mut self, interval: f64) {
        self.y_interval = interval;
    }

    /// Number of skirt cells around the grid (always 0 for loaded grids)
    pub fn border_width(&self) -> u32 {
        self.border_width
    }

    pub fn set_border_width(&mut self, width: u32) {
        self.border_width = width;
    }

    /// Height at a location in the grid's own coordinate units
    ///
    /// Locations outside the grid are clamped to the nearest edge node.
    pub fn height_at_location(&self, x: f64, y: f64, interpolation: ElevationInterpolation) -> f32 {
        let col = (x - self.origin.x) / self.x_interval;
        let row = (y - self.origin.y) / self.y_interval;
        interpolate_height(self, col, row, interpolation)
    }

    fn index(&self, col: u32, row: u32) -> usize {
        row as usize * self.columns as usize + col as usize
    }
}

impl Raster for HeightField {
    type Sample = f32;

    fn width(&self) -> u32 {
        self.columns
    }

    fn height(&self) -> u32 {
        self.rows
    }

    fn get_sample(&self, col: u32, row: u32) -> f32 {
        self.get_height(col, row)
    }

    fn empty_sample() -> f32 {
        0.0
    }

    fn blend(samples: &[f32; 4], weights: &[f64; 4]) -> f32 {
        samples.iter()
            .zip(weights)
            .map(|(height, weight)| *height as f64 * weight)
            .sum::<f64>() as f32
    }

    fn from_samples(width: u32, height: u32, mut samples: Vec<f32>) -> Self {
        samples.resize(width as usize * height as usize, Self::empty_sample());
        let mut field = HeightField::new(width, height);
        field.heights = samples;
        field
    }
}
