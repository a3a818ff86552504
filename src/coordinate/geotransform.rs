//! Linear mapping between raster pixels and coordinates
//!
//! Rasters in this crate are stored south-up: column 0 lies at `xmin` and
//! row 0 at `ymin`. Samples are pixel-is-point nodes sitting on both extent
//! edges, so the spacing is `width / (cols - 1)`. Cropping, resampling and
//! elevation grids all read a raster through this one registration.

use super::extent::GeoExtent;
use super::point::Point;

/// Axis-aligned geotransform (no rotation terms)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoTransform {
    /// X coordinate of pixel (0, 0)
    pub origin_x: f64,
    /// Y coordinate of pixel (0, 0)
    pub origin_y: f64,
    /// Coordinate units per column
    pub pixel_width: f64,
    /// Coordinate units per row
    pub pixel_height: f64,
}

impl GeoTransform {
    /// Create a geotransform from its coefficients
    pub fn new(origin_x: f64, origin_y: f64, pixel_width: f64, pixel_height: f64) -> Self {
        GeoTransform {
            origin_x,
            origin_y,
            pixel_width,
            pixel_height,
        }
    }

    /// Pixel-is-point registration of a `cols` x `rows` grid over `extent`
    ///
    /// A grid with a single column or row spans the whole extent with its
    /// one node spacing.
    pub fn grid(extent: &GeoExtent, cols: u32, rows: u32) -> Self {
        GeoTransform::new(
            extent.x_min(),
            extent.y_min(),
            extent.width() / cols.saturating_sub(1).max(1) as f64,
            extent.height() / rows.saturating_sub(1).max(1) as f64,
        )
    }

    /// Coordinate of a (fractional) pixel position
    pub fn pixel_to_geo(&self, px: f64, py: f64) -> Point {
        Point::new(
            self.origin_x + px * self.pixel_width,
            self.origin_y + py * self.pixel_height,
        )
    }

    /// Fractional pixel position of a coordinate
    pub fn geo_to_pixel(&self, x: f64, y: f64) -> Point {
        Point::new(
            (x - self.origin_x) / self.pixel_width,
            (y - self.origin_y) / self.pixel_height,
        )
    }

    /// GDAL-ordered coefficients for the north-up view of the grid
    ///
    /// The coefficients locate the top-left node, as GDAL does for rasters
    /// tagged `AREA_OR_POINT=Point`.
    ///
    /// # Arguments
    /// * `rows` - Raster height in samples, needed to locate the top row
    ///
    /// # Returns
    /// `[top_left_x, pixel_width, 0, top_left_y, 0, -pixel_height]`
    pub fn to_gdal(&self, rows: u32) -> [f64; 6] {
        [
            self.origin_x,
            self.pixel_width,
            0.0,
            self.origin_y + rows.saturating_sub(1) as f64 * self.pixel_height,
            0.0,
            -self.pixel_height,
        ]
    }
}
