//! Georeferenced elevation grid with point queries

use log::debug;

use super::height_field::HeightField;
use super::interpolation::ElevationInterpolation;
use super::raster_trait::Raster;
use crate::coordinate::{GeoExtent, GeoTransform, Point, SpatialReference, SrsRef};

/// Elevation grid covering an extent, queried in any spatial reference
///
/// Grid nodes sit on the extent edges: the first column lies on `xmin`
/// and the last on `xmax`.
#[derive(Debug, Clone)]
pub struct GeoElevationGrid {
    heights: HeightField,
    extent: GeoExtent,
}

impl GeoElevationGrid {
    /// Georeference a height field
    ///
    /// The field's origin and node intervals are set from the extent. A
    /// field with a single column (or row) uses the full extent width
    /// (or height) as its interval.
    pub fn new(mut heights: HeightField, extent: GeoExtent) -> Self {
        let grid = GeoTransform::grid(&extent, heights.columns(), heights.rows());
        heights.set_origin(Point::new(extent.x_min(), extent.y_min()));
        heights.set_x_interval(grid.pixel_width);
        heights.set_y_interval(grid.pixel_height);
        heights.set_border_width(0);

        GeoElevationGrid { heights, extent }
    }

    pub fn height_field(&self) -> &HeightField {
        &self.heights
    }

    pub fn extent(&self) -> &GeoExtent {
        &self.extent
    }

    pub fn srs(&self) -> Option<&SrsRef> {
        self.extent.srs()
    }

    /// Elevation at a point given in `srs`
    ///
    /// # Arguments
    /// * `srs` - Spatial reference of the query point
    /// * `x`, `y` - Query point
    /// * `interpolation` - How to combine the surrounding grid nodes
    ///
    /// # Returns
    /// The elevation, or `None` if the point lies outside the grid or
    /// cannot be transformed into the grid's spatial reference
    pub fn get_elevation(
        &self,
        srs: &dyn SpatialReference,
        x: f64,
        y: f64,
        interpolation: ElevationInterpolation,
    ) -> Option<f32> {
        let own_srs = self.extent.srs()?;
        if !self.extent.is_valid() || self.heights.is_empty() {
            return None;
        }

        let (local_x, local_y) = if srs.is_equivalent_to(own_srs.as_ref()) {
            (x, y)
        } else {
            match srs.transform(x, y, own_srs.as_ref()) {
                Some(local) => local,
                None => {
                    debug!("Elevation query ({}, {}) could not be transformed into {}",
                           x, y, own_srs.display_name());
                    return None;
                }
            }
        };

        if !self.extent.contains(own_srs.as_ref(), local_x, local_y) {
            return None;
        }

        Some(self.heights.height_at_location(local_x, local_y, interpolation))
    }
}
