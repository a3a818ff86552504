use std::path::Path;

use log::{info, warn};

use crate::config::WarpConfig;
use crate::coordinate::{GeoExtent, SpatialReference, SrsRef, SrsRegistry};
use crate::errors::{WarpError, WarpResult};
use crate::raster::{GeoElevationGrid, GeoImage, Resampler};
use crate::utils::{ascii_grid, image_io};

/// Main interface to the rasterwarp library
///
/// Wraps the core types with configuration defaults, SRS lookup by
/// identifier and file handling, and turns empty results into errors.
pub struct RasterWarp {
    config: WarpConfig,
}

impl RasterWarp {
    /// Create a new instance
    ///
    /// Local grids from the configuration are registered with the SRS
    /// registry so they can be referred to by identifier.
    pub fn new(config: WarpConfig) -> Self {
        config.register_local_grids();
        RasterWarp { config }
    }

    /// Create an instance from a TOML configuration file
    pub fn from_config_file<P: AsRef<Path>>(path: P) -> WarpResult<Self> {
        Ok(RasterWarp::new(WarpConfig::from_file(path)?))
    }

    pub fn config(&self) -> &WarpConfig {
        &self.config
    }

    /// Resampler built from the configured options
    pub fn resampler(&self) -> Resampler {
        Resampler::new(self.config.resample)
    }

    /// Resolve a spatial reference identifier
    pub fn srs(&self, identifier: &str) -> WarpResult<SrsRef> {
        SrsRegistry::get_srs(identifier)
    }

    /// Build an extent from a "minx,miny,maxx,maxy" string
    ///
    /// # Arguments
    /// * `bbox` - Bounds string
    /// * `srs` - Identifier of the spatial reference of the bounds
    pub fn extent(&self, bbox: &str, srs: &str) -> WarpResult<GeoExtent> {
        GeoExtent::from_string(bbox, self.srs(srs)?)
    }

    /// Transform an extent into another spatial reference
    ///
    /// Uses the configured number of samples per edge.
    pub fn transform_extent(&self, extent: &GeoExtent, target_srs: &str) -> WarpResult<GeoExtent> {
        let target = self.srs(target_srs)?;
        let transformed = extent.transform_densified(&target, self.config.edge_samples);
        if !transformed.is_valid() {
            return Err(WarpError::InvalidExtent(format!(
                "{} cannot be expressed in {}", extent, target.display_name())));
        }
        Ok(transformed)
    }

    /// Reproject an image into another spatial reference
    ///
    /// # Arguments
    /// * `image` - Source image and extent
    /// * `target_srs` - Identifier of the target spatial reference
    /// * `target_extent` - Output extent in `target_srs`; defaults to the transformed
    ///   source extent
    pub fn reproject_image(
        &self,
        image: &GeoImage,
        target_srs: &str,
        target_extent: Option<&GeoExtent>,
    ) -> WarpResult<GeoImage> {
        let target = self.srs(target_srs)?;
        let dest_extent = match target_extent {
            Some(extent) if extent.srs().map_or(true, |srs| !srs.is_equivalent_to(target.as_ref())) => {
                return Err(WarpError::InvalidExtent(format!(
                    "target extent {} is not in {}", extent, target.display_name())));
            },
            Some(extent) => extent.clone(),
            None => self.transform_extent(image.extent(), target_srs)?,
        };

        image.reproject(&target, Some(&dest_extent), &self.resampler())
            .ok_or_else(|| WarpError::EmptyResult(format!(
                "Reprojecting {} into {} produced no image", image.extent(), dest_extent)))
    }

    /// Reproject an image file and write the result
    ///
    /// # Returns
    /// The extent of the written image
    pub fn reproject_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input: P,
        output: Q,
        extent: GeoExtent,
        target_srs: &str,
        target_extent: Option<&GeoExtent>,
    ) -> WarpResult<GeoExtent> {
        let source = image_io::load_geo_image(input, extent)?;
        let result = self.reproject_image(&source, target_srs, target_extent)?;
        image_io::save_image(result.raster(), output)?;
        info!("Reprojected image covers {}", result.extent());
        Ok(result.extent().clone())
    }

    /// Crop an image file to a window and write the result
    ///
    /// A window in another spatial reference is transformed into the image's
    /// spatial reference first.
    ///
    /// # Returns
    /// The extent actually covered by the written image
    pub fn crop_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input: P,
        output: Q,
        extent: GeoExtent,
        window: &GeoExtent,
    ) -> WarpResult<GeoExtent> {
        let image_srs = extent.srs().cloned()
            .ok_or_else(|| WarpError::InvalidExtent("image extent has no spatial reference".to_string()))?;
        let window = match window.srs() {
            Some(srs) if srs.is_equivalent_to(image_srs.as_ref()) => window.clone(),
            _ => window.transform_densified(&image_srs, self.config.edge_samples),
        };
        if !window.is_valid() {
            return Err(WarpError::InvalidExtent(format!("crop window {} is not usable", window)));
        }

        let source = image_io::load_geo_image(input, extent)?;
        let (xmin, ymin, xmax, ymax) = window.bounds();
        let cropped = source.crop(xmin, ymin, xmax, ymax)
            .ok_or_else(|| WarpError::EmptyResult(format!(
                "Window {} does not overlap {}", window, source.extent())))?;

        image_io::save_image(cropped.raster(), output)?;
        info!("Cropped image covers {}", cropped.extent());
        Ok(cropped.extent().clone())
    }

    /// Load an ESRI ASCII elevation grid
    pub fn load_elevation_grid<P: AsRef<Path>>(&self, path: P, srs: &str) -> WarpResult<GeoElevationGrid> {
        ascii_grid::load_elevation_grid(path, self.srs(srs)?)
    }

    /// Elevation at a point, using the configured interpolation
    ///
    /// # Returns
    /// `Ok(None)` when the point lies outside the grid or cannot be
    /// transformed into the grid's spatial reference
    pub fn elevation_at(&self, grid: &GeoElevationGrid, point_srs: &str, x: f64, y: f64) -> WarpResult<Option<f32>> {
        let srs = self.srs(point_srs)?;
        let elevation = grid.get_elevation(srs.as_ref(), x, y, self.config.interpolation);
        if elevation.is_none() {
            warn!("No elevation at ({}, {}) in {}", x, y, srs.display_name());
        }
        Ok(elevation)
    }
}

impl Default for RasterWarp {
    fn default() -> Self {
        RasterWarp::new(WarpConfig::default())
    }
}
