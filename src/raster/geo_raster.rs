//! Rasters tagged with the extent they cover

use image::RgbaImage;
use log::{debug, warn};

use super::crop::crop_raster;
use super::raster_trait::Raster;
use super::resample::Resampler;
use crate::coordinate::{GeoExtent, GeoTransform, SrsRef};

/// A raster together with the geographic extent it covers
///
/// The raster's row 0 lies along the extent's southern edge.
#[derive(Debug, Clone)]
pub struct GeoRaster<R: Raster> {
    raster: R,
    extent: GeoExtent,
}

/// Georeferenced RGBA image
pub type GeoImage = GeoRaster<RgbaImage>;

impl<R: Raster> GeoRaster<R> {
    /// Pair a raster with the extent it covers
    pub fn new(raster: R, extent: GeoExtent) -> Self {
        GeoRaster { raster, extent }
    }

    pub fn raster(&self) -> &R {
        &self.raster
    }

    pub fn extent(&self) -> &GeoExtent {
        &self.extent
    }

    pub fn srs(&self) -> Option<&SrsRef> {
        self.extent.srs()
    }

    /// Geotransform placing the raster's samples inside its extent
    pub fn geotransform(&self) -> GeoTransform {
        GeoTransform::grid(&self.extent, self.raster.width(), self.raster.height())
    }

    /// Split into the raster and its extent
    pub fn into_parts(self) -> (R, GeoExtent) {
        (self.raster, self.extent)
    }

    /// Crop to a window in the raster's own spatial reference
    ///
    /// The result covers whole node intervals of the source, so its extent
    /// can be slightly larger than the requested window. Its samples keep
    /// their coordinates.
    ///
    /// # Returns
    /// The cropped raster, or `None` if the window does not overlap
    pub fn crop(&self, xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Option<Self> {
        crop_raster(&self.raster, &self.extent, xmin, ymin, xmax, ymax)
            .map(|(raster, extent)| GeoRaster::new(raster, extent))
    }

    /// Reproject into another spatial reference
    ///
    /// # Arguments
    /// * `to_srs` - Target spatial reference
    /// * `to_extent` - Target extent in `to_srs`; when absent, this raster's
    ///   extent transformed into `to_srs` is used
    /// * `resampler` - Output size and sampling mode
    ///
    /// # Returns
    /// The reprojected raster, or `None` when resampling is impossible. A
    /// target extent that is invalid or lies in another spatial reference
    /// also gives `None`.
    pub fn reproject(&self, to_srs: &SrsRef, to_extent: Option<&GeoExtent>, resampler: &Resampler) -> Option<Self> {
        let dest_extent = match to_extent {
            Some(extent) => extent.clone(),
            None => self.extent.transform(to_srs),
        };
        let dest_srs = match dest_extent.srs() {
            Some(srs) if dest_extent.is_valid() => srs,
            _ => {
                warn!("No valid target extent to reproject {} into {}", self.extent, to_srs.display_name());
                return None;
            },
        };
        if !dest_srs.is_equivalent_to(to_srs.as_ref()) {
            warn!("Target extent {} is not in {}", dest_extent, to_srs.display_name());
            return None;
        }

        debug!("Reprojecting {} into {}", self.extent, dest_extent);
        resampler.resample(&self.raster, &self.extent, &dest_extent)
            .map(|raster| GeoRaster::new(raster, dest_extent))
    }
}
