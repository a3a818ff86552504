//! Reading and writing georeferenced images
//!
//! Image files are stored north-up (first row at the top) while rasters in
//! this crate are south-up, so rows are flipped on the way in and out.

use std::path::Path;

use image::imageops;
use image::RgbaImage;
use log::info;

use crate::coordinate::GeoExtent;
use crate::errors::WarpResult;
use crate::raster::GeoImage;

/// Load an image file as a south-up RGBA raster
///
/// # Arguments
/// * `path` - Any format the `image` crate can decode
/// * `extent` - Extent covered by the image
pub fn load_geo_image<P: AsRef<Path>>(path: P, extent: GeoExtent) -> WarpResult<GeoImage> {
    let path = path.as_ref();
    let mut rgba = image::open(path)?.to_rgba8();
    imageops::flip_vertical_in_place(&mut rgba);
    info!("Loaded {}x{} image from {}", rgba.width(), rgba.height(), path.display());
    Ok(GeoImage::new(rgba, extent))
}

/// Write a south-up RGBA raster as a north-up image file
///
/// The output format follows the file extension.
pub fn save_image<P: AsRef<Path>>(image: &RgbaImage, path: P) -> WarpResult<()> {
    let path = path.as_ref();
    let north_up = imageops::flip_vertical(image);
    north_up.save(path)?;
    info!("Saved {}x{} image to {}", image.width(), image.height(), path.display());
    Ok(())
}
