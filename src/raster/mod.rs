//! Georeferenced rasters and resampling
//!
//! Colour images and elevation grids share one `Raster` abstraction so the
//! crop and reprojection code is written once. All rasters are stored
//! south-up: row 0 is the row nearest the extent's `ymin`.

mod raster_trait;
mod image_raster;
mod height_field;
mod interpolation;
mod crop;
mod resample;
mod geo_raster;
mod elevation;
#[cfg(test)]
mod tests;

pub use self::raster_trait::Raster;
pub use self::height_field::HeightField;
pub use self::interpolation::{interpolate_height, ElevationInterpolation};
pub use self::crop::crop_raster;
pub use self::resample::{ResampleOptions, Resampler, ResamplingMode};
pub use self::geo_raster::{GeoImage, GeoRaster};
pub use self::elevation::GeoElevationGrid;
