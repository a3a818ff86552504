pub mod errors;
pub mod coordinate;
pub mod raster;
pub mod config;
pub mod utils;
pub mod commands;
pub mod api;

pub use crate::api::RasterWarp;
pub use crate::config::WarpConfig;
pub use crate::errors::{WarpError, WarpResult};

pub use coordinate::{GeoExtent, GeoTransform, Point, SpatialReference, SrsRef, SrsRegistry};
pub use raster::{ElevationInterpolation, GeoElevationGrid, GeoImage, GeoRaster, HeightField, Raster,
                 ResampleOptions, Resampler, ResamplingMode};
