//! Coordinate handling for geospatial data
//!
//! This module provides spatial references, extents and the linear
//! pixel/coordinate mapping used by the raster operations.

mod point;
mod transform;
mod crs;
mod srs;
mod registry;
mod extent;
mod geotransform;
#[cfg(test)]
pub(crate) mod tests;

// Re-export key types
pub use self::point::Point;
pub use self::transform::CoordinateTransformer;
pub use self::crs::{CoordinateSystem, LocalGrid};
pub use self::srs::{SpatialReference, SrsRef};
pub use self::registry::{SrsDefinitions, SrsRegistry};
pub use self::extent::GeoExtent;
pub use self::geotransform::GeoTransform;
