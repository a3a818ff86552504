//! Spatial reference interface
//!
//! The engine never does projection math itself; it talks to coordinate
//! systems through the `SpatialReference` trait. Handles are shared between
//! extents and rasters through `SrsRef`, a reference-counted pointer, and two
//! handles are compared by equivalence rather than identity.

use std::fmt;
use std::sync::Arc;

/// Shared handle to a spatial reference system
pub type SrsRef = Arc<dyn SpatialReference>;

/// A coordinate system that can convert coordinates to and from other systems
///
/// Implementations must be safe for concurrent read-only use: the resampler
/// calls `transform` from several worker threads at once.
pub trait SpatialReference: fmt::Debug + Send + Sync {
    /// Convert a coordinate in this system to WGS84 longitude/latitude (degrees)
    fn to_geographic(&self, x: f64, y: f64) -> Option<(f64, f64)>;

    /// Convert WGS84 longitude/latitude (degrees) to a coordinate in this system
    fn from_geographic(&self, lon: f64, lat: f64) -> Option<(f64, f64)>;

    /// Canonical definition string, used for equivalence checks
    fn definition(&self) -> String;

    /// Human readable name, for diagnostics only
    fn display_name(&self) -> String;

    /// Whether both systems describe the same coordinate space
    fn is_equivalent_to(&self, other: &dyn SpatialReference) -> bool {
        self.definition() == other.definition()
    }

    /// Transform a coordinate from this system into `target`
    ///
    /// # Arguments
    /// * `x` - X coordinate in this system's units
    /// * `y` - Y coordinate in this system's units
    /// * `target` - The system to convert into
    ///
    /// # Returns
    /// The converted coordinate, or `None` if either leg of the conversion
    /// fails
    fn transform(&self, x: f64, y: f64, target: &dyn SpatialReference) -> Option<(f64, f64)> {
        if self.is_equivalent_to(target) {
            return Some((x, y));
        }

        let (lon, lat) = self.to_geographic(x, y)?;
        target.from_geographic(lon, lat)
    }
}
