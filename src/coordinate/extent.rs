//! Geographic extent: a bounding rectangle tagged with a spatial reference

use std::fmt;

use log::{debug, warn};

use super::point::Point;
use super::srs::{SpatialReference, SrsRef};
use crate::errors::{WarpError, WarpResult};

/// Axis-aligned bounding rectangle in the units of its spatial reference
///
/// An extent is valid when it has a spatial reference and non-degenerate
/// bounds. Every other extent is the invalid sentinel; all invalid extents
/// compare equal. Extents are never modified in place: operations return
/// new instances.
#[derive(Debug, Clone, Default)]
pub struct GeoExtent {
    srs: Option<SrsRef>,
    xmin: f64,
    ymin: f64,
    xmax: f64,
    ymax: f64,
}

impl GeoExtent {
    /// Create a new extent
    ///
    /// # Arguments
    /// * `srs` - Spatial reference the bounds are expressed in
    /// * `xmin`, `ymin`, `xmax`, `ymax` - Bounds in `srs` units
    pub fn new(srs: SrsRef, xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Self {
        GeoExtent {
            srs: Some(srs),
            xmin,
            ymin,
            xmax,
            ymax,
        }
    }

    /// The invalid sentinel
    pub fn invalid() -> Self {
        GeoExtent::default()
    }

    /// Parse an extent from a string (format: "minx,miny,maxx,maxy")
    pub fn from_string(bbox_str: &str, srs: SrsRef) -> WarpResult<Self> {
        let parts: Vec<&str> = bbox_str.split(',').collect();
        if parts.len() != 4 {
            return Err(WarpError::ParseError(
                "Bounding box must have 4 comma-separated values".to_string()));
        }

        let mut values = [0.0; 4];
        for (value, part) in values.iter_mut().zip(&parts) {
            *value = part.trim().parse::<f64>()
                .map_err(|_| WarpError::ParseError(format!("Invalid bounding box value: {}", part.trim())))?;
        }

        let extent = GeoExtent::new(srs, values[0], values[1], values[2], values[3]);
        if !extent.is_valid() {
            return Err(WarpError::InvalidExtent(format!(
                "bounds '{}' must satisfy minx < maxx and miny < maxy", bbox_str)));
        }
        Ok(extent)
    }

    /// Whether the extent has a spatial reference and non-empty bounds
    pub fn is_valid(&self) -> bool {
        self.srs.is_some() && self.xmin < self.xmax && self.ymin < self.ymax
    }

    /// Spatial reference of the bounds, if any
    pub fn srs(&self) -> Option<&SrsRef> {
        self.srs.as_ref()
    }

    pub fn x_min(&self) -> f64 {
        self.xmin
    }

    pub fn y_min(&self) -> f64 {
        self.ymin
    }

    pub fn x_max(&self) -> f64 {
        self.xmax
    }

    pub fn y_max(&self) -> f64 {
        self.ymax
    }

    /// Get the width of the extent
    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    /// Get the height of the extent
    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }

    /// Bounds as `(xmin, ymin, xmax, ymax)`
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        (self.xmin, self.ymin, self.xmax, self.ymax)
    }

    /// Get the center point of the extent
    pub fn center(&self) -> Point {
        Point::new(
            self.xmin + self.width() / 2.0,
            self.ymin + self.height() / 2.0,
        )
    }

    /// Check whether a point lies inside the extent
    ///
    /// The point is transformed into the extent's spatial reference first
    /// when `srs` is not equivalent to it. A failed transform counts as
    /// outside. Bounds are inclusive on all four sides.
    pub fn contains(&self, srs: &dyn SpatialReference, x: f64, y: f64) -> bool {
        let own_srs = match &self.srs {
            Some(own) if self.is_valid() => own,
            _ => return false,
        };

        let (local_x, local_y) = if srs.is_equivalent_to(own_srs.as_ref()) {
            (x, y)
        } else {
            match srs.transform(x, y, own_srs.as_ref()) {
                Some(local) => local,
                None => {
                    debug!("Could not transform ({}, {}) from {} to {} for containment test",
                           x, y, srs.display_name(), own_srs.display_name());
                    return false;
                }
            }
        };

        local_x >= self.xmin && local_x <= self.xmax && local_y >= self.ymin && local_y <= self.ymax
    }

    /// Reproject the extent into another spatial reference
    ///
    /// All four corners are transformed, since a non-linear projection can
    /// skew the rectangle so that the min/max corners alone under-estimate
    /// the result. If any corner fails, the invalid sentinel is returned.
    pub fn transform(&self, to_srs: &SrsRef) -> GeoExtent {
        self.transform_densified(to_srs, 2)
    }

    /// Reproject the extent, sampling `points_per_edge` points along each edge
    ///
    /// With two points per edge (the minimum) only the corners are used.
    /// More points catch edges that bulge outwards under the projection.
    pub fn transform_densified(&self, to_srs: &SrsRef, points_per_edge: usize) -> GeoExtent {
        let from_srs = match &self.srs {
            Some(srs) if self.is_valid() => srs,
            _ => return GeoExtent::invalid(),
        };

        let points_per_edge = points_per_edge.max(2);
        let corners = [
            Point::new(self.xmin, self.ymin),
            Point::new(self.xmin, self.ymax),
            Point::new(self.xmax, self.ymax),
            Point::new(self.xmax, self.ymin),
        ];

        let mut failures = 0usize;
        let mut to_xmin = f64::INFINITY;
        let mut to_ymin = f64::INFINITY;
        let mut to_xmax = f64::NEG_INFINITY;
        let mut to_ymax = f64::NEG_INFINITY;

        for (i, start) in corners.iter().enumerate() {
            let end = corners[(i + 1) % corners.len()];
            // The end point of this edge is the start point of the next one.
            for k in 0..points_per_edge - 1 {
                let t = k as f64 / (points_per_edge - 1) as f64;
                let x = start.x + t * (end.x - start.x);
                let y = start.y + t * (end.y - start.y);

                match from_srs.transform(x, y, to_srs.as_ref()) {
                    Some((tx, ty)) => {
                        to_xmin = to_xmin.min(tx);
                        to_ymin = to_ymin.min(ty);
                        to_xmax = to_xmax.max(tx);
                        to_ymax = to_ymax.max(ty);
                    },
                    None => failures += 1,
                }
            }
        }

        if failures > 0 {
            warn!("Failed to transform an extent from {} to {} ({} of {} points failed)",
                  from_srs.display_name(), to_srs.display_name(), failures, 4 * (points_per_edge - 1));
            return GeoExtent::invalid();
        }

        debug!("Transformed extent {}, {} to {}, {}", to_xmin, to_ymin, to_xmax, to_ymax);
        GeoExtent::new(to_srs.clone(), to_xmin, to_ymin, to_xmax, to_ymax)
    }
}

impl PartialEq for GeoExtent {
    fn eq(&self, other: &Self) -> bool {
        match (self.is_valid(), other.is_valid()) {
            (false, false) => true,
            (true, true) => {
                let same_srs = match (&self.srs, &other.srs) {
                    (Some(a), Some(b)) => a.is_equivalent_to(b.as_ref()),
                    _ => false,
                };
                same_srs
                    && self.xmin == other.xmin
                    && self.ymin == other.ymin
                    && self.xmax == other.xmax
                    && self.ymax == other.ymax
            },
            _ => false,
        }
    }
}

impl fmt::Display for GeoExtent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.srs {
            Some(srs) if self.is_valid() => write!(
                f,
                "{} [{}, {}, {}, {}]",
                srs.display_name(), self.xmin, self.ymin, self.xmax, self.ymax
            ),
            _ => write!(f, "INVALID"),
        }
    }
}
