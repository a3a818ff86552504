//! Cropping a raster to a coordinate window

use log::debug;

use super::raster_trait::Raster;
use crate::coordinate::{GeoExtent, GeoTransform};

/// Cut the samples covering a window out of a raster
///
/// The window is expressed in the extent's own units. Samples are nodes of
/// the raster's grid geotransform, the same registration the resampler and
/// elevation grids read through. Every node interval touched by the window
/// is kept, so the achieved bounds snap outwards to whole nodes and may be
/// slightly larger than requested. A coordinate maps to the same source
/// sample before and after cropping.
///
/// # Arguments
/// * `raster` - Source raster, row 0 at `extent.y_min()`
/// * `extent` - Extent covered by the source raster
/// * `xmin`, `ymin`, `xmax`, `ymax` - Requested window
///
/// # Returns
/// The cropped raster and the extent it actually covers, or `None` when
/// the window does not overlap the raster
pub fn crop_raster<R: Raster>(
    raster: &R,
    extent: &GeoExtent,
    xmin: f64,
    ymin: f64,
    xmax: f64,
    ymax: f64,
) -> Option<(R, GeoExtent)> {
    let srs = match extent.srs() {
        Some(srs) if extent.is_valid() => srs,
        _ => return None,
    };
    if raster.is_empty() || !(xmin < xmax && ymin < ymax) {
        return None;
    }

    // Windows touching the raster only along an edge hold no samples.
    if xmin >= extent.x_max() || xmax <= extent.x_min() || ymin >= extent.y_max() || ymax <= extent.y_min() {
        debug!("Crop window [{}, {}, {}, {}] does not overlap {}", xmin, ymin, xmax, ymax, extent);
        return None;
    }

    let grid = GeoTransform::grid(extent, raster.width(), raster.height());
    let columns = node_span(xmin, xmax, extent.x_min(), extent.x_max(), grid.pixel_width, raster.width());
    let rows = node_span(ymin, ymax, extent.y_min(), extent.y_max(), grid.pixel_height, raster.height());

    let achieved = GeoExtent::new(srs.clone(), columns.low, rows.low, columns.high, rows.high);
    debug!("Cropping {}x{} samples at ({}, {}) covering {}",
           columns.count, rows.count, columns.first, rows.first, achieved);
    Some((raster.sub_raster(columns.first, rows.first, columns.count, rows.count), achieved))
}

/// Nodes kept along one axis
struct NodeSpan {
    first: u32,
    count: u32,
    low: f64,
    high: f64,
}

/// Nodes covering `[min, max]` along one axis of an overlapping window
///
/// A single node stands for the whole axis and is always kept with it.
fn node_span(min: f64, max: f64, axis_min: f64, axis_max: f64, spacing: f64, count: u32) -> NodeSpan {
    if count < 2 {
        return NodeSpan { first: 0, count, low: axis_min, high: axis_max };
    }

    let last = count as i64 - 1;
    let start = (((min - axis_min) / spacing).floor() as i64).clamp(0, last - 1);
    let end = (((max - axis_min) / spacing).ceil() as i64).clamp(start + 1, last);
    let high = if end == last { axis_max } else { axis_min + end as f64 * spacing };

    NodeSpan {
        first: start as u32,
        count: (end - start + 1) as u32,
        low: axis_min + start as f64 * spacing,
        high,
    }
}
