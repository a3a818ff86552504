//! Extent transformation command
//!
//! Transforms a bounding box into another spatial reference and optionally
//! tests a point against it.

use clap::ArgMatches;
use log::info;

use crate::api::RasterWarp;
use crate::commands::arg_utils;
use crate::commands::command_traits::Command;
use crate::coordinate::{Point, SpatialReference};
use crate::errors::WarpResult;

/// Command for transforming an extent between spatial references
pub struct ExtentCommand<'a> {
    /// Bounding box string "minx,miny,maxx,maxy"
    bbox: String,
    /// Spatial reference of the bounding box
    srs: String,
    /// Spatial reference to transform into
    target_srs: String,
    /// Point to test for containment
    point: Option<Point>,
    /// Spatial reference of the point
    point_srs: String,
    warp: &'a RasterWarp,
}

impl<'a> ExtentCommand<'a> {
    /// Create a new extent command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `warp` - Library facade
    pub fn new(args: &ArgMatches, warp: &'a RasterWarp) -> WarpResult<Self> {
        let bbox = arg_utils::required_string(args, "bbox", "to transform an extent")?;
        let srs = arg_utils::required_string(args, "srs", "for the bounding box")?;
        let target_srs = arg_utils::required_string(args, "target-srs", "to transform an extent")?;
        let point = arg_utils::optional_point(args, "point")?;
        let point_srs = args.get_one::<String>("point-srs").cloned().unwrap_or_else(|| srs.clone());

        Ok(ExtentCommand {
            bbox,
            srs,
            target_srs,
            point,
            point_srs,
            warp,
        })
    }
}

impl Command for ExtentCommand<'_> {
    fn execute(&self) -> WarpResult<String> {
        info!("Transforming {} from {} to {}", self.bbox, self.srs, self.target_srs);

        let source = self.warp.extent(&self.bbox, &self.srs)?;
        let target = self.warp.transform_extent(&source, &self.target_srs)?;

        let mut report = format!("Source extent: {}\n", source);
        report.push_str(&format!("Target extent: {}\n", target));
        report.push_str(&format!("Target size:   {} x {}\n", target.width(), target.height()));

        if let Some(point) = self.point {
            let point_srs = self.warp.srs(&self.point_srs)?;
            let inside = target.contains(point_srs.as_ref(), point.x, point.y);
            report.push_str(&format!(
                "Point ({}, {}) in {} is {} the target extent\n",
                point.x, point.y, point_srs.display_name(), if inside { "inside" } else { "outside" }
            ));
        }

        Ok(report)
    }
}
