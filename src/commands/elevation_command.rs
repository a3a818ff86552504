//! Elevation query command

use clap::ArgMatches;
use log::info;

use crate::api::RasterWarp;
use crate::commands::arg_utils;
use crate::commands::command_traits::Command;
use crate::coordinate::Point;
use crate::errors::WarpResult;

/// Command for querying an elevation grid at a point
pub struct ElevationCommand<'a> {
    /// Path to the ASCII grid
    input_file: String,
    /// Spatial reference of the grid
    srs: String,
    /// Query point
    point: Point,
    /// Spatial reference of the query point
    point_srs: String,
    warp: &'a RasterWarp,
}

impl<'a> ElevationCommand<'a> {
    /// Create a new elevation command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `warp` - Library facade
    pub fn new(args: &ArgMatches, warp: &'a RasterWarp) -> WarpResult<Self> {
        let srs = arg_utils::required_string(args, "srs", "for the elevation grid")?;
        let point_srs = args.get_one::<String>("point-srs").cloned().unwrap_or_else(|| srs.clone());

        Ok(ElevationCommand {
            input_file: arg_utils::required_string(args, "input", "for an elevation query")?,
            point: arg_utils::required_point(args, "point", "for an elevation query")?,
            srs,
            point_srs,
            warp,
        })
    }
}

impl Command for ElevationCommand<'_> {
    fn execute(&self) -> WarpResult<String> {
        info!("Querying {} at ({}, {})", self.input_file, self.point.x, self.point.y);

        let grid = self.warp.load_elevation_grid(&self.input_file, &self.srs)?;
        let elevation = self.warp.elevation_at(&grid, &self.point_srs, self.point.x, self.point.y)?;
        let interpolation = self.warp.config().interpolation;

        Ok(match elevation {
            Some(height) => format!(
                "Elevation at ({}, {}): {} ({})\n", self.point.x, self.point.y, height, interpolation),
            None => format!(
                "No elevation at ({}, {}): outside {}\n", self.point.x, self.point.y, grid.extent()),
        })
    }
}
