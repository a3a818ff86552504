//! Image reprojection command

use clap::ArgMatches;
use log::info;

use crate::api::RasterWarp;
use crate::commands::arg_utils;
use crate::commands::command_traits::Command;
use crate::coordinate::GeoTransform;
use crate::errors::WarpResult;

/// Command for reprojecting an image file
pub struct ReprojectCommand<'a> {
    /// Path to the input image
    input_file: String,
    /// Path to the output image
    output_file: String,
    /// Extent covered by the input image
    bbox: String,
    /// Spatial reference of the input image
    srs: String,
    /// Spatial reference of the output image
    target_srs: String,
    /// Optional output extent in the target spatial reference
    target_bbox: Option<String>,
    warp: &'a RasterWarp,
}

impl<'a> ReprojectCommand<'a> {
    /// Create a new reprojection command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `warp` - Library facade
    pub fn new(args: &ArgMatches, warp: &'a RasterWarp) -> WarpResult<Self> {
        Ok(ReprojectCommand {
            input_file: arg_utils::required_string(args, "input", "for reprojection")?,
            output_file: arg_utils::required_string(args, "output", "for reprojection")?,
            bbox: arg_utils::required_string(args, "bbox", "to georeference the input image")?,
            srs: arg_utils::required_string(args, "srs", "for the input image")?,
            target_srs: arg_utils::required_string(args, "target-srs", "for reprojection")?,
            target_bbox: args.get_one::<String>("target-bbox").cloned(),
            warp,
        })
    }
}

impl Command for ReprojectCommand<'_> {
    fn execute(&self) -> WarpResult<String> {
        info!("Reprojecting {} from {} to {}", self.input_file, self.srs, self.target_srs);

        let extent = self.warp.extent(&self.bbox, &self.srs)?;
        let target_extent = self.target_bbox.as_deref()
            .map(|bbox| self.warp.extent(bbox, &self.target_srs))
            .transpose()?;

        let options = self.warp.config().resample;
        let written = self.warp.reproject_file(
            &self.input_file,
            &self.output_file,
            extent,
            &self.target_srs,
            target_extent.as_ref(),
        )?;

        let geotransform = GeoTransform::grid(&written, options.width, options.height).to_gdal(options.height);

        Ok(format!(
            "Wrote {}x{} image ({} sampling) to {}\nExtent: {}\nGeoTransform: {:?}\n",
            options.width, options.height, options.mode, self.output_file, written, geotransform
        ))
    }
}
