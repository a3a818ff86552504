//! Image cropping command

use clap::ArgMatches;
use log::info;

use crate::api::RasterWarp;
use crate::commands::arg_utils;
use crate::commands::command_traits::Command;
use crate::errors::WarpResult;

/// Command for cropping an image file to a window
pub struct CropCommand<'a> {
    /// Path to the input image
    input_file: String,
    /// Path to the output image
    output_file: String,
    /// Extent covered by the input image
    bbox: String,
    /// Spatial reference of the image
    srs: String,
    /// Window to keep
    window: String,
    /// Spatial reference of the window (defaults to the image's)
    window_srs: Option<String>,
    warp: &'a RasterWarp,
}

impl<'a> CropCommand<'a> {
    /// Create a new crop command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `warp` - Library facade
    pub fn new(args: &ArgMatches, warp: &'a RasterWarp) -> WarpResult<Self> {
        Ok(CropCommand {
            input_file: arg_utils::required_string(args, "input", "for cropping")?,
            output_file: arg_utils::required_string(args, "output", "for cropping")?,
            bbox: arg_utils::required_string(args, "bbox", "to georeference the input image")?,
            srs: arg_utils::required_string(args, "srs", "for the input image")?,
            window: arg_utils::required_string(args, "window", "for cropping")?,
            window_srs: args.get_one::<String>("window-srs").cloned(),
            warp,
        })
    }
}

impl Command for CropCommand<'_> {
    fn execute(&self) -> WarpResult<String> {
        info!("Cropping {} to {}", self.input_file, self.window);

        let extent = self.warp.extent(&self.bbox, &self.srs)?;
        let window_srs = self.window_srs.as_deref().unwrap_or(&self.srs);
        let window = self.warp.extent(&self.window, window_srs)?;
        let achieved = self.warp.crop_file(&self.input_file, &self.output_file, extent, &window)?;

        Ok(format!(
            "Wrote cropped image to {}\nRequested: {}\nAchieved:  {}\n",
            self.output_file, window, achieved
        ))
    }
}
