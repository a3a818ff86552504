//! CLI command implementations
//!
//! This module contains the argument definitions of the `rasterwarp` tool
//! and one command per operation, using the Command pattern.

pub mod command_traits;
mod arg_utils;
pub mod extent_command;
pub mod reproject_command;
pub mod crop_command;
pub mod elevation_command;

pub use command_traits::{Command, CommandFactory};
pub use extent_command::ExtentCommand;
pub use reproject_command::ReprojectCommand;
pub use crop_command::CropCommand;
pub use elevation_command::ElevationCommand;

use clap::{Arg, ArgAction, ArgMatches, Command as ClapCommand};
use log::LevelFilter;

use crate::api::RasterWarp;
use crate::config::WarpConfig;
use crate::errors::{WarpError, WarpResult};
use crate::raster::{ElevationInterpolation, ResamplingMode};

/// Argument definitions of the `rasterwarp` tool
pub fn build_cli() -> ClapCommand {
    ClapCommand::new("rasterwarp")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Maurice Schilpp")
        .about("Transform extents, reproject and crop images, query elevation grids")
        .arg(
            Arg::new("input")
                .help("Input image (reproject, crop) or ESRI ASCII grid (elevation)")
                .required(false)
                .index(1),
        )
        .arg(
            Arg::new("reproject")
                .short('r')
                .long("reproject")
                .help("Reproject the input image into --target-srs")
                .action(ArgAction::SetTrue)
                .conflicts_with_all(["crop", "elevation"]),
        )
        .arg(
            Arg::new("crop")
                .short('c')
                .long("crop")
                .help("Crop the input image to --window")
                .action(ArgAction::SetTrue)
                .conflicts_with("elevation"),
        )
        .arg(
            Arg::new("elevation")
                .short('e')
                .long("elevation")
                .help("Query the input elevation grid at --point")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Output image file")
                .value_name("FILE"),
        )
        .arg(
            Arg::new("bbox")
                .long("bbox")
                .help("Extent of the input (minx,miny,maxx,maxy)")
                .value_name("BBOX")
                .allow_hyphen_values(true),
        )
        .arg(
            Arg::new("srs")
                .long("srs")
                .help("Spatial reference of --bbox and the input (e.g. EPSG:4326)")
                .value_name("SRS")
                .default_value("EPSG:4326"),
        )
        .arg(
            Arg::new("target-srs")
                .long("target-srs")
                .help("Spatial reference to transform or reproject into")
                .value_name("SRS")
                .default_value("EPSG:3857"),
        )
        .arg(
            Arg::new("target-bbox")
                .long("target-bbox")
                .help("Output extent in --target-srs (default: transformed --bbox)")
                .value_name("BBOX")
                .allow_hyphen_values(true),
        )
        .arg(
            Arg::new("window")
                .long("window")
                .help("Crop window (minx,miny,maxx,maxy)")
                .value_name("BBOX")
                .allow_hyphen_values(true),
        )
        .arg(
            Arg::new("window-srs")
                .long("window-srs")
                .help("Spatial reference of --window (default: --srs)")
                .value_name("SRS"),
        )
        .arg(
            Arg::new("point")
                .long("point")
                .help("Point in 'x,y' format")
                .value_name("POINT")
                .allow_hyphen_values(true),
        )
        .arg(
            Arg::new("point-srs")
                .long("point-srs")
                .help("Spatial reference of --point (default: --srs)")
                .value_name("SRS"),
        )
        .arg(
            Arg::new("width")
                .long("width")
                .help("Output width in pixels")
                .value_name("PIXELS"),
        )
        .arg(
            Arg::new("height")
                .long("height")
                .help("Output height in pixels")
                .value_name("PIXELS"),
        )
        .arg(
            Arg::new("resampling")
                .long("resampling")
                .help("Resampling mode (nearest, bilinear)")
                .value_name("MODE"),
        )
        .arg(
            Arg::new("interpolation")
                .long("interpolation")
                .help("Elevation interpolation (nearest, average, bilinear, triangulate, cubic)")
                .value_name("METHOD"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("TOML configuration file")
                .value_name("FILE"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue),
        )
}

/// Build the configuration from `--config` and the override flags
pub fn config_from_args(args: &ArgMatches) -> WarpResult<WarpConfig> {
    let mut config = match args.get_one::<String>("config") {
        Some(path) => WarpConfig::from_file(path)?,
        None => WarpConfig::default(),
    };

    if let Some(width) = arg_utils::optional_size(args, "width")? {
        config.resample.width = width;
    }
    if let Some(height) = arg_utils::optional_size(args, "height")? {
        config.resample.height = height;
    }
    if let Some(mode) = args.get_one::<String>("resampling") {
        config.resample.mode = ResamplingMode::from_name(mode)?;
    }
    if let Some(name) = args.get_one::<String>("interpolation") {
        config.interpolation = ElevationInterpolation::from_name(name)?;
    }
    if args.get_flag("verbose") {
        config.log_level = LevelFilter::Debug;
    }

    Ok(config)
}

/// Factory for creating command instances based on CLI arguments
pub struct RasterwarpCommandFactory;

impl RasterwarpCommandFactory {
    /// Create a new factory instance
    pub fn new() -> Self {
        RasterwarpCommandFactory
    }
}

impl Default for RasterwarpCommandFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> CommandFactory<'a> for RasterwarpCommandFactory {
    fn create_command(&self, args: &ArgMatches, warp: &'a RasterWarp) -> WarpResult<Box<dyn Command + 'a>> {
        if args.get_flag("reproject") {
            Ok(Box::new(ReprojectCommand::new(args, warp)?))
        } else if args.get_flag("crop") {
            Ok(Box::new(CropCommand::new(args, warp)?))
        } else if args.get_flag("elevation") {
            Ok(Box::new(ElevationCommand::new(args, warp)?))
        } else if args.contains_id("bbox") {
            // Default to the extent command
            Ok(Box::new(ExtentCommand::new(args, warp)?))
        } else {
            Err(WarpError::GenericError(
                "Nothing to do: pass --bbox, or one of --reproject, --crop, --elevation".to_string()))
        }
    }
}
