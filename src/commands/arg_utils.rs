//! Helpers for reading typed values out of clap matches

use clap::ArgMatches;

use crate::coordinate::Point;
use crate::errors::{WarpError, WarpResult};

/// A string argument that must be present
pub fn required_string(args: &ArgMatches, name: &str, purpose: &str) -> WarpResult<String> {
    args.get_one::<String>(name)
        .cloned()
        .ok_or_else(|| WarpError::GenericError(format!("--{} is required {}", name, purpose)))
}

/// An optional "x,y" point argument
pub fn optional_point(args: &ArgMatches, name: &str) -> WarpResult<Option<Point>> {
    args.get_one::<String>(name)
        .map(|value| Point::from_string(value).map_err(WarpError::ParseError))
        .transpose()
}

/// A required "x,y" point argument
pub fn required_point(args: &ArgMatches, name: &str, purpose: &str) -> WarpResult<Point> {
    optional_point(args, name)?
        .ok_or_else(|| WarpError::GenericError(format!("--{} is required {}", name, purpose)))
}

/// An optional positive integer argument
pub fn optional_size(args: &ArgMatches, name: &str) -> WarpResult<Option<u32>> {
    match args.get_one::<String>(name) {
        None => Ok(None),
        Some(value) => match value.trim().parse::<u32>() {
            Ok(size) if size > 0 => Ok(Some(size)),
            _ => Err(WarpError::ParseError(format!("--{} must be a positive integer, got {}", name, value))),
        },
    }
}
