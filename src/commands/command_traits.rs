//! Command pattern interfaces
//!
//! This module defines the core Command pattern interfaces
//! for the CLI application.

use crate::api::RasterWarp;
use crate::errors::WarpResult;

/// Represents an executable command in the application
///
/// Command objects encapsulate the logic for a specific CLI operation.
pub trait Command {
    /// Execute the command
    ///
    /// # Returns
    /// A printable report of the result, or an error
    fn execute(&self) -> WarpResult<String>;
}

/// Factory for creating commands from CLI arguments
pub trait CommandFactory<'a> {
    /// Create a new Command instance based on CLI arguments
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `warp` - Library facade the command runs against
    ///
    /// # Returns
    /// A command that implements the Command trait, or an error
    fn create_command(&self, args: &clap::ArgMatches, warp: &'a RasterWarp) -> WarpResult<Box<dyn Command + 'a>>;
}
