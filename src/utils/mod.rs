//! Utility modules for common functionality
//!
//! File adapters and logging used by the facade and the command-line tool.

pub mod logger;
pub mod image_io;
pub mod ascii_grid;
