//! ESRI ASCII grid reader
//!
//! The header holds `ncols`, `nrows`, `xllcorner`/`xllcenter`,
//! `yllcorner`/`yllcenter`, `cellsize` and an optional `nodata_value`,
//! followed by `nrows` rows of values, northernmost row first. Cell values
//! are treated as grid nodes at the cell centres.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use log::{debug, info};

use crate::coordinate::{GeoExtent, SrsRef};
use crate::errors::{WarpError, WarpResult};
use crate::raster::{GeoElevationGrid, HeightField};

const HEADER_KEYS: [&str; 8] = [
    "ncols", "nrows", "xllcorner", "yllcorner", "xllcenter", "yllcenter", "cellsize", "nodata_value",
];

/// Parse an ASCII grid into a height field and the extent of its nodes
///
/// # Arguments
/// * `content` - Grid file content
/// * `srs` - Spatial reference of the grid coordinates
///
/// # Returns
/// The south-up height field and the extent spanned by the first and last
/// node in each direction. Nodata cells become 0.
pub fn parse_ascii_grid(content: &str, srs: SrsRef) -> WarpResult<(HeightField, GeoExtent)> {
    let mut header: HashMap<&str, f64> = HashMap::new();
    let mut tokens = content.split_whitespace().peekable();

    while let Some(&token) = tokens.peek() {
        let key = token.to_lowercase();
        let Some(&known) = HEADER_KEYS.iter().find(|k| **k == key) else {
            break;
        };
        tokens.next();
        let value = tokens.next()
            .ok_or_else(|| WarpError::ParseError(format!("Missing value for {}", known)))?;
        let value = value.parse::<f64>()
            .map_err(|_| WarpError::ParseError(format!("Invalid value for {}: {}", known, value)))?;
        header.insert(known, value);
    }

    let columns = require_count(&header, "ncols")?;
    let rows = require_count(&header, "nrows")?;
    let cellsize = require(&header, "cellsize")?;
    if cellsize <= 0.0 {
        return Err(WarpError::ParseError(format!("cellsize must be positive, got {}", cellsize)));
    }

    // Node positions are the cell centres.
    let x_first = match (header.get("xllcenter"), header.get("xllcorner")) {
        (Some(center), _) => *center,
        (None, Some(corner)) => corner + cellsize / 2.0,
        (None, None) => return Err(WarpError::ParseError("Missing xllcorner or xllcenter".to_string())),
    };
    let y_first = match (header.get("yllcenter"), header.get("yllcorner")) {
        (Some(center), _) => *center,
        (None, Some(corner)) => corner + cellsize / 2.0,
        (None, None) => return Err(WarpError::ParseError("Missing yllcorner or yllcenter".to_string())),
    };
    let nodata = header.get("nodata_value").copied();

    let expected = columns as usize * rows as usize;
    let mut north_first = Vec::with_capacity(expected);
    for token in tokens {
        let value = token.parse::<f64>()
            .map_err(|_| WarpError::ParseError(format!("Invalid grid value: {}", token)))?;
        north_first.push(value);
    }
    if north_first.len() != expected {
        return Err(WarpError::ParseError(format!(
            "Expected {} grid values, found {}", expected, north_first.len())));
    }

    let mut nodata_count = 0usize;
    let mut heights = Vec::with_capacity(expected);
    for row in north_first.chunks(columns as usize).rev() {
        for &value in row {
            if nodata == Some(value) {
                nodata_count += 1;
                heights.push(0.0);
            } else {
                heights.push(value as f32);
            }
        }
    }
    if nodata_count > 0 {
        debug!("{} nodata cells set to 0", nodata_count);
    }

    let x_span = cellsize * columns.saturating_sub(1).max(1) as f64;
    let y_span = cellsize * rows.saturating_sub(1).max(1) as f64;
    let extent = GeoExtent::new(srs, x_first, y_first, x_first + x_span, y_first + y_span);

    Ok((HeightField::from_heights(columns, rows, heights)?, extent))
}

/// Load an ASCII grid file as a georeferenced elevation grid
pub fn load_elevation_grid<P: AsRef<Path>>(path: P, srs: SrsRef) -> WarpResult<GeoElevationGrid> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let (heights, extent) = parse_ascii_grid(&content, srs)?;
    info!("Loaded {}x{} elevation grid from {} covering {}",
          heights.columns(), heights.rows(), path.display(), extent);
    Ok(GeoElevationGrid::new(heights, extent))
}

fn require(header: &HashMap<&str, f64>, key: &str) -> WarpResult<f64> {
    header.get(key)
        .copied()
        .ok_or_else(|| WarpError::ParseError(format!("Missing {} in grid header", key)))
}

fn require_count(header: &HashMap<&str, f64>, key: &str) -> WarpResult<u32> {
    let value = require(header, key)?;
    if value < 1.0 || value.fract() != 0.0 || value > u32::MAX as f64 {
        return Err(WarpError::ParseError(format!("{} must be a positive integer, got {}", key, value)));
    }
    Ok(value as u32)
}
