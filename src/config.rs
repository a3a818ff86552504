//! Runtime configuration
//!
//! Settings are read from a TOML file. Every key is optional; missing keys
//! keep their default value.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use log::{debug, LevelFilter};

use crate::coordinate::{CoordinateSystem, LocalGrid, SrsRegistry};
use crate::errors::{WarpError, WarpResult};
use crate::raster::{ElevationInterpolation, ResampleOptions, ResamplingMode};

/// Settings shared by the library facade and the command-line tool
#[derive(Debug, Clone, PartialEq)]
pub struct WarpConfig {
    /// Output size and sampling mode for reprojection
    pub resample: ResampleOptions,
    /// Points sampled along each extent edge when transforming extents
    pub edge_samples: usize,
    /// Interpolation used for elevation queries
    pub interpolation: ElevationInterpolation,
    /// Maximum log level
    pub log_level: LevelFilter,
    /// Optional log file; logs go to the console only when absent
    pub log_file: Option<String>,
    /// Local grids to register under the given identifiers
    pub local_grids: Vec<(String, LocalGrid)>,
}

impl Default for WarpConfig {
    fn default() -> Self {
        WarpConfig {
            resample: ResampleOptions::default(),
            edge_samples: 2,
            interpolation: ElevationInterpolation::default(),
            log_level: LevelFilter::Info,
            log_file: None,
            local_grids: Vec::new(),
        }
    }
}

impl WarpConfig {
    /// Parse a configuration from a TOML string
    pub fn from_str(content: &str) -> WarpResult<Self> {
        let toml_value: toml::Value = content.parse()?;
        let mut config = WarpConfig::default();

        if let Some(table) = toml_value.get("resample") {
            if let Some(width) = get_size(table, "resample.width")? {
                config.resample.width = width;
            }
            if let Some(height) = get_size(table, "resample.height")? {
                config.resample.height = height;
            }
            if let Some(mode) = get_str(table, "resample.mode")? {
                config.resample.mode = ResamplingMode::from_name(mode)
                    .map_err(|e| WarpError::ConfigError(e.to_string()))?;
            }
            if let Some(parallel) = table.get("parallel") {
                config.resample.parallel = parallel.as_bool()
                    .ok_or_else(|| WarpError::ConfigError("resample.parallel must be a boolean".to_string()))?;
            }
        }

        if let Some(table) = toml_value.get("extent") {
            if let Some(samples) = get_size(table, "extent.edge_samples")? {
                config.edge_samples = samples as usize;
            }
        }

        if let Some(table) = toml_value.get("elevation") {
            if let Some(name) = get_str(table, "elevation.interpolation")? {
                config.interpolation = ElevationInterpolation::from_name(name)
                    .map_err(|e| WarpError::ConfigError(e.to_string()))?;
            }
        }

        if let Some(table) = toml_value.get("logging") {
            if let Some(level) = get_str(table, "logging.level")? {
                config.log_level = LevelFilter::from_str(level)
                    .map_err(|_| WarpError::ConfigError(format!("Invalid log level: {}", level)))?;
            }
            config.log_file = get_str(table, "logging.file")?.map(str::to_string);
        }

        if let Some(grids) = toml_value.get("srs").and_then(|v| v.as_table()) {
            for (identifier, params) in grids {
                let grid = LocalGrid::new(
                    identifier,
                    get_f64(params, identifier, "origin_lon", 0.0)?,
                    get_f64(params, identifier, "origin_lat", 0.0)?,
                    get_f64(params, identifier, "scale_x", 1.0)?,
                    get_f64(params, identifier, "scale_y", 1.0)?,
                );
                if grid.scale_x == 0.0 || grid.scale_y == 0.0 {
                    return Err(WarpError::ConfigError(format!("srs.{}: scales must be non-zero", identifier)));
                }
                config.local_grids.push((identifier.clone(), grid));
            }
        }

        Ok(config)
    }

    /// Load a configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> WarpResult<Self> {
        let path = path.as_ref();
        debug!("Loading configuration from {}", path.display());
        let content = fs::read_to_string(path)
            .map_err(|e| WarpError::ConfigError(format!("Cannot read {}: {}", path.display(), e)))?;
        Self::from_str(&content)
    }

    /// Make the configured local grids resolvable through `SrsRegistry`
    pub fn register_local_grids(&self) {
        for (identifier, grid) in &self.local_grids {
            SrsRegistry::register(identifier, CoordinateSystem::LocalGrid(grid.clone()).into_ref());
        }
    }
}

fn key_name(path: &str) -> &str {
    path.rsplit('.').next().unwrap_or(path)
}

fn get_str<'a>(table: &'a toml::Value, path: &str) -> WarpResult<Option<&'a str>> {
    match table.get(key_name(path)) {
        None => Ok(None),
        Some(value) => value.as_str()
            .map(Some)
            .ok_or_else(|| WarpError::ConfigError(format!("{} must be a string", path))),
    }
}

fn get_size(table: &toml::Value, path: &str) -> WarpResult<Option<u32>> {
    match table.get(key_name(path)) {
        None => Ok(None),
        Some(value) => match value.as_integer() {
            Some(n) if n > 0 && n <= u32::MAX as i64 => Ok(Some(n as u32)),
            _ => Err(WarpError::ConfigError(format!("{} must be a positive integer", path))),
        },
    }
}

fn get_f64(table: &toml::Value, identifier: &str, key: &str, default: f64) -> WarpResult<f64> {
    match table.get(key) {
        None => Ok(default),
        Some(value) => value.as_float()
            .or_else(|| value.as_integer().map(|n| n as f64))
            .ok_or_else(|| WarpError::ConfigError(format!("srs.{}.{} must be a number", identifier, key))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use crate::coordinate::SpatialReference;

    #[test]
    fn test_defaults() {
        let config = WarpConfig::from_str("").unwrap();
        assert_eq!(config, WarpConfig::default());
        assert_eq!(config.resample.width, 256);
        assert_eq!(config.edge_samples, 2);
        assert_eq!(config.interpolation, ElevationInterpolation::Bilinear);
        assert_eq!(config.log_level, LevelFilter::Info);
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_full_file() {
        let config = WarpConfig::from_str(r#"
            [resample]
            width = 512
            height = 128
            mode = "bilinear"
            parallel = false

            [extent]
            edge_samples = 9

            [elevation]
            interpolation = "triangulate"

            [logging]
            level = "debug"
            file = "warp.log"

            [srs."local:site"]
            origin_lon = 7.5
            origin_lat = 46
            scale_x = 76000.0
        "#).unwrap();

        assert_eq!(config.resample, ResampleOptions::new(512, 128)
            .with_mode(ResamplingMode::Bilinear)
            .with_parallel(false));
        assert_eq!(config.edge_samples, 9);
        assert_eq!(config.interpolation, ElevationInterpolation::Triangulate);
        assert_eq!(config.log_level, LevelFilter::Debug);
        assert_eq!(config.log_file.as_deref(), Some("warp.log"));

        let (identifier, grid) = &config.local_grids[0];
        assert_eq!(identifier, "local:site");
        assert_eq!((grid.origin_lon, grid.origin_lat), (7.5, 46.0));
        assert_eq!((grid.scale_x, grid.scale_y), (76000.0, 1.0));
    }

    #[test]
    fn test_invalid_values() {
        let bad = [
            "[resample]\nwidth = 0",
            "[resample]\nheight = \"tall\"",
            "[resample]\nmode = \"lanczos\"",
            "[resample]\nparallel = 1",
            "[elevation]\ninterpolation = \"spline\"",
            "[logging]\nlevel = \"loud\"",
            "[srs.flat]\nscale_y = 0",
            "[srs.flat]\norigin_lon = \"east\"",
            "[resample",
        ];
        for content in bad {
            assert!(matches!(WarpConfig::from_str(content), Err(WarpError::ConfigError(_))), "{}", content);
        }
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[resample]\nwidth = 64").unwrap();

        let config = WarpConfig::from_file(file.path()).unwrap();
        assert_eq!(config.resample.width, 64);
        assert_eq!(config.resample.height, 256);

        assert!(WarpConfig::from_file("/nonexistent/rasterwarp.toml").is_err());
    }

    #[test]
    fn test_registering_local_grids() {
        let config = WarpConfig::from_str("[srs.\"config:test-grid\"]\nscale_x = 10.0").unwrap();
        config.register_local_grids();

        let srs = SrsRegistry::get_srs("CONFIG:TEST-GRID").unwrap();
        let (x, y) = srs.from_geographic(2.0, 3.0).unwrap();
        assert_eq!((x, y), (20.0, 3.0));
    }
}
