//! Coordinate Reference System handling

use std::sync::Arc;

use super::point::Point;
use super::registry::SrsRegistry;
use super::srs::{SpatialReference, SrsRef};
use super::transform::CoordinateTransformer;
use crate::errors::{WarpError, WarpResult};

/// Parameters of an axis-aligned local grid over geographic coordinates
///
/// `x = (lon - origin_lon) * scale_x`, `y = (lat - origin_lat) * scale_y`.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalGrid {
    /// Name shown in diagnostics
    pub name: String,
    /// Longitude mapped to x = 0
    pub origin_lon: f64,
    /// Latitude mapped to y = 0
    pub origin_lat: f64,
    /// Grid units per degree of longitude
    pub scale_x: f64,
    /// Grid units per degree of latitude
    pub scale_y: f64,
}

impl LocalGrid {
    /// Create a new local grid definition
    pub fn new(name: &str, origin_lon: f64, origin_lat: f64, scale_x: f64, scale_y: f64) -> Self {
        LocalGrid {
            name: name.to_string(),
            origin_lon,
            origin_lat,
            scale_x,
            scale_y,
        }
    }

    fn origin(&self) -> Point {
        Point::new(self.origin_lon, self.origin_lat)
    }
}

/// Built-in coordinate systems
#[derive(Debug, Clone, PartialEq)]
pub enum CoordinateSystem {
    /// WGS 84 (EPSG:4326)
    WGS84,
    /// Web Mercator (EPSG:3857)
    WebMercator,
    /// UTM Zone (EPSG:326xx for northern hemisphere, 327xx for southern)
    UTM(u8, bool),
    /// Translated and scaled geographic grid
    LocalGrid(LocalGrid),
}

impl CoordinateSystem {
    /// Create a coordinate system from an EPSG code
    pub fn from_epsg(epsg: u32) -> WarpResult<Self> {
        match epsg {
            4326 => Ok(CoordinateSystem::WGS84),
            3857 => Ok(CoordinateSystem::WebMercator),
            32601..=32660 => Ok(CoordinateSystem::UTM((epsg - 32600) as u8, true)),
            32701..=32760 => Ok(CoordinateSystem::UTM((epsg - 32700) as u8, false)),
            _ => Err(WarpError::UnknownSrs(format!("EPSG:{}", epsg))),
        }
    }

    /// Get the EPSG code for this coordinate system, if it has one
    pub fn epsg_code(&self) -> Option<u32> {
        match self {
            CoordinateSystem::WGS84 => Some(4326),
            CoordinateSystem::WebMercator => Some(3857),
            CoordinateSystem::UTM(zone, is_northern) => {
                if *is_northern {
                    Some(32600 + *zone as u32)
                } else {
                    Some(32700 + *zone as u32)
                }
            },
            CoordinateSystem::LocalGrid(_) => None,
        }
    }

    /// Get a description of this coordinate system
    pub fn description(&self) -> String {
        match self {
            CoordinateSystem::WGS84 => "WGS 84 (EPSG:4326)".to_string(),
            CoordinateSystem::WebMercator => "Web Mercator (EPSG:3857)".to_string(),
            CoordinateSystem::UTM(zone, is_northern) => {
                let code = self.epsg_code().unwrap_or_default();
                if *is_northern {
                    format!("UTM Zone {}N (EPSG:{})", zone, code)
                } else {
                    format!("UTM Zone {}S (EPSG:{})", zone, code)
                }
            },
            CoordinateSystem::LocalGrid(grid) => format!("Local grid '{}'", grid.name),
        }
    }

    /// Wrap this system into a shared handle
    pub fn into_ref(self) -> SrsRef {
        Arc::new(self)
    }
}

impl SpatialReference for CoordinateSystem {
    fn to_geographic(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        let point = match self {
            CoordinateSystem::WGS84 => {
                CoordinateTransformer::is_geographic(x, y).then(|| Point::new(x, y))
            },
            CoordinateSystem::WebMercator => CoordinateTransformer::web_mercator_to_wgs84(x, y),
            CoordinateSystem::UTM(zone, north) => CoordinateTransformer::utm_to_wgs84(x, y, *zone, *north),
            CoordinateSystem::LocalGrid(grid) => {
                CoordinateTransformer::local_to_wgs84(x, y, grid.origin(), grid.scale_x, grid.scale_y)
            },
        }?;
        Some((point.x, point.y))
    }

    fn from_geographic(&self, lon: f64, lat: f64) -> Option<(f64, f64)> {
        let point = match self {
            CoordinateSystem::WGS84 => {
                CoordinateTransformer::is_geographic(lon, lat).then(|| Point::new(lon, lat))
            },
            CoordinateSystem::WebMercator => CoordinateTransformer::wgs84_to_web_mercator(lon, lat),
            CoordinateSystem::UTM(zone, north) => CoordinateTransformer::wgs84_to_utm(lon, lat, *zone, *north),
            CoordinateSystem::LocalGrid(grid) => {
                CoordinateTransformer::wgs84_to_local(lon, lat, grid.origin(), grid.scale_x, grid.scale_y)
            },
        }?;
        Some((point.x, point.y))
    }

    fn definition(&self) -> String {
        match self {
            CoordinateSystem::WGS84 => "+proj=longlat +datum=WGS84".to_string(),
            CoordinateSystem::WebMercator => {
                "+proj=merc +a=6378137 +b=6378137 +lon_0=0 +x_0=0 +y_0=0 +units=m".to_string()
            },
            CoordinateSystem::UTM(zone, north) => {
                if *north {
                    format!("+proj=utm +zone={} +datum=WGS84 +units=m", zone)
                } else {
                    format!("+proj=utm +zone={} +south +datum=WGS84 +units=m", zone)
                }
            },
            // Grids with identical parameters are the same space, whatever their name.
            CoordinateSystem::LocalGrid(grid) => format!(
                "+proj=local +lon_0={} +lat_0={} +kx={} +ky={}",
                grid.origin_lon, grid.origin_lat, grid.scale_x, grid.scale_y
            ),
        }
    }

    fn display_name(&self) -> String {
        self.epsg_code()
            .and_then(SrsRegistry::name_for_code)
            .unwrap_or_else(|| self.description())
    }
}
