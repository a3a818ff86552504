//! Coordinate transformation math
//!
//! Forward and inverse projection formulas for the built-in coordinate
//! systems. Every projection converts to and from geographic WGS84
//! longitude/latitude in degrees, which acts as the pivot when transforming
//! between two arbitrary systems.
//!
//! Spherical Mercator and local grids are closed formulas. UTM goes through
//! proj4rs. Coordinates outside the domain of a projection give `None`;
//! nothing is clamped.

use std::f64::consts::PI;

use log::debug;
use proj4rs::proj::Proj;
use proj4rs::transform::transform;

use super::point::Point;

/// Transformer holding the projection formulas
pub struct CoordinateTransformer;

impl CoordinateTransformer {
    /// Earth radius in meters (spherical Mercator)
    pub const EARTH_RADIUS: f64 = 6378137.0;

    /// Latitude limit of the square Web Mercator world
    pub const MAX_MERCATOR_LATITUDE: f64 = 85.0511287798;

    /// Largest latitude the UTM grid covers
    const UTM_MAX_LATITUDE: f64 = 84.0;
    /// Largest distance from the central meridian we still project
    ///
    /// Within this band the extended transverse Mercator series stays
    /// accurate to a millimetre.
    pub const UTM_MAX_MERIDIAN_OFFSET: f64 = 30.0;

    /// Check a geographic coordinate for sanity
    pub fn is_geographic(lon: f64, lat: f64) -> bool {
        lon.is_finite() && lat.is_finite() && (-90.0..=90.0).contains(&lat)
    }

    /// Convert from WGS84 (EPSG:4326) to Web Mercator (EPSG:3857)
    ///
    /// Returns `None` for latitudes beyond the Mercator limit instead of
    /// clamping them.
    pub fn wgs84_to_web_mercator(lon: f64, lat: f64) -> Option<Point> {
        if !Self::is_geographic(lon, lat) || lat.abs() > Self::MAX_MERCATOR_LATITUDE {
            return None;
        }

        let x = lon * Self::EARTH_RADIUS * PI / 180.0;
        let y = f64::ln(f64::tan((90.0 + lat) * PI / 360.0)) * Self::EARTH_RADIUS;

        Some(Point::new(x, y))
    }

    /// Convert from Web Mercator (EPSG:3857) to WGS84 (EPSG:4326)
    pub fn web_mercator_to_wgs84(x: f64, y: f64) -> Option<Point> {
        if !x.is_finite() || !y.is_finite() {
            return None;
        }

        let lon = x * 180.0 / (Self::EARTH_RADIUS * PI);
        let lat = 180.0 / PI * (2.0 * f64::atan(f64::exp(y / Self::EARTH_RADIUS)) - PI / 2.0);

        Some(Point::new(lon, lat))
    }

    /// Central meridian of a UTM zone in degrees
    pub fn utm_central_meridian(zone: u8) -> f64 {
        (zone as f64 - 1.0) * 6.0 - 180.0 + 3.0
    }

    /// proj4rs definition of a UTM zone on WGS84
    fn utm_projection(zone: u8, north: bool) -> Option<Proj> {
        if !(1..=60).contains(&zone) {
            return None;
        }
        let hemisphere = if north { "" } else { " +south" };
        Proj::from_proj_string(&format!("+proj=utm +zone={}{} +datum=WGS84 +no_defs", zone, hemisphere))
            .map_err(|e| debug!("Invalid UTM zone {}: {:?}", zone, e))
            .ok()
    }

    fn geographic_projection() -> Option<Proj> {
        Proj::from_proj_string("+proj=longlat +datum=WGS84 +no_defs")
            .map_err(|e| debug!("Invalid geographic definition: {:?}", e))
            .ok()
    }

    fn within_utm_domain(lon: f64, lat: f64, zone: u8) -> bool {
        Self::is_geographic(lon, lat)
            && lat.abs() <= Self::UTM_MAX_LATITUDE
            && (lon - Self::utm_central_meridian(zone)).abs() <= Self::UTM_MAX_MERIDIAN_OFFSET
    }

    /// Convert from WGS84 to UTM (extended transverse Mercator)
    ///
    /// # Arguments
    /// * `lon` - Longitude in degrees
    /// * `lat` - Latitude in degrees
    /// * `zone` - UTM zone number (1-60)
    /// * `north` - Northern hemisphere false northing when true
    ///
    /// # Returns
    /// Easting/northing in meters, or `None` outside the projection domain
    pub fn wgs84_to_utm(lon: f64, lat: f64, zone: u8, north: bool) -> Option<Point> {
        if !Self::within_utm_domain(lon, lat, zone) {
            return None;
        }

        let source = Self::geographic_projection()?;
        let target = Self::utm_projection(zone, north)?;

        // proj4rs works in radians for geographic coordinates
        let mut point = (lon.to_radians(), lat.to_radians(), 0.0);
        transform(&source, &target, &mut point)
            .map_err(|e| debug!("UTM zone {} forward transform failed: {:?}", zone, e))
            .ok()?;

        let result = Point::new(point.0, point.1);
        result.is_finite().then_some(result)
    }

    /// Convert from UTM easting/northing to WGS84
    pub fn utm_to_wgs84(easting: f64, northing: f64, zone: u8, north: bool) -> Option<Point> {
        if !easting.is_finite() || !northing.is_finite() {
            return None;
        }

        let source = Self::utm_projection(zone, north)?;
        let target = Self::geographic_projection()?;

        let mut point = (easting, northing, 0.0);
        transform(&source, &target, &mut point)
            .map_err(|e| debug!("UTM zone {} inverse transform failed: {:?}", zone, e))
            .ok()?;

        let (lon, lat) = (point.0.to_degrees(), point.1.to_degrees());
        Self::within_utm_domain(lon, lat, zone).then(|| Point::new(lon, lat))
    }

    /// Convert from WGS84 to a local grid (translation and scale only)
    pub fn wgs84_to_local(lon: f64, lat: f64, origin: Point, scale_x: f64, scale_y: f64) -> Option<Point> {
        if !Self::is_geographic(lon, lat) || scale_x == 0.0 || scale_y == 0.0 {
            return None;
        }

        Some(Point::new((lon - origin.x) * scale_x, (lat - origin.y) * scale_y))
    }

    /// Convert from a local grid back to WGS84
    pub fn local_to_wgs84(x: f64, y: f64, origin: Point, scale_x: f64, scale_y: f64) -> Option<Point> {
        if !x.is_finite() || !y.is_finite() || scale_x == 0.0 || scale_y == 0.0 {
            return None;
        }

        let lon = x / scale_x + origin.x;
        let lat = y / scale_y + origin.y;

        Self::is_geographic(lon, lat).then(|| Point::new(lon, lat))
    }
}
