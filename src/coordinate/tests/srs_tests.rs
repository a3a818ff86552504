//! Tests for the built-in spatial references

extern crate std;

use super::test_utils::{assert_close, broken, scaled_grid, utm, web_mercator, wgs84};
use crate::coordinate::{CoordinateSystem, CoordinateTransformer, LocalGrid, SpatialReference};

#[test]
fn test_identical_systems_are_equivalent() {
    let a = wgs84();
    let b = wgs84();
    std::assert!(a.is_equivalent_to(b.as_ref()));
    std::assert!(!a.is_equivalent_to(web_mercator().as_ref()));
    std::assert!(!utm(33, true).is_equivalent_to(utm(33, false).as_ref()));
}

#[test]
fn test_local_grids_compare_by_parameters() {
    let a = CoordinateSystem::LocalGrid(LocalGrid::new("a", 1.0, 2.0, 3.0, 4.0));
    let b = CoordinateSystem::LocalGrid(LocalGrid::new("b", 1.0, 2.0, 3.0, 4.0));
    let c = CoordinateSystem::LocalGrid(LocalGrid::new("a", 1.0, 2.0, 3.0, 5.0));
    std::assert!(a.is_equivalent_to(&b));
    std::assert!(!a.is_equivalent_to(&c));
}

#[test]
fn test_web_mercator_known_values() {
    let (x, y) = wgs84().transform(180.0, 0.0, web_mercator().as_ref()).unwrap();
    assert_close(x, 20037508.342789244, 1e-6);
    assert_close(y, 0.0, 1e-6);

    let (lon, lat) = web_mercator().transform(x, 0.0, wgs84().as_ref()).unwrap();
    assert_close(lon, 180.0, 1e-9);
    assert_close(lat, 0.0, 1e-9);
}

#[test]
fn test_web_mercator_fails_beyond_latitude_limit() {
    std::assert!(wgs84().transform(0.0, 85.0, web_mercator().as_ref()).is_some());
    std::assert!(wgs84().transform(0.0, 86.0, web_mercator().as_ref()).is_none());
    std::assert!(wgs84().transform(0.0, -89.0, web_mercator().as_ref()).is_none());
}

#[test]
fn test_utm_central_meridian_on_equator() {
    std::assert_eq!(CoordinateTransformer::utm_central_meridian(33), 15.0);
    std::assert_eq!(CoordinateTransformer::utm_central_meridian(1), -177.0);

    let (easting, northing) = wgs84().transform(15.0, 0.0, utm(33, true).as_ref()).unwrap();
    assert_close(easting, 500000.0, 1e-6);
    assert_close(northing, 0.0, 1e-6);

    let (_, northing_south) = wgs84().transform(15.0, 0.0, utm(33, false).as_ref()).unwrap();
    assert_close(northing_south, 10000000.0, 1e-6);
}

#[test]
fn test_utm_round_trip() {
    let zone = utm(33, true);
    for &(lon, lat) in &[(15.5, 45.2), (12.1, 40.0), (17.9, 60.3), (15.0, 0.5)] {
        let (e, n) = wgs84().transform(lon, lat, zone.as_ref()).unwrap();
        let (back_lon, back_lat) = zone.transform(e, n, wgs84().as_ref()).unwrap();
        assert_close(back_lon, lon, 1e-6);
        assert_close(back_lat, lat, 1e-6);
    }
}

#[test]
fn test_utm_domain_limits() {
    let zone = utm(33, true);
    std::assert!(wgs84().transform(15.0, 85.0, zone.as_ref()).is_none());
    std::assert!(wgs84().transform(100.0, 10.0, zone.as_ref()).is_none());
    std::assert!(wgs84().transform(60.0, 30.0, zone.as_ref()).is_none());
    std::assert!(wgs84().transform(74.0, 10.0, zone.as_ref()).is_none());
    std::assert!(wgs84().transform(45.5, 30.0, zone.as_ref()).is_none());

    // Eastings far outside the band do not come back as coordinates.
    std::assert!(zone.transform(9000000.0, 3000000.0, wgs84().as_ref()).is_none());
}

#[test]
fn test_utm_round_trip_at_domain_edge() {
    let limit = CoordinateTransformer::UTM_MAX_MERIDIAN_OFFSET;
    std::assert_eq!(limit, 30.0);

    for &north in &[true, false] {
        let zone = utm(33, north);
        for &(lon, lat) in &[(15.0 + limit - 0.01, 30.0), (15.0 - limit + 0.01, -10.0), (35.0, 30.0), (40.0, 70.0)] {
            let (e, n) = wgs84().transform(lon, lat, zone.as_ref())
                .unwrap_or_else(|| panic!("({}, {}) is inside the zone's band", lon, lat));
            let (back_lon, back_lat) = zone.transform(e, n, wgs84().as_ref()).unwrap();
            assert_close(back_lon, lon, 1e-7);
            assert_close(back_lat, lat, 1e-7);
        }
    }
}

#[test]
fn test_scaled_grid_transform() {
    let (x, y) = wgs84().transform(6.0, 4.0, scaled_grid().as_ref()).unwrap();
    assert_close(x, 1000.0, 1e-9);
    assert_close(y, 4000.0, 1e-9);

    let (lon, lat) = scaled_grid().transform(-1000.0, -2000.0, wgs84().as_ref()).unwrap();
    assert_close(lon, 4.0, 1e-9);
    assert_close(lat, 1.0, 1e-9);
}

#[test]
fn test_geographic_rejects_bad_latitude() {
    std::assert!(wgs84().to_geographic(0.0, 91.0).is_none());
    std::assert!(wgs84().from_geographic(f64::NAN, 0.0).is_none());
}

#[test]
fn test_broken_reference_fails_unless_equivalent() {
    std::assert!(broken().transform(1.0, 2.0, wgs84().as_ref()).is_none());
    std::assert_eq!(broken().transform(1.0, 2.0, broken().as_ref()), Some((1.0, 2.0)));
}

#[test]
fn test_epsg_codes() {
    std::assert_eq!(CoordinateSystem::from_epsg(32633).unwrap(), CoordinateSystem::UTM(33, true));
    std::assert_eq!(CoordinateSystem::from_epsg(32701).unwrap(), CoordinateSystem::UTM(1, false));
    std::assert_eq!(CoordinateSystem::UTM(60, false).epsg_code(), Some(32760));
    std::assert!(CoordinateSystem::from_epsg(2056).is_err());
}
