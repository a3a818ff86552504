//! Tests for the spatial reference registry

use std::sync::Arc;

use super::test_utils::scaled_grid;
use crate::coordinate::{CoordinateSystem, SrsDefinitions, SrsRegistry};
use crate::errors::WarpError;

#[test]
fn test_equal_identifiers_share_a_handle() {
    let a = SrsRegistry::get_srs("EPSG:4326").unwrap();
    let b = SrsRegistry::get_srs("epsg:4326").unwrap();
    let c = SrsRegistry::get_srs("WGS84").unwrap();
    let d = SrsRegistry::get_srs("4326").unwrap();

    assert!(Arc::ptr_eq(&a, &b));
    assert!(Arc::ptr_eq(&a, &c));
    assert!(Arc::ptr_eq(&a, &d));
}

#[test]
fn test_identifier_forms() {
    let mercator = CoordinateSystem::WebMercator;
    for id in ["EPSG:3857", "EPSG::3857", "urn:ogc:def:crs:EPSG::3857", "EPSG:900913", "spherical-mercator"] {
        let srs = SrsRegistry::get_srs(id).unwrap();
        assert!(srs.is_equivalent_to(&mercator), "{} should resolve to Web Mercator", id);
    }
}

#[test]
fn test_utm_identifiers() {
    let srs = SrsRegistry::get_srs("EPSG:32633").unwrap();
    assert!(srs.is_equivalent_to(&CoordinateSystem::UTM(33, true)));
    assert_eq!(srs.display_name(), "WGS 84 / UTM zone 33N");

    let south = SrsRegistry::get_srs("EPSG:32750").unwrap();
    assert_eq!(south.display_name(), "UTM Zone 50S (EPSG:32750)");
}

#[test]
fn test_unknown_identifiers() {
    assert!(matches!(SrsRegistry::get_srs("EPSG:9999"), Err(WarpError::UnknownSrs(_))));
    assert!(matches!(SrsRegistry::get_srs("not a crs"), Err(WarpError::UnknownSrs(_))));
}

#[test]
fn test_parse_epsg_code() {
    assert_eq!(SrsRegistry::parse_epsg_code("EPSG:4326"), Some(4326));
    assert_eq!(SrsRegistry::parse_epsg_code(" epsg:3857 "), Some(3857));
    assert_eq!(SrsRegistry::parse_epsg_code("urn:ogc:def:crs:EPSG:6.6:32633"), Some(32633));
    assert_eq!(SrsRegistry::parse_epsg_code("EPSG:"), None);
    assert_eq!(SrsRegistry::parse_epsg_code("EPSG:12a"), None);
}

#[test]
fn test_register_custom_reference() {
    let grid = scaled_grid();
    SrsRegistry::register("local:test-grid", grid.clone());

    let resolved = SrsRegistry::get_srs("LOCAL:TEST-GRID").unwrap();
    assert!(Arc::ptr_eq(&grid, &resolved));
}

#[test]
fn test_definitions_parsing() {
    let defs = SrsDefinitions::from_str(r#"
        [aliases]
        "my-geo" = "epsg:4326"

        [names]
        4326 = "Lat/Lon"
        bogus = "ignored"
    "#).unwrap();

    assert_eq!(defs.aliases.get("MY-GEO").map(String::as_str), Some("EPSG:4326"));
    assert_eq!(defs.names.get(&4326).map(String::as_str), Some("Lat/Lon"));
    assert_eq!(defs.names.len(), 1);

    assert!(SrsDefinitions::from_str("[aliases").is_err());
}
