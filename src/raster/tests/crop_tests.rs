//! Tests for cropping georeferenced rasters

use image::Rgba;

use super::test_utils::{assert_close, geo_extent, position_image, ramp_field, wgs84};
use crate::coordinate::GeoExtent;
use crate::raster::{GeoImage, GeoRaster, Raster, ResampleOptions, Resampler, ResamplingMode};

/// 101 x 101 nodes over [0, 100], one unit apart
fn position_raster() -> GeoImage {
    GeoRaster::new(position_image(101, 101), geo_extent(0.0, 0.0, 100.0, 100.0))
}

#[test]
fn test_crop_on_node_boundaries() {
    let cropped = position_raster().crop(10.0, 20.0, 30.0, 50.0).unwrap();

    assert_eq!(cropped.raster().dimensions(), (21, 31));
    assert_eq!(cropped.extent().bounds(), (10.0, 20.0, 30.0, 50.0));
    assert_eq!(*cropped.raster().get_pixel(0, 0), Rgba([10, 20, 0, 255]));
    assert_eq!(*cropped.raster().get_pixel(20, 30), Rgba([30, 50, 0, 255]));
}

#[test]
fn test_crop_snaps_outwards_to_whole_nodes() {
    let source = position_raster();
    let (xmin, ymin, xmax, ymax) = (10.5, 20.5, 30.2, 50.9);
    let cropped = source.crop(xmin, ymin, xmax, ymax).unwrap();

    assert_eq!(cropped.raster().dimensions(), (22, 32));
    assert_eq!(cropped.extent().bounds(), (10.0, 20.0, 31.0, 51.0));

    // Within one node spacing of the request on every side
    let grid = source.geotransform();
    let extent = cropped.extent();
    assert!((extent.x_min() - xmin).abs() <= grid.pixel_width);
    assert!((extent.y_min() - ymin).abs() <= grid.pixel_height);
    assert!((extent.x_max() - xmax).abs() <= grid.pixel_width);
    assert!((extent.y_max() - ymax).abs() <= grid.pixel_height);
}

#[test]
fn test_crop_keeps_the_geotransform() {
    let source = position_raster();
    let cropped = source.crop(12.3, 40.0, 57.8, 61.2).unwrap();

    let before = source.geotransform();
    let after = cropped.geotransform();
    assert_close(after.pixel_width, before.pixel_width, 1e-12);
    assert_close(after.pixel_height, before.pixel_height, 1e-12);

    let node = after.pixel_to_geo(3.0, 4.0);
    let same = before.geo_to_pixel(node.x, node.y);
    assert_close(same.x, 15.0, 1e-9);
    assert_close(same.y, 44.0, 1e-9);
}

#[test]
fn test_coordinates_sample_the_same_value_after_cropping() {
    let source = GeoRaster::new(position_image(9, 9), geo_extent(0.0, 0.0, 8.0, 8.0));
    let cropped = source.crop(2.5, 3.5, 6.2, 7.1).unwrap();
    assert_eq!(cropped.extent().bounds(), (2.0, 3.0, 7.0, 8.0));

    for mode in [ResamplingMode::Nearest, ResamplingMode::Bilinear] {
        let single = Resampler::new(ResampleOptions::new(1, 1).with_mode(mode));
        for &(x, y) in &[(2.0, 3.0), (3.4, 4.7), (5.99, 7.6), (6.3, 6.2), (4.0, 5.0)] {
            // The only destination sample sits on the extent's lower-left corner.
            let at_point = geo_extent(x, y, x + 0.01, y + 0.01);
            let from_source = source.reproject(&wgs84(), Some(&at_point), &single).unwrap();
            let from_cropped = cropped.reproject(&wgs84(), Some(&at_point), &single).unwrap();
            assert_eq!(from_source.raster().get_pixel(0, 0), from_cropped.raster().get_pixel(0, 0),
                       "{} at ({}, {})", mode, x, y);
        }
    }
}

#[test]
fn test_crop_larger_than_raster_returns_whole_raster() {
    let source = position_raster();
    let cropped = source.crop(-50.0, -50.0, 500.0, 500.0).unwrap();

    assert_eq!(cropped.raster().dimensions(), (101, 101));
    assert_eq!(cropped.extent(), source.extent());
    assert_eq!(cropped.raster().as_raw(), source.raster().as_raw());
}

#[test]
fn test_crop_without_overlap() {
    let source = position_raster();

    assert!(source.crop(200.0, 0.0, 300.0, 100.0).is_none());
    assert!(source.crop(-30.0, -30.0, -10.0, -10.0).is_none());
    // Touching an edge is not an overlap.
    assert!(source.crop(100.0, 0.0, 200.0, 100.0).is_none());
    assert!(source.crop(0.0, -20.0, 100.0, 0.0).is_none());
    // Empty windows
    assert!(source.crop(40.0, 10.0, 40.0, 20.0).is_none());
    assert!(source.crop(40.0, 20.0, 50.0, 10.0).is_none());
}

#[test]
fn test_crop_of_invalid_raster() {
    let invalid = GeoRaster::new(position_image(10, 10), GeoExtent::invalid());
    assert!(invalid.crop(0.0, 0.0, 5.0, 5.0).is_none());

    let empty = GeoRaster::new(position_image(0, 0), geo_extent(0.0, 0.0, 1.0, 1.0));
    assert!(empty.crop(0.0, 0.0, 1.0, 1.0).is_none());
}

#[test]
fn test_crop_single_row_keeps_the_row() {
    let strip = GeoRaster::new(position_image(5, 1), geo_extent(0.0, 0.0, 4.0, 1.0));
    let cropped = strip.crop(1.5, 0.2, 2.5, 0.4).unwrap();

    assert_eq!(cropped.raster().dimensions(), (3, 1));
    assert_eq!(cropped.extent().bounds(), (1.0, 0.0, 3.0, 1.0));
    assert_eq!(*cropped.raster().get_pixel(0, 0), Rgba([1, 0, 0, 255]));
}

#[test]
fn test_crop_keeps_source_untouched() {
    let source = position_raster();
    let before = source.raster().clone();
    let _ = source.crop(10.0, 10.0, 20.0, 20.0);

    assert_eq!(source.raster().as_raw(), before.as_raw());
    assert_eq!(source.extent().bounds(), (0.0, 0.0, 100.0, 100.0));
}

#[test]
fn test_crop_height_field() {
    let field = GeoRaster::new(ramp_field(11, 11), geo_extent(0.0, 0.0, 1.0, 1.0));
    let cropped = field.crop(0.25, 0.55, 0.47, 1.0).unwrap();

    assert_eq!((cropped.raster().width(), cropped.raster().height()), (4, 6));
    assert_eq!(cropped.raster().get_height(0, 0), 52.0);
    assert_eq!(cropped.raster().get_height(3, 5), 105.0);
    assert_close(cropped.extent().x_min(), 0.2, 1e-12);
    assert_close(cropped.extent().y_min(), 0.5, 1e-12);
    assert_close(cropped.extent().x_max(), 0.5, 1e-12);
    assert_close(cropped.extent().y_max(), 1.0, 1e-12);
}
