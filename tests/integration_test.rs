//! End-to-end tests of the library facade

extern crate std;

use std::fs;

use image::{Rgba, RgbaImage};

use rasterwarp::{RasterWarp, ResamplingMode, WarpConfig, WarpError};

const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);

fn small_config() -> WarpConfig {
    let mut config = WarpConfig::default();
    config.resample.width = 48;
    config.resample.height = 48;
    config
}

#[test]
fn test_reproject_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("red.png");
    let mercator = dir.path().join("mercator.png");
    let back = dir.path().join("back.png");
    RgbaImage::from_pixel(48, 48, RED).save(&input).unwrap();

    let warp = RasterWarp::new(small_config());
    let extent = warp.extent("-10,-10,10,10", "EPSG:4326").unwrap();

    let mercator_extent = warp.reproject_file(&input, &mercator, extent.clone(), "EPSG:3857", None).unwrap();
    std::assert!(mercator_extent.is_valid());
    std::assert!((mercator_extent.x_max() - 1113194.9079327357).abs() < 1e-3);

    let back_extent = warp.reproject_file(&mercator, &back, mercator_extent, "EPSG:4326", Some(&extent)).unwrap();
    std::assert_eq!(back_extent, extent);

    let result = image::open(&back).unwrap().to_rgba8();
    std::assert_eq!(result.dimensions(), (48, 48));
    for row in 3..45 {
        for col in 3..45 {
            std::assert_eq!(*result.get_pixel(col, row), RED, "pixel ({}, {})", col, row);
        }
    }
}

#[test]
fn test_crop_file_reports_achieved_extent() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("grid.png");
    let output = dir.path().join("crop.png");
    RgbaImage::from_fn(41, 21, |col, row| Rgba([col as u8, row as u8, 0, 255])).save(&input).unwrap();

    let warp = RasterWarp::default();
    let extent = warp.extent("0,0,40,20", "EPSG:4326").unwrap();
    let window = warp.extent("10.5,2,20,7.5", "EPSG:4326").unwrap();

    let achieved = warp.crop_file(&input, &output, extent.clone(), &window).unwrap();
    std::assert_eq!(achieved.bounds(), (10.0, 2.0, 20.0, 8.0));

    // The file is north-up: its top row is the northernmost cropped row.
    let cropped = image::open(&output).unwrap().to_rgba8();
    std::assert_eq!(cropped.dimensions(), (11, 7));
    std::assert_eq!(*cropped.get_pixel(0, 0), Rgba([10, 12, 0, 255]));
    std::assert_eq!(*cropped.get_pixel(10, 6), Rgba([20, 18, 0, 255]));

    let outside = warp.extent("100,100,110,110", "EPSG:4326").unwrap();
    let result = warp.crop_file(&input, &output, extent, &outside);
    std::assert!(matches!(result, Err(WarpError::EmptyResult(_))));
}

#[test]
fn test_elevation_grid_queries() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dem.asc");
    fs::write(&path, "ncols 3\nnrows 3\nxllcenter 0\nyllcenter 0\ncellsize 1\n\
                      60 70 80\n30 40 50\n0 10 20\n").unwrap();

    let warp = RasterWarp::default();
    let grid = warp.load_elevation_grid(&path, "EPSG:4326").unwrap();

    std::assert_eq!(warp.elevation_at(&grid, "EPSG:4326", 0.0, 0.0).unwrap(), Some(0.0));
    std::assert_eq!(warp.elevation_at(&grid, "EPSG:4326", 2.0, 2.0).unwrap(), Some(80.0));
    std::assert_eq!(warp.elevation_at(&grid, "EPSG:4326", 4.0, 0.0).unwrap(), None);

    let (x, y) = (111319.49079327357, 0.0);
    let height = warp.elevation_at(&grid, "EPSG:3857", x, y).unwrap().unwrap();
    std::assert!((height - 10.0).abs() < 1e-3);

    std::assert!(warp.elevation_at(&grid, "EPSG:0", 0.0, 0.0).is_err());
}

#[test]
fn test_configuration_file_drives_the_facade() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rasterwarp.toml");
    fs::write(&path, r#"
        [resample]
        width = 16
        height = 8
        mode = "bilinear"

        [extent]
        edge_samples = 5

        [srs."local:km-grid"]
        scale_x = 111.32
        scale_y = 110.57
    "#).unwrap();

    let warp = RasterWarp::from_config_file(&path).unwrap();
    std::assert_eq!(warp.config().resample.mode, ResamplingMode::Bilinear);

    let extent = warp.extent("0,0,1,1", "EPSG:4326").unwrap();
    let km = warp.transform_extent(&extent, "local:km-grid").unwrap();
    std::assert!((km.x_max() - 111.32).abs() < 1e-9);
    std::assert!((km.y_max() - 110.57).abs() < 1e-9);

    let image = rasterwarp::GeoImage::new(RgbaImage::from_pixel(4, 4, RED), extent);
    let reprojected = warp.reproject_image(&image, "local:km-grid", None).unwrap();
    std::assert_eq!(reprojected.raster().dimensions(), (16, 8));
    std::assert_eq!(reprojected.extent(), &km);

    // A target extent has to be expressed in the target system.
    let result = warp.reproject_image(&image, "local:km-grid", Some(image.extent()));
    std::assert!(matches!(result, Err(WarpError::InvalidExtent(_))));
}

#[test]
fn test_unprojectable_extent_is_an_error() {
    let warp = RasterWarp::default();
    let polar = warp.extent("-10,80,10,90", "EPSG:4326").unwrap();

    std::assert!(matches!(warp.transform_extent(&polar, "EPSG:3857"), Err(WarpError::InvalidExtent(_))));
}
