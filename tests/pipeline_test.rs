use clap::Parser;
use image::Rgba;
use postcode_map::{
    Error,
    encode::encode,
    grid_codec::encode_grid,
    options::Options,
    output::write_outputs,
    params::MapParams,
    points_reader::read_points_from_path,
    rasterization::{accumulate, rasterize},
    shared_types::{Format, Point},
    store::{ExistingFileAction, StoredMap, load_grid, load_image, open_store, save_map},
};
use regex::Regex;
use std::{ffi::OsStr, fs};

fn params() -> MapParams {
    MapParams {
        image_width: 60,
        image_height: 100,
        grid_width: 100,
        grid_height: 200,
        ..MapParams::default()
    }
}

/// Sparse lattice of points split into four districts by quadrant.
fn points() -> Vec<Point> {
    let mut points = Vec::new();

    for i in 0..12 {
        for j in 0..12 {
            let district = match (i < 6, j < 6) {
                (true, true) => "RG1",
                (true, false) => "RG4",
                (false, true) => "RG2",
                (false, false) => "RG30",
            };

            points.push(Point {
                label: district.to_owned(),
                longitude: -1.1 + f64::from(i) * 0.02 + f64::from(j % 3) * 0.001,
                latitude: 51.35 + f64::from(j) * 0.015,
            });
        }
    }

    points
}

#[test]
fn growth_fills_gaps_and_keeps_invariant() {
    let sparse = accumulate(&points(), &params()).unwrap();

    let map = rasterize(&points(), &params()).unwrap();

    let growth = map.growth.unwrap();

    assert!(growth.infills > 0);
    assert!(map.grid.is_consistent());
    assert!(map.grid.occupied_count() > sparse.occupied_count());
    assert_eq!(map.grid.stats().point_count, 144);
}

#[test]
fn first_point_claims_shared_cell() {
    let points = [
        Point {
            label: "SL4".to_owned(),
            longitude: -0.6,
            latitude: 51.48,
        },
        Point {
            label: "SL3".to_owned(),
            longitude: -0.6,
            latitude: 51.48,
        },
        Point {
            label: "SL5".to_owned(),
            longitude: -0.5,
            latitude: 51.40,
        },
    ];

    let grid = accumulate(&points, &params()).unwrap();

    let (x, y) = grid.geometry().cell_of(points[0].projected());

    let (x, y) = (x as usize, y as usize);

    assert_eq!(grid.stats().unique_cell_count, 2);
    assert_eq!(grid.label(x, y), Some("SL4"));
    assert_eq!(grid.occupancy(x, y), 2);
    assert!(grid.is_consistent());
}

#[test]
fn rendering_is_reproducible() {
    let first = rasterize(&points(), &params()).unwrap();

    let second = rasterize(&points(), &params()).unwrap();

    assert_eq!(first.image, second.image);

    assert_eq!(
        encode(&first.image, Format::Png, 80).unwrap(),
        encode(&second.image, Format::Png, 80).unwrap()
    );
}

fn repeated(longitude: f64, latitude: f64) -> Vec<Point> {
    ["RG1", "RG2", "RG1"]
        .into_iter()
        .map(|label| Point {
            label: label.to_owned(),
            longitude,
            latitude,
        })
        .collect()
}

#[test]
fn degenerate_extent_renders_uniform_field() {
    let map = rasterize(&repeated(-1.0, 52.0), &params()).unwrap();

    assert!(map.image.pixels().all(|pixel| *pixel == Rgba([255, 255, 255, 255])));
}

#[test]
fn fractional_single_point_colors_one_pixel() {
    // northing 514540.99999999994 rounds out to a one unit extent
    let map = rasterize(&repeated(-0.9728, 51.4541), &params()).unwrap();

    let colored: Vec<_> = map
        .image
        .enumerate_pixels()
        .filter(|(_, _, pixel)| **pixel != Rgba([255, 255, 255, 255]))
        .map(|(x, y, _)| (x, y))
        .collect();

    assert_eq!(colored, [(0, 1)]);
    assert_eq!(map.grid.occupied_count(), 1);
}

#[test]
fn empty_input_is_an_error() {
    assert!(matches!(rasterize(&[], &params()), Err(Error::EmptyInput)));
}

#[test]
fn reads_filtered_points_from_file() {
    let dir = tempfile::tempdir().unwrap();

    let path = dir.path().join("GB_full.csv");

    fs::write(
        &path,
        "GB\tRG1 1AA\tReading\tEngland\tENG\t\t\t\t\t51.4541\t-0.9728\t6\n\
         GB\tOX1 1AA\tOxford\tEngland\tENG\t\t\t\t\t51.7520\t-1.2577\t6\n\
         GB\tRG4 5BE\tCaversham\tEngland\tENG\t\t\t\t\tbroken\t-0.9728\t6\n\
         GB\tRG4 5BD\tCaversham\tEngland\tENG\t\t\t\t\t51.4700\t-0.9800\t6\n",
    )
    .unwrap();

    let filter = Regex::new("^RG.*").unwrap();

    let points = read_points_from_path(&path, Some(&filter)).unwrap();

    let labels: Vec<_> = points.iter().map(|point| point.label.as_str()).collect();

    assert_eq!(labels, ["RG1", "RG4"]);
}

#[test]
fn store_keeps_image_and_grid() {
    let dir = tempfile::tempdir().unwrap();

    let path = dir.path().join("maps.sqlite");

    let map = rasterize(&points(), &params()).unwrap();

    let image_data = encode(&map.image, Format::Png, 80).unwrap();

    let grid_data = encode_grid(&map.grid).unwrap();

    {
        let conn = open_store(&path, None).unwrap();

        save_map(
            &conn,
            &StoredMap {
                name: "reading",
                format: Format::Png,
                width: map.image.width(),
                height: map.image.height(),
                image_data: &image_data,
                grid_data: Some(&grid_data),
            },
        )
        .unwrap();
    }

    assert!(matches!(open_store(&path, None), Err(Error::OutputExists(_))));

    let conn = open_store(&path, Some(ExistingFileAction::Continue)).unwrap();

    assert_eq!(load_image(&conn, "reading").unwrap(), image_data);

    let grid = load_grid(&conn, "reading").unwrap();

    assert_eq!(grid.occupied_count(), map.grid.occupied_count());
    assert_eq!(grid.label(0, 0), map.grid.label(0, 0));

    assert!(matches!(load_image(&conn, "oxford"), Err(Error::MapNotFound(_))));

    drop(conn);

    let conn = open_store(&path, Some(ExistingFileAction::Overwrite)).unwrap();

    assert!(matches!(load_image(&conn, "reading"), Err(Error::MapNotFound(_))));
}

#[test]
fn refused_store_leaves_no_image_file() {
    let dir = tempfile::tempdir().unwrap();

    let store = dir.path().join("maps.sqlite");

    let output = dir.path().join("reading.png");

    drop(open_store(&store, None).unwrap());

    let options = Options::try_parse_from([
        OsStr::new("postcode-map"),
        OsStr::new("GB_full.csv"),
        OsStr::new("--output"),
        output.as_os_str(),
        OsStr::new("--store"),
        store.as_os_str(),
    ])
    .unwrap();

    let map = rasterize(&points(), &params()).unwrap();

    assert!(matches!(write_outputs(&map, &options), Err(Error::OutputExists(_))));
    assert!(!output.exists());

    let options = Options {
        existing_file_action: Some(ExistingFileAction::Continue),
        ..options
    };

    write_outputs(&map, &options).unwrap();

    let conn = open_store(&store, Some(ExistingFileAction::Continue)).unwrap();

    assert_eq!(load_image(&conn, "map").unwrap(), fs::read(&output).unwrap());
}
