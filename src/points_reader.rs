use crate::{
    error::Result,
    progress::Progress,
    shared_types::{Point, Record},
};
use log::{debug, info};
use regex::Regex;
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

// GeoNames postal code dump columns
const POSTAL_CODE_COLUMN: usize = 1;
const LATITUDE_COLUMN: usize = 9;
const LONGITUDE_COLUMN: usize = 10;

/// Parses one tab separated GeoNames line. The label is the postal district,
/// the first word of the postal code; the filter sees the whole postal code.
pub fn parse_record(line: &str, filter: Option<&Regex>) -> Record {
    let fields: Vec<&str> = line.split('\t').collect();

    let (Some(postal_code), Some(latitude), Some(longitude)) = (
        fields.get(POSTAL_CODE_COLUMN),
        fields.get(LATITUDE_COLUMN),
        fields.get(LONGITUDE_COLUMN),
    ) else {
        return Record::Malformed;
    };

    if filter.is_some_and(|filter| !filter.is_match(postal_code)) {
        return Record::Filtered;
    }

    let (Ok(latitude), Ok(longitude)) = (latitude.trim().parse::<f64>(), longitude.trim().parse::<f64>())
    else {
        return Record::Malformed;
    };

    if !latitude.is_finite() || !longitude.is_finite() {
        return Record::Malformed;
    }

    let Some(district) = postal_code.split_whitespace().next() else {
        return Record::Malformed;
    };

    Record::Point(Point {
        label: district.to_owned(),
        longitude,
        latitude,
    })
}

pub fn read_points<R: BufRead>(reader: R, filter: Option<&Regex>) -> Result<Vec<Point>> {
    let mut progress = Progress::new();

    let mut points = Vec::new();

    for line in reader.split(b'\n') {
        let line = line?;

        let record = match std::str::from_utf8(&line) {
            Ok(line) => parse_record(line.trim_end_matches('\r'), filter),
            Err(_) => Record::Malformed,
        };

        match record {
            Record::Point(point) => {
                points.push(point);

                progress.point();
            }
            Record::Filtered => progress.filtered(),
            Record::Malformed => {
                debug!("Skipping malformed line {}", progress.lines + 1);

                progress.malformed();
            }
        }
    }

    progress.print_stats();

    Ok(points)
}

pub fn read_points_from_path(path: &Path, filter: Option<&Regex>) -> Result<Vec<Point>> {
    info!("Reading {}", path.display());

    read_points(BufReader::new(File::open(path)?), filter)
}
