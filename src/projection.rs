use crate::error::{Error, Result};

/// Degrees to easting/northing units.
pub const SCALE: f64 = 10_000.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectedPoint {
    pub easting: f64,
    pub northing: f64,
}

pub fn project(longitude: f64, latitude: f64) -> ProjectedPoint {
    ProjectedPoint {
        easting: (longitude + 180.0) * SCALE,
        northing: latitude * SCALE,
    }
}

/// Integer bounds of a projected point set.
///
/// Minima are floored and maxima ceiled so every point of the set lies within.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Extent {
    pub min_easting: i64,
    pub max_easting: i64,
    pub min_northing: i64,
    pub max_northing: i64,
}

impl Extent {
    pub fn new(min_easting: i64, max_easting: i64, min_northing: i64, max_northing: i64) -> Self {
        Self {
            min_easting,
            max_easting: max_easting.max(min_easting),
            min_northing,
            max_northing: max_northing.max(min_northing),
        }
    }

    pub fn of<I>(points: I) -> Result<Self>
    where
        I: IntoIterator<Item = ProjectedPoint>,
    {
        let mut points = points.into_iter();

        let first = points.next().ok_or(Error::EmptyInput)?;

        let (min_e, max_e, min_n, max_n) = points.fold(
            (first.easting, first.easting, first.northing, first.northing),
            |(min_e, max_e, min_n, max_n), point| {
                (
                    min_e.min(point.easting),
                    max_e.max(point.easting),
                    min_n.min(point.northing),
                    max_n.max(point.northing),
                )
            },
        );

        Ok(Self::new(
            min_e.floor() as i64,
            max_e.ceil() as i64,
            min_n.floor() as i64,
            max_n.ceil() as i64,
        ))
    }

    /// Easting range, never less than 1 so ratios stay finite.
    pub fn range_easting(&self) -> i64 {
        (self.max_easting - self.min_easting).max(1)
    }

    /// Northing range, never less than 1 so ratios stay finite.
    pub fn range_northing(&self) -> i64 {
        (self.max_northing - self.min_northing).max(1)
    }
}
