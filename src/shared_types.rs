use crate::projection::{ProjectedPoint, project};
use std::fmt::{Display, Formatter};

/// Labeled geographic sample.
#[derive(Clone, Debug, PartialEq)]
pub struct Point {
    pub label: String,
    pub longitude: f64,
    pub latitude: f64,
}

impl Point {
    pub fn projected(&self) -> ProjectedPoint {
        project(self.longitude, self.latitude)
    }
}

/// Outcome of parsing one input line.
#[derive(Clone, Debug, PartialEq)]
pub enum Record {
    Point(Point),
    /// Rejected by the label filter.
    Filtered,
    Malformed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    Png,
    Jpeg,
}

impl Display for Format {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            formatter,
            "{}",
            match self {
                Format::Png => "png",
                Format::Jpeg => "jpeg",
            }
        )
    }
}
