//! Postal district maps from postal code centroids.
//!
//! Points are bucketed into a storage grid denser than the target image,
//! districts are grown into the empty cells between them and the grid is
//! painted with one random color per district.

pub mod encode;
pub mod error;
pub mod grid;
pub mod grid_codec;
pub mod infill;
pub mod options;
pub mod output;
pub mod palette;
pub mod params;
pub mod points_reader;
pub mod progress;
pub mod projection;
pub mod rasterization;
pub mod render;
pub mod schema;
pub mod shared_types;
pub mod store;

pub use error::{Error, Result};
