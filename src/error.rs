use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Invalid label filter: {0}")]
    Regex(#[from] regex::Error),

    #[error("No points to map")]
    EmptyInput,

    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Grid index out of bounds: ({x}, {y}) in grid of size ({columns}, {rows})")]
    IndexOutOfBounds {
        x: i64,
        y: i64,
        columns: usize,
        rows: usize,
    },

    #[error("Empty label for cell ({x}, {y})")]
    EmptyLabel { x: i64, y: i64 },

    #[error("Output already exists: {}; specify --existing-file-action", .0.display())]
    OutputExists(PathBuf),

    #[error("Map not found in store: {0}")]
    MapNotFound(String),

    #[error("Corrupt grid snapshot: {0}")]
    CorruptGrid(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;
