use crate::{params::MapParams, shared_types::Format, store::ExistingFileAction};
use clap::{ArgGroup, Parser, value_parser};
use std::{path::PathBuf, str::FromStr};

#[derive(Clone, Debug, Parser, PartialEq)]
#[command(author, version, about)]
#[clap(group = ArgGroup::new("destination").required(true).multiple(true))]
pub struct Options {
    /// GeoNames postal code file (tab separated, e.g. GB_full.csv)
    pub input: PathBuf,

    /// Output image file
    #[clap(long, group = "destination")]
    pub output: Option<PathBuf>,

    /// SQLite map store to save the rendered map and its grid into
    #[clap(long, group = "destination")]
    pub store: Option<PathBuf>,

    /// Name of the map in the store
    #[clap(long, default_value = "map")]
    pub name: String,

    /// What to do if the store already exists
    #[clap(long, value_enum, requires = "store")]
    pub existing_file_action: Option<ExistingFileAction>,

    /// Image width in pixels
    #[clap(long, default_value_t = 600, value_parser = value_parser!(u32).range(1..))]
    pub image_width: u32,

    /// Image height in pixels
    #[clap(long, default_value_t = 1000, value_parser = value_parser!(u32).range(1..))]
    pub image_height: u32,

    /// Storage grid width in cells; make it denser than the image
    #[clap(long, default_value_t = 1000, value_parser = value_parser!(u32).range(1..))]
    pub grid_width: u32,

    /// Storage grid height in cells
    #[clap(long, default_value_t = 2000, value_parser = value_parser!(u32).range(1..))]
    pub grid_height: u32,

    /// Maximum number of cells to look back when growing districts
    #[clap(long, default_value_t = 20)]
    pub pix_growth_max: usize,

    /// Do not grow districts into empty cells
    #[clap(long)]
    pub no_grow: bool,

    /// Regular expression a postal code must match to be mapped, e.g. `^RG.*`
    #[clap(long)]
    pub label_filter: Option<String>,

    /// Seed of district colors
    #[clap(long, default_value_t = 0)]
    pub seed: u64,

    /// Color of empty areas
    #[clap(long, default_value = "FFFFFF")]
    pub background_color: Rgb,

    /// Image format. For alpha (transparency) support use `png`.
    #[clap(long, value_enum, default_value_t = Format::Png)]
    pub format: Format,

    /// Quality from 0 to 100 when writing to JPEG
    #[clap(long, default_value_t = 80)]
    pub jpeg_quality: u8,
}

impl Options {
    pub fn params(&self) -> MapParams {
        MapParams {
            image_width: self.image_width,
            image_height: self.image_height,
            grid_width: self.grid_width,
            grid_height: self.grid_height,
            pix_growth_max: self.pix_growth_max,
            seed: self.seed,
            background: self.background_color.0,
            grow: !self.no_grow,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Rgb(pub image::Rgb<u8>);

impl FromStr for Rgb {
    type Err = String;

    /// Parses `RRGGBB` hex.
    fn from_str(string: &str) -> Result<Self, Self::Err> {
        if string.len() != 6 || !string.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(format!("expected six hex digits (RRGGBB), got {string:?}"));
        }

        u32::from_str_radix(string, 16)
            .map(|color| {
                let [_, r, g, b] = color.to_be_bytes();

                Self(image::Rgb([r, g, b]))
            })
            .map_err(|err| err.to_string())
    }
}
