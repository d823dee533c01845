use clap::Parser;
use env_logger::Env;
use log::error;
use postcode_map::{
    Result, options::Options, output::write_outputs, points_reader::read_points_from_path,
    rasterization::rasterize,
};
use regex::Regex;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let options = Options::parse();

    match run(&options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");

            ExitCode::FAILURE
        }
    }
}

fn run(options: &Options) -> Result<()> {
    let filter = options
        .label_filter
        .as_deref()
        .map(Regex::new)
        .transpose()?;

    let points = read_points_from_path(&options.input, filter.as_ref())?;

    let map = rasterize(&points, &options.params())?;

    write_outputs(&map, options)
}
