use crate::{
    encode::encode,
    error::Result,
    grid_codec::encode_grid,
    options::Options,
    rasterization::RenderedMap,
    store::{StoredMap, open_store, save_map},
};
use log::info;
use std::fs;

/// Writes the map to the image file and the store named in `options`.
///
/// Everything that can be refused is checked before the first write.
pub fn write_outputs(map: &RenderedMap, options: &Options) -> Result<()> {
    let image_data = encode(&map.image, options.format, options.jpeg_quality)?;

    let store = match &options.store {
        Some(path) => Some((
            open_store(path, options.existing_file_action)?,
            encode_grid(&map.grid)?,
        )),
        None => None,
    };

    if let Some(output) = &options.output {
        fs::write(output, &image_data)?;

        info!("Wrote {}", output.display());
    }

    if let Some((conn, grid_data)) = store {
        save_map(
            &conn,
            &StoredMap {
                name: &options.name,
                format: options.format,
                width: map.image.width(),
                height: map.image.height(),
                image_data: &image_data,
                grid_data: Some(&grid_data),
            },
        )?;

        info!("Saved map {}", options.name);
    }

    Ok(())
}
