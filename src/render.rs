use crate::{
    error::{Error, Result},
    grid::LabelGrid,
    palette::ColorRegistry,
};
use image::{Rgb, Rgba, RgbaImage};
use log::info;

/// Paints the grid's storage area onto an image. Several cells share a pixel;
/// the last one visited wins. Rows are flipped so northing grows upward.
pub fn render(
    grid: &LabelGrid,
    image_width: u32,
    image_height: u32,
    background: Rgb<u8>,
    colors: &mut ColorRegistry,
) -> Result<RgbaImage> {
    if image_width == 0 || image_height == 0 {
        return Err(Error::InvalidDimensions {
            width: image_width,
            height: image_height,
        });
    }

    info!("Converting grid to {image_width}x{image_height} image");

    let geometry = grid.geometry();

    let x_image_ratio = geometry.extent.range_easting() as f64 / f64::from(image_width);

    let y_image_ratio = geometry.extent.range_northing() as f64 / f64::from(image_height);

    let x_storage_to_image_ratio = x_image_ratio / geometry.x_storage_ratio();

    let y_storage_to_image_ratio = y_image_ratio / geometry.y_storage_ratio();

    let [r, g, b] = background.0;

    let background = Rgba([r, g, b, u8::MAX]);

    let mut img = RgbaImage::from_pixel(image_width, image_height, background);

    for x in 0..geometry.grid_width as usize {
        let x_img = (x as f64 / x_storage_to_image_ratio).floor() as i64;

        for y in 0..geometry.grid_height as usize {
            let y_img =
                i64::from(image_height) - (y as f64 / y_storage_to_image_ratio).floor() as i64;

            // colors are assigned in visiting order, even for pixels that end up clipped
            let color = match grid.label(x, y) {
                Some(label) => colors.color(label),
                None => background,
            };

            if (0..i64::from(image_width)).contains(&x_img)
                && (0..i64::from(image_height)).contains(&y_img)
            {
                img.put_pixel(x_img as u32, y_img as u32, color);
            }
        }
    }

    info!("Colored {} labels", colors.len());

    Ok(img)
}
