use crate::{error::Result, shared_types::Format};
use image::{
    DynamicImage, RgbaImage,
    codecs::{jpeg::JpegEncoder, png::PngEncoder},
};
use std::io::Cursor;

/// Encodes the map. JPEG has no alpha channel, the map is flattened to RGB.
pub fn encode(img: &RgbaImage, format: Format, jpeg_quality: u8) -> Result<Vec<u8>> {
    let mut buffer = vec![];

    match format {
        Format::Png => {
            img.write_with_encoder(PngEncoder::new(Cursor::new(&mut buffer)))?;
        }
        Format::Jpeg => {
            let rgb = DynamicImage::ImageRgba8(img.clone()).into_rgb8();

            rgb.write_with_encoder(JpegEncoder::new_with_quality(
                Cursor::new(&mut buffer),
                jpeg_quality,
            ))?;
        }
    }

    Ok(buffer)
}
