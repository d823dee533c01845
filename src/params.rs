use image::Rgb;

/// Core map settings, independent of how they were configured.
#[derive(Clone, Debug, PartialEq)]
pub struct MapParams {
    pub image_width: u32,
    pub image_height: u32,
    /// Storage cells across; the grid is usually denser than the image.
    pub grid_width: u32,
    pub grid_height: u32,
    pub pix_growth_max: usize,
    pub seed: u64,
    /// Color of empty cells.
    pub background: Rgb<u8>,
    pub grow: bool,
}

impl Default for MapParams {
    fn default() -> Self {
        Self {
            image_width: 600,
            image_height: 1000,
            grid_width: 1000,
            grid_height: 2000,
            pix_growth_max: 20,
            seed: 0,
            background: Rgb([255, 255, 255]),
            grow: true,
        }
    }
}
