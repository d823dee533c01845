use image::Rgba;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use std::collections::HashMap;

/// Memoized random color per label, reproducible for a given seed and label
/// encounter order.
pub struct ColorRegistry {
    rng: Pcg64,
    colors: HashMap<String, Rgba<u8>>,
}

impl ColorRegistry {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg64::seed_from_u64(seed),
            colors: HashMap::new(),
        }
    }

    pub fn color(&mut self, label: &str) -> Rgba<u8> {
        if let Some(&color) = self.colors.get(label) {
            return color;
        }

        let r = self.rng.random();
        let g = self.rng.random();
        let b = self.rng.random();

        let color = Rgba([r, g, b, u8::MAX]);

        self.colors.insert(label.to_owned(), color);

        color
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}
