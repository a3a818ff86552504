//! `Raster` implementation for RGBA images

use image::{Rgba, RgbaImage};

use super::raster_trait::Raster;

impl Raster for RgbaImage {
    type Sample = Rgba<u8>;

    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }

    fn get_sample(&self, col: u32, row: u32) -> Rgba<u8> {
        *self.get_pixel(col, row)
    }

    /// Fully transparent black
    fn empty_sample() -> Rgba<u8> {
        Rgba([0, 0, 0, 0])
    }

    fn blend(samples: &[Rgba<u8>; 4], weights: &[f64; 4]) -> Rgba<u8> {
        let mut channels = [0u8; 4];
        for (channel, out) in channels.iter_mut().enumerate() {
            let value: f64 = samples.iter()
                .zip(weights)
                .map(|(pixel, weight)| pixel[channel] as f64 * weight)
                .sum();
            *out = value.round().clamp(0.0, 255.0) as u8;
        }
        Rgba(channels)
    }

    fn from_samples(width: u32, height: u32, samples: Vec<Rgba<u8>>) -> Self {
        RgbaImage::from_fn(width, height, |col, row| {
            let index = row as usize * width as usize + col as usize;
            samples.get(index).copied().unwrap_or_else(Self::empty_sample)
        })
    }
}
