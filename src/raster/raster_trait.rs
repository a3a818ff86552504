//! Sample-level access shared by every raster kind

/// A rectangular grid of samples addressed by column and row
///
/// Row 0 is the southernmost row. The crop and resampling code only uses
/// this trait, so adding a raster kind means implementing these methods.
pub trait Raster: Sized + Sync {
    /// Value stored at each grid node
    type Sample: Copy + Send + Sync;

    /// Number of columns
    fn width(&self) -> u32;

    /// Number of rows
    fn height(&self) -> u32;

    /// Sample at `(col, row)`; callers guarantee the position is in range
    fn get_sample(&self, col: u32, row: u32) -> Self::Sample;

    /// Value written where nothing could be sampled
    fn empty_sample() -> Self::Sample;

    /// Weighted combination of four neighbouring samples
    ///
    /// # Arguments
    /// * `samples` - Lower-left, lower-right, upper-left, upper-right samples
    /// * `weights` - Matching weights, summing to one
    fn blend(samples: &[Self::Sample; 4], weights: &[f64; 4]) -> Self::Sample;

    /// Build a raster from row-major samples (row 0 first)
    ///
    /// Missing trailing samples are filled with `empty_sample()`.
    fn from_samples(width: u32, height: u32, samples: Vec<Self::Sample>) -> Self;

    /// Whether the raster has no samples at all
    fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Copy a window of the raster into a new raster
    ///
    /// # Arguments
    /// * `col`, `row` - First column and row of the window
    /// * `width`, `height` - Window size, which must fit inside the raster
    fn sub_raster(&self, col: u32, row: u32, width: u32, height: u32) -> Self {
        let mut samples = Vec::with_capacity(width as usize * height as usize);
        for r in row..row + height {
            for c in col..col + width {
                samples.push(self.get_sample(c, r));
            }
        }
        Self::from_samples(width, height, samples)
    }
}
