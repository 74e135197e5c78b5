mod image;
mod iteration;
mod predicates;

pub use crate::image::BinaryImage;

use ::image::{DynamicImage, GrayImage};
use log::*;

/// The error type for thinning operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The input raster has zero width or height.
    #[error("invalid input: the raster is empty")]
    InvalidInput,
}

/// The pixel-removal rule evaluated on each interior pixel's 8-neighborhood.
///
/// Both are classical two-sub-iteration thinning criteria; they differ in
/// how aggressively they erode diagonals and staircase artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    /// The Zhang-Suen (1984) rule.
    #[default]
    ZhangSuen,
    /// The Guo-Hall (1989) rule.
    GuoHall,
}

/// Contains the configuration parameters of the thinning operation.
///
/// [`Thinning::thin`] reduces a binary mask to a 1-pixel-wide topological
/// skeleton by repeatedly removing foreground pixels that satisfy the
/// variant's removal rule, until a full even/odd iteration pair removes
/// nothing. Thinning only ever clears pixels, so the output foreground is
/// always a subset of the input foreground.
#[derive(Debug, Clone, Copy, Default)]
pub struct Thinning {
    /// The pixel-removal rule to apply.
    pub variant: Variant,
    /// Number of row bands classified in parallel per sub-iteration.
    ///
    /// `None` sizes the fan-out from the thread pool. The band count is
    /// clamped to the number of interior rows.
    pub threads: Option<usize>,
}

impl Thinning {
    /// This convenience constructor is provided for the common case that
    /// only the removal rule needs to be chosen.
    pub fn new(variant: Variant) -> Self {
        Self {
            variant,
            threads: None,
        }
    }

    /// A `Thinning` using the Zhang-Suen removal rule.
    pub fn zhang_suen() -> Self {
        Self::new(Variant::ZhangSuen)
    }

    /// A `Thinning` using the Guo-Hall removal rule.
    pub fn guo_hall() -> Self {
        Self::new(Variant::GuoHall)
    }

    /// Thin `input` to its topological skeleton.
    ///
    /// Each full iteration runs two sub-iterations; a sub-iteration
    /// classifies every interior pixel against the removal rule into a
    /// transient marker raster and then clears the marked pixels. The loop
    /// terminates once a full iteration removes nothing, which is guaranteed
    /// because the foreground count decreases monotonically.
    ///
    /// Pixels on the image border are never evaluated, so border foreground
    /// survives thinning unchanged.
    ///
    /// # Errors
    /// Returns [`Error::InvalidInput`] when `input` has zero width or
    /// height.
    ///
    /// # Example
    /// ```
    /// use thinning::{BinaryImage, Thinning};
    /// let mask = BinaryImage::from_raw(9, 9, vec![255; 81]).unwrap();
    /// let skeleton = Thinning::zhang_suen().thin(&mask).unwrap();
    /// assert!(skeleton.count_foreground() <= mask.count_foreground());
    /// ```
    pub fn thin(&self, input: &BinaryImage) -> Result<BinaryImage, Error> {
        if input.width() == 0 || input.height() == 0 {
            return Err(Error::InvalidInput);
        }
        let bands = self.threads.unwrap_or_else(optimal_band_count).max(1);
        let foreground = input.count_foreground();
        debug!(
            "thinning a {} x {} mask ({} foreground pixels) in {} row bands",
            input.width(),
            input.height(),
            foreground,
            bands
        );

        let mut output = input.clone();
        let mut iterations = 0usize;
        let mut removed_total = 0usize;
        loop {
            let removed = iteration::sub_iteration(&mut output, 0, self.variant, bands)
                + iteration::sub_iteration(&mut output, 1, self.variant, bands);
            iterations += 1;
            removed_total += removed;
            trace!("iteration {}: removed {} pixels", iterations, removed);
            if removed == 0 {
                break;
            }
        }
        info!(
            "thinning converged after {} iterations; removed {} of {} foreground pixels",
            iterations, removed_total, foreground
        );
        Ok(output)
    }

    /// Thin an arbitrary image following the 0/255 convention.
    ///
    /// The input is reduced to a single channel and binarized (values of at
    /// least 128 count as foreground) before thinning, and the skeleton is
    /// rescaled back to {0, 255}.
    ///
    /// # Example
    /// ```
    /// use image::{DynamicImage, GrayImage, Luma};
    /// let input = DynamicImage::ImageLuma8(GrayImage::from_pixel(8, 8, Luma([255])));
    /// let skeleton = thinning::Thinning::guo_hall().thin_image(&input).unwrap();
    /// assert!(skeleton.pixels().all(|p| p[0] == 0 || p[0] == 255));
    /// ```
    pub fn thin_image(&self, input: &DynamicImage) -> Result<GrayImage, Error> {
        Ok(self.thin(&BinaryImage::from_dynamic(input))?.into_gray())
    }
}

#[cfg(feature = "rayon")]
fn optimal_band_count() -> usize {
    rayon::current_num_threads()
}

#[cfg(not(feature = "rayon"))]
fn optimal_band_count() -> usize {
    std::thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get)
}
