use derive_more::{Deref, DerefMut};
use image::{DynamicImage, GrayImage, Luma};
use log::*;

/// The binary mask type used by this crate.
///
/// This wraps the image crate's `GrayImage` with pixel values restricted to
/// 0 (background) and 1 (foreground). Keeping the values arithmetic lets the
/// thinning loops evaluate the removal predicates directly on the raw
/// buffer. Callers that follow the usual 0/255 convention convert at the
/// boundary with [`BinaryImage::from_dynamic`] and
/// [`BinaryImage::into_gray`].
#[derive(Debug, Clone, PartialEq, Eq, Deref, DerefMut)]
pub struct BinaryImage(pub GrayImage);

impl BinaryImage {
    /// Create an all-background mask.
    pub fn new(width: usize, height: usize) -> Self {
        Self(GrayImage::new(width as u32, height as u32))
    }

    /// Build a mask from a row-major buffer, treating nonzero as foreground.
    ///
    /// Returns `None` when the buffer is not exactly `width * height` bytes.
    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> Option<Self> {
        let mut buffer = GrayImage::from_raw(width as u32, height as u32, data)?;
        for value in buffer.iter_mut() {
            *value = u8::from(*value != 0);
        }
        Some(Self(buffer))
    }

    /// Binarize any image the image crate can represent.
    ///
    /// The input is reduced to a single channel first. Grayscale values of
    /// at least 128 count as foreground, which matches dividing the 0/255
    /// convention by 255 with rounding.
    pub fn from_dynamic(input: &DynamicImage) -> Self {
        let mut buffer = input.to_luma8();
        info!(
            "binarizing a {} x {} image",
            buffer.width(),
            buffer.height()
        );
        for value in buffer.iter_mut() {
            *value = u8::from(*value >= 128);
        }
        Self(buffer)
    }

    /// Rescale {0, 1} back to the 0/255 convention.
    pub fn into_gray(self) -> GrayImage {
        let mut buffer = self.0;
        for value in buffer.iter_mut() {
            *value *= 255;
        }
        buffer
    }

    pub fn width(&self) -> usize {
        self.0.width() as usize
    }

    pub fn height(&self) -> usize {
        self.0.height() as usize
    }

    pub fn get(&self, x: usize, y: usize) -> bool {
        self.0.get_pixel(x as u32, y as u32)[0] != 0
    }

    pub fn put(&mut self, x: usize, y: usize, foreground: bool) {
        self.0
            .put_pixel(x as u32, y as u32, Luma([u8::from(foreground)]));
    }

    /// Number of foreground pixels.
    pub fn count_foreground(&self) -> usize {
        self.data().iter().filter(|&&value| value != 0).count()
    }

    /// The row-major pixel buffer.
    pub fn data(&self) -> &[u8] {
        &self.0
    }

    pub(crate) fn data_mut(&mut self) -> &mut [u8] {
        &mut self.0
    }
}
