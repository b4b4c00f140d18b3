//! In-memory image buffer shared by every operation.
//!
//! Samples are stored interleaved, row-major, three bytes per pixel in
//! **blue, green, red** order. The codec layer converts from and to the RGB
//! order used by the `image` crate at the boundary.

use thiserror::Error;

use crate::luminance::gray_u8;

/// Number of interleaved samples per pixel.
pub const CHANNELS: usize = 3;

/// Errors raised when constructing an [`Image`] from raw samples.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImageError {
    /// Width or height is zero, or the sample count does not fit in memory
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// Sample buffer length doesn't match the dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },
}

/// A 3-channel 8-bit image in BGR order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

/// Interleaved sample count for the given size. Zero or unaddressable sizes
/// are rejected.
fn sample_count(width: u32, height: u32) -> Result<usize, ImageError> {
    let invalid = ImageError::InvalidDimensions { width, height };
    if width == 0 || height == 0 {
        return Err(invalid);
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(CHANNELS))
        .ok_or(invalid)
}

impl Image {
    /// Create an image from interleaved BGR samples.
    pub fn from_bgr(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, ImageError> {
        let expected = sample_count(width, height)?;
        if pixels.len() != expected {
            return Err(ImageError::InvalidPixelData {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Create an image with every sample set to `value`.
    pub fn filled(width: u32, height: u32, value: u8) -> Result<Self, ImageError> {
        let len = sample_count(width, height)?;
        Self::from_bgr(width, height, vec![value; len])
    }

    /// Build a 3-channel image by replicating a single gray plane.
    pub fn from_gray(width: u32, height: u32, gray: &[u8]) -> Result<Self, ImageError> {
        let pixels = gray.iter().flat_map(|&v| [v; CHANNELS]).collect();
        Self::from_bgr(width, height, pixels)
    }

    /// Create an image from an `image::RgbImage`, swapping to BGR order.
    pub fn from_rgb_image(img: image::RgbImage) -> Result<Self, ImageError> {
        let (width, height) = img.dimensions();
        let mut pixels = img.into_raw();
        swap_red_blue(&mut pixels);
        Self::from_bgr(width, height, pixels)
    }

    /// Convert to an `image::RgbImage` for encoding.
    pub fn to_rgb_image(&self) -> Option<image::RgbImage> {
        let mut pixels = self.pixels.clone();
        swap_red_blue(&mut pixels);
        image::RgbImage::from_raw(self.width, self.height, pixels)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Interleaved BGR samples.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Extract one channel as a contiguous plane (0 = blue, 1 = green, 2 = red).
    pub fn channel(&self, index: usize) -> Vec<u8> {
        self.pixels
            .chunks_exact(CHANNELS)
            .map(|px| px[index])
            .collect()
    }

    /// Single-channel luminance plane using the BGR→gray weights.
    pub fn to_gray(&self) -> Vec<u8> {
        self.pixels
            .chunks_exact(CHANNELS)
            .map(|px| gray_u8(px[0], px[1], px[2]))
            .collect()
    }

    /// Produce a new image of the same size with every sample mapped through `f`.
    pub fn map_samples(&self, f: impl Fn(u8) -> u8) -> Image {
        Image {
            width: self.width,
            height: self.height,
            pixels: self.pixels.iter().map(|&v| f(v)).collect(),
        }
    }

    /// Reassemble an image of the same size from three planes.
    pub(crate) fn with_planes(&self, planes: &[Vec<u8>; CHANNELS]) -> Image {
        let mut pixels = Vec::with_capacity(self.pixels.len());
        for i in 0..self.pixel_count() {
            pixels.extend(planes.iter().map(|plane| plane[i]));
        }
        Image {
            width: self.width,
            height: self.height,
            pixels,
        }
    }
}

fn swap_red_blue(pixels: &mut [u8]) {
    for px in pixels.chunks_exact_mut(CHANNELS) {
        px.swap(0, 2);
    }
}
