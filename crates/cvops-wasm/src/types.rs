//! WASM-compatible wrapper for image buffers.

use cvops_core::{Image, ImageError};
use wasm_bindgen::prelude::*;

/// An 8-bit, 3-channel image in BGR order.
///
/// Pixel data lives in WASM memory; `pixels()` copies it out to a
/// `Uint8Array`.
#[wasm_bindgen]
pub struct JsImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsImage {
    /// Create an image from BGR pixel data (3 bytes per pixel, row-major).
    ///
    /// Fails when the buffer length does not match the dimensions.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<JsImage, JsValue> {
        Image::from_bgr(width, height, pixels)
            .map(Self::from_image)
            .map_err(crate::js_error)
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of bytes in the pixel buffer (width * height * 3)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns BGR pixel data as Uint8Array (copied).
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }
}

impl JsImage {
    pub(crate) fn from_image(image: Image) -> Self {
        Self {
            width: image.width(),
            height: image.height(),
            pixels: image.into_pixels(),
        }
    }

    /// Convert back to a core image. Clones the pixel data.
    pub(crate) fn to_image(&self) -> Result<Image, ImageError> {
        Image::from_bgr(self.width, self.height, self.pixels.clone())
    }
}
