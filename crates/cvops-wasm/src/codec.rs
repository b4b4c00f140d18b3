//! Decoding uploads and encoding PNG results.

use crate::types::JsImage;
use cvops_core::io;
use wasm_bindgen::prelude::*;

/// Decode PNG or JPEG bytes into a BGR image, honoring EXIF orientation.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsImage, JsValue> {
    decode(bytes).map_err(crate::js_error)
}

/// Encode an image as PNG bytes.
#[wasm_bindgen]
pub fn encode_png(image: &JsImage) -> Result<Vec<u8>, JsValue> {
    encode(image).map_err(crate::js_error)
}

fn decode(bytes: &[u8]) -> Result<JsImage, io::ImageIoError> {
    io::decode_image(bytes).map(JsImage::from_image)
}

fn encode(image: &JsImage) -> Result<Vec<u8>, io::ImageIoError> {
    io::encode_png(&image.to_image()?)
}
