//! PNG encoding for results.

use std::io::Cursor;

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};

use super::ImageIoError;
use crate::buffer::Image;

/// Encode a BGR [`Image`] to PNG bytes.
pub fn encode_png(image: &Image) -> Result<Vec<u8>, ImageIoError> {
    let rgb = image
        .to_rgb_image()
        .ok_or_else(|| ImageIoError::Encode("pixel buffer does not match dimensions".into()))?;

    let mut buffer = Cursor::new(Vec::new());
    PngEncoder::new(&mut buffer)
        .write_image(rgb.as_raw(), image.width(), image.height(), ExtendedColorType::Rgb8)
        .map_err(|e| ImageIoError::Encode(e.to_string()))?;

    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_png_signature() {
        let img = Image::filled(10, 10, 128).unwrap();
        let png = encode_png(&img).unwrap();
        assert_eq!(&png[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    }

    #[test]
    fn test_encode_stores_rgb_order() {
        let img = Image::from_bgr(1, 1, vec![10, 20, 30]).unwrap();
        let png = encode_png(&img).unwrap();
        let decoded = image::load_from_memory(&png).unwrap().into_rgb8();
        assert_eq!(decoded.into_raw(), vec![30, 20, 10]);
    }
}
