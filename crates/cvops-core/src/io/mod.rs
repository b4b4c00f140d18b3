//! Codec boundary: reading uploaded images and persisting results.
//!
//! Inputs may be PNG or JPEG; EXIF orientation is applied on decode so the
//! buffer matches what a viewer shows. Results are always written as PNG.
//! Both directions convert between the codec's RGB order and the BGR order
//! of [`Image`](crate::Image).

mod decode;
mod encode;

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub use decode::{decode_image, get_orientation, Orientation};
pub use encode::encode_png;

use crate::buffer::ImageError;

/// Errors from reading, decoding, encoding, or writing images.
#[derive(Debug, Error)]
pub enum ImageIoError {
    /// The file could not be read from disk.
    #[error("Failed to read uploaded image {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The bytes are not a decodable image.
    #[error("Failed to read uploaded image: {0}")]
    Decode(String),

    /// The decoded image cannot be represented as an [`Image`](crate::Image).
    #[error(transparent)]
    InvalidImage(#[from] ImageError),

    /// PNG encoding failed.
    #[error("PNG encoding failed: {0}")]
    Encode(String),

    /// The encoded result could not be written.
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Read and decode an image file.
pub fn read_image(path: &Path) -> Result<crate::Image, ImageIoError> {
    let bytes = fs::read(path).map_err(|source| ImageIoError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    decode_image(&bytes)
}

/// Encode `image` as PNG and write it to `path`, creating parent directories.
pub fn write_image(path: &Path, image: &crate::Image) -> Result<(), ImageIoError> {
    let write_err = |source| ImageIoError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    let png = encode_png(image)?;
    fs::write(path, png).map_err(write_err)?;
    log::debug!("wrote {}x{} result to {}", image.width(), image.height(), path.display());
    Ok(())
}

/// Whether `filename` has one of the `allowed` extensions (case-insensitive).
pub fn is_allowed_file<S: AsRef<str>>(filename: &str, allowed: &[S]) -> bool {
    match filename.rsplit_once('.') {
        Some((_, ext)) => allowed
            .iter()
            .any(|a| a.as_ref().eq_ignore_ascii_case(ext)),
        None => false,
    }
}
