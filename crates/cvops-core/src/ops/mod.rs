//! Image operations.
//!
//! Every transform implements [`Operation`]: a named, categorized unit with a
//! single `apply` entry point that borrows the input image and returns a new
//! one. Operations read only the parameters they know, fall back to their
//! own defaults, and never reject unknown keys.
//!
//! ## Variants
//!
//! - **Point**: [`Negative`], [`Gamma`], [`Log`], [`Threshold`]
//! - **Neighbourhood**: [`MeanFilter`], [`MedianFilter`], [`GaussianFilter`], [`SobelFilter`]
//! - **Contrast**: [`ContrastStretch`]

use thiserror::Error;

use crate::buffer::{Image, ImageError};
use crate::params::Params;

pub mod contrast;
pub mod neighborhood;
pub mod point;

pub use contrast::ContrastStretch;
pub use neighborhood::{GaussianFilter, MeanFilter, MedianFilter, SobelFilter};
pub use point::{Gamma, Log, Negative, Threshold};

/// Failures raised while an operation computes its result.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OperationError {
    #[error("invalid integer value for '{name}': '{value}'")]
    InvalidInteger { name: String, value: String },

    #[error("invalid float value for '{name}': '{value}'")]
    InvalidFloat { name: String, value: String },

    /// A parameter combination the algorithm cannot honor.
    #[error("{0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Image(#[from] ImageError),
}

/// Operation families, as shown in the selection catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Point,
    Neighbourhood,
    Contrast,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::Point => "Point Operations",
            Category::Neighbourhood => "Neighbourhood Operations",
            Category::Contrast => "Contrast Stretching",
        }
    }
}

/// A single image transform.
pub trait Operation: Send + Sync {
    /// Display name used as the registry key within its category.
    fn name(&self) -> &'static str;

    fn category(&self) -> Category;

    /// Run the transform. The input is left untouched.
    fn apply(&self, image: &Image, params: &Params) -> Result<Image, OperationError>;
}

/// Force a kernel size to be at least `min` and odd.
///
/// Even values are bumped up by one rather than rejected.
pub(crate) fn odd_kernel_size(ksize: i64, min: i64) -> i64 {
    let mut k = ksize.max(min);
    if k % 2 == 0 {
        k += 1;
    }
    if k != ksize {
        log::debug!("kernel size {} adjusted to {}", ksize, k);
    }
    k
}

/// Clip a float sample to [0, 255] and truncate to `u8`.
#[inline]
pub(crate) fn clip_truncate(v: f32) -> u8 {
    v.clamp(0.0, 255.0) as u8
}
