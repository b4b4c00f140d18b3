//! Point operations: each output sample depends only on the matching input sample.

use super::{clip_truncate, Category, Operation, OperationError};
use crate::buffer::Image;
use crate::params::Params;

/// `255 - x` per sample.
#[derive(Debug, Clone, Copy, Default)]
pub struct Negative;

impl Operation for Negative {
    fn name(&self) -> &'static str {
        "Negative transformation"
    }

    fn category(&self) -> Category {
        Category::Point
    }

    fn apply(&self, image: &Image, _params: &Params) -> Result<Image, OperationError> {
        Ok(image.map_samples(|v| 255 - v))
    }
}

/// Power-law transform with exponent `1 / gamma`.
///
/// Parameter `gamma` (float, default 1.0). Non-positive values reset to 1.0,
/// so larger gammas brighten the image.
#[derive(Debug, Clone, Copy, Default)]
pub struct Gamma;

impl Operation for Gamma {
    fn name(&self) -> &'static str {
        "Gamma transformation"
    }

    fn category(&self) -> Category {
        Category::Point
    }

    fn apply(&self, image: &Image, params: &Params) -> Result<Image, OperationError> {
        let mut gamma = params.float_or("gamma", 1.0)?;
        if gamma.is_nan() || gamma <= 0.0 {
            gamma = 1.0;
        }
        let exponent = (1.0 / gamma) as f32;

        let mut lut = [0u8; 256];
        for (v, out) in lut.iter_mut().enumerate() {
            let norm = v as f32 / 255.0;
            *out = clip_truncate(norm.powf(exponent) * 255.0);
        }
        Ok(image.map_samples(|v| lut[v as usize]))
    }
}

/// `c * ln(1 + x)` followed by a global min/max renormalization.
///
/// Parameter `c` (float, default 1.0). The whole image (all channels) shares
/// one minimum and maximum.
#[derive(Debug, Clone, Copy, Default)]
pub struct Log;

impl Operation for Log {
    fn name(&self) -> &'static str {
        "Log transformation"
    }

    fn category(&self) -> Category {
        Category::Point
    }

    fn apply(&self, image: &Image, params: &Params) -> Result<Image, OperationError> {
        let c = params.float_or("c", 1.0)? as f32;

        let mut values: Vec<f32> = image
            .pixels()
            .iter()
            .map(|&v| c * (v as f32).ln_1p())
            .collect();

        let min = values.iter().copied().fold(f32::INFINITY, f32::min);
        values.iter_mut().for_each(|v| *v -= min);
        let max = values.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        if max > 0.0 {
            values.iter_mut().for_each(|v| *v = *v / max * 255.0);
        }

        let pixels = values.into_iter().map(clip_truncate).collect();
        Ok(Image::from_bgr(image.width(), image.height(), pixels)?)
    }
}

/// Binary threshold on luminance, replicated into three channels.
///
/// Parameter `thresh` (integer, default 128). Gray values strictly above the
/// threshold become 255, everything else 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct Threshold;

impl Operation for Threshold {
    fn name(&self) -> &'static str {
        "Threshold transformation"
    }

    fn category(&self) -> Category {
        Category::Point
    }

    fn apply(&self, image: &Image, params: &Params) -> Result<Image, OperationError> {
        let thresh = params.int_or("thresh", 128)?;
        let binary: Vec<u8> = image
            .to_gray()
            .into_iter()
            .map(|g| if g as i64 > thresh { 255 } else { 0 })
            .collect();
        Ok(Image::from_gray(image.width(), image.height(), &binary)?)
    }
}
