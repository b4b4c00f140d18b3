//! Per-channel linear contrast stretch.

use super::{clip_truncate, Category, Operation, OperationError};
use crate::buffer::{Image, CHANNELS};
use crate::params::Params;

/// Minimum channel range that is stretched. Flatter channels pass through.
pub const FLAT_EPSILON: f32 = 1e-5;

/// Rescale each channel independently from its own `[min, max]` to `[0, 255]`.
///
/// Takes no parameters. Channels whose range does not exceed
/// [`FLAT_EPSILON`] are returned unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContrastStretch;

impl Operation for ContrastStretch {
    fn name(&self) -> &'static str {
        "Contrast Stretching"
    }

    fn category(&self) -> Category {
        Category::Contrast
    }

    fn apply(&self, image: &Image, _params: &Params) -> Result<Image, OperationError> {
        let planes: [Vec<u8>; CHANNELS] = std::array::from_fn(|c| stretch_plane(image.channel(c)));
        Ok(image.with_planes(&planes))
    }
}

fn stretch_plane(plane: Vec<u8>) -> Vec<u8> {
    let (min, max) = plane
        .iter()
        .fold((u8::MAX, u8::MIN), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    let (min, max) = (min as f32, max as f32);
    let range = max - min;
    if range <= FLAT_EPSILON {
        return plane;
    }
    plane
        .into_iter()
        .map(|v| clip_truncate((v as f32 - min) / range * 255.0))
        .collect()
}
