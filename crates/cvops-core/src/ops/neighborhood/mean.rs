use super::{checked_kernel_size, convolve_separable, Border};
use crate::buffer::{Image, CHANNELS};
use crate::ops::{odd_kernel_size, Category, Operation, OperationError};
use crate::params::Params;

/// Unweighted box average over a `ksize × ksize` window.
///
/// Parameter `ksize` (integer, default 3, minimum 1, even values bumped to
/// the next odd size). Borders replicate the edge sample.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeanFilter;

impl Operation for MeanFilter {
    fn name(&self) -> &'static str {
        "Mean filter"
    }

    fn category(&self) -> Category {
        Category::Neighbourhood
    }

    fn apply(&self, image: &Image, params: &Params) -> Result<Image, OperationError> {
        let ksize = checked_kernel_size(odd_kernel_size(params.int_or("ksize", 3)?, 1))?;
        Ok(box_blur(image, ksize))
    }
}

fn box_blur(image: &Image, ksize: usize) -> Image {
    let width = image.width() as usize;
    let height = image.height() as usize;
    let ones = vec![1.0; ksize];
    let area = (ksize * ksize) as f64;

    let planes: [Vec<u8>; CHANNELS] = std::array::from_fn(|c| {
        let plane: Vec<f64> = image.channel(c).into_iter().map(f64::from).collect();
        convolve_separable(&plane, width, height, &ones, &ones, Border::Replicate)
            .into_iter()
            .map(|sum| (sum / area).round_ties_even().clamp(0.0, 255.0) as u8)
            .collect()
    });
    image.with_planes(&planes)
}
