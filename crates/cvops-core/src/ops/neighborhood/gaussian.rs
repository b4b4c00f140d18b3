use super::{checked_kernel_size, convolve_separable, Border};
use crate::buffer::{Image, CHANNELS};
use crate::ops::{odd_kernel_size, Category, Operation, OperationError};
use crate::params::Params;

/// Gaussian-weighted blur.
///
/// Parameters `ksize` (integer, default 5, minimum 1, even values bumped to
/// the next odd size) and `sigma` (float, default 1.0). A non-positive sigma
/// is derived from the kernel size, see [`fallback_sigma`].
#[derive(Debug, Clone, Copy, Default)]
pub struct GaussianFilter;

impl Operation for GaussianFilter {
    fn name(&self) -> &'static str {
        "Gaussian Filter"
    }

    fn category(&self) -> Category {
        Category::Neighbourhood
    }

    fn apply(&self, image: &Image, params: &Params) -> Result<Image, OperationError> {
        let ksize = checked_kernel_size(odd_kernel_size(params.int_or("ksize", 5)?, 1))?;
        let mut sigma = params.float_or("sigma", 1.0)?;
        if sigma.is_nan() || sigma <= 0.0 {
            sigma = fallback_sigma(ksize);
            log::debug!("sigma derived from ksize {}: {:.4}", ksize, sigma);
        }

        let kernel = gaussian_kernel(ksize, sigma);
        let width = image.width() as usize;
        let height = image.height() as usize;

        let planes: [Vec<u8>; CHANNELS] = std::array::from_fn(|c| {
            let plane: Vec<f64> = image.channel(c).into_iter().map(f64::from).collect();
            convolve_separable(&plane, width, height, &kernel, &kernel, Border::Reflect101)
                .into_iter()
                .map(|v| v.round_ties_even().clamp(0.0, 255.0) as u8)
                .collect()
        });
        Ok(image.with_planes(&planes))
    }
}

/// Sigma used when the caller passes a non-positive value:
/// `0.3 * ((ksize - 1) * 0.5 - 1) + 0.8`.
pub fn fallback_sigma(ksize: usize) -> f64 {
    0.3 * ((ksize as f64 - 1.0) * 0.5 - 1.0) + 0.8
}

/// Normalized 1-D Gaussian weights centered on the middle tap.
///
/// A single tap, or a sigma so small that `2σ²` underflows, yields a one-hot
/// center kernel.
pub fn gaussian_kernel(ksize: usize, sigma: f64) -> Vec<f64> {
    let center = (ksize as f64 - 1.0) / 2.0;
    let denom = 2.0 * sigma * sigma;
    if ksize <= 1 || !(denom.is_finite() && denom > 0.0) {
        let mut kernel = vec![0.0; ksize.max(1)];
        kernel[ksize / 2] = 1.0;
        return kernel;
    }
    let mut kernel: Vec<f64> = (0..ksize)
        .map(|i| {
            let d = i as f64 - center;
            (-(d * d) / denom).exp()
        })
        .collect();
    let sum: f64 = kernel.iter().sum();
    kernel.iter_mut().for_each(|w| *w /= sum);
    kernel
}
