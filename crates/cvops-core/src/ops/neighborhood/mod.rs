//! Neighbourhood operations: each output sample depends on a square window
//! of input samples.
//!
//! Mean, median, and Gaussian filters run on each BGR channel independently.
//! Sobel runs on a single luminance plane and re-expands to three channels.
//!
//! ## Borders
//!
//! Windows that cross the image edge read through a [`Border`] policy:
//! - `Replicate`: `aaa|abcd|ddd` (mean, median)
//! - `Reflect101`: `cb|abcd|cb` (Gaussian, Sobel)

mod gaussian;
mod mean;
mod median;
mod sobel;

pub use gaussian::{fallback_sigma, gaussian_kernel, GaussianFilter};
pub use mean::MeanFilter;
pub use median::MedianFilter;
pub use sobel::SobelFilter;

use super::OperationError;

/// Largest accepted kernel size. Anything bigger is rejected before
/// allocating kernel buffers.
pub const MAX_KERNEL_SIZE: i64 = 4095;

/// How out-of-range coordinates map back into the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Border {
    Replicate,
    Reflect101,
}

impl Border {
    /// Map a possibly out-of-range coordinate into `0..n`.
    #[inline]
    pub(crate) fn index(self, i: isize, n: usize) -> usize {
        let last = n as isize - 1;
        match self {
            Border::Replicate => i.clamp(0, last) as usize,
            Border::Reflect101 => {
                if n == 1 {
                    return 0;
                }
                let mut i = i;
                while i < 0 || i > last {
                    i = if i < 0 { -i } else { 2 * last - i };
                }
                i as usize
            }
        }
    }
}

/// Reject kernel sizes that cannot be allocated sensibly.
pub(crate) fn checked_kernel_size(ksize: i64) -> Result<usize, OperationError> {
    if ksize > MAX_KERNEL_SIZE {
        return Err(OperationError::InvalidArgument(format!(
            "kernel size {ksize} exceeds the maximum of {MAX_KERNEL_SIZE}"
        )));
    }
    Ok(ksize as usize)
}

/// Convolve a single plane with a horizontal kernel `kx` and then a vertical
/// kernel `ky`. Both kernels are centered; their lengths may differ.
pub(crate) fn convolve_separable(
    plane: &[f64],
    width: usize,
    height: usize,
    kx: &[f64],
    ky: &[f64],
    border: Border,
) -> Vec<f64> {
    let rx = (kx.len() / 2) as isize;
    let ry = (ky.len() / 2) as isize;

    let mut horizontal = vec![0.0; plane.len()];
    for y in 0..height {
        let row = &plane[y * width..(y + 1) * width];
        let out = &mut horizontal[y * width..(y + 1) * width];
        for (x, dst) in out.iter_mut().enumerate() {
            *dst = kx
                .iter()
                .enumerate()
                .map(|(k, w)| w * row[border.index(x as isize + k as isize - rx, width)])
                .sum();
        }
    }

    let mut result = vec![0.0; plane.len()];
    for y in 0..height {
        for (k, w) in ky.iter().enumerate() {
            let src_y = border.index(y as isize + k as isize - ry, height);
            let src = &horizontal[src_y * width..(src_y + 1) * width];
            let dst = &mut result[y * width..(y + 1) * width];
            for (d, s) in dst.iter_mut().zip(src) {
                *d += w * s;
            }
        }
    }
    result
}
