use super::{convolve_separable, Border};
use crate::buffer::Image;
use crate::ops::{Category, Operation, OperationError};
use crate::params::Params;

/// Largest aperture the separable Sobel kernels support.
const MAX_SOBEL_KSIZE: i64 = 31;

/// Sobel edge magnitude on the luminance plane.
///
/// Parameters `dx` (integer, default 1), `dy` (integer, default 0) and
/// `ksize` (integer, default 3). The request `dx = 0, dy = 1` also computes
/// the swapped derivative and combines both into a Euclidean magnitude;
/// every other request uses the absolute value of the single derivative.
/// The magnitude is scaled so its maximum maps to 255.
#[derive(Debug, Clone, Copy, Default)]
pub struct SobelFilter;

impl Operation for SobelFilter {
    fn name(&self) -> &'static str {
        "Sobel Filter"
    }

    fn category(&self) -> Category {
        Category::Neighbourhood
    }

    fn apply(&self, image: &Image, params: &Params) -> Result<Image, OperationError> {
        let dx = params.int_or("dx", 1)?;
        let dy = params.int_or("dy", 0)?;
        let ksize = sobel_kernel_size(params.int_or("ksize", 3)?);

        if dx < 0 || dy < 0 || (dx == 0 && dy == 0) {
            return Err(OperationError::InvalidArgument(format!(
                "derivative orders must be non-negative and not both zero (dx={dx}, dy={dy})"
            )));
        }
        if ksize > MAX_SOBEL_KSIZE {
            return Err(OperationError::InvalidArgument(format!(
                "kernel size must be odd and not larger than {MAX_SOBEL_KSIZE} (got {ksize})"
            )));
        }

        let width = image.width() as usize;
        let height = image.height() as usize;
        let gray: Vec<f64> = image.to_gray().into_iter().map(f64::from).collect();

        let gx = derivative(&gray, width, height, dx, dy, ksize)?;
        let magnitude: Vec<f64> = if dx == 0 && dy == 1 {
            let gy = derivative(&gray, width, height, dy, dx, ksize)?;
            gx.iter().zip(&gy).map(|(a, b)| a.hypot(*b)).collect()
        } else {
            gx.iter().map(|v| v.abs()).collect()
        };

        let max = magnitude.iter().copied().fold(0.0, f64::max);
        let plane: Vec<u8> = if max > 0.0 {
            magnitude
                .iter()
                .map(|m| (m / max * 255.0).clamp(0.0, 255.0) as u8)
                .collect()
        } else {
            vec![0; magnitude.len()]
        };
        Ok(Image::from_gray(image.width(), image.height(), &plane)?)
    }
}

/// Normalize a requested aperture: sizes outside {1, 3, 5, 7} are bumped to
/// odd, and anything still below 1 falls back to 3.
fn sobel_kernel_size(ksize: i64) -> i64 {
    if matches!(ksize, 1 | 3 | 5 | 7) {
        return ksize;
    }
    let mut k = ksize;
    if k % 2 == 0 {
        k += 1;
    }
    if k < 1 {
        k = 3;
    }
    if k != ksize {
        log::debug!("sobel kernel size {} adjusted to {}", ksize, k);
    }
    k
}

/// Derivative of order (`dx`, `dy`) using separable Sobel kernels.
fn derivative(
    gray: &[f64],
    width: usize,
    height: usize,
    dx: i64,
    dy: i64,
    ksize: i64,
) -> Result<Vec<f64>, OperationError> {
    let size_for = |order: i64| if ksize == 1 && order > 0 { 3 } else { ksize };
    // Orders past usize saturate so the size check rejects them
    let order = |o: i64| usize::try_from(o).unwrap_or(usize::MAX);
    let kx = sobel_kernel(order(dx), size_for(dx) as usize)?;
    let ky = sobel_kernel(order(dy), size_for(dy) as usize)?;
    Ok(convolve_separable(gray, width, height, &kx, &ky, Border::Reflect101))
}

/// 1-D Sobel kernel: binomial smoothing `[1, 1]` applied `size - order - 1`
/// times, then differencing `[-1, 1]` applied `order` times.
pub(crate) fn sobel_kernel(order: usize, size: usize) -> Result<Vec<f64>, OperationError> {
    if size <= order {
        return Err(OperationError::InvalidArgument(format!(
            "kernel size {size} must exceed derivative order {order}"
        )));
    }

    let mut kernel = vec![1.0];
    for _ in 0..size - order - 1 {
        kernel = extend(&kernel, |prev, cur| prev + cur);
    }
    for _ in 0..order {
        kernel = extend(&kernel, |prev, cur| prev - cur);
    }
    Ok(kernel)
}

/// Grow a kernel by one tap, combining each tap with its left neighbour.
fn extend(kernel: &[f64], combine: impl Fn(f64, f64) -> f64) -> Vec<f64> {
    let at = |i: usize| kernel.get(i).copied().unwrap_or(0.0);
    (0..=kernel.len())
        .map(|i| {
            let prev = if i == 0 { 0.0 } else { at(i - 1) };
            combine(prev, at(i))
        })
        .collect()
}
