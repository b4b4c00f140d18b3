use super::{checked_kernel_size, Border};
use crate::buffer::{Image, CHANNELS};
use crate::ops::{odd_kernel_size, Category, Operation, OperationError};
use crate::params::Params;

/// Per-channel median over a `ksize × ksize` window.
///
/// Parameter `ksize` (integer, default 3, minimum 3, even values bumped to
/// the next odd size). Borders replicate the edge sample.
#[derive(Debug, Clone, Copy, Default)]
pub struct MedianFilter;

impl Operation for MedianFilter {
    fn name(&self) -> &'static str {
        "Median Filter"
    }

    fn category(&self) -> Category {
        Category::Neighbourhood
    }

    fn apply(&self, image: &Image, params: &Params) -> Result<Image, OperationError> {
        let ksize = checked_kernel_size(odd_kernel_size(params.int_or("ksize", 3)?, 3))?;
        let width = image.width() as usize;
        let height = image.height() as usize;

        let planes: [Vec<u8>; CHANNELS] =
            std::array::from_fn(|c| median_plane(&image.channel(c), width, height, ksize));
        Ok(image.with_planes(&planes))
    }
}

/// Sliding-histogram median: the window histogram is updated one column at a
/// time as it moves along each row.
fn median_plane(plane: &[u8], width: usize, height: usize, ksize: usize) -> Vec<u8> {
    let radius = (ksize / 2) as isize;
    let rank = (ksize * ksize / 2) as u32;
    let mut out = vec![0u8; plane.len()];

    let rows_of = move |y: usize| {
        (-radius..=radius).map(move |dy| Border::Replicate.index(y as isize + dy, height))
    };

    for y in 0..height {
        let mut hist = [0u32; 256];
        let column = |hist: &mut [u32; 256], x: isize, delta: i32| {
            let col = Border::Replicate.index(x, width);
            for row in rows_of(y) {
                let v = plane[row * width + col] as usize;
                hist[v] = hist[v].wrapping_add_signed(delta);
            }
        };

        for dx in -radius..=radius {
            column(&mut hist, dx, 1);
        }

        for x in 0..width {
            if x > 0 {
                column(&mut hist, x as isize - radius - 1, -1);
                column(&mut hist, x as isize + radius, 1);
            }
            out[y * width + x] = histogram_rank(&hist, rank);
        }
    }
    out
}

/// Value at zero-based position `rank` in the sorted window.
fn histogram_rank(hist: &[u32; 256], rank: u32) -> u8 {
    let mut seen = 0;
    for (value, &count) in hist.iter().enumerate() {
        seen += count;
        if seen > rank {
            return value as u8;
        }
    }
    255
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ParamValue;

    fn with_ksize(k: i64) -> Params {
        Params::new().with("ksize", ParamValue::Int(k))
    }

    fn brute_force_median(plane: &[u8], width: usize, height: usize, ksize: usize) -> Vec<u8> {
        let r = (ksize / 2) as isize;
        let mut out = Vec::with_capacity(plane.len());
        for y in 0..height {
            for x in 0..width {
                let mut window = Vec::new();
                for dy in -r..=r {
                    for dx in -r..=r {
                        let yy = Border::Replicate.index(y as isize + dy, height);
                        let xx = Border::Replicate.index(x as isize + dx, width);
                        window.push(plane[yy * width + xx]);
                    }
                }
                window.sort_unstable();
                out.push(window[window.len() / 2]);
            }
        }
        out
    }

    #[test]
    fn test_removes_salt_noise() {
        let mut pixels = vec![50u8; 5 * 5 * 3];
        pixels[36..39].copy_from_slice(&[255, 255, 255]);
        let img = Image::from_bgr(5, 5, pixels).unwrap();
        let out = MedianFilter.apply(&img, &Params::new()).unwrap();
        assert!(out.pixels().iter().all(|&v| v == 50));
    }

    #[test]
    fn test_matches_brute_force() {
        let plane: Vec<u8> = (0..63u32).map(|i| ((i * 37 + 11) % 256) as u8).collect();
        for ksize in [3, 5, 7] {
            assert_eq!(
                median_plane(&plane, 9, 7, ksize),
                brute_force_median(&plane, 9, 7, ksize),
                "ksize {}",
                ksize
            );
        }
    }

    #[test]
    fn test_minimum_ksize_is_three() {
        let pixels: Vec<u8> = (0..48u32).map(|i| ((i * 53) % 256) as u8).collect();
        let img = Image::from_bgr(4, 4, pixels).unwrap();
        let expected = MedianFilter.apply(&img, &with_ksize(3)).unwrap();
        assert_eq!(MedianFilter.apply(&img, &with_ksize(1)).unwrap(), expected);
        assert_eq!(MedianFilter.apply(&img, &with_ksize(-4)).unwrap(), expected);
        assert_eq!(MedianFilter.apply(&img, &with_ksize(2)).unwrap(), expected);
    }

    #[test]
    fn test_even_ksize_matches_next_odd() {
        let pixels: Vec<u8> = (0..108u32).map(|i| ((i * 29 + 3) % 256) as u8).collect();
        let img = Image::from_bgr(6, 6, pixels).unwrap();
        assert_eq!(
            MedianFilter.apply(&img, &with_ksize(4)).unwrap(),
            MedianFilter.apply(&img, &with_ksize(5)).unwrap()
        );
    }

    #[test]
    fn test_single_pixel_image() {
        let img = Image::from_bgr(1, 1, vec![1, 2, 3]).unwrap();
        let out = MedianFilter.apply(&img, &with_ksize(9)).unwrap();
        assert_eq!(out, img);
    }
}
