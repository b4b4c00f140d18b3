//! Gray conversion for BGR samples using ITU-R BT.601 weights.
//!
//! The weights are held in 14-bit fixed point so that the conversion is
//! exact and reproducible across platforms. Threshold and Sobel both derive
//! their single-channel plane from here.

/// Fixed-point precision of the weights.
const GRAY_SHIFT: u32 = 14;

/// BT.601 weight for the blue channel (0.114 · 2^14).
pub const GRAY_B: u32 = 1868;

/// BT.601 weight for the green channel (0.587 · 2^14).
pub const GRAY_G: u32 = 9617;

/// BT.601 weight for the red channel (0.299 · 2^14).
pub const GRAY_R: u32 = 4899;

/// Convert one BGR pixel to gray, rounding to nearest.
#[inline]
pub fn gray_u8(b: u8, g: u8, r: u8) -> u8 {
    let acc = GRAY_B * b as u32 + GRAY_G * g as u32 + GRAY_R * r as u32;
    ((acc + (1 << (GRAY_SHIFT - 1))) >> GRAY_SHIFT) as u8
}
