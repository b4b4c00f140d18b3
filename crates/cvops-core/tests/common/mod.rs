#![allow(dead_code)]

use cvops_core::Image;

/// Horizontal BGR gradient where every channel ramps differently.
pub fn gradient(width: u32, height: u32) -> Image {
    let mut pixels = Vec::with_capacity((width * height * 3) as usize);
    for y in 0..height {
        for x in 0..width {
            pixels.push((x * 255 / width.max(1)) as u8);
            pixels.push((y * 255 / height.max(1)) as u8);
            pixels.push(((x + y) * 7 % 256) as u8);
        }
    }
    Image::from_bgr(width, height, pixels).expect("valid gradient")
}

/// Gray checkerboard with `cell`-sized squares of 0 and 255.
pub fn checkerboard(width: u32, height: u32, cell: u32) -> Image {
    let gray: Vec<u8> = (0..height)
        .flat_map(|y| (0..width).map(move |x| if (x / cell + y / cell) % 2 == 0 { 0 } else { 255 }))
        .collect();
    Image::from_gray(width, height, &gray).expect("valid checkerboard")
}
