//! Shared fixtures for the imgx benchmarks.

use imgx_core::{Image, Pixel};

/// Deterministic test image with independent gradients per channel.
///
/// # Panics
///
/// Panics if either dimension is zero.
pub fn gradient(width: u32, height: u32) -> Image {
    Image::from_fn(width, height, |row, col| {
        Pixel::from_u8(
            (col * 255 / (width.max(2) - 1)) as u8,
            (row * 255 / (height.max(2) - 1)) as u8,
            ((row ^ col) & 0xff) as u8,
        )
    })
    .expect("bench image dimensions must be non-zero")
}
