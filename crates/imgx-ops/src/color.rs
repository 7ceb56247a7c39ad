//! Linear color transforms and channel extraction.
//!
//! # Operations
//!
//! - [`apply_matrix`] - Generic 3x3 channel mix
//! - [`sepia`], [`luma`] - The named [`ColorTransform`] matrices
//! - [`greyscale`] - Single-channel projections broadcast to grey
//! - [`split_channels`] / [`combine_channels`] - Separate and rejoin R, G, B
//!
//! Greyscale projections other than luma use direct per-pixel formulas
//! (channel copy, max, mean) rather than a matrix product.
//!
//! # Example
//!
//! ```rust
//! use imgx_core::{Image, Pixel};
//! use imgx_ops::color::{combine_channels, split_channels};
//!
//! let img = Image::filled(2, 2, Pixel::new(10, 20, 30))?;
//! let (r, g, b) = split_channels(&img);
//! assert_eq!(r.pixel(0, 0), Pixel::grey(10));
//! assert_eq!(combine_channels(&r, &g, &b)?, img);
//! # Ok::<(), imgx_ops::OpsError>(())
//! ```

use crate::OpsResult;
use imgx_core::{ColorMatrix, Component, Error, Image, Pixel};
use tracing::trace;

/// Named linear color transforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorTransform {
    /// Rec.709 luma greyscale.
    Luma,
    /// Sepia tone.
    Sepia,
}

impl ColorTransform {
    /// The matrix for this transform.
    pub fn matrix(self) -> ColorMatrix {
        match self {
            Self::Luma => ColorMatrix::LUMA,
            Self::Sepia => ColorMatrix::SEPIA,
        }
    }

    /// Applies this transform to `image`.
    pub fn apply(self, image: &Image) -> Image {
        apply_matrix(image, &self.matrix())
    }
}

/// Applies `matrix` to the `(r, g, b)` vector of every pixel.
///
/// Each output channel is truncated toward zero and clamped on its own.
pub fn apply_matrix(src: &Image, matrix: &ColorMatrix) -> Image {
    let (width, height) = src.dimensions();
    trace!(width, height, ?matrix, "apply_matrix");
    src.map(|p| p.transform(matrix))
}

/// Sepia tone.
pub fn sepia(src: &Image) -> Image {
    ColorTransform::Sepia.apply(src)
}

/// Rec.709 luma greyscale.
pub fn luma(src: &Image) -> Image {
    ColorTransform::Luma.apply(src)
}

/// Greyscale image from a single-channel projection.
pub fn greyscale(src: &Image, component: Component) -> Image {
    trace!(%component, "greyscale");
    src.component(component)
}

/// Splits an image into red, green and blue greyscale images.
pub fn split_channels(src: &Image) -> (Image, Image, Image) {
    (src.red_component(), src.green_component(), src.blue_component())
}

/// Rebuilds a color image from three channel images.
///
/// The output takes red from `red`, green from `green` and blue from
/// `blue`; other channels of the inputs are ignored.
///
/// # Errors
///
/// Returns [`Error::DimensionMismatch`] if the three inputs differ in size.
pub fn combine_channels(red: &Image, green: &Image, blue: &Image) -> OpsResult<Image> {
    for other in [green, blue] {
        if other.dimensions() != red.dimensions() {
            let err = Error::dimension_mismatch(red.dimensions(), other.dimensions());
            return Err(err.into());
        }
    }

    let (width, height) = red.dimensions();
    let out = Image::from_fn(width, height, |row, col| {
        Pixel::from_u8(
            red.pixel(row, col).red(),
            green.pixel(row, col).green(),
            blue.pixel(row, col).blue(),
        )
    })?;
    Ok(out)
}
