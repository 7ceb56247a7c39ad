//! Side-by-side preview compositing.
//!
//! A split view shows the transformed image left of a vertical boundary
//! and the original to its right. The boundary sits at
//! `width * P / 100`: column `col` is taken from the transformed image
//! exactly when `col < width * P / 100`.
//!
//! ```rust
//! use imgx_core::{Image, Pixel};
//! use imgx_ops::split::{split_column, split_view};
//! use imgx_ops::Percentage;
//!
//! let original = Image::filled(4, 2, Pixel::BLACK)?;
//! let transformed = Image::filled(4, 2, Pixel::WHITE)?;
//! let half = Percentage::new(50.0)?;
//! assert_eq!(split_column(4, half), 2);
//!
//! let view = split_view(&original, &transformed, half)?;
//! assert_eq!(view.pixel(0, 1), Pixel::WHITE);
//! assert_eq!(view.pixel(0, 2), Pixel::BLACK);
//! # Ok::<(), imgx_ops::OpsError>(())
//! ```

use crate::{OpsResult, Percentage};
use imgx_core::{Error, Image};
use tracing::trace;

/// Number of leading columns taken from the transformed image.
///
/// This is the smallest integer not below `width * P / 100`, so a
/// fractional boundary includes the column it cuts through.
pub fn split_column(width: u32, split: Percentage) -> u32 {
    let edge = (width as f64 * split.value() / 100.0).ceil();
    (edge as u32).min(width)
}

/// Composites `transformed` left of the split and `original` right of it.
///
/// # Errors
///
/// Returns [`Error::DimensionMismatch`] if the images differ in size.
pub fn split_view(original: &Image, transformed: &Image, split: Percentage) -> OpsResult<Image> {
    if original.dimensions() != transformed.dimensions() {
        let err = Error::dimension_mismatch(original.dimensions(), transformed.dimensions());
        return Err(err.into());
    }

    let (width, height) = original.dimensions();
    let boundary = split_column(width, split);
    trace!(width, height, boundary, "split view");

    if boundary == 0 {
        return Ok(original.clone());
    }
    if boundary == width {
        return Ok(transformed.clone());
    }

    let out = Image::from_fn(width, height, |row, col| {
        if col < boundary {
            transformed.pixel(row, col)
        } else {
            original.pixel(row, col)
        }
    })?;
    Ok(out)
}

/// Runs `op` on `src` and shows its result left of the split.
///
/// At 0% `op` is not invoked at all.
pub fn apply_split<F>(src: &Image, split: Percentage, op: F) -> OpsResult<Image>
where
    F: FnOnce(&Image) -> OpsResult<Image>,
{
    if split_column(src.width(), split) == 0 {
        return Ok(src.clone());
    }
    let transformed = op(src)?;
    split_view(src, &transformed, split)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OpsError;
    use imgx_core::Pixel;

    fn pct(v: f64) -> Percentage {
        Percentage::new(v).unwrap()
    }

    #[test]
    fn test_split_column() {
        assert_eq!(split_column(10, Percentage::ZERO), 0);
        assert_eq!(split_column(10, Percentage::FULL), 10);
        assert_eq!(split_column(10, pct(30.0)), 3);
        // 5 * 50 / 100 = 2.5: columns 0, 1 and 2 lie left of it.
        assert_eq!(split_column(5, pct(50.0)), 3);
        assert_eq!(split_column(1, pct(0.5)), 1);
    }

    #[test]
    fn test_split_view_columns() {
        let original = Image::from_fn(5, 3, |row, col| Pixel::grey((row * 5 + col) as u8)).unwrap();
        let transformed = original.map(|p| p.adjust_brightness(100));
        let view = split_view(&original, &transformed, pct(40.0)).unwrap();
        for row in 0..3 {
            for col in 0..5 {
                let expected = if col < 2 {
                    transformed.pixel(row, col)
                } else {
                    original.pixel(row, col)
                };
                assert_eq!(view.pixel(row, col), expected);
            }
        }
    }

    #[test]
    fn test_split_view_extremes() {
        let original = Image::filled(3, 3, Pixel::BLACK).unwrap();
        let transformed = Image::filled(3, 3, Pixel::WHITE).unwrap();
        let zero = split_view(&original, &transformed, Percentage::ZERO).unwrap();
        let full = split_view(&original, &transformed, Percentage::FULL).unwrap();
        assert_eq!(zero, original);
        assert_eq!(full, transformed);
    }

    #[test]
    fn test_split_view_mismatch() {
        let a = Image::filled(3, 3, Pixel::BLACK).unwrap();
        let b = Image::filled(3, 4, Pixel::BLACK).unwrap();
        let err = split_view(&a, &b, pct(50.0)).unwrap_err();
        assert!(matches!(
            err,
            OpsError::Core(Error::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_apply_split_skips_op_at_zero() {
        let img = Image::filled(2, 2, Pixel::grey(9)).unwrap();
        let out = apply_split(&img, Percentage::ZERO, |_| {
            Err(OpsError::Unsupported("should not run".into()))
        });
        assert_eq!(out.unwrap(), img);
    }
}
