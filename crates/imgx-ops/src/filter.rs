//! Spatial convolution filters.
//!
//! Applies a square, odd-sized [`Kernel`] to every channel of every pixel.
//!
//! # Edge handling
//!
//! Neighbors that fall outside the image contribute **zero**. Nothing is
//! wrapped or clamped to the edge, so a uniform image darkens along its
//! border after a blur: the missing neighbor weight is simply lost.
//!
//! # Kernels
//!
//! - [`Kernel::blur`] - 3x3 Gaussian-like blur
//! - [`Kernel::sharpen`] - 5x5 sharpen
//! - [`Kernel::new`] - any odd square of finite weights
//!
//! # Example
//!
//! ```rust
//! use imgx_core::{Image, Pixel};
//! use imgx_ops::filter::{blur, convolve, Kernel};
//!
//! let img = Image::filled(3, 3, Pixel::new(100, 150, 200))?;
//! let blurred = blur(&img)?;
//! assert_eq!(blurred.pixel(1, 1), Pixel::new(100, 150, 200));
//! assert_eq!(blurred.pixel(0, 0), Pixel::new(56, 84, 112));
//!
//! let identity = Kernel::new(vec![1.0], 1)?;
//! assert_eq!(convolve(&img, &identity)?, img);
//! # Ok::<(), imgx_ops::OpsError>(())
//! ```

use crate::{OpsError, OpsResult};
use imgx_core::{Image, Pixel};
use tracing::{debug, trace};

/// Convolution kernel for image filtering.
///
/// Weights are stored row-major: `data[kr * size + kc]` is the weight for
/// the neighbor at offset `(kr - radius, kc - radius)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    data: Vec<f64>,
    size: usize,
}

impl Kernel {
    /// Creates a new kernel from row-major weights.
    ///
    /// # Errors
    ///
    /// Returns [`OpsError::InvalidParameter`] if `size` is even or zero,
    /// `data.len() != size * size`, or any weight is not finite.
    pub fn new(data: Vec<f64>, size: usize) -> OpsResult<Self> {
        if size % 2 == 0 {
            return Err(OpsError::InvalidParameter(format!(
                "kernel size must be odd, got {}",
                size
            )));
        }
        if data.len() != size * size {
            return Err(OpsError::InvalidParameter(format!(
                "kernel data size {} doesn't match {}x{}",
                data.len(),
                size,
                size
            )));
        }
        if let Some(w) = data.iter().find(|w| !w.is_finite()) {
            return Err(OpsError::InvalidParameter(format!(
                "kernel weight {} is not finite",
                w
            )));
        }
        Ok(Self { data, size })
    }

    /// The 3x3 blur kernel.
    ///
    /// ```text
    /// 1/16 1/8 1/16
    /// 1/8  1/4 1/8
    /// 1/16 1/8 1/16
    /// ```
    pub fn blur() -> Self {
        #[rustfmt::skip]
        let data = vec![
            0.0625, 0.125, 0.0625,
            0.125,  0.25,  0.125,
            0.0625, 0.125, 0.0625,
        ];
        Self { data, size: 3 }
    }

    /// The 5x5 sharpen kernel: outer ring -1/8, inner ring 1/4, center 1.
    ///
    /// # Example
    ///
    /// ```rust
    /// use imgx_ops::filter::Kernel;
    ///
    /// let k = Kernel::sharpen();
    /// assert_eq!(k.size(), 5);
    /// assert_eq!(k.radius(), 2);
    /// ```
    pub fn sharpen() -> Self {
        const O: f64 = -0.125;
        const I: f64 = 0.25;
        #[rustfmt::skip]
        let data = vec![
            O, O, O,   O, O,
            O, I, I,   I, O,
            O, I, 1.0, I, O,
            O, I, I,   I, O,
            O, O, O,   O, O,
        ];
        Self { data, size: 5 }
    }

    /// Kernel side length.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the kernel radius (half-size).
    #[inline]
    pub fn radius(&self) -> usize {
        self.size / 2
    }

    /// Row-major weights.
    #[inline]
    pub fn weights(&self) -> &[f64] {
        &self.data
    }

    /// Weight at kernel position `(kr, kc)`, both in `0..size`.
    #[inline]
    pub fn weight(&self, kr: usize, kc: usize) -> f64 {
        self.data[kr * self.size + kc]
    }

    /// The center weight.
    #[inline]
    pub fn center(&self) -> f64 {
        let r = self.radius();
        self.weight(r, r)
    }
}

/// Named kernels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    /// 3x3 blur.
    Blur,
    /// 5x5 sharpen.
    Sharpen,
}

impl FilterKind {
    /// The weight table for this filter.
    pub fn kernel(self) -> Kernel {
        match self {
            Self::Blur => Kernel::blur(),
            Self::Sharpen => Kernel::sharpen(),
        }
    }

    /// Applies this filter to `image`.
    pub fn apply(self, image: &Image) -> OpsResult<Image> {
        convolve(image, &self.kernel())
    }
}

/// Applies a convolution kernel to every channel of `src`.
///
/// Each output channel is `Σ weight * neighbor` over the kernel window,
/// with out-of-bounds neighbors treated as zero. The sum is truncated
/// toward zero and clamped to `0..=255`.
///
/// The output always has the dimensions of `src`, whatever the kernel
/// size; a 1x1 image yields `center * value`.
///
/// # Example
///
/// ```rust
/// use imgx_core::{Image, Pixel};
/// use imgx_ops::filter::{convolve, Kernel};
///
/// let img = Image::filled(1, 1, Pixel::new(100, 200, 40))?;
/// let out = convolve(&img, &Kernel::blur())?;
/// assert_eq!(out.pixel(0, 0), Pixel::new(25, 50, 10));
/// # Ok::<(), imgx_ops::OpsError>(())
/// ```
pub fn convolve(src: &Image, kernel: &Kernel) -> OpsResult<Image> {
    let (width, height) = src.dimensions();
    trace!(width, height, kernel_size = kernel.size(), "convolve");

    let r = kernel.radius() as i64;
    let out = Image::try_from_fn(width, height, |row, col| {
        let mut sums = [0.0f64; 3];

        for kr in -r..=r {
            let sr = row as i64 + kr;
            if sr < 0 || sr >= height as i64 {
                continue;
            }
            for kc in -r..=r {
                let sc = col as i64 + kc;
                if sc < 0 || sc >= width as i64 {
                    continue;
                }
                let w = kernel.weight((kr + r) as usize, (kc + r) as usize);
                let px = src.pixel(sr as u32, sc as u32).channels();
                for c in 0..3 {
                    sums[c] += w * px[c] as f64;
                }
            }
        }

        Pixel::from_f64(sums[0], sums[1], sums[2])
    })?;

    Ok(out)
}

/// Blurs with [`Kernel::blur`].
pub fn blur(src: &Image) -> OpsResult<Image> {
    let (width, height) = src.dimensions();
    debug!(width, height, "Applying blur");
    convolve(src, &Kernel::blur())
}

/// Sharpens with [`Kernel::sharpen`].
pub fn sharpen(src: &Image) -> OpsResult<Image> {
    let (width, height) = src.dimensions();
    debug!(width, height, "Applying sharpen");
    convolve(src, &Kernel::sharpen())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn uniform(width: u32, height: u32, p: Pixel) -> Image {
        Image::filled(width, height, p).unwrap()
    }

    #[test]
    fn test_kernel_validation() {
        assert!(Kernel::new(vec![0.0; 4], 2).is_err());
        assert!(Kernel::new(vec![0.0; 8], 3).is_err());
        assert!(Kernel::new(vec![f64::NAN; 1], 1).is_err());
        assert!(Kernel::new(vec![], 0).is_err());
        assert!(Kernel::new(vec![0.5; 9], 3).is_ok());
    }

    #[test]
    fn test_kernel_sums() {
        let blur: f64 = Kernel::blur().weights().iter().sum();
        assert_relative_eq!(blur, 1.0);
        let sharpen: f64 = Kernel::sharpen().weights().iter().sum();
        assert_relative_eq!(sharpen, 1.0);
        assert_eq!(Kernel::sharpen().center(), 1.0);
        assert_eq!(FilterKind::Blur.kernel(), Kernel::blur());
    }

    #[test]
    fn test_blur_uniform_3x3() {
        let img = uniform(3, 3, Pixel::new(100, 150, 200));
        let out = blur(&img).unwrap();

        let corner = Pixel::new(56, 84, 112);
        let edge = Pixel::new(75, 112, 150);
        assert_eq!(out.pixel(0, 0), corner);
        assert_eq!(out.pixel(0, 2), corner);
        assert_eq!(out.pixel(2, 0), corner);
        assert_eq!(out.pixel(2, 2), corner);
        assert_eq!(out.pixel(0, 1), edge);
        assert_eq!(out.pixel(1, 0), edge);
        assert_eq!(out.pixel(1, 2), edge);
        assert_eq!(out.pixel(2, 1), edge);
        assert_eq!(out.pixel(1, 1), Pixel::new(100, 150, 200));
    }

    #[test]
    fn test_dimensions_preserved() {
        for (w, h) in [(1, 1), (2, 7), (9, 3), (4, 4)] {
            let img = uniform(w, h, Pixel::grey(77));
            assert_eq!(blur(&img).unwrap().dimensions(), (w, h));
            assert_eq!(sharpen(&img).unwrap().dimensions(), (w, h));
        }
    }

    #[test]
    fn test_single_pixel_center_weight() {
        let img = uniform(1, 1, Pixel::new(100, 200, 255));
        // Sharpen center weight is 1, every neighbor is outside.
        assert_eq!(sharpen(&img).unwrap(), img);

        let double = Kernel::new(vec![0.0, 0.0, 0.0, 0.0, 2.0, 0.0, 0.0, 0.0, 0.0], 3).unwrap();
        let out = convolve(&img, &double).unwrap();
        assert_eq!(out.pixel(0, 0), Pixel::new(200, 255, 255));
    }

    #[test]
    fn test_negative_sums_clamp_to_zero() {
        let k = Kernel::new(vec![-1.0], 1).unwrap();
        let img = uniform(2, 2, Pixel::grey(40));
        let out = convolve(&img, &k).unwrap();
        assert!(out.pixels().iter().all(|&p| p == Pixel::BLACK));
    }

    #[test]
    fn test_kernel_orientation() {
        // Only the neighbor one column to the right contributes.
        let k = Kernel::new(vec![0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0], 3).unwrap();
        let img = Image::from_fn(3, 2, |row, col| Pixel::grey((row * 10 + col) as u8)).unwrap();
        let out = convolve(&img, &k).unwrap();
        assert_eq!(out.pixel(0, 0), Pixel::grey(1));
        assert_eq!(out.pixel(1, 1), Pixel::grey(12));
        assert_eq!(out.pixel(1, 2), Pixel::BLACK);
    }

    #[test]
    fn test_sharpen_uniform_interior() {
        let img = uniform(5, 5, Pixel::grey(100));
        let out = sharpen(&img).unwrap();
        // The center sees the full kernel, which sums to one.
        assert_eq!(out.pixel(2, 2), Pixel::grey(100));
        // The corner loses the outer ring beyond the border:
        // center 1 + 3 inner (0.75) - 5 outer (0.625) = 1.125
        assert_eq!(out.pixel(0, 0), Pixel::grey(112));
    }

    #[test]
    fn test_large_kernel_on_small_image() {
        let k = Kernel::new(vec![0.125; 49], 7).unwrap();
        let img = uniform(2, 2, Pixel::grey(40));
        let out = convolve(&img, &k).unwrap();
        // Each output sees all 4 pixels: 4 * 40 / 8 = 20
        assert!(out.pixels().iter().all(|&p| p == Pixel::grey(20)));
    }
}
