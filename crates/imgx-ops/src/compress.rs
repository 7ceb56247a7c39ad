//! Lossy compression by Haar coefficient thresholding.
//!
//! Each channel is zero-padded to a power-of-two square, decomposed with
//! an orthonormal 2-D Haar transform, stripped of its smallest
//! coefficients and reconstructed. The output keeps the input
//! dimensions; only detail is lost.
//!
//! # Algorithm
//!
//! 1. Pad every channel to `s x s`, `s = next_pow2(max(width, height))`.
//! 2. Forward transform: for `c = s, s/2, ..., 2`, one averaging /
//!    differencing step over the first `c` entries of each of the first
//!    `c` rows, then of each of the first `c` columns.
//! 3. Gather the magnitudes of all non-zero coefficients of all three
//!    channels, except each channel's `[0][0]` average. With `n` of them
//!    and `k = floor(n * P / 100)`, the `k`-th smallest magnitude is the
//!    threshold; every coefficient strictly below it is zeroed. When
//!    `k = n` they are all zeroed.
//! 4. Inverse transform, crop, round and clamp.
//!
//! The threshold is shared by the channels so heavy compression does not
//! shift the color balance.
//!
//! # Example
//!
//! ```rust
//! use imgx_core::{Image, Pixel};
//! use imgx_ops::compress::compress;
//! use imgx_ops::Percentage;
//!
//! let img = Image::from_fn(5, 3, |row, col| Pixel::grey((row * 40 + col * 7) as u8))?;
//! assert_eq!(compress(&img, Percentage::ZERO)?, img);
//!
//! let flat = compress(&img, Percentage::FULL)?;
//! assert_eq!(flat.dimensions(), (5, 3));
//! # Ok::<(), imgx_ops::OpsError>(())
//! ```

use crate::{OpsError, OpsResult, Percentage};
use imgx_core::{Image, Pixel, quantize_round};
use std::f64::consts::FRAC_1_SQRT_2;
use tracing::{debug, trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Side of the square an image is padded to before decomposition.
pub fn padded_size(width: u32, height: u32) -> usize {
    (width.max(height) as usize).next_power_of_two()
}

/// Square grid of transform coefficients for one channel.
///
/// Stored row-major; `size` is always a power of two.
#[derive(Debug, Clone, PartialEq)]
pub struct CoefficientPlane {
    size: usize,
    data: Vec<f64>,
}

impl CoefficientPlane {
    /// Creates an all-zero plane.
    ///
    /// # Errors
    ///
    /// Returns [`OpsError::InvalidParameter`] unless `size` is a power of
    /// two.
    pub fn new(size: usize) -> OpsResult<Self> {
        if !size.is_power_of_two() {
            return Err(OpsError::InvalidParameter(format!(
                "coefficient plane size must be a power of two, got {}",
                size
            )));
        }
        Ok(Self {
            size,
            data: vec![0.0; size * size],
        })
    }

    /// Copies channel `c` of `image` into the top-left corner of a
    /// zero-filled plane of side [`padded_size`].
    ///
    /// # Panics
    ///
    /// Panics if `c > 2`.
    pub fn from_channel(image: &Image, c: usize) -> Self {
        let size = padded_size(image.width(), image.height());
        let mut data = vec![0.0; size * size];
        for (r, row) in image.rows().enumerate() {
            for (col, p) in row.iter().enumerate() {
                data[r * size + col] = p.channel(c) as f64;
            }
        }
        Self { size, data }
    }

    /// Side length.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Row-major coefficients.
    #[inline]
    pub fn coefficients(&self) -> &[f64] {
        &self.data
    }

    /// Coefficient at `(row, col)`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.size + col]
    }

    /// Overwrites the coefficient at `(row, col)`.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[row * self.size + col] = value;
    }

    fn row_step(&mut self, row: usize, c: usize, scratch: &mut [f64]) {
        let start = row * self.size;
        haar_step(&mut self.data[start..start + c], scratch);
    }

    fn row_unstep(&mut self, row: usize, c: usize, scratch: &mut [f64]) {
        let start = row * self.size;
        haar_unstep(&mut self.data[start..start + c], scratch);
    }

    fn column_step(&mut self, col: usize, c: usize, line: &mut [f64], scratch: &mut [f64]) {
        self.gather_column(col, c, line);
        haar_step(&mut line[..c], scratch);
        self.scatter_column(col, c, line);
    }

    fn column_unstep(&mut self, col: usize, c: usize, line: &mut [f64], scratch: &mut [f64]) {
        self.gather_column(col, c, line);
        haar_unstep(&mut line[..c], scratch);
        self.scatter_column(col, c, line);
    }

    fn gather_column(&self, col: usize, c: usize, line: &mut [f64]) {
        for (r, slot) in line[..c].iter_mut().enumerate() {
            *slot = self.data[r * self.size + col];
        }
    }

    fn scatter_column(&mut self, col: usize, c: usize, line: &[f64]) {
        for (r, v) in line[..c].iter().enumerate() {
            self.data[r * self.size + col] = *v;
        }
    }
}

// (a, b) -> ((a + b) / sqrt2, (a - b) / sqrt2), averages in the low half.
fn haar_step(values: &mut [f64], scratch: &mut [f64]) {
    let half = values.len() / 2;
    for i in 0..half {
        let (a, b) = (values[2 * i], values[2 * i + 1]);
        scratch[i] = (a + b) * FRAC_1_SQRT_2;
        scratch[half + i] = (a - b) * FRAC_1_SQRT_2;
    }
    values.copy_from_slice(&scratch[..values.len()]);
}

fn haar_unstep(values: &mut [f64], scratch: &mut [f64]) {
    let half = values.len() / 2;
    for i in 0..half {
        let (avg, diff) = (values[i], values[half + i]);
        scratch[2 * i] = (avg + diff) * FRAC_1_SQRT_2;
        scratch[2 * i + 1] = (avg - diff) * FRAC_1_SQRT_2;
    }
    values.copy_from_slice(&scratch[..values.len()]);
}

/// Full forward 2-D Haar decomposition, in place.
pub fn haar_forward(plane: &mut CoefficientPlane) {
    let size = plane.size;
    let mut line = vec![0.0; size];
    let mut scratch = vec![0.0; size];

    let mut c = size;
    while c > 1 {
        for row in 0..c {
            plane.row_step(row, c, &mut scratch);
        }
        for col in 0..c {
            plane.column_step(col, c, &mut line, &mut scratch);
        }
        c /= 2;
    }
}

/// Inverse of [`haar_forward`], in place.
pub fn haar_inverse(plane: &mut CoefficientPlane) {
    let size = plane.size;
    let mut line = vec![0.0; size];
    let mut scratch = vec![0.0; size];

    let mut c = 2;
    while c <= size {
        for col in 0..c {
            plane.column_unstep(col, c, &mut line, &mut scratch);
        }
        for row in 0..c {
            plane.row_unstep(row, c, &mut scratch);
        }
        c *= 2;
    }
}

/// Zeroes the smallest detail coefficients of all planes together.
///
/// Returns the threshold magnitude, or `None` when every candidate was
/// dropped or there was nothing to drop.
fn threshold_planes(planes: &mut [CoefficientPlane], ratio: Percentage) -> Option<f64> {
    let mut magnitudes: Vec<f64> = planes
        .iter()
        .flat_map(|p| p.data[1..].iter())
        .filter(|v| **v != 0.0)
        .map(|v| v.abs())
        .collect();
    magnitudes.sort_by(f64::total_cmp);

    let n = magnitudes.len();
    let k = ((n as f64 * ratio.value() / 100.0).floor() as usize).min(n);
    trace!(candidates = n, dropped = k, "compression threshold");

    if n == 0 {
        return None;
    }
    if k == n {
        for plane in planes.iter_mut() {
            plane.data[1..].fill(0.0);
        }
        return None;
    }

    let threshold = magnitudes[k];
    for plane in planes.iter_mut() {
        for v in plane.data[1..].iter_mut() {
            if v.abs() < threshold {
                *v = 0.0;
            }
        }
    }
    Some(threshold)
}

fn for_each_plane<F>(planes: &mut [CoefficientPlane], f: F)
where
    F: Fn(&mut CoefficientPlane) + Sync + Send,
{
    #[cfg(feature = "parallel")]
    planes.par_iter_mut().for_each(f);

    #[cfg(not(feature = "parallel"))]
    planes.iter_mut().for_each(f);
}

/// Compresses `src`, dropping `ratio` percent of its detail coefficients.
///
/// At 0% the result equals the input exactly; at 100% every channel is
/// flat at its padded mean. To build the ratio from a raw number with an
/// [`OpsError::InvalidParameter`] on bad input, go through
/// [`Operation::compress`](crate::Operation::compress).
///
/// # Errors
///
/// Fails only if reconstruction yields a non-finite value.
pub fn compress(src: &Image, ratio: Percentage) -> OpsResult<Image> {
    let (width, height) = src.dimensions();
    let mut planes: Vec<CoefficientPlane> =
        (0..3).map(|c| CoefficientPlane::from_channel(src, c)).collect();
    trace!(width, height, padded = planes[0].size(), "compress");

    for_each_plane(&mut planes, haar_forward);
    let threshold = threshold_planes(&mut planes, ratio);
    debug!(ratio = ratio.value(), ?threshold, "Applying compression");
    for_each_plane(&mut planes, haar_inverse);

    let out = Image::try_from_fn(width, height, |row, col| {
        let (r, c) = (row as usize, col as usize);
        Ok(Pixel::from_u8(
            quantize_round(planes[0].get(r, c))?,
            quantize_round(planes[1].get(r, c))?,
            quantize_round(planes[2].get(r, c))?,
        ))
    })?;
    Ok(out)
}
