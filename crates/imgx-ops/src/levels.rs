//! Levels adjustment through a three-point quadratic curve.
//!
//! A [`LevelCurve`] fits `y = A·x² + B·x + C` through the control points
//! `(black, 0)`, `(mid, 128)` and `(white, 255)`, then evaluates it once
//! at every input value 0..=255 into a lookup table. Applying the curve
//! is a plain table lookup per channel.
//!
//! # Example
//!
//! ```rust
//! use imgx_ops::levels::LevelCurve;
//!
//! let curve = LevelCurve::new(10, 120, 255)?;
//! assert_eq!(curve.lookup(10), 0);
//! assert_eq!(curve.lookup(120), 128);
//! assert_eq!(curve.lookup(100), 106);
//! assert_eq!(curve.lookup(250), 251);
//! # Ok::<(), imgx_ops::OpsError>(())
//! ```

use crate::split::apply_split;
use crate::{OpsError, OpsResult, Percentage};
use imgx_core::{Image, Pixel};
use tracing::{debug, trace};

/// Output value the mid point maps to.
const MID_OUT: f64 = 128.0;
/// Output value the white point maps to.
const WHITE_OUT: f64 = 255.0;

/// Quadratic tone curve with a precomputed 256-entry lookup table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LevelCurve {
    black: u8,
    mid: u8,
    white: u8,
    table: [u8; 256],
}

impl LevelCurve {
    /// Fits the curve through `(black, 0)`, `(mid, 128)`, `(white, 255)`.
    ///
    /// # Errors
    ///
    /// Returns [`OpsError::InvalidParameter`] unless
    /// `0 <= black < mid < white <= 255`.
    pub fn new(black: i32, mid: i32, white: i32) -> OpsResult<Self> {
        for (name, v) in [("black", black), ("mid", mid), ("white", white)] {
            if !(0..=255).contains(&v) {
                return Err(OpsError::InvalidParameter(format!(
                    "levels {} point {} outside [0, 255]",
                    name, v
                )));
            }
        }
        if !(black < mid && mid < white) {
            return Err(OpsError::InvalidParameter(format!(
                "levels points must be strictly increasing, got {} {} {}",
                black, mid, white
            )));
        }

        let (a, b, c) = fit_quadratic(black as f64, mid as f64, white as f64);
        trace!(a, b, c, "levels curve coefficients");

        let mut table = [0u8; 256];
        for (x, slot) in table.iter_mut().enumerate() {
            let x = x as f64;
            let y = a * x * x + b * x + c;
            *slot = y.round().clamp(0.0, 255.0) as u8;
        }

        Ok(Self {
            black: black as u8,
            mid: mid as u8,
            white: white as u8,
            table,
        })
    }

    /// The `(black, mid, white)` control points.
    #[inline]
    pub fn points(&self) -> (u8, u8, u8) {
        (self.black, self.mid, self.white)
    }

    /// Curve output for input `v`.
    #[inline]
    pub fn lookup(&self, v: u8) -> u8 {
        self.table[v as usize]
    }

    /// Maps every channel of every pixel through the table.
    pub fn apply(&self, src: &Image) -> Image {
        src.map(|p| {
            Pixel::from_u8(
                self.lookup(p.red()),
                self.lookup(p.green()),
                self.lookup(p.blue()),
            )
        })
    }
}

/// Coefficients `(A, B, C)` of the quadratic through `(b, 0)`, `(m, 128)`
/// and `(w, 255)`.
fn fit_quadratic(b: f64, m: f64, w: f64) -> (f64, f64, f64) {
    let det = b * b * (m - w) - b * (m * m - w * w) + w * m * m - m * w * w;
    let da = -b * (MID_OUT - WHITE_OUT) + MID_OUT * w - WHITE_OUT * m;
    let db = b * b * (MID_OUT - WHITE_OUT) + WHITE_OUT * m * m - MID_OUT * w * w;
    let dc = b * b * (WHITE_OUT * m - MID_OUT * w) - b * (WHITE_OUT * m * m - MID_OUT * w * w);
    (da / det, db / det, dc / det)
}

/// Applies `curve` to `src`.
pub fn levels_adjust(src: &Image, curve: &LevelCurve) -> Image {
    debug!(points = ?curve.points(), "Applying levels adjustment");
    curve.apply(src)
}

/// Levels adjustment on the left `split` percent of columns only.
pub fn levels_adjust_split(src: &Image, curve: &LevelCurve, split: Percentage) -> OpsResult<Image> {
    apply_split(src, split, |img| Ok(levels_adjust(img, curve)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_points_exact() {
        let points = [
            (10, 120, 255),
            (0, 128, 255),
            (20, 40, 220),
            (0, 1, 2),
            (100, 101, 250),
        ];
        for (b, m, w) in points {
            let curve = LevelCurve::new(b, m, w).unwrap();
            assert_eq!(curve.lookup(b as u8), 0, "black {:?}", (b, m, w));
            assert_eq!(curve.lookup(m as u8), 128, "mid {:?}", (b, m, w));
            assert_eq!(curve.lookup(w as u8), 255, "white {:?}", (b, m, w));
        }
    }

    #[test]
    fn test_reference_values() {
        let curve = LevelCurve::new(10, 120, 255).unwrap();
        let out: Vec<u8> = [100, 150, 200, 250].iter().map(|&v| curve.lookup(v)).collect();
        assert_eq!(out, vec![106, 159, 207, 251]);
    }

    #[test]
    fn test_linear_identity_points() {
        // (0,0), (128,128), (255,255) are collinear: A = 0 and y = x.
        let curve = LevelCurve::new(0, 128, 255).unwrap();
        for v in 0..=255u8 {
            assert_eq!(curve.lookup(v), v);
        }
    }

    #[test]
    fn test_invalid_points() {
        assert!(LevelCurve::new(120, 10, 255).is_err());
        assert!(LevelCurve::new(10, 10, 255).is_err());
        assert!(LevelCurve::new(-1, 10, 255).is_err());
        assert!(LevelCurve::new(10, 120, 256).is_err());
        assert!(matches!(
            LevelCurve::new(50, 40, 30),
            Err(OpsError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_apply_per_channel() {
        let curve = LevelCurve::new(10, 120, 255).unwrap();
        let img = Image::from_raw(2, 1, &[100, 150, 200, 250, 10, 120]).unwrap();
        let out = levels_adjust(&img, &curve);
        assert_eq!(out.pixel(0, 0), Pixel::new(106, 159, 207));
        assert_eq!(out.pixel(0, 1), Pixel::new(251, 0, 128));
    }

    #[test]
    fn test_split_full_and_zero() {
        let curve = LevelCurve::new(30, 100, 200).unwrap();
        let img = Image::from_fn(5, 2, |row, col| Pixel::grey((row * 100 + col * 20) as u8))
            .unwrap();
        let zero = levels_adjust_split(&img, &curve, Percentage::ZERO).unwrap();
        assert_eq!(zero, img);
        assert_eq!(
            levels_adjust_split(&img, &curve, Percentage::FULL).unwrap(),
            levels_adjust(&img, &curve)
        );
    }
}
