//! 3x3 matrix type for linear color transforms.
//!
//! [`ColorMatrix`] drives the luma and sepia transforms and any custom
//! per-pixel linear mix of the three channels.
//!
//! # Convention
//!
//! Matrices are stored in **row-major** order and use **column vectors**:
//!
//! ```text
//! | m00 m01 m02 |   | r |   | m00*r + m01*g + m02*b |
//! | m10 m11 m12 | * | g | = | m10*r + m11*g + m12*b |
//! | m20 m21 m22 |   | b |   | m20*r + m21*g + m22*b |
//! ```
//!
//! # Usage
//!
//! ```rust
//! use imgx_core::ColorMatrix;
//!
//! let out = ColorMatrix::SEPIA.apply([100.0, 150.0, 200.0]);
//! assert!((out[0] - 192.45).abs() < 1e-9);
//! ```

use glam::{DMat3, DVec3};

/// A 3x3 matrix mixing the red, green and blue channels.
///
/// Stored in row-major order; row `i` produces output channel `i`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorMatrix {
    /// Matrix elements in row-major order: [row0, row1, row2]
    pub m: [[f64; 3]; 3],
}

impl ColorMatrix {
    /// Identity matrix.
    pub const IDENTITY: Self = Self::from_rows([
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, 0.0, 1.0],
    ]);

    /// Rec.709 luma, broadcast to all three output channels.
    pub const LUMA: Self = Self::from_rows([
        [0.2126, 0.7152, 0.0722],
        [0.2126, 0.7152, 0.0722],
        [0.2126, 0.7152, 0.0722],
    ]);

    /// Warm sepia tone.
    pub const SEPIA: Self = Self::from_rows([
        [0.393, 0.769, 0.189],
        [0.349, 0.686, 0.168],
        [0.272, 0.534, 0.131],
    ]);

    /// Creates a matrix from row arrays.
    #[inline]
    pub const fn from_rows(rows: [[f64; 3]; 3]) -> Self {
        Self { m: rows }
    }

    /// Converts to glam DMat3 (column-major).
    #[inline]
    pub fn to_glam(&self) -> DMat3 {
        // glam uses column-major, so we transpose
        DMat3::from_cols_array_2d(&[
            [self.m[0][0], self.m[1][0], self.m[2][0]],
            [self.m[0][1], self.m[1][1], self.m[2][1]],
            [self.m[0][2], self.m[1][2], self.m[2][2]],
        ])
    }

    /// Multiplies an `[r, g, b]` column vector by this matrix.
    ///
    /// No clamping or rounding happens here; callers decide how to
    /// quantize the result.
    #[inline]
    pub fn apply(&self, rgb: [f64; 3]) -> [f64; 3] {
        (self.to_glam() * DVec3::from_array(rgb)).to_array()
    }
}

impl Default for ColorMatrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}
