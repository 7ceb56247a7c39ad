//! Error types for imgx-core operations.
//!
//! # Overview
//!
//! The [`Error`] enum covers the failure modes of the data model:
//! - Pixel lookups outside the image grid
//! - Zero-area or inconsistent image construction
//! - Mixing images of different sizes
//! - Non-finite channel values reaching the pixel clamp
//!
//! # Usage
//!
//! ```rust
//! use imgx_core::{Error, Result};
//!
//! fn check(row: u32, col: u32, width: u32, height: u32) -> Result<()> {
//!     if row >= height || col >= width {
//!         return Err(Error::out_of_bounds(row, col, width, height));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check(3, 0, 2, 2).is_err());
//! ```

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the pixel and image model.
///
/// # Categories
///
/// - **Lookup errors**: [`OutOfBounds`](Error::OutOfBounds)
/// - **Validation errors**: [`InvalidDimensions`](Error::InvalidDimensions),
///   [`DimensionMismatch`](Error::DimensionMismatch), [`NonFinite`](Error::NonFinite)
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Pixel coordinates are outside image bounds.
    ///
    /// Returned when accessing `(row, col)` where `row >= height` or
    /// `col >= width`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use imgx_core::Error;
    ///
    /// let err = Error::out_of_bounds(100, 50, 80, 60);
    /// assert!(err.to_string().contains("100"));
    /// ```
    #[error("pixel (row {row}, col {col}) out of bounds for image {width}x{height}")]
    OutOfBounds {
        /// Row that was out of bounds
        row: u32,
        /// Column that was out of bounds
        col: u32,
        /// Image width
        width: u32,
        /// Image height
        height: u32,
    },

    /// Invalid image dimensions.
    ///
    /// Returned when width or height is zero, or when the supplied pixel
    /// data does not cover exactly `width * height` cells.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Reason why dimensions are invalid
        reason: String,
    },

    /// Two images that must share a size do not.
    #[error("dimension mismatch: {a_width}x{a_height} vs {b_width}x{b_height}")]
    DimensionMismatch {
        /// First image width
        a_width: u32,
        /// First image height
        a_height: u32,
        /// Second image width
        b_width: u32,
        /// Second image height
        b_height: u32,
    },

    /// A channel value was NaN or infinite before clamping.
    #[error("non-finite channel value: {value}")]
    NonFinite {
        /// The offending value
        value: f64,
    },
}

impl Error {
    /// Creates an [`Error::OutOfBounds`] error.
    #[inline]
    pub fn out_of_bounds(row: u32, col: u32, width: u32, height: u32) -> Self {
        Self::OutOfBounds {
            row,
            col,
            width,
            height,
        }
    }

    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::DimensionMismatch`] error from two `(width, height)` pairs.
    #[inline]
    pub fn dimension_mismatch(a: (u32, u32), b: (u32, u32)) -> Self {
        Self::DimensionMismatch {
            a_width: a.0,
            a_height: a.1,
            b_width: b.0,
            b_height: b.1,
        }
    }

    /// Returns `true` if this is a bounds-related error.
    #[inline]
    pub fn is_bounds_error(&self) -> bool {
        matches!(self, Self::OutOfBounds { .. })
    }

    /// Returns `true` if this error was raised while validating input.
    #[inline]
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidDimensions { .. } | Self::DimensionMismatch { .. } | Self::NonFinite { .. }
        )
    }
}
