//! # imgx-core
//!
//! Core types for 8-bit RGB image transforms.
//!
//! This crate provides the data model shared by every imgx operator:
//!
//! - [`Pixel`] - Immutable RGB triple, channels clamped to `0..=255`
//! - [`Image`] - Immutable row-major grid of pixels
//! - [`ColorMatrix`] - 3x3 linear channel mix (luma, sepia)
//! - [`Component`] - Single-channel greyscale projections
//! - [`Error`] / [`Result`] - Lookup and validation failures
//!
//! ## Design
//!
//! Values are immutable: every transform returns a new [`Image`] and the
//! pixel grid is never shared between two images. All indexing uses
//! row-major `(row, col)` order.
//!
//! ```rust
//! use imgx_core::prelude::*;
//!
//! let img = Image::filled(3, 2, Pixel::new(100, 150, 200))?;
//! let grey = img.component(Component::Intensity);
//! assert_eq!(grey.pixel_at(1, 2)?, Pixel::grey(150));
//! # Ok::<(), imgx_core::Error>(())
//! ```
//!
//! ## Crate Structure
//!
//! ```text
//! imgx-core (this crate)
//!    ^
//!    |
//!    +-- imgx-ops (filters, statistics, compression, split view)
//! ```
//!
//! ## Feature Flags
//!
//! - `parallel` - Row-parallel pixel construction via rayon (enabled by default)

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod image;
pub mod matrix;
pub mod pixel;

pub use error::{Error, Result};
pub use image::Image;
pub use matrix::ColorMatrix;
pub use pixel::{Component, Pixel, quantize_round, quantize_trunc};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::image::Image;
    pub use crate::matrix::ColorMatrix;
    pub use crate::pixel::{Component, Pixel};
}
