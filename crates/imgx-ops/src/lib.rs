//! # imgx-ops
//!
//! Image transforms over the [`imgx_core`] data model.
//!
//! Every operator takes an [`Image`](imgx_core::Image) by reference and
//! returns a new one; inputs are never modified.
//!
//! # Modules
//!
//! - [`filter`] - Convolution with blur and sharpen kernels
//! - [`color`] - Color matrices, greyscale projections, channel split
//! - [`histogram`] - Frequency tables and chart rendering
//! - [`correct`] - Automatic color correction
//! - [`levels`] - Quadratic levels adjustment
//! - [`compress`] - Haar coefficient thresholding
//! - [`split`] - Side-by-side preview of a transform
//! - [`operation`] - Closed catalog of all of the above
//!
//! # Example
//!
//! ```rust
//! use imgx_core::{Image, Pixel};
//! use imgx_ops::{filter, levels::LevelCurve, Percentage};
//!
//! let img = Image::filled(8, 8, Pixel::new(100, 150, 200))?;
//! let blurred = filter::blur(&img)?;
//!
//! let curve = LevelCurve::new(10, 120, 255)?;
//! let preview = imgx_ops::levels::levels_adjust_split(&blurred, &curve, Percentage::new(50.0)?)?;
//! assert_eq!(preview.dimensions(), (8, 8));
//! # Ok::<(), imgx_ops::OpsError>(())
//! ```
//!
//! # Feature Flags
//!
//! - `parallel` - Rayon row and channel parallelism (enabled by default).
//!   Output is identical with or without it.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod percent;

pub mod color;
pub mod compress;
pub mod correct;
pub mod filter;
pub mod histogram;
pub mod levels;
pub mod operation;
pub mod split;

pub use color::ColorTransform;
pub use error::{OpsError, OpsResult};
pub use filter::{FilterKind, Kernel};
pub use histogram::{Histogram, HistogramChart};
pub use levels::LevelCurve;
pub use operation::Operation;
pub use percent::Percentage;
