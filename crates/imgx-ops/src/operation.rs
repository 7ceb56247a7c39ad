//! Catalog of every engine transform.
//!
//! [`Operation`] is what a command layer builds from a parsed verb; it
//! carries the validated parameters and dispatches to the operator
//! functions in this crate.
//!
//! ```rust
//! use imgx_core::{Image, Pixel};
//! use imgx_ops::{Operation, Percentage};
//!
//! let img = Image::filled(4, 4, Pixel::new(90, 100, 110))?;
//! let out = Operation::ColorCorrect.apply_split(&img, Percentage::new(50.0)?)?;
//! assert_eq!(out.pixel(0, 0), Pixel::grey(100));
//! assert_eq!(out.pixel(0, 3), Pixel::new(90, 100, 110));
//!
//! assert!(Operation::Histogram.apply_split(&img, Percentage::FULL).is_err());
//! # Ok::<(), imgx_ops::OpsError>(())
//! ```

use crate::color::{ColorTransform, greyscale};
use crate::compress::compress;
use crate::correct::color_correct;
use crate::filter::FilterKind;
use crate::histogram::histogram;
use crate::levels::{LevelCurve, levels_adjust};
use crate::split::apply_split;
use crate::{OpsError, OpsResult, Percentage};
use imgx_core::{Component, Image};
use std::fmt;

/// A transform together with its parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// 3x3 blur.
    Blur,
    /// 5x5 sharpen.
    Sharpen,
    /// Sepia tone.
    Sepia,
    /// Greyscale from one projection.
    Greyscale(Component),
    /// Adds a signed delta to every channel.
    Brighten(i32),
    /// Mirrors columns.
    FlipHorizontal,
    /// Mirrors rows.
    FlipVertical,
    /// Histogram-peak color correction.
    ColorCorrect,
    /// Levels adjustment.
    Levels(LevelCurve),
    /// Haar compression dropping the given share of coefficients.
    Compress(Percentage),
    /// Histogram chart with the default layout.
    Histogram,
}

impl Operation {
    /// Compression dropping `ratio` percent of the detail coefficients.
    ///
    /// # Errors
    ///
    /// Returns [`OpsError::InvalidParameter`] if `ratio` is outside
    /// `[0, 100]` or NaN. A split percentage, by contrast, reports
    /// [`OpsError::OutOfRange`] through [`Percentage::new`].
    ///
    /// ```rust
    /// use imgx_ops::{Operation, OpsError};
    ///
    /// assert!(Operation::compress(75.0).is_ok());
    /// assert!(matches!(Operation::compress(120.0), Err(OpsError::InvalidParameter(_))));
    /// ```
    pub fn compress(ratio: f64) -> OpsResult<Self> {
        Percentage::new(ratio).map(Self::Compress).map_err(|_| {
            OpsError::InvalidParameter(format!(
                "compression ratio {} outside [0, 100]",
                ratio
            ))
        })
    }

    /// Command verb for this operation.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Blur => "blur",
            Self::Sharpen => "sharpen",
            Self::Sepia => "sepia",
            Self::Greyscale(_) => "greyscale",
            Self::Brighten(_) => "brighten",
            Self::FlipHorizontal => "horizontal-flip",
            Self::FlipVertical => "vertical-flip",
            Self::ColorCorrect => "color-correct",
            Self::Levels(_) => "levels-adjust",
            Self::Compress(_) => "compress",
            Self::Histogram => "histogram",
        }
    }

    /// Whether [`Operation::apply_split`] accepts this operation.
    ///
    /// The histogram has different dimensions from its input and a
    /// partial flip has no sensible preview, so both are excluded.
    pub fn supports_split(&self) -> bool {
        !matches!(
            self,
            Self::Histogram | Self::FlipHorizontal | Self::FlipVertical
        )
    }

    /// Applies the operation to the whole image.
    pub fn apply(&self, src: &Image) -> OpsResult<Image> {
        match self {
            Self::Blur => FilterKind::Blur.apply(src),
            Self::Sharpen => FilterKind::Sharpen.apply(src),
            Self::Sepia => Ok(ColorTransform::Sepia.apply(src)),
            Self::Greyscale(component) => Ok(greyscale(src, *component)),
            Self::Brighten(delta) => Ok(src.adjust_brightness(*delta)),
            Self::FlipHorizontal => Ok(src.flip_horizontal()),
            Self::FlipVertical => Ok(src.flip_vertical()),
            Self::ColorCorrect => Ok(color_correct(src)),
            Self::Levels(curve) => Ok(levels_adjust(src, curve)),
            Self::Compress(ratio) => compress(src, *ratio),
            Self::Histogram => histogram(src),
        }
    }

    /// Applies the operation to the left `split` percent of columns.
    ///
    /// # Errors
    ///
    /// Returns [`OpsError::Unsupported`] when
    /// [`supports_split`](Self::supports_split) is false.
    pub fn apply_split(&self, src: &Image, split: Percentage) -> OpsResult<Image> {
        if !self.supports_split() {
            return Err(OpsError::Unsupported(format!(
                "{} does not support split view",
                self.name()
            )));
        }
        apply_split(src, split, |img| self.apply(img))
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Greyscale(component) => write!(f, "{} {}", self.name(), component),
            Self::Brighten(delta) => write!(f, "{} {}", self.name(), delta),
            Self::Levels(curve) => {
                let (b, m, w) = curve.points();
                write!(f, "{} {} {} {}", self.name(), b, m, w)
            }
            Self::Compress(ratio) => write!(f, "{} {}", self.name(), ratio.value()),
            _ => f.write_str(self.name()),
        }
    }
}
