//! Validated percentage parameter.
//!
//! Used for the compression ratio and the split-view boundary.

use crate::{OpsError, OpsResult};
use std::fmt;

/// A real number in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Percentage(f64);

impl Percentage {
    /// 0%.
    pub const ZERO: Self = Self(0.0);
    /// 100%.
    pub const FULL: Self = Self(100.0);

    /// Creates a percentage.
    ///
    /// # Errors
    ///
    /// Returns [`OpsError::OutOfRange`] if `value` is outside `[0, 100]`
    /// or is NaN.
    ///
    /// ```rust
    /// use imgx_ops::Percentage;
    ///
    /// assert!(Percentage::new(50.0).is_ok());
    /// assert!(Percentage::new(100.5).is_err());
    /// assert!(Percentage::new(-1.0).is_err());
    /// ```
    pub fn new(value: f64) -> OpsResult<Self> {
        if !(0.0..=100.0).contains(&value) {
            return Err(OpsError::OutOfRange {
                name: "percentage",
                value,
                min: 0.0,
                max: 100.0,
            });
        }
        Ok(Self(value))
    }

    /// The raw value in `[0, 100]`.
    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Percentage {
    type Error = OpsError;

    fn try_from(value: f64) -> OpsResult<Self> {
        Self::new(value)
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}
