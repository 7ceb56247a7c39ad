//! The 8-bit RGB pixel value type.
//!
//! [`Pixel`] is an immutable `Copy` triple. Channels are stored as `u8`,
//! so the `0..=255` invariant holds by construction; every constructor
//! and arithmetic operation clamps before storing.
//!
//! ```
//! use imgx_core::Pixel;
//!
//! let p = Pixel::new(300, -20, 128);
//! assert_eq!(p.channels(), [255, 0, 128]);
//!
//! let bright = Pixel::new(250, 250, 250).adjust_brightness(50);
//! assert_eq!(bright, Pixel::WHITE);
//! ```
//!
//! # Used By
//!
//! - [`crate::image::Image`] - row-major pixel grid
//! - `imgx-ops` - all per-pixel operators

use crate::error::{Error, Result};
use crate::matrix::ColorMatrix;
use std::fmt;

/// Single-channel projection used to build greyscale images.
///
/// Each variant maps a pixel to one value which is then broadcast to all
/// three channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
    /// Red channel.
    Red,
    /// Green channel.
    Green,
    /// Blue channel.
    Blue,
    /// Maximum of the three channels.
    Value,
    /// Integer-truncated mean of the three channels.
    Intensity,
    /// Rec.709 weighted sum.
    Luma,
}

impl Component {
    /// Every projection, in declaration order.
    pub const ALL: [Component; 6] = [
        Component::Red,
        Component::Green,
        Component::Blue,
        Component::Value,
        Component::Intensity,
        Component::Luma,
    ];

    /// Lowercase name, e.g. `"intensity"`.
    pub fn name(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Green => "green",
            Self::Blue => "blue",
            Self::Value => "value",
            Self::Intensity => "intensity",
            Self::Luma => "luma",
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An RGB pixel with 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Pixel {
    r: u8,
    g: u8,
    b: u8,
}

/// Clamps an integer channel into `0..=255`.
#[inline]
fn clamp_channel(v: i32) -> u8 {
    v.clamp(0, 255) as u8
}

impl Pixel {
    /// Pure black.
    pub const BLACK: Pixel = Pixel::from_u8(0, 0, 0);
    /// Pure white.
    pub const WHITE: Pixel = Pixel::from_u8(255, 255, 255);

    /// Creates a pixel, clamping each channel into `0..=255`.
    #[inline]
    pub fn new(r: i32, g: i32, b: i32) -> Self {
        Self {
            r: clamp_channel(r),
            g: clamp_channel(g),
            b: clamp_channel(b),
        }
    }

    /// Creates a pixel from channels that are already in range.
    #[inline]
    pub const fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Creates a grey pixel with all channels equal to `v`.
    #[inline]
    pub const fn grey(v: u8) -> Self {
        Self::from_u8(v, v, v)
    }

    /// Creates a pixel from real-valued channels.
    ///
    /// Each value is truncated toward zero and then clamped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NonFinite`] if any channel is NaN or infinite.
    ///
    /// ```
    /// use imgx_core::Pixel;
    ///
    /// let p = Pixel::from_f64(56.25, -3.9, 300.0).unwrap();
    /// assert_eq!(p.channels(), [56, 0, 255]);
    /// assert!(Pixel::from_f64(f64::NAN, 0.0, 0.0).is_err());
    /// ```
    pub fn from_f64(r: f64, g: f64, b: f64) -> Result<Self> {
        Ok(Self::from_u8(
            quantize_trunc(r)?,
            quantize_trunc(g)?,
            quantize_trunc(b)?,
        ))
    }

    /// Red channel.
    #[inline]
    pub const fn red(&self) -> u8 {
        self.r
    }

    /// Green channel.
    #[inline]
    pub const fn green(&self) -> u8 {
        self.g
    }

    /// Blue channel.
    #[inline]
    pub const fn blue(&self) -> u8 {
        self.b
    }

    /// Channels as `[r, g, b]`.
    #[inline]
    pub const fn channels(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Channel by index (0 = red, 1 = green, 2 = blue).
    ///
    /// # Panics
    ///
    /// Panics if `index > 2`.
    #[inline]
    pub fn channel(&self, index: usize) -> u8 {
        self.channels()[index]
    }

    /// Adds `delta` to every channel, then clamps.
    ///
    /// The delta is not scaled, so any delta large enough saturates.
    #[inline]
    pub fn adjust_brightness(&self, delta: i32) -> Self {
        Self::new(
            self.r as i32 + delta,
            self.g as i32 + delta,
            self.b as i32 + delta,
        )
    }

    /// Red channel broadcast to all channels.
    #[inline]
    pub const fn red_component(&self) -> Self {
        Self::grey(self.r)
    }

    /// Green channel broadcast to all channels.
    #[inline]
    pub const fn green_component(&self) -> Self {
        Self::grey(self.g)
    }

    /// Blue channel broadcast to all channels.
    #[inline]
    pub const fn blue_component(&self) -> Self {
        Self::grey(self.b)
    }

    /// Maximum channel broadcast to all channels.
    #[inline]
    pub fn value(&self) -> Self {
        Self::grey(self.r.max(self.g).max(self.b))
    }

    /// Truncated mean of the channels broadcast to all channels.
    #[inline]
    pub fn intensity(&self) -> Self {
        let sum = self.r as u16 + self.g as u16 + self.b as u16;
        Self::grey((sum / 3) as u8)
    }

    /// Rec.709 luma broadcast to all channels.
    #[inline]
    pub fn luma(&self) -> Self {
        self.transform(&ColorMatrix::LUMA)
    }

    /// Sepia tone.
    #[inline]
    pub fn sepia(&self) -> Self {
        self.transform(&ColorMatrix::SEPIA)
    }

    /// Applies a single-channel projection.
    pub fn component(&self, component: Component) -> Self {
        match component {
            Component::Red => self.red_component(),
            Component::Green => self.green_component(),
            Component::Blue => self.blue_component(),
            Component::Value => self.value(),
            Component::Intensity => self.intensity(),
            Component::Luma => self.luma(),
        }
    }

    /// Applies a color matrix.
    ///
    /// Each output channel is truncated and clamped on its own; the three
    /// outputs are not renormalized together. A NaN result maps to 0 and
    /// an infinite one to the nearest bound.
    pub fn transform(&self, matrix: &ColorMatrix) -> Self {
        let out = matrix.apply([self.r as f64, self.g as f64, self.b as f64]);
        Self::from_u8(
            saturate_trunc(out[0]),
            saturate_trunc(out[1]),
            saturate_trunc(out[2]),
        )
    }
}

impl From<[u8; 3]> for Pixel {
    fn from(c: [u8; 3]) -> Self {
        Self::from_u8(c[0], c[1], c[2])
    }
}

impl From<Pixel> for [u8; 3] {
    fn from(p: Pixel) -> Self {
        p.channels()
    }
}

impl fmt::Display for Pixel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RGB({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Truncates toward zero and clamps, rejecting NaN and infinities.
#[inline]
pub fn quantize_trunc(v: f64) -> Result<u8> {
    if !v.is_finite() {
        return Err(Error::NonFinite { value: v });
    }
    Ok(saturate_trunc(v))
}

/// Rounds to nearest and clamps, rejecting NaN and infinities.
#[inline]
pub fn quantize_round(v: f64) -> Result<u8> {
    if !v.is_finite() {
        return Err(Error::NonFinite { value: v });
    }
    Ok(saturate_trunc(v.round()))
}

// `as` casts saturate and map NaN to 0, so this is total.
#[inline]
fn saturate_trunc(v: f64) -> u8 {
    v.trunc().clamp(0.0, 255.0) as u8
}
