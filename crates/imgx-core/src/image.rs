//! Immutable RGB image buffer.
//!
//! [`Image`] owns a rectangular grid of [`Pixel`]s. Every transform returns
//! a new image; nothing mutates in place, and no two images share a
//! buffer.
//!
//! # Coordinates
//!
//! All indexing is **row-major `(row, col)`**: `row` selects the scanline
//! in `0..height`, `col` the position within it in `0..width`. Memory
//! layout follows the same order:
//!
//! ```text
//! pixels: [p(0,0) p(0,1) ... p(0,w-1)]  <- row 0
//!         [p(1,0) p(1,1) ... p(1,w-1)]  <- row 1
//!         ...
//! ```
//!
//! # Usage
//!
//! ```rust
//! use imgx_core::{Image, Pixel};
//!
//! let img = Image::from_fn(4, 2, |row, col| Pixel::new(col as i32 * 60, row as i32 * 200, 0))?;
//! assert_eq!(img.dimensions(), (4, 2));
//! assert_eq!(img.pixel_at(1, 3)?, Pixel::new(180, 200, 0));
//!
//! let mirrored = img.flip_horizontal();
//! assert_eq!(mirrored.pixel_at(1, 0)?, Pixel::new(180, 200, 0));
//! # Ok::<(), imgx_core::Error>(())
//! ```
//!
//! # Parallelism
//!
//! With the `parallel` feature, per-pixel construction ([`Image::from_fn`],
//! [`Image::try_from_fn`], [`Image::map`]) fans rows out over rayon. Each
//! output pixel depends only on its own closure call, so results are
//! identical to sequential evaluation.

use crate::error::{Error, Result};
use crate::pixel::{Component, Pixel};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Owned, immutable 8-bit RGB image.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Image {
    width: u32,
    height: u32,
    /// Row-major pixel grid, `width * height` entries.
    pixels: Vec<Pixel>,
}

/// Validates dimensions and returns the pixel count.
fn pixel_count_for(width: u32, height: u32) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(Error::invalid_dimensions(width, height, "zero-area image"));
    }
    (width as usize)
        .checked_mul(height as usize)
        .ok_or_else(|| {
            Error::invalid_dimensions(width, height, "image dimensions overflow")
        })
}

impl Image {
    /// Creates an image from row-major pixels.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if either dimension is zero or
    /// `pixels.len() != width * height`.
    pub fn new(width: u32, height: u32, pixels: Vec<Pixel>) -> Result<Self> {
        let expected = pixel_count_for(width, height)?;
        if pixels.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} pixels, got {}", expected, pixels.len()),
            ));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Creates an image from interleaved `[r, g, b, r, g, b, ...]` bytes.
    ///
    /// ```rust
    /// use imgx_core::Image;
    ///
    /// let img = Image::from_raw(2, 1, &[255, 0, 0, 0, 0, 255]).unwrap();
    /// assert_eq!(img.pixel(0, 1).blue(), 255);
    /// assert_eq!(img.to_raw(), vec![255, 0, 0, 0, 0, 255]);
    /// ```
    pub fn from_raw(width: u32, height: u32, data: &[u8]) -> Result<Self> {
        let expected = pixel_count_for(width, height)?;
        if data.len() != expected * 3 {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} bytes, got {}", expected * 3, data.len()),
            ));
        }
        let pixels = data
            .chunks_exact(3)
            .map(|c| Pixel::from_u8(c[0], c[1], c[2]))
            .collect();
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Creates an image by evaluating `f(row, col)` for every cell.
    pub fn from_fn<F>(width: u32, height: u32, f: F) -> Result<Self>
    where
        F: Fn(u32, u32) -> Pixel + Sync + Send,
    {
        Self::try_from_fn(width, height, |row, col| Ok(f(row, col)))
    }

    /// Like [`Image::from_fn`], but the closure may fail.
    ///
    /// The first error encountered is returned and no image is produced.
    pub fn try_from_fn<F>(width: u32, height: u32, f: F) -> Result<Self>
    where
        F: Fn(u32, u32) -> Result<Pixel> + Sync + Send,
    {
        let count = pixel_count_for(width, height)?;
        let mut pixels = vec![Pixel::BLACK; count];
        let fill_row = |(row, out): (usize, &mut [Pixel])| -> Result<()> {
            for (col, px) in out.iter_mut().enumerate() {
                *px = f(row as u32, col as u32)?;
            }
            Ok(())
        };

        #[cfg(feature = "parallel")]
        pixels
            .par_chunks_mut(width as usize)
            .enumerate()
            .try_for_each(fill_row)?;

        #[cfg(not(feature = "parallel"))]
        pixels
            .chunks_mut(width as usize)
            .enumerate()
            .try_for_each(fill_row)?;

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Creates an image with every pixel set to `pixel`.
    pub fn filled(width: u32, height: u32, pixel: Pixel) -> Result<Self> {
        let count = pixel_count_for(width, height)?;
        Ok(Self {
            width,
            height,
            pixels: vec![pixel; count],
        })
    }

    /// Returns the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the image dimensions as (width, height).
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns the total number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    /// Returns the row-major pixel slice.
    #[inline]
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    /// Iterates over rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Pixel]> {
        self.pixels.chunks_exact(self.width as usize)
    }

    /// Returns a row of pixels as a slice.
    ///
    /// # Panics
    ///
    /// Panics if `row >= height`.
    #[inline]
    pub fn row(&self, row: u32) -> &[Pixel] {
        let start = row as usize * self.width as usize;
        &self.pixels[start..start + self.width as usize]
    }

    /// Returns the pixel at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if `(row, col)` is out of bounds. Use [`Image::pixel_at`] for
    /// a checked lookup.
    #[inline]
    pub fn pixel(&self, row: u32, col: u32) -> Pixel {
        assert!(row < self.height && col < self.width, "pixel out of bounds");
        self.pixels[row as usize * self.width as usize + col as usize]
    }

    /// Returns the pixel at `(row, col)`, or `None` if out of bounds.
    #[inline]
    pub fn get_pixel(&self, row: u32, col: u32) -> Option<Pixel> {
        if row < self.height && col < self.width {
            let index = row as usize * self.width as usize + col as usize;
            Some(self.pixels[index])
        } else {
            None
        }
    }

    /// Bounds-checked pixel lookup.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if `row >= height` or `col >= width`.
    pub fn pixel_at(&self, row: u32, col: u32) -> Result<Pixel> {
        self.get_pixel(row, col)
            .ok_or_else(|| Error::out_of_bounds(row, col, self.width, self.height))
    }

    /// Returns interleaved `[r, g, b, ...]` bytes in row-major order.
    pub fn to_raw(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| p.channels()).collect()
    }

    /// Applies `f` to every pixel, producing a new image of the same size.
    pub fn map<F>(&self, f: F) -> Image
    where
        F: Fn(Pixel) -> Pixel + Sync + Send,
    {
        #[cfg(feature = "parallel")]
        let pixels = self.pixels.par_iter().map(|&p| f(p)).collect();

        #[cfg(not(feature = "parallel"))]
        let pixels = self.pixels.iter().map(|&p| f(p)).collect();

        Image {
            width: self.width,
            height: self.height,
            pixels,
        }
    }

    /// Greyscale image from a single-channel projection.
    pub fn component(&self, component: Component) -> Image {
        self.map(|p| p.component(component))
    }

    /// Red channel broadcast to greyscale.
    pub fn red_component(&self) -> Image {
        self.map(|p| p.red_component())
    }

    /// Green channel broadcast to greyscale.
    pub fn green_component(&self) -> Image {
        self.map(|p| p.green_component())
    }

    /// Blue channel broadcast to greyscale.
    pub fn blue_component(&self) -> Image {
        self.map(|p| p.blue_component())
    }

    /// Per-pixel maximum channel.
    pub fn value(&self) -> Image {
        self.map(|p| p.value())
    }

    /// Per-pixel mean channel.
    pub fn intensity(&self) -> Image {
        self.map(|p| p.intensity())
    }

    /// Per-pixel Rec.709 luma.
    pub fn luma(&self) -> Image {
        self.map(|p| p.luma())
    }

    /// Per-pixel sepia tone.
    pub fn sepia(&self) -> Image {
        self.map(|p| p.sepia())
    }

    /// Adds `delta` to every channel of every pixel, clamping.
    pub fn adjust_brightness(&self, delta: i32) -> Image {
        self.map(|p| p.adjust_brightness(delta))
    }

    /// Brightens by `amount`.
    pub fn brighten(&self, amount: u8) -> Image {
        self.adjust_brightness(amount as i32)
    }

    /// Darkens by `amount`.
    pub fn darken(&self, amount: u8) -> Image {
        self.adjust_brightness(-(amount as i32))
    }

    /// Mirrors left-right: `col -> width - 1 - col`.
    pub fn flip_horizontal(&self) -> Image {
        let pixels = self
            .rows()
            .flat_map(|row| row.iter().rev().copied())
            .collect();
        Image {
            width: self.width,
            height: self.height,
            pixels,
        }
    }

    /// Mirrors top-bottom: `row -> height - 1 - row`.
    pub fn flip_vertical(&self) -> Image {
        let pixels = self
            .pixels
            .chunks_exact(self.width as usize)
            .rev()
            .flatten()
            .copied()
            .collect();
        Image {
            width: self.width,
            height: self.height,
            pixels,
        }
    }
}
