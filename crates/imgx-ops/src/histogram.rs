//! Per-channel histograms and their chart rendering.
//!
//! [`Histogram`] counts how often each of the 256 values occurs in each
//! channel. [`Histogram::render`] draws the three frequency tables as
//! overlaid line series on a fixed-size chart, scaled so the tallest bin
//! of any channel reaches the top edge.
//!
//! # Example
//!
//! ```rust
//! use imgx_core::{Image, Pixel};
//! use imgx_ops::histogram::{histogram, Histogram};
//!
//! let img = Image::filled(10, 4, Pixel::new(0, 128, 255))?;
//! let hist = Histogram::from_image(&img);
//! assert_eq!(hist.count(0, 0), 40);
//! assert_eq!(hist.count(1, 128), 40);
//!
//! let chart = histogram(&img)?;
//! assert_eq!(chart.dimensions(), (256, 256));
//! # Ok::<(), imgx_ops::OpsError>(())
//! ```

use crate::{OpsError, OpsResult};
use imgx_core::{Image, Pixel};
use std::ops::RangeInclusive;
use tracing::trace;

/// Number of distinct 8-bit values.
pub const BINS: usize = 256;

/// Frequency tables for the red, green and blue channels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    counts: [[u64; BINS]; 3],
}

impl Histogram {
    /// Counts every channel value of every pixel in `image`.
    pub fn from_image(image: &Image) -> Self {
        let mut counts = [[0u64; BINS]; 3];
        for p in image.pixels() {
            for (c, v) in p.channels().into_iter().enumerate() {
                counts[c][v as usize] += 1;
            }
        }
        Self { counts }
    }

    /// Frequency table for channel `c` (0 = red, 1 = green, 2 = blue).
    ///
    /// # Panics
    ///
    /// Panics if `c > 2`.
    #[inline]
    pub fn channel(&self, c: usize) -> &[u64; BINS] {
        &self.counts[c]
    }

    /// How many pixels have value `v` in channel `c`.
    #[inline]
    pub fn count(&self, c: usize, v: u8) -> u64 {
        self.counts[c][v as usize]
    }

    /// The tallest bin across all channels.
    pub fn max_count(&self) -> u64 {
        self.counts.iter().flatten().copied().max().unwrap_or(0)
    }

    /// Value with the highest frequency in channel `c`, restricted to
    /// `range`.
    ///
    /// Ties go to the lowest value. `None` if no value of the channel
    /// falls in `range`.
    pub fn peak(&self, c: usize, range: RangeInclusive<u8>) -> Option<u8> {
        let mut best = None;
        let mut best_count = 0;
        for v in range {
            let n = self.counts[c][v as usize];
            if n > best_count {
                best = Some(v);
                best_count = n;
            }
        }
        best
    }

    /// Draws the histogram as a line chart.
    ///
    /// # Errors
    ///
    /// Returns [`OpsError::InvalidParameter`] if the chart is smaller than
    /// 2x2.
    pub fn render(&self, chart: &HistogramChart) -> OpsResult<Image> {
        let (width, height) = (chart.width, chart.height);
        if width < 2 || height < 2 {
            return Err(OpsError::InvalidParameter(format!(
                "histogram chart must be at least 2x2, got {}x{}",
                width, height
            )));
        }
        let max = self.max_count();
        trace!(width, height, max, "render histogram");

        let mut canvas = Canvas::new(width, height, chart.background);

        if let Some(grid) = chart.grid {
            if chart.grid_spacing > 0 {
                let step = chart.grid_spacing as usize;
                for col in (0..width).step_by(step) {
                    canvas.line(col as i64, 0, col as i64, height as i64 - 1, grid);
                }
                for row in (0..height).step_by(step) {
                    canvas.line(0, row as i64, width as i64 - 1, row as i64, grid);
                }
            }
        }

        let bottom = height as i64 - 1;
        let span = height as f64 - 1.0;
        let point = |v: usize, n: u64| -> (i64, i64) {
            let col = (v * (width as usize - 1) / (BINS - 1)) as i64;
            let rise = if max == 0 {
                0
            } else {
                (n as f64 * span / max as f64).round() as i64
            };
            (col, bottom - rise)
        };

        for (c, color) in chart.series.into_iter().enumerate() {
            let table = &self.counts[c];
            let mut prev = point(0, table[0]);
            canvas.set(prev.0, prev.1, color);
            for v in 1..BINS {
                let next = point(v, table[v]);
                canvas.line(prev.0, prev.1, next.0, next.1, color);
                prev = next;
            }
        }

        Ok(canvas.into_image()?)
    }
}

/// Chart layout for [`Histogram::render`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistogramChart {
    /// Chart width in pixels.
    pub width: u32,
    /// Chart height in pixels.
    pub height: u32,
    /// Background fill.
    pub background: Pixel,
    /// Grid line color; `None` disables the grid.
    pub grid: Option<Pixel>,
    /// Distance between grid lines in pixels; 0 disables the grid.
    pub grid_spacing: u32,
    /// Line colors for the red, green and blue series.
    pub series: [Pixel; 3],
}

impl Default for HistogramChart {
    fn default() -> Self {
        Self {
            width: 256,
            height: 256,
            background: Pixel::WHITE,
            grid: Some(Pixel::grey(211)),
            grid_spacing: 32,
            series: [
                Pixel::from_u8(255, 0, 0),
                Pixel::from_u8(0, 255, 0),
                Pixel::from_u8(0, 0, 255),
            ],
        }
    }
}

/// Renders the histogram of `src` with the default chart layout.
pub fn histogram(src: &Image) -> OpsResult<Image> {
    Histogram::from_image(src).render(&HistogramChart::default())
}

/// Mutable drawing surface, frozen into an [`Image`] when done.
struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
}

impl Canvas {
    fn new(width: u32, height: u32, fill: Pixel) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill; width as usize * height as usize],
        }
    }

    fn set(&mut self, col: i64, row: i64, color: Pixel) {
        if col >= 0 && row >= 0 && (col as u32) < self.width && (row as u32) < self.height {
            self.pixels[row as usize * self.width as usize + col as usize] = color;
        }
    }

    // Bresenham's line algorithm
    fn line(&mut self, c1: i64, r1: i64, c2: i64, r2: i64, color: Pixel) {
        let dc = (c2 - c1).abs();
        let dr = -(r2 - r1).abs();
        let sc = if c1 < c2 { 1 } else { -1 };
        let sr = if r1 < r2 { 1 } else { -1 };
        let mut err = dc + dr;

        let mut c = c1;
        let mut r = r1;
        loop {
            self.set(c, r, color);
            if c == c2 && r == r2 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dr {
                err += dr;
                c += sc;
            }
            if e2 <= dc {
                err += dc;
                r += sr;
            }
        }
    }

    fn into_image(self) -> imgx_core::Result<Image> {
        Image::new(self.width, self.height, self.pixels)
    }
}
