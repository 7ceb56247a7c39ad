//! Automatic color correction by histogram-peak alignment.
//!
//! Each channel's most frequent value is found within [`PEAK_RANGE`]. The
//! extremes are left out so that clipped shadows and highlights do not
//! dominate. Every channel is then shifted so its peak lands on the mean
//! of the three peaks, which neutralizes a uniform color cast. A channel
//! with no values in that range has no peak: it is left out of the mean
//! and not shifted.
//!
//! ```rust
//! use imgx_core::{Image, Pixel};
//! use imgx_ops::correct::color_correct;
//!
//! let img = Image::filled(2, 2, Pixel::new(90, 100, 110))?;
//! let out = color_correct(&img);
//! assert_eq!(out.pixel(0, 0), Pixel::grey(100));
//! # Ok::<(), imgx_core::Error>(())
//! ```

use crate::histogram::Histogram;
use crate::split::apply_split;
use crate::{OpsResult, Percentage};
use imgx_core::{Image, Pixel};
use std::ops::RangeInclusive;
use tracing::debug;

/// Values considered when locating a channel's histogram peak.
pub const PEAK_RANGE: RangeInclusive<u8> = 11..=244;

/// Per-channel offsets that align the histogram peaks of `src`.
///
/// Returns `[red, green, blue]` shifts; a grey image yields all zeros.
pub fn correction_offsets(src: &Image) -> [i32; 3] {
    let hist = Histogram::from_image(src);
    let peaks = [0, 1, 2].map(|c| hist.peak(c, PEAK_RANGE).map(i32::from));

    let found: Vec<i32> = peaks.iter().flatten().copied().collect();
    if found.is_empty() {
        return [0; 3];
    }
    let average = found.iter().sum::<i32>() / found.len() as i32;
    peaks.map(|p| p.map_or(0, |p| average - p))
}

/// Aligns the histogram peaks of the three channels.
pub fn color_correct(src: &Image) -> Image {
    let [dr, dg, db] = correction_offsets(src);
    debug!(dr, dg, db, "color correction offsets");
    src.map(|p| {
        Pixel::new(
            p.red() as i32 + dr,
            p.green() as i32 + dg,
            p.blue() as i32 + db,
        )
    })
}

/// Color correction on the left `split` percent of columns only.
pub fn color_correct_split(src: &Image, split: Percentage) -> OpsResult<Image> {
    apply_split(src, split, |img| Ok(color_correct(img)))
}
