//! Integration tests for imgx crates.
//!
//! This crate contains end-to-end tests that exercise the image model
//! and the operators together.

use imgx_core::{Image, Pixel};

/// Pseudo-random image from a fixed seed (64-bit LCG).
pub fn noise_image(width: u32, height: u32, seed: u64) -> imgx_core::Result<Image> {
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    let mut state = seed;
    for _ in 0..width as usize * height as usize {
        let mut next = || {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            (state >> 56) as u8
        };
        pixels.push(Pixel::from_u8(next(), next(), next()));
    }
    Image::new(width, height, pixels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use imgx_core::Component;
    use imgx_ops::color::{combine_channels, luma, sepia, split_channels};
    use imgx_ops::compress::{CoefficientPlane, compress, haar_forward};
    use imgx_ops::correct::{color_correct, color_correct_split};
    use imgx_ops::filter::{Kernel, blur, convolve, sharpen};
    use imgx_ops::histogram::{Histogram, histogram};
    use imgx_ops::levels::{LevelCurve, levels_adjust, levels_adjust_split};
    use imgx_ops::split::apply_split;
    use imgx_ops::{Operation, OpsError, Percentage};

    const SIZES: [(u32, u32); 6] = [(1, 1), (1, 7), (7, 1), (3, 3), (10, 6), (17, 33)];

    fn pct(v: f64) -> Percentage {
        Percentage::new(v).unwrap()
    }

    #[test]
    fn test_blur_uniform_scenario() {
        let img = Image::filled(3, 3, Pixel::new(100, 150, 200)).unwrap();
        let out = blur(&img).unwrap();
        let corner = Pixel::new(56, 84, 112);
        let edge = Pixel::new(75, 112, 150);
        let expected = [
            [corner, edge, corner],
            [edge, Pixel::new(100, 150, 200), edge],
            [corner, edge, corner],
        ];
        for (row, line) in expected.iter().enumerate() {
            for (col, p) in line.iter().enumerate() {
                assert_eq!(out.pixel(row as u32, col as u32), *p, "({}, {})", row, col);
            }
        }
    }

    #[test]
    fn test_color_correct_scenario() {
        let img = Image::from_raw(
            2,
            2,
            &[100, 101, 102, 150, 151, 152, 200, 201, 202, 250, 251, 252],
        )
        .unwrap();
        let out = color_correct(&img);
        let expected: Vec<Pixel> = [101, 151, 201, 251].into_iter().map(Pixel::grey).collect();
        assert_eq!(out.pixels(), expected.as_slice());
    }

    #[test]
    fn test_levels_scenario() {
        let curve = LevelCurve::new(10, 120, 255).unwrap();
        let raw = [100, 100, 100, 150, 150, 150, 200, 200, 200, 250, 250, 250];
        let img = Image::from_raw(4, 1, &raw).unwrap();
        let out = levels_adjust(&img, &curve);
        let expected: Vec<Pixel> = [106, 159, 207, 251].into_iter().map(Pixel::grey).collect();
        assert_eq!(out.pixels(), expected.as_slice());
    }

    #[test]
    fn test_levels_control_points_sweep() {
        let points = [
            (0, 1, 255),
            (0, 254, 255),
            (5, 60, 90),
            (200, 220, 240),
            (1, 128, 254),
        ];
        for (b, m, w) in points {
            let curve = LevelCurve::new(b, m, w).unwrap();
            assert_eq!(curve.lookup(b as u8), 0);
            assert_eq!(curve.lookup(m as u8), 128);
            assert_eq!(curve.lookup(w as u8), 255);
        }
    }

    #[test]
    fn test_brightness_saturates() {
        assert_eq!(Pixel::grey(250).adjust_brightness(50), Pixel::WHITE);
        assert_eq!(Pixel::grey(10).adjust_brightness(-50), Pixel::BLACK);

        let img = noise_image(9, 5, 3).unwrap();
        for delta in [-300, -50, 0, 50, 300] {
            let out = img.adjust_brightness(delta);
            for (a, b) in img.pixels().iter().zip(out.pixels()) {
                assert_eq!(b.red() as i32, (a.red() as i32 + delta).clamp(0, 255));
            }
        }
    }

    #[test]
    fn test_flips_are_involutions() {
        for (i, (w, h)) in SIZES.into_iter().enumerate() {
            let img = noise_image(w, h, i as u64).unwrap();
            assert_eq!(img.flip_horizontal().flip_horizontal(), img);
            assert_eq!(img.flip_vertical().flip_vertical(), img);
        }
    }

    #[test]
    fn test_convolve_preserves_dimensions() {
        let kernels = [
            Kernel::blur(),
            Kernel::sharpen(),
            Kernel::new(vec![0.5], 1).unwrap(),
            Kernel::new(vec![-0.3; 49], 7).unwrap(),
        ];
        for (w, h) in SIZES {
            let img = noise_image(w, h, 11).unwrap();
            for k in &kernels {
                assert_eq!(convolve(&img, k).unwrap().dimensions(), (w, h));
            }
        }
    }

    #[test]
    fn test_compress_zero_is_lossless() {
        for (i, (w, h)) in SIZES.into_iter().enumerate() {
            let img = noise_image(w, h, 100 + i as u64).unwrap();
            let out = compress(&img, Percentage::ZERO).unwrap();
            assert_eq!(out, img, "{}x{}", w, h);
        }
    }

    #[test]
    fn test_compress_error_grows_with_ratio() {
        let img = noise_image(16, 16, 5).unwrap();
        let error = |p: f64| -> u64 {
            let out = compress(&img, pct(p)).unwrap();
            img.to_raw()
                .iter()
                .zip(out.to_raw())
                .map(|(a, b)| (*a as i64 - b as i64).unsigned_abs())
                .sum()
        };
        let (low, high) = (error(10.0), error(95.0));
        assert!(low <= high, "10%: {}, 95%: {}", low, high);
        assert!(high > 0);
    }

    #[test]
    fn test_haar_preserves_energy() {
        let img = noise_image(13, 6, 64).unwrap();
        for c in 0..3 {
            let mut plane = CoefficientPlane::from_channel(&img, c);
            let before: f64 = plane.coefficients().iter().map(|v| v * v).sum();
            haar_forward(&mut plane);
            let after: f64 = plane.coefficients().iter().map(|v| v * v).sum();
            assert_relative_eq!(before, after, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_compress_full_is_flat() {
        let img = noise_image(8, 8, 21).unwrap();
        let out = compress(&img, Percentage::FULL).unwrap();
        let first = out.pixel(0, 0);
        assert!(out.pixels().iter().all(|&p| p == first));
    }

    #[test]
    fn test_split_extremes_for_every_preview() {
        let img = noise_image(12, 7, 42).unwrap();
        let curve = LevelCurve::new(30, 100, 220).unwrap();

        let ops: Vec<(&str, Box<dyn Fn(&Image) -> Image + '_>)> = vec![
            ("blur", Box::new(|i: &Image| blur(i).unwrap())),
            ("sharpen", Box::new(|i: &Image| sharpen(i).unwrap())),
            ("sepia", Box::new(sepia)),
            ("levels", Box::new(|i: &Image| levels_adjust(i, &curve))),
            ("color-correct", Box::new(color_correct)),
        ];

        for (name, op) in &ops {
            let zero = apply_split(&img, Percentage::ZERO, |i| Ok(op(i))).unwrap();
            let full = apply_split(&img, Percentage::FULL, |i| Ok(op(i))).unwrap();
            assert_eq!(zero, img, "{} at 0%", name);
            assert_eq!(full, op(&img), "{} at 100%", name);
        }

        let levels_zero = levels_adjust_split(&img, &curve, Percentage::ZERO).unwrap();
        let correct_full = color_correct_split(&img, Percentage::FULL).unwrap();
        assert_eq!(levels_zero, img);
        assert_eq!(correct_full, color_correct(&img));
    }

    #[test]
    fn test_split_boundary_through_operation() {
        let img = noise_image(10, 4, 8).unwrap();
        let full = Operation::Sepia.apply(&img).unwrap();
        let half = Operation::Sepia.apply_split(&img, pct(35.0)).unwrap();
        // 10 * 35 / 100 = 3.5: columns 0..=3 are transformed.
        for row in 0..4 {
            for col in 0..10 {
                let expected = if col < 4 { full.pixel(row, col) } else { img.pixel(row, col) };
                assert_eq!(half.pixel(row, col), expected);
            }
        }
    }

    #[test]
    fn test_out_of_range_percentages() {
        for v in [-0.1, 100.1, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                Percentage::new(v),
                Err(OpsError::OutOfRange { .. })
            ));
        }
    }

    #[test]
    fn test_greyscale_pipeline() {
        let img = noise_image(6, 6, 77).unwrap();
        for component in Component::ALL {
            let grey = Operation::Greyscale(component).apply(&img).unwrap();
            let uniform = |p: &Pixel| p.red() == p.green() && p.green() == p.blue();
            assert!(grey.pixels().iter().all(uniform));
        }
        let grey = Operation::Greyscale(Component::Luma).apply(&img).unwrap();
        assert_eq!(grey, luma(&img));
    }

    #[test]
    fn test_channels_roundtrip_after_transform() {
        let img = blur(&noise_image(9, 4, 1).unwrap()).unwrap();
        let (r, g, b) = split_channels(&img);
        assert_eq!(combine_channels(&r, &g, &b).unwrap(), img);
    }

    #[test]
    fn test_histogram_chart() {
        let img = noise_image(20, 20, 9).unwrap();
        let hist = Histogram::from_image(&img);
        for c in 0..3 {
            assert_eq!(hist.channel(c).iter().sum::<u64>(), 400);
        }
        let chart = histogram(&img).unwrap();
        assert_eq!(chart.dimensions(), (256, 256));
        assert!(matches!(
            Operation::Histogram.apply_split(&img, pct(50.0)),
            Err(OpsError::Unsupported(_))
        ));
    }

    #[test]
    fn test_pixel_lookup_out_of_bounds() {
        let img = noise_image(3, 2, 0).unwrap();
        let err = img.pixel_at(2, 0).unwrap_err();
        assert!(err.is_bounds_error());
        assert!(img.get_pixel(1, 3).is_none());
    }

    #[test]
    fn test_zero_area_rejected() {
        assert!(Image::filled(0, 5, Pixel::BLACK).is_err());
        assert!(Image::new(3, 0, vec![]).is_err());
    }
}
