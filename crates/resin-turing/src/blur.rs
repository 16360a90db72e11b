//! Separable box blur with truncated edges.
//!
//! Each pass is a moving average whose window is clipped at the image
//! border: samples outside the image contribute nothing and are not counted
//! in the divisor. The cost is O(width * height) regardless of the radius.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Result, TuringError};
use crate::field::Field;

/// Blurs `source` into `destination` with a box of the given radius.
///
/// Both slices are row-major `width * height` buffers. Every output sample is
/// `weight` times the mean of the in-bounds samples of the
/// `(2 * radius + 1)^2` window around it.
pub fn box_blur(
    source: &[f32],
    destination: &mut [f32],
    width: usize,
    height: usize,
    radius: usize,
    weight: u32,
) -> Result<()> {
    let mut scratch = vec![0.0; source.len()];
    box_blur_with_scratch(source, &mut scratch, destination, width, height, radius, weight)
}

/// Like [`box_blur`], with a caller-provided buffer for the horizontal pass.
pub fn box_blur_with_scratch(
    source: &[f32],
    scratch: &mut [f32],
    destination: &mut [f32],
    width: usize,
    height: usize,
    radius: usize,
    weight: u32,
) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(TuringError::EmptyField { width, height });
    }
    let expected = width * height;
    for len in [source.len(), scratch.len(), destination.len()] {
        if len != expected {
            return Err(TuringError::BufferSize { expected, got: len });
        }
    }

    blur_unchecked(source, scratch, destination, width, height, radius, weight);
    Ok(())
}

/// Runs both passes. Buffer sizes must already be checked.
pub(crate) fn blur_unchecked(
    source: &[f32],
    scratch: &mut [f32],
    destination: &mut [f32],
    width: usize,
    height: usize,
    radius: usize,
    weight: u32,
) {
    let weight = weight as f32;

    // A zero radius is a one-sample window; skip the running sum so the
    // result is exact.
    if radius == 0 {
        for (d, &s) in destination.iter_mut().zip(source) {
            *d = weight * s;
        }
        return;
    }

    // Rows, then columns; the weight is applied once, on the second pass.
    moving_average(source, scratch, height, width, width, 1, radius, 1.0);
    moving_average(scratch, destination, width, height, 1, width, radius, weight);
}

/// Moving average along `lines` independent lines of `len` samples.
///
/// Line `l` starts at `l * line_stride` and consecutive samples are `step`
/// apart, so the same routine serves rows (`step = 1`) and columns
/// (`step = width`).
#[allow(clippy::too_many_arguments)]
fn moving_average(
    src: &[f32],
    dst: &mut [f32],
    lines: usize,
    len: usize,
    line_stride: usize,
    step: usize,
    radius: usize,
    weight: f32,
) {
    let last = len - 1;
    let reach = radius.min(last);

    for line in 0..lines {
        let base = line * line_stride;
        let at = |i: usize| base + i * step;

        let mut sum = 0.0f32;
        for i in 0..=reach {
            sum += src[at(i)];
        }
        dst[at(0)] = weight * sum / (reach + 1) as f32;

        for i in 1..len {
            let ahead = i.saturating_add(radius);
            if ahead <= last {
                sum += src[at(ahead)];
            }
            if i > radius {
                sum -= src[at(i - radius - 1)];
            }

            let span = ahead.min(last) - i.saturating_sub(radius) + 1;
            dst[at(i)] = weight * sum / span as f32;
        }
    }
}

/// Box blur as a value-type operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoxBlur {
    /// Blur radius in pixels.
    pub radius: usize,
    /// Multiplier applied to the result.
    pub weight: u32,
}

impl Default for BoxBlur {
    fn default() -> Self {
        Self {
            radius: 1,
            weight: 1,
        }
    }
}

impl BoxBlur {
    /// Creates a unit-weight blur of the given radius.
    pub fn new(radius: usize) -> Self {
        Self { radius, weight: 1 }
    }

    /// Sets the weight.
    pub fn with_weight(mut self, weight: u32) -> Self {
        self.weight = weight;
        self
    }

    /// Applies this operation to a field.
    pub fn apply(&self, field: &Field) -> Field {
        field.blurred(self.radius, self.weight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    /// Direct truncated-window average, O(n * r^2).
    fn reference_blur(src: &[f32], w: usize, h: usize, r: usize, weight: u32) -> Vec<f32> {
        let mut out = vec![0.0; w * h];
        for y in 0..h {
            for x in 0..w {
                let (x0, x1) = (x.saturating_sub(r), (x + r).min(w - 1));
                let (y0, y1) = (y.saturating_sub(r), (y + r).min(h - 1));
                let mut sum = 0.0f64;
                for yy in y0..=y1 {
                    for xx in x0..=x1 {
                        sum += src[yy * w + xx] as f64;
                    }
                }
                let count = ((x1 - x0 + 1) * (y1 - y0 + 1)) as f64;
                out[y * w + x] = (sum / count) as f32 * weight as f32;
            }
        }
        out
    }

    fn random_grid(w: usize, h: usize, seed: u64) -> Vec<f32> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..w * h).map(|_| rng.random::<f32>()).collect()
    }

    #[test]
    fn test_radius_zero_is_identity() {
        for (w, h) in [(1, 1), (7, 3), (16, 16)] {
            let src = random_grid(w, h, 3);
            let mut dst = vec![0.0; w * h];
            box_blur(&src, &mut dst, w, h, 0, 1).unwrap();
            assert_eq!(dst, src);
        }
    }

    #[test]
    fn test_radius_zero_scales_by_weight() {
        let src = random_grid(5, 4, 9);
        let mut dst = vec![0.0; 20];
        box_blur(&src, &mut dst, 5, 4, 0, 3).unwrap();
        for (d, s) in dst.iter().zip(&src) {
            assert_eq!(*d, 3.0 * s);
        }
    }

    #[test]
    fn test_uniform_field_any_radius() {
        let c = 0.375;
        let src = vec![c; 12 * 9];
        for radius in [1, 2, 5, 11, 40] {
            let mut dst = vec![0.0; src.len()];
            box_blur(&src, &mut dst, 12, 9, radius, 1).unwrap();
            for v in &dst {
                assert_relative_eq!(*v, c, max_relative = 1e-6);
            }
        }
    }

    #[test]
    fn test_uniform_field_weighted() {
        let src = vec![0.25; 10 * 10];
        let mut dst = vec![0.0; 100];
        box_blur(&src, &mut dst, 10, 10, 3, 2).unwrap();
        for v in &dst {
            assert_relative_eq!(*v, 0.5, max_relative = 1e-6);
        }
    }

    #[test]
    fn test_edge_span_on_single_row() {
        // With all-ones input the output is span / span, so instead blur a
        // ramp and check the first sample against the truncated mean.
        let n = 10;
        let ramp: Vec<f32> = (0..n).map(|i| i as f32).collect();
        for r in [1usize, 3, 9, 25] {
            let mut dst = vec![0.0; n];
            box_blur(&ramp, &mut dst, n, 1, r, 1).unwrap();
            let span = (r + 1).min(n);
            let expected: f32 = ramp[..span].iter().sum::<f32>() / span as f32;
            assert_relative_eq!(dst[0], expected, max_relative = 1e-6);
        }
    }

    #[test]
    fn test_single_row_matches_reference() {
        let n = 23;
        let src = random_grid(n, 1, 5);
        let ones = vec![1.0; n];
        for r in [1usize, 2, 4, 30] {
            let mut dst = vec![0.0; n];
            box_blur(&src, &mut dst, n, 1, r, 1).unwrap();
            let expected = reference_blur(&src, n, 1, r, 1);
            for (a, b) in dst.iter().zip(&expected) {
                assert_relative_eq!(*a, *b, epsilon = 1e-5);
            }

            let mut flat = vec![0.0; n];
            box_blur(&ones, &mut flat, n, 1, r, 1).unwrap();
            assert!(flat.iter().all(|v| (v - 1.0).abs() < 1e-6));
        }
    }

    #[test]
    fn test_separable_matches_direct_5x5() {
        #[rustfmt::skip]
        let src = vec![
            1.0, 2.0, 3.0, 4.0, 5.0,
            6.0, 7.0, 8.0, 9.0, 10.0,
            11.0, 12.0, 13.0, 14.0, 15.0,
            16.0, 17.0, 18.0, 19.0, 20.0,
            21.0, 22.0, 23.0, 24.0, 25.0,
        ];
        let mut dst = vec![0.0; 25];
        box_blur(&src, &mut dst, 5, 5, 1, 1).unwrap();

        // Corner: mean of {1, 2, 6, 7}.
        assert_relative_eq!(dst[0], 4.0, epsilon = 1e-5);
        // Top edge: mean of {1, 2, 3, 6, 7, 8}.
        assert_relative_eq!(dst[1], 4.5, epsilon = 1e-5);
        // Interior: mean of the full 3x3 window around 13.
        assert_relative_eq!(dst[12], 13.0, epsilon = 1e-5);
        // Bottom-right corner: mean of {19, 20, 24, 25}.
        assert_relative_eq!(dst[24], 22.0, epsilon = 1e-5);

        let expected = reference_blur(&src, 5, 5, 1, 1);
        for (a, b) in dst.iter().zip(&expected) {
            assert_relative_eq!(*a, *b, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_random_grid_matches_reference() {
        let (w, h) = (19, 13);
        let src = random_grid(w, h, 21);
        for r in [1usize, 2, 6, 12, 50] {
            let mut dst = vec![0.0; w * h];
            box_blur(&src, &mut dst, w, h, r, 1).unwrap();
            let expected = reference_blur(&src, w, h, r, 1);
            for (a, b) in dst.iter().zip(&expected) {
                assert_relative_eq!(*a, *b, epsilon = 1e-4);
            }
        }
    }

    #[test]
    fn test_radius_beyond_image_is_global_mean() {
        let src = random_grid(6, 4, 2);
        let mean = src.iter().sum::<f32>() / src.len() as f32;
        let mut dst = vec![0.0; src.len()];
        box_blur(&src, &mut dst, 6, 4, 100, 1).unwrap();
        for v in &dst {
            assert_relative_eq!(*v, mean, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_buffer_size_checked() {
        let src = vec![0.0; 12];
        let mut dst = vec![0.0; 11];
        let err = box_blur(&src, &mut dst, 4, 3, 1, 1).unwrap_err();
        assert!(matches!(
            err,
            TuringError::BufferSize {
                expected: 12,
                got: 11
            }
        ));
    }

    #[test]
    fn test_box_blur_op() {
        let field = Field::from_vec(3, 1, vec![0.0, 3.0, 0.0]).unwrap();
        let blurred = BoxBlur::new(1).apply(&field);
        assert_relative_eq!(blurred.get(0, 0), 1.5);
        assert_relative_eq!(blurred.get(1, 0), 1.0);
        assert_eq!(BoxBlur::new(2).with_weight(4).weight, 4);
    }
}
