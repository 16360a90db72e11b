//! The scalar sample grid evolved by the pattern engine.

use rand::Rng;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::blur::blur_unchecked;
use crate::error::{Result, TuringError};

/// Dense row-major grid of `f32` samples.
///
/// Fields produced by the engine hold values in `[Field::MIN, Field::MAX]`,
/// i.e. `[0, 1]`. The size is fixed at construction and every constructor
/// (deserialization included) rejects non-finite samples.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "FieldRepr"))]
pub struct Field {
    width: usize,
    height: usize,
    data: Vec<f32>,
}

impl Field {
    /// Lower bound of the normalized interval.
    pub const MIN: f32 = 0.0;
    /// Upper bound of the normalized interval.
    pub const MAX: f32 = 1.0;
    /// Value a flat field collapses to when normalized.
    pub const MIDPOINT: f32 = 0.5;

    /// Creates a field with every sample set to `value`.
    pub fn filled(width: usize, height: usize, value: f32) -> Result<Self> {
        let len = checked_len(width, height)?;
        if !value.is_finite() {
            return Err(TuringError::NonFiniteSample { index: 0 });
        }
        Ok(Self {
            width,
            height,
            data: vec![value; len],
        })
    }

    /// Creates a field of zeros.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        Self::filled(width, height, 0.0)
    }

    /// Wraps an existing row-major buffer.
    ///
    /// The buffer must hold `width * height` finite samples.
    pub fn from_vec(width: usize, height: usize, data: Vec<f32>) -> Result<Self> {
        let expected = checked_len(width, height)?;
        if data.len() != expected {
            return Err(TuringError::BufferSize {
                expected,
                got: data.len(),
            });
        }
        if let Some(index) = data.iter().position(|v| !v.is_finite()) {
            return Err(TuringError::NonFiniteSample { index });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Creates a field of independent uniform samples in `[0, 1)`.
    pub fn random<R: Rng + ?Sized>(width: usize, height: usize, rng: &mut R) -> Result<Self> {
        let mut field = Self::new(width, height)?;
        field.randomize(rng);
        Ok(field)
    }

    /// Refills every sample with uniform noise in `[0, 1)`.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for sample in &mut self.data {
            *sample = rng.random::<f32>();
        }
    }

    /// Returns the width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns `(width, height)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Number of samples (`width * height`).
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the field has no samples. The constructors reject zero
    /// dimensions, so this is false for any field that exists.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Gets the sample at `(x, y)`.
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[y * self.width + x]
    }

    /// Sets the sample at `(x, y)`. The value should be finite.
    pub fn set(&mut self, x: usize, y: usize, value: f32) {
        self.data[y * self.width + x] = value;
    }

    /// Samples as a flat row-major slice.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Mutable access to the samples. Written values should be finite.
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Consumes the field and returns its buffer.
    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }

    /// Returns the smallest and largest sample.
    pub fn min_max(&self) -> (f32, f32) {
        // Fields are never empty.
        min_max(&self.data).unwrap_or((0.0, 0.0))
    }

    /// Rescales the samples linearly onto `[0, 1]`.
    ///
    /// The minimum maps to exactly `0.0` and the maximum to exactly `1.0`.
    /// A flat field (or one whose range is not finite) is set to
    /// [`Field::MIDPOINT`] everywhere and `false` is returned.
    pub fn normalize(&mut self) -> bool {
        let (min, max) = self.min_max();
        let range = max - min;

        if !(range > 0.0 && range.is_finite()) {
            self.data.fill(Self::MIDPOINT);
            return false;
        }

        for sample in &mut self.data {
            *sample = (*sample - min) / range;
        }
        true
    }

    /// Returns a box-blurred copy of this field.
    pub fn blurred(&self, radius: usize, weight: u32) -> Field {
        let mut scratch = vec![0.0; self.data.len()];
        let mut out = vec![0.0; self.data.len()];
        blur_unchecked(
            &self.data,
            &mut scratch,
            &mut out,
            self.width,
            self.height,
            radius,
            weight,
        );
        Self {
            width: self.width,
            height: self.height,
            data: out,
        }
    }
}

/// Finds the minimum and maximum of a slice in one pass.
///
/// NaN samples are ignored. Returns `None` for an empty slice.
pub fn min_max(values: &[f32]) -> Option<(f32, f32)> {
    let (first, rest) = values.split_first()?;
    let mut min = *first;
    let mut max = *first;
    for &v in rest {
        if v < min || min.is_nan() {
            min = v;
        }
        if v > max || max.is_nan() {
            max = v;
        }
    }
    Some((min, max))
}

/// Unchecked wire form of [`Field`].
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct FieldRepr {
    width: usize,
    height: usize,
    data: Vec<f32>,
}

#[cfg(feature = "serde")]
impl TryFrom<FieldRepr> for Field {
    type Error = TuringError;

    fn try_from(repr: FieldRepr) -> Result<Self> {
        Field::from_vec(repr.width, repr.height, repr.data)
    }
}

fn checked_len(width: usize, height: usize) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(TuringError::EmptyField { width, height });
    }
    width
        .checked_mul(height)
        .ok_or(TuringError::EmptyField { width, height })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(matches!(
            Field::new(0, 10),
            Err(TuringError::EmptyField {
                width: 0,
                height: 10
            })
        ));
        assert!(Field::new(10, 0).is_err());
    }

    #[test]
    fn test_from_vec_size_mismatch() {
        let err = Field::from_vec(3, 3, vec![0.0; 8]).unwrap_err();
        assert!(matches!(
            err,
            TuringError::BufferSize {
                expected: 9,
                got: 8
            }
        ));
    }

    #[test]
    fn test_random_in_unit_interval() {
        let mut rng = StdRng::seed_from_u64(7);
        let field = Field::random(32, 16, &mut rng).unwrap();
        assert_eq!(field.len(), 32 * 16);
        assert!(field.as_slice().iter().all(|&v| (0.0..1.0).contains(&v)));
    }

    #[test]
    fn test_get_set_row_major() {
        let mut field = Field::new(4, 3).unwrap();
        field.set(3, 1, 2.0);
        assert_eq!(field.get(3, 1), 2.0);
        assert_eq!(field.as_slice()[4 + 3], 2.0);
    }

    #[test]
    fn test_min_max() {
        assert_eq!(min_max(&[]), None);
        assert_eq!(min_max(&[3.0, -1.0, 7.5, 2.0]), Some((-1.0, 7.5)));
        assert_eq!(min_max(&[f32::NAN, 1.0, 2.0]), Some((1.0, 2.0)));
    }

    #[test]
    fn test_normalize_bounds_exact() {
        let mut field = Field::from_vec(2, 2, vec![-3.0, 0.25, 4.0, 1.0]).unwrap();
        assert!(field.normalize());
        assert_eq!(field.min_max(), (0.0, 1.0));
        assert_eq!(field.get(0, 0), 0.0);
        assert_eq!(field.get(0, 1), 1.0);
    }

    #[test]
    fn test_normalize_idempotent() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut field = Field::random(17, 9, &mut rng).unwrap();
        for v in field.as_mut_slice() {
            *v = *v * 3.0 - 1.2;
        }

        field.normalize();
        let once = field.clone();
        field.normalize();

        assert_eq!(field, once);
        assert_eq!(field.min_max(), (0.0, 1.0));
    }

    #[test]
    fn test_normalize_flat_field_collapses_to_midpoint() {
        let mut field = Field::filled(5, 4, 0.3).unwrap();
        assert!(!field.normalize());
        assert!(field.as_slice().iter().all(|&v| v == Field::MIDPOINT));
    }

    #[test]
    fn test_normalize_non_finite_range() {
        let mut field = Field::from_vec(2, 1, vec![f32::MIN, f32::MAX]).unwrap();
        assert!(!field.normalize());
        assert!(field.as_slice().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_non_finite_samples_rejected() {
        let mut data = vec![0.5; 16];
        data[5] = f32::NAN;
        assert!(matches!(
            Field::from_vec(4, 4, data),
            Err(TuringError::NonFiniteSample { index: 5 })
        ));

        let data = vec![0.0, 1.0, f32::INFINITY, f32::NEG_INFINITY];
        assert!(matches!(
            Field::from_vec(2, 2, data),
            Err(TuringError::NonFiniteSample { index: 2 })
        ));

        assert!(matches!(
            Field::filled(3, 3, f32::NAN),
            Err(TuringError::NonFiniteSample { index: 0 })
        ));
    }

    #[test]
    fn test_blurred_matches_box_blur() {
        let mut rng = StdRng::seed_from_u64(21);
        let field = Field::random(9, 6, &mut rng).unwrap();
        let mut expected = vec![0.0; field.len()];
        crate::blur::box_blur(field.as_slice(), &mut expected, 9, 6, 2, 3).unwrap();

        let blurred = field.blurred(2, 3);
        assert_eq!(blurred.dimensions(), (9, 6));
        assert_eq!(blurred.as_slice(), expected.as_slice());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_validates_fields() {
        let field = Field::from_vec(2, 1, vec![0.25, 0.75]).unwrap();
        let json = serde_json::to_string(&field).unwrap();
        assert_eq!(serde_json::from_str::<Field>(&json).unwrap(), field);

        let short = r#"{"width":4,"height":4,"data":[0.1,0.2]}"#;
        assert!(serde_json::from_str::<Field>(short).is_err());

        let empty = r#"{"width":0,"height":3,"data":[]}"#;
        assert!(serde_json::from_str::<Field>(empty).is_err());
    }
}
