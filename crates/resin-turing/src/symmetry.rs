//! Symmetry imposed on activator/inhibitor buffers.
//!
//! Each variant partitions the pixels into small groups of symmetric
//! positions and replaces every member of a group with the group mean.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Result, TuringError};
use crate::field::Field;

/// Symmetry of a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Symmetry {
    /// Order 2: 180° rotation about the image centre.
    Point,
    /// Order 4: horizontal plus vertical mirroring.
    Mirror,
}

impl Symmetry {
    /// Maps a symmetry order to a variant. Only 2 and 4 are supported.
    pub fn from_order(order: u32) -> Result<Self> {
        match order {
            2 => Ok(Symmetry::Point),
            4 => Ok(Symmetry::Mirror),
            other => Err(TuringError::UnsupportedSymmetry(other)),
        }
    }

    /// Number of pixels in each symmetric group.
    pub fn order(&self) -> u32 {
        match self {
            Symmetry::Point => 2,
            Symmetry::Mirror => 4,
        }
    }

    /// Averages symmetric groups of a row-major `width * height` buffer in place.
    pub fn apply(&self, data: &mut [f32], width: usize, height: usize) {
        debug_assert_eq!(data.len(), width * height);

        match self {
            Symmetry::Point => {
                let len = data.len();
                for i in 0..len / 2 {
                    let j = len - 1 - i;
                    let mean = (data[i] + data[j]) / 2.0;
                    data[i] = mean;
                    data[j] = mean;
                }
            }
            Symmetry::Mirror => {
                for y in 0..height.div_ceil(2) {
                    let yb = height - 1 - y;
                    for x in 0..width.div_ceil(2) {
                        let xb = width - 1 - x;
                        let group = [
                            y * width + x,
                            y * width + xb,
                            yb * width + x,
                            yb * width + xb,
                        ];
                        let mean = group.iter().map(|&i| data[i]).sum::<f32>() / 4.0;
                        for i in group {
                            data[i] = mean;
                        }
                    }
                }
            }
        }
    }

    /// Applies the symmetry to a field.
    pub fn apply_field(&self, field: &mut Field) {
        let (width, height) = field.dimensions();
        self.apply(field.as_mut_slice(), width, height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_from_order() {
        assert_eq!(Symmetry::from_order(2).unwrap(), Symmetry::Point);
        assert_eq!(Symmetry::from_order(4).unwrap(), Symmetry::Mirror);
        for order in [0, 1, 3, 5] {
            assert!(matches!(
                Symmetry::from_order(order),
                Err(TuringError::UnsupportedSymmetry(o)) if o == order
            ));
        }
        assert_eq!(Symmetry::Mirror.order(), 4);
    }

    #[test]
    fn test_point_symmetry_2x2() {
        let mut data = vec![0.0, 1.0, 3.0, 4.0];
        Symmetry::Point.apply(&mut data, 2, 2);
        // 0 pairs with 3, 1 pairs with 2.
        assert_eq!(data, vec![2.0, 2.0, 2.0, 2.0]);

        let mut data = vec![0.0, 1.0, 5.0, 4.0];
        Symmetry::Point.apply(&mut data, 2, 2);
        assert_eq!(data, vec![2.0, 3.0, 3.0, 2.0]);
    }

    #[test]
    fn test_point_symmetry_random() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut field = Field::random(7, 5, &mut rng).unwrap();
        let centre = field.get(3, 2);
        Symmetry::Point.apply_field(&mut field);

        for y in 0..5 {
            for x in 0..7 {
                assert_eq!(field.get(x, y), field.get(6 - x, 4 - y));
            }
        }
        // Odd-sized fields keep the centre pixel.
        assert_eq!(field.get(3, 2), centre);
    }

    #[test]
    fn test_mirror_symmetry() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut field = Field::random(6, 4, &mut rng).unwrap();
        Symmetry::Mirror.apply_field(&mut field);

        for y in 0..4 {
            for x in 0..6 {
                let v = field.get(x, y);
                assert_eq!(v, field.get(5 - x, y));
                assert_eq!(v, field.get(x, 3 - y));
            }
        }
    }

    #[test]
    fn test_mirror_symmetry_odd_size() {
        let mut data = vec![
            0.0, 1.0, 2.0, //
            3.0, 4.0, 5.0, //
            6.0, 7.0, 8.0,
        ];
        Symmetry::Mirror.apply(&mut data, 3, 3);
        assert_eq!(
            data,
            vec![
                4.0, 4.0, 4.0, //
                4.0, 4.0, 4.0, //
                4.0, 4.0, 4.0,
            ]
        );

        let mut data = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        Symmetry::Mirror.apply(&mut data, 3, 2);
        assert_eq!(data, vec![3.5; 6]);
    }

    #[test]
    fn test_symmetry_preserves_unit_interval() {
        let mut rng = StdRng::seed_from_u64(15);
        let mut field = Field::random(9, 9, &mut rng).unwrap();
        Symmetry::Mirror.apply_field(&mut field);
        assert!(field.as_slice().iter().all(|v| (0.0..=1.0).contains(v)));
    }
}
