//! Engine operations as values.
//!
//! Each op takes an engine by reference and returns a modified copy, so
//! pipelines can be described as data and replayed.

use rand::SeedableRng;
use rand::rngs::StdRng;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::engine::PatternEngine;
use crate::error::Result;
use crate::scale::Scale;

/// Advances the pattern by a number of steps.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Step {
    /// Scales used for every step.
    pub scales: Vec<Scale>,
    /// Number of steps.
    pub count: usize,
}

impl Step {
    /// Creates a new step operation.
    pub fn new(scales: Vec<Scale>, count: usize) -> Self {
        Self { scales, count }
    }

    /// Applies this operation to an engine.
    pub fn apply(&self, engine: &PatternEngine) -> Result<PatternEngine> {
        let mut result = engine.clone();
        result.steps(&self.scales, self.count)?;
        Ok(result)
    }
}

/// Replaces the pattern with seeded noise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Randomize {
    /// Seed of the noise generator.
    pub seed: u64,
}

impl Randomize {
    /// Creates a new randomize operation.
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Applies this operation to an engine.
    pub fn apply(&self, engine: &PatternEngine) -> PatternEngine {
        let mut result = engine.clone();
        result.randomize_with(&mut StdRng::seed_from_u64(self.seed));
        result
    }
}

/// Rescales the pattern onto `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Normalize;

impl Normalize {
    /// Applies this operation to an engine.
    pub fn apply(&self, engine: &PatternEngine) -> PatternEngine {
        let mut result = engine.clone();
        result.normalize();
        result
    }
}
