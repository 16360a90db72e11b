//! Scale records: one activator/inhibitor frequency band each.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScaleError, TuringError};
use crate::symmetry::Symmetry;

/// One spatial frequency band of the pattern.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Scale {
    /// Activator blur radius in pixels.
    pub activator_radius: usize,
    /// Inhibitor blur radius in pixels. Usually larger than the activator radius.
    pub inhibitor_radius: usize,
    /// Amount added to or subtracted from a pixel this scale wins.
    pub increment: f32,
    /// Multiplier applied to both blurs.
    pub weight: u32,
    /// Disabled scales are skipped by a step.
    pub enabled: bool,
    /// Optional symmetry imposed on the activator and inhibitor buffers.
    pub symmetry: Option<Symmetry>,
}

impl Default for Scale {
    fn default() -> Self {
        Self {
            activator_radius: 1,
            inhibitor_radius: 2,
            increment: 0.01,
            weight: 1,
            enabled: true,
            symmetry: None,
        }
    }
}

impl Scale {
    /// Largest accepted radius.
    pub const MAX_RADIUS: usize = u32::MAX as usize;

    /// Creates an enabled unit-weight scale.
    pub fn new(activator_radius: usize, inhibitor_radius: usize, increment: f32) -> Self {
        Self {
            activator_radius,
            inhibitor_radius,
            increment,
            ..Default::default()
        }
    }

    /// Sets the blur weight.
    pub fn with_weight(mut self, weight: u32) -> Self {
        self.weight = weight;
        self
    }

    /// Enables or disables the scale.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Sets the symmetry applied to this scale's activator and inhibitor.
    pub fn with_symmetry(mut self, symmetry: Option<Symmetry>) -> Self {
        self.symmetry = symmetry;
        self
    }

    /// Checks radii and increment.
    pub fn validate(&self) -> std::result::Result<(), ScaleError> {
        for radius in [self.activator_radius, self.inhibitor_radius] {
            if radius > Self::MAX_RADIUS {
                return Err(ScaleError::RadiusTooLarge(radius));
            }
        }
        if !(self.increment > 0.0 && self.increment.is_finite()) {
            return Err(ScaleError::InvalidIncrement(self.increment));
        }
        Ok(())
    }
}

/// Validates every scale of a collection, reporting the first failure.
pub fn validate_scales(scales: &[Scale]) -> Result<()> {
    for (index, scale) in scales.iter().enumerate() {
        scale
            .validate()
            .map_err(|source| TuringError::InvalidScale { index, source })?;
    }
    Ok(())
}

/// Built-in scale sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ScalePreset {
    /// Five octaves from 100/200 down to 1/2 pixels; coarse and high contrast.
    #[default]
    Classic,
    /// Five octaves from 50/100 down to 3/6 pixels; suited to small previews.
    Viewer,
}

impl ScalePreset {
    /// Returns the scales of this preset, coarsest first.
    pub fn scales(&self) -> Vec<Scale> {
        let radii: [(usize, usize); 5] = match self {
            ScalePreset::Classic => [(100, 200), (20, 40), (10, 20), (5, 10), (1, 2)],
            ScalePreset::Viewer => [(50, 100), (25, 50), (12, 25), (6, 12), (3, 6)],
        };
        const INCREMENTS: [f32; 5] = [0.05, 0.04, 0.03, 0.02, 0.01];

        radii
            .iter()
            .zip(INCREMENTS)
            .map(|(&(a, i), inc)| Scale::new(a, i, inc))
            .collect()
    }

    /// Lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            ScalePreset::Classic => "classic",
            ScalePreset::Viewer => "viewer",
        }
    }
}

impl std::str::FromStr for ScalePreset {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "classic" => Ok(ScalePreset::Classic),
            "viewer" => Ok(ScalePreset::Viewer),
            other => Err(format!("unknown scale preset `{other}`")),
        }
    }
}
