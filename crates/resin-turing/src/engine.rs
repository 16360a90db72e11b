//! The multi-scale pattern engine.
//!
//! Every step blurs the field twice per scale (activator and inhibitor),
//! picks for each pixel the scale whose activator and inhibitor are closest,
//! moves the pixel by that scale's increment in the direction of its
//! variation, and renormalizes the field to `[0, 1]`.

use rand::Rng;
use tracing::{debug, trace, warn};

use crate::blur::blur_unchecked;
use crate::error::Result;
use crate::field::{Field, min_max};
use crate::scale::{Scale, validate_scales};

/// Summary of one update.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StepReport {
    /// Number of enabled scales that took part.
    pub active_scales: usize,
    /// Pixels won by each scale, indexed like the slice passed in.
    pub wins: Vec<usize>,
    /// Field minimum and maximum after the increments, before normalizing.
    /// `None` when the step was a no-op.
    pub range: Option<(f32, f32)>,
}

impl StepReport {
    /// Whether the step left the field untouched.
    pub fn is_noop(&self) -> bool {
        self.active_scales == 0
    }
}

/// Per-pixel buffers reused across steps.
#[derive(Clone)]
struct Scratch {
    activator: Vec<f32>,
    inhibitor: Vec<f32>,
    activator_pass: Vec<f32>,
    inhibitor_pass: Vec<f32>,
    best: Vec<f32>,
}

impl Scratch {
    fn new(len: usize) -> Self {
        Self {
            activator: vec![0.0; len],
            inhibitor: vec![0.0; len],
            activator_pass: vec![0.0; len],
            inhibitor_pass: vec![0.0; len],
            best: vec![0.0; len],
        }
    }
}

/// Multi-scale Turing pattern generator.
///
/// The engine owns the evolving [`Field`]. Construction fills it with
/// uniform noise, so an engine is always ready to step.
///
/// Ties between scales with equal `|activator - inhibitor|` at a pixel are
/// resolved in favour of the scale that comes first in the slice.
#[derive(Clone)]
pub struct PatternEngine {
    field: Field,
    scratch: Scratch,
    /// Winning scale index per pixel from the last update.
    winners: Vec<usize>,
}

impl std::fmt::Debug for PatternEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PatternEngine")
            .field("width", &self.field.width())
            .field("height", &self.field.height())
            .finish()
    }
}

impl PatternEngine {
    /// Creates an engine with a noise field from the thread-local generator.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        Self::with_rng(width, height, &mut rand::rng())
    }

    /// Creates an engine with a noise field drawn from `rng`.
    pub fn with_rng<R: Rng + ?Sized>(width: usize, height: usize, rng: &mut R) -> Result<Self> {
        Ok(Self::from_field(Field::random(width, height, rng)?))
    }

    /// Adopts an existing field as the current pattern.
    pub fn from_field(field: Field) -> Self {
        let len = field.len();
        Self {
            field,
            scratch: Scratch::new(len),
            winners: vec![0; len],
        }
    }

    /// Returns the width of the pattern.
    pub fn width(&self) -> usize {
        self.field.width()
    }

    /// Returns the height of the pattern.
    pub fn height(&self) -> usize {
        self.field.height()
    }

    /// The current pattern.
    pub fn field(&self) -> &Field {
        &self.field
    }

    /// The current pattern as a flat row-major slice in `[0, 1]`.
    pub fn as_slice(&self) -> &[f32] {
        self.field.as_slice()
    }

    /// Winning scale index per pixel from the last update.
    pub fn winners(&self) -> &[usize] {
        &self.winners
    }

    /// Replaces the pattern with fresh noise from the thread-local generator.
    pub fn randomize(&mut self) {
        self.field.randomize(&mut rand::rng());
    }

    /// Replaces the pattern with fresh noise from `rng`.
    pub fn randomize_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.field.randomize(rng);
    }

    /// Rescales the pattern onto `[0, 1]`.
    ///
    /// A flat pattern collapses to [`Field::MIDPOINT`]; returns `false` in
    /// that case.
    pub fn normalize(&mut self) -> bool {
        let spread = self.field.normalize();
        if !spread {
            warn!("flat pattern collapsed to the midpoint");
        }
        spread
    }

    /// Advances the pattern by one step.
    ///
    /// Invalid scales are rejected before anything is modified. With no
    /// enabled scale the step is a no-op.
    pub fn step(&mut self, scales: &[Scale]) -> Result<StepReport> {
        let report = self.nudge(scales)?;
        if !report.is_noop() {
            self.normalize();
        }
        Ok(report)
    }

    /// Runs `count` steps with the same scales.
    pub fn steps(&mut self, scales: &[Scale], count: usize) -> Result<()> {
        validate_scales(scales)?;
        for _ in 0..count {
            self.step(scales)?;
        }
        Ok(())
    }

    /// Applies one multi-scale update without renormalizing.
    ///
    /// Each pixel moves by exactly the increment of its winning scale: up if
    /// that scale's activator exceeds its inhibitor, down otherwise.
    pub fn nudge(&mut self, scales: &[Scale]) -> Result<StepReport> {
        validate_scales(scales)?;

        let mut report = StepReport {
            active_scales: 0,
            wins: vec![0; scales.len()],
            range: None,
        };

        let Self {
            field,
            scratch,
            winners,
        } = self;
        let (width, height) = field.dimensions();

        for (index, scale) in scales.iter().enumerate().filter(|(_, s)| s.enabled) {
            let first = report.active_scales == 0;
            report.active_scales += 1;

            blur_pair(field.as_slice(), scratch, width, height, scale);
            trace!(
                index,
                activator_radius = scale.activator_radius,
                inhibitor_radius = scale.inhibitor_radius,
                "blurred scale"
            );

            let Scratch {
                activator,
                inhibitor,
                best,
                ..
            } = &mut *scratch;
            for (i, (a, h)) in activator.iter().zip(inhibitor.iter()).enumerate() {
                let variation = a - h;
                if first || variation.abs() < best[i].abs() {
                    best[i] = variation;
                    winners[i] = index;
                }
            }
        }

        if report.active_scales == 0 {
            return Ok(report);
        }

        for ((sample, &variation), &winner) in field
            .as_mut_slice()
            .iter_mut()
            .zip(&scratch.best)
            .zip(winners.iter())
        {
            let increment = scales[winner].increment;
            if variation > 0.0 {
                *sample += increment;
            } else {
                *sample -= increment;
            }
            report.wins[winner] += 1;
        }

        report.range = min_max(field.as_slice());
        if let Some((min, max)) = report.range {
            debug!(active = report.active_scales, min, max, "pattern update");
        }
        Ok(report)
    }
}

/// Computes the activator and inhibitor blurs of `source` for one scale.
///
/// The two blurs read the same source and write disjoint buffers, so with the
/// `parallel` feature they run on two rayon workers.
fn blur_pair(source: &[f32], scratch: &mut Scratch, width: usize, height: usize, scale: &Scale) {
    let Scratch {
        activator,
        inhibitor,
        activator_pass,
        inhibitor_pass,
        ..
    } = scratch;

    let run = |pass: &mut [f32], out: &mut [f32], radius: usize| {
        blur_unchecked(source, pass, out, width, height, radius, scale.weight);
        if let Some(symmetry) = scale.symmetry {
            symmetry.apply(out, width, height);
        }
    };

    #[cfg(feature = "parallel")]
    rayon::join(
        || run(activator_pass, activator, scale.activator_radius),
        || run(inhibitor_pass, inhibitor, scale.inhibitor_radius),
    );

    #[cfg(not(feature = "parallel"))]
    {
        run(activator_pass, activator, scale.activator_radius);
        run(inhibitor_pass, inhibitor, scale.inhibitor_radius);
    }
}
