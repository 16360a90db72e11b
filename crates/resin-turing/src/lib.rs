//! Multi-scale Turing pattern synthesis.
//!
//! Implements Jonathan McCabe's multi-scale activator/inhibitor scheme. A
//! grayscale field starts as uniform noise; on every step each [`Scale`]
//! blurs the field at two radii (activator and inhibitor), every pixel is
//! handed to the scale whose two blurs are closest, and that scale nudges the
//! pixel up or down by its increment. The field is then renormalized to
//! `[0, 1]`, producing textures with structure at every configured size.
//!
//! # Example
//!
//! ```
//! use rhizome_resin_turing::{PatternEngine, ScalePreset};
//!
//! let mut engine = PatternEngine::new(64, 64)?;
//! let scales = ScalePreset::Viewer.scales();
//!
//! for _ in 0..10 {
//!     engine.step(&scales)?;
//! }
//!
//! // Row-major samples in [0, 1], ready for a colormap or encoder.
//! let pixels: &[f32] = engine.as_slice();
//! assert_eq!(pixels.len(), 64 * 64);
//! # Ok::<(), rhizome_resin_turing::TuringError>(())
//! ```

pub mod blur;
pub mod engine;
pub mod error;
pub mod field;
pub mod ops;
pub mod scale;
pub mod schedule;
pub mod symmetry;

pub use blur::{BoxBlur, box_blur, box_blur_with_scratch};
pub use engine::{PatternEngine, StepReport};
pub use error::{Result, ScaleError, TuringError};
pub use field::{Field, min_max};
pub use ops::{Normalize, Randomize, Step};
pub use scale::{Scale, ScalePreset, validate_scales};
pub use schedule::ScaleSchedule;
pub use symmetry::Symmetry;
