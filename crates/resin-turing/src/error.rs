//! Error types for resin-turing.

use thiserror::Error;

/// Why a single [`Scale`](crate::Scale) was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ScaleError {
    /// A blur radius exceeds [`Scale::MAX_RADIUS`](crate::Scale::MAX_RADIUS).
    #[error("radius {0} exceeds the supported maximum")]
    RadiusTooLarge(usize),

    /// The increment is zero, negative or not finite.
    #[error("increment must be positive and finite, got {0}")]
    InvalidIncrement(f32),
}

/// Errors that can occur while building or evolving a pattern.
#[derive(Debug, Error)]
pub enum TuringError {
    /// Width or height is zero.
    #[error("field dimensions must be non-zero, got {width}x{height}")]
    EmptyField {
        /// Requested width.
        width: usize,
        /// Requested height.
        height: usize,
    },

    /// A buffer does not hold `width * height` samples.
    #[error("buffer holds {got} samples, expected {expected}")]
    BufferSize {
        /// `width * height`.
        expected: usize,
        /// Actual buffer length.
        got: usize,
    },

    /// A sample handed to a field is NaN or infinite.
    #[error("sample {index} is not finite")]
    NonFiniteSample {
        /// Row-major index of the first offending sample.
        index: usize,
    },

    /// A scale in the collection passed to a step is invalid.
    #[error("scale {index} is invalid: {source}")]
    InvalidScale {
        /// Position of the scale in the collection.
        index: usize,
        /// What is wrong with it.
        #[source]
        source: ScaleError,
    },

    /// Only orders 2 and 4 are implemented.
    #[error("unsupported symmetry order {0} (expected 2 or 4)")]
    UnsupportedSymmetry(u32),

    /// Malformed scale schedule.
    #[error("schedule line {line}: {message}")]
    Schedule {
        /// 1-based line number.
        line: usize,
        /// Description of the problem.
        message: String,
    },

    /// I/O error reading a schedule.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TuringError>;
