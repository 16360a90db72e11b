//! Per-step scale schedules read from CSV text.
//!
//! Every non-comment line describes the scales of one step as a flat list of
//! `activator_radius,inhibitor_radius,increment` triplets:
//!
//! ```text
//! # two scales for the first step, one for the second
//! 100,200,0.05,50,100,0.04
//! 10,20,0.03
//! ```
//!
//! A blank line is a step without scales, which leaves the pattern as is.

use std::path::Path;

use crate::error::{Result, TuringError};
use crate::scale::Scale;

/// Scale sets indexed by step number.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScaleSchedule {
    steps: Vec<Vec<Scale>>,
    repeat_last: bool,
}

impl ScaleSchedule {
    /// A schedule that uses the same scales for every step.
    pub fn constant(scales: Vec<Scale>) -> Self {
        Self {
            steps: vec![scales],
            repeat_last: true,
        }
    }

    /// Builds a schedule from explicit per-step scale sets.
    pub fn from_steps(steps: Vec<Vec<Scale>>) -> Self {
        Self {
            steps,
            repeat_last: false,
        }
    }

    /// Parses CSV text.
    pub fn parse(text: &str) -> Result<Self> {
        let mut steps = Vec::new();
        for (number, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.starts_with('#') {
                continue;
            }
            steps.push(parse_line(line, number + 1)?);
        }
        Ok(Self::from_steps(steps))
    }

    /// Reads and parses a CSV file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Keeps using the last line once the schedule runs out, instead of
    /// producing empty steps.
    pub fn with_repeat_last(mut self, repeat_last: bool) -> Self {
        self.repeat_last = repeat_last;
        self
    }

    /// Number of scheduled steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether no step is scheduled.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Scales for the given step (0-based).
    pub fn get(&self, step: usize) -> &[Scale] {
        match self.steps.get(step) {
            Some(scales) => scales.as_slice(),
            None if self.repeat_last => self.steps.last().map(Vec::as_slice).unwrap_or_default(),
            None => &[],
        }
    }
}

fn parse_line(line: &str, number: usize) -> Result<Vec<Scale>> {
    if line.is_empty() {
        return Ok(Vec::new());
    }

    let mut cells: Vec<&str> = line.split(',').map(str::trim).collect();
    if cells.last() == Some(&"") {
        cells.pop();
    }
    if cells.len() % 3 != 0 {
        return Err(schedule_error(
            number,
            format!("expected triplets of values, got {} cells", cells.len()),
        ));
    }

    cells
        .chunks_exact(3)
        .map(|cell| {
            let activator = parse_cell::<usize>(cell[0], "activator radius", number)?;
            let inhibitor = parse_cell::<usize>(cell[1], "inhibitor radius", number)?;
            let increment = parse_cell::<f32>(cell[2], "increment", number)?;
            let scale = Scale::new(activator, inhibitor, increment);
            scale
                .validate()
                .map_err(|e| schedule_error(number, e.to_string()))?;
            Ok(scale)
        })
        .collect()
}

fn parse_cell<T: std::str::FromStr>(cell: &str, what: &str, number: usize) -> Result<T> {
    cell.parse()
        .map_err(|_| schedule_error(number, format!("invalid {what} `{cell}`")))
}

fn schedule_error(line: usize, message: String) -> TuringError {
    TuringError::Schedule { line, message }
}
