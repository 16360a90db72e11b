//! Run configuration, loaded from JSON and overridden by flags.

use std::path::{Path, PathBuf};

use anyhow::Context;
use rhizome_resin_turing::{ScalePreset, ScaleSchedule, Symmetry};
use rhizome_resin_turing_image::Palette;
use serde::{Deserialize, Serialize};

use crate::Cli;

/// Everything a run needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub width: usize,
    pub height: usize,
    pub steps: usize,
    /// CSV schedule; the preset is used when absent.
    pub schedule: Option<PathBuf>,
    pub preset: ScalePreset,
    pub palette: Palette,
    /// Symmetry order, 2 or 4.
    pub symmetry: Option<u32>,
    /// Noise seed; a random one is drawn and logged when absent.
    pub seed: Option<u64>,
    pub gif: Option<PathBuf>,
    pub frames: Option<PathBuf>,
    pub png: Option<PathBuf>,
    /// GIF frame delay in milliseconds.
    pub delay_ms: u32,
    /// Record a frame every this many steps.
    pub every: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            width: 300,
            height: 300,
            steps: 100,
            schedule: None,
            preset: ScalePreset::default(),
            palette: Palette::default(),
            symmetry: None,
            seed: None,
            gif: None,
            frames: None,
            png: None,
            delay_ms: 50,
            every: 1,
        }
    }
}

impl RunConfig {
    /// Reads a JSON config file.
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("invalid config {}", path.display()))
    }

    /// Parses JSON; missing fields take their defaults.
    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Replaces fields with any values given on the command line.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(width) = cli.width {
            self.width = width;
        }
        if let Some(height) = cli.height {
            self.height = height;
        }
        if let Some(steps) = cli.steps {
            self.steps = steps;
        }
        if let Some(preset) = cli.preset {
            self.preset = preset;
        }
        if let Some(palette) = cli.palette {
            self.palette = palette;
        }
        if let Some(delay) = cli.delay {
            self.delay_ms = delay;
        }
        if let Some(every) = cli.every {
            self.every = every;
        }
        if cli.symmetry.is_some() {
            self.symmetry = cli.symmetry;
        }
        if cli.seed.is_some() {
            self.seed = cli.seed;
        }
        for (flag, field) in [
            (&cli.schedule, &mut self.schedule),
            (&cli.gif, &mut self.gif),
            (&cli.frames, &mut self.frames),
            (&cli.png, &mut self.png),
        ] {
            if flag.is_some() {
                field.clone_from(flag);
            }
        }
    }

    /// Checks values the engine would not catch itself.
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.every > 0, "`every` must be at least 1");
        self.symmetry()?;
        Ok(())
    }

    /// Parsed symmetry option.
    pub fn symmetry(&self) -> anyhow::Result<Option<Symmetry>> {
        self.symmetry
            .map(Symmetry::from_order)
            .transpose()
            .context("invalid symmetry")
    }

    /// Loads the CSV schedule, or repeats the preset forever.
    pub fn schedule(&self) -> anyhow::Result<ScaleSchedule> {
        match &self.schedule {
            Some(path) => ScaleSchedule::from_path(path)
                .with_context(|| format!("failed to load schedule {}", path.display())),
            None => Ok(ScaleSchedule::constant(self.preset.scales())),
        }
    }
}
