//! Runs a multi-scale Turing pattern and writes it out as PNG or GIF.
//!
//!   `turing-cli --width 256 --height 256 --steps 200 --gif out.gif`
//!   `turing-cli --schedule scales.csv --palette lava --png final.png`
//!   `turing-cli --config run.json --seed 7`
//!
//! Set `RUST_LOG=debug` for per-scale detail.

mod config;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueHint};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rhizome_resin_turing::{Field, PatternEngine, Scale, ScalePreset};
use rhizome_resin_turing_image::{Colormap, GifRecorder, Palette, export_png, frame_file_name};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::RunConfig;

#[derive(Parser, Debug)]
#[command(version, about = "Multi-scale Turing pattern generator")]
pub struct Cli {
    /// JSON run configuration; flags override its values
    #[arg(long, value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,

    /// Pattern width in pixels
    #[arg(long)]
    width: Option<usize>,

    /// Pattern height in pixels
    #[arg(long)]
    height: Option<usize>,

    /// Number of steps to run
    #[arg(long)]
    steps: Option<usize>,

    /// CSV file with one line of `activator,inhibitor,increment` triplets per step
    #[arg(long, value_hint = ValueHint::FilePath)]
    schedule: Option<PathBuf>,

    /// Built-in scale set used when no schedule is given (classic, viewer)
    #[arg(long)]
    preset: Option<ScalePreset>,

    /// Colormap (bw, rainbow, holiday, neon, lava, ice, dawn, toxic)
    #[arg(long)]
    palette: Option<Palette>,

    /// Symmetry order (2 or 4)
    #[arg(long)]
    symmetry: Option<u32>,

    /// Noise seed
    #[arg(long)]
    seed: Option<u64>,

    /// Write an animated GIF
    #[arg(long, value_hint = ValueHint::FilePath)]
    gif: Option<PathBuf>,

    /// Write numbered PNG frames into this directory
    #[arg(long, value_hint = ValueHint::DirPath)]
    frames: Option<PathBuf>,

    /// Write the final pattern as PNG
    #[arg(long, value_hint = ValueHint::FilePath)]
    png: Option<PathBuf>,

    /// GIF frame delay in milliseconds
    #[arg(long)]
    delay: Option<u32>,

    /// Record a frame every N steps
    #[arg(long)]
    every: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).with_target(false).compact().init();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => RunConfig::from_path(path)?,
        None => RunConfig::default(),
    };
    config.apply_cli(&cli);
    config.validate()?;

    run(&config)
}

fn run(config: &RunConfig) -> anyhow::Result<()> {
    let schedule = config.schedule()?;
    let symmetry = config.symmetry()?;
    let seed = config.seed.unwrap_or_else(rand::random);
    let colormap = Colormap::new(config.palette);

    info!(
        width = config.width,
        height = config.height,
        steps = config.steps,
        seed,
        palette = %config.palette,
        "starting run"
    );

    let mut rng = StdRng::seed_from_u64(seed);
    let mut field =
        Field::random(config.width, config.height, &mut rng).context("failed to create pattern")?;
    if let Some(symmetry) = symmetry {
        symmetry.apply_field(&mut field);
    }
    let mut engine = PatternEngine::from_field(field);

    let mut gif = config
        .gif
        .as_ref()
        .map(|path| GifRecorder::create(path, colormap.clone(), config.delay_ms))
        .transpose()
        .context("failed to create gif")?;
    if let Some(dir) = &config.frames {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
    }

    let mut recorded = 0;
    for step in 0..config.steps {
        let scales: Vec<Scale> = schedule
            .get(step)
            .iter()
            .map(|scale| scale.with_symmetry(symmetry))
            .collect();

        let report = engine
            .step(&scales)
            .with_context(|| format!("step {step} failed"))?;
        info!(
            step,
            active = report.active_scales,
            wins = ?report.wins,
            "step"
        );

        if (step + 1) % config.every != 0 {
            continue;
        }
        if let Some(gif) = gif.as_mut() {
            gif.push(engine.field())?;
        }
        if let Some(dir) = &config.frames {
            export_png(
                engine.field(),
                Some(&colormap),
                dir.join(frame_file_name("frame", recorded)),
            )?;
        }
        recorded += 1;
    }

    if let Some(gif) = gif {
        let frames = gif.finish();
        info!(frames, path = ?config.gif, "wrote gif");
    }
    if let Some(path) = &config.png {
        export_png(engine.field(), Some(&colormap), path)?;
        info!(path = %path.display(), "wrote png");
    }

    Ok(())
}
