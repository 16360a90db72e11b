//! Colormaps and image export for Turing patterns.
//!
//! Turns a [`Field`](rhizome_resin_turing::Field) into grayscale or
//! palette-mapped images and writes PNG files, numbered PNG sequences and
//! streamed animated GIFs.
//!
//! ```no_run
//! use rhizome_resin_turing::{PatternEngine, ScalePreset};
//! use rhizome_resin_turing_image::{Colormap, GifRecorder, Palette, export_png};
//!
//! let mut engine = PatternEngine::new(128, 128)?;
//! let scales = ScalePreset::Viewer.scales();
//! let mut gif = GifRecorder::create("pattern.gif", Colormap::new(Palette::Lava), 50)?;
//!
//! for _ in 0..40 {
//!     engine.step(&scales)?;
//!     gif.push(engine.field())?;
//! }
//! gif.finish();
//! export_png(engine.field(), None, "pattern.png")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod colormap;
pub mod export;

pub use colormap::{COLORMAP_DEPTH, Colormap, Palette};
pub use export::{
    ExportError, GifRecorder, Result, export_image_sequence, export_png, frame_file_name,
    to_luma, to_rgba,
};
