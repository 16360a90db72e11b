//! Conversion of pattern fields to images, and PNG/GIF output.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, GrayImage, ImageError, Luma, Rgba, RgbaImage};
use rhizome_resin_turing::Field;
use thiserror::Error;
use tracing::debug;

use crate::colormap::Colormap;

/// Errors from writing images.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Filesystem error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Encoder error.
    #[error("image error: {0}")]
    Image(#[from] ImageError),
    /// Field too large for the image encoder.
    #[error("field of {width}x{height} exceeds image limits")]
    TooLarge {
        /// Field width.
        width: usize,
        /// Field height.
        height: usize,
    },
    /// A GIF frame whose size differs from the first frame.
    #[error("frame is {got:?}, expected {expected:?}")]
    FrameSize {
        /// Size of the first frame.
        expected: (u32, u32),
        /// Size of the rejected frame.
        got: (u32, u32),
    },
}

/// Result type for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;

fn image_dimensions(field: &Field) -> Result<(u32, u32)> {
    let (width, height) = field.dimensions();
    match (u32::try_from(width), u32::try_from(height)) {
        (Ok(w), Ok(h)) => Ok((w, h)),
        _ => Err(ExportError::TooLarge { width, height }),
    }
}

fn to_byte(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0) as u8
}

/// Grayscale image with `value * 255` per pixel.
pub fn to_luma(field: &Field) -> Result<GrayImage> {
    let (width, height) = image_dimensions(field)?;
    let mut img = GrayImage::new(width, height);
    for (pixel, &value) in img.pixels_mut().zip(field.as_slice()) {
        *pixel = Luma([to_byte(value)]);
    }
    Ok(img)
}

/// Colour image through a colormap.
pub fn to_rgba(field: &Field, colormap: &Colormap) -> Result<RgbaImage> {
    let (width, height) = image_dimensions(field)?;
    let mut img = RgbaImage::new(width, height);
    for (pixel, &value) in img.pixels_mut().zip(field.as_slice()) {
        *pixel = Rgba(colormap.map(value));
    }
    Ok(img)
}

/// Writes a field as PNG, in grayscale when no colormap is given.
pub fn export_png<P: AsRef<Path>>(
    field: &Field,
    colormap: Option<&Colormap>,
    path: P,
) -> Result<()> {
    let path = path.as_ref();
    match colormap {
        Some(colormap) => to_rgba(field, colormap)?.save(path)?,
        None => to_luma(field)?.save(path)?,
    }
    debug!(path = %path.display(), "wrote png");
    Ok(())
}

/// Exports frames as a numbered image sequence.
///
/// Files are named `{prefix}_{frame:04}.png`.
pub fn export_image_sequence<P: AsRef<Path>>(
    frames: &[Field],
    colormap: Option<&Colormap>,
    directory: P,
    prefix: &str,
) -> Result<()> {
    let dir = directory.as_ref();
    std::fs::create_dir_all(dir)?;

    for (i, frame) in frames.iter().enumerate() {
        export_png(frame, colormap, dir.join(frame_file_name(prefix, i)))?;
    }

    Ok(())
}

/// File name of frame `index` in an image sequence.
pub fn frame_file_name(prefix: &str, index: usize) -> String {
    format!("{}_{:04}.png", prefix, index)
}

/// Streams fields into an animated GIF.
///
/// Frames are encoded as they are pushed, so long runs need no frame buffer.
/// All frames must share the size of the first one.
pub struct GifRecorder<W: Write = BufWriter<File>> {
    encoder: GifEncoder<W>,
    colormap: Colormap,
    delay: Delay,
    size: Option<(u32, u32)>,
    frames: usize,
}

impl GifRecorder {
    /// Creates the output file. The GIF loops forever.
    pub fn create<P: AsRef<Path>>(path: P, colormap: Colormap, delay_ms: u32) -> Result<Self> {
        let file = BufWriter::new(File::create(path)?);
        Self::new(file, colormap, delay_ms)
    }
}

impl<W: Write> GifRecorder<W> {
    /// Wraps a writer. The GIF loops forever.
    pub fn new(writer: W, colormap: Colormap, delay_ms: u32) -> Result<Self> {
        let mut encoder = GifEncoder::new(writer);
        encoder.set_repeat(Repeat::Infinite)?;
        Ok(Self {
            encoder,
            colormap,
            delay: Delay::from_numer_denom_ms(delay_ms, 1),
            size: None,
            frames: 0,
        })
    }

    /// Encodes one frame.
    pub fn push(&mut self, field: &Field) -> Result<()> {
        let size = image_dimensions(field)?;
        let expected = *self.size.get_or_insert(size);
        if size != expected {
            return Err(ExportError::FrameSize {
                expected,
                got: size,
            });
        }

        let img = to_rgba(field, &self.colormap)?;
        self.encoder
            .encode_frame(Frame::from_parts(img, 0, 0, self.delay))?;
        self.frames += 1;
        Ok(())
    }

    /// Number of frames written so far.
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Finishes the GIF and returns the number of frames.
    ///
    /// The trailer is written when the encoder is dropped.
    pub fn finish(self) -> usize {
        debug!(frames = self.frames, "finished gif");
        self.frames
    }
}
