//! PNG export with embedded view metadata (tEXt chunks).

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use tracing::debug;

use mandelzoom_core::{Camera, FrameDescriptor};

use crate::buffer::RenderBuffer;
use crate::error::RenderError;

/// Metadata to embed in an exported PNG as tEXt chunks.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportMetadata {
    pub precision: String,
    pub center_re: String,
    pub center_im: String,
    pub zoom: String,
    pub max_iterations: u32,
    pub iteration_limit: u32,
    pub color_theme: String,
    pub width: u32,
    pub height: u32,
}

impl ExportMetadata {
    /// Describe the view a descriptor shows. Extended centers keep both limbs.
    pub fn from_descriptor(d: &FrameDescriptor) -> Self {
        let (center_re, center_im) = match d.camera() {
            Camera::Native { offset, .. } => (offset.re.to_string(), offset.im.to_string()),
            Camera::Extended { center, .. } => (center.re.to_string(), center.im.to_string()),
        };
        Self {
            precision: d.precision_mode.label().to_string(),
            center_re,
            center_im,
            zoom: format!("{:e}", d.native.zoom),
            max_iterations: d.max_iterations,
            iteration_limit: d.iteration_limit(),
            color_theme: d.color_theme.name().to_string(),
            width: d.width(),
            height: d.height(),
        }
    }

    fn description(&self) -> String {
        format!(
            "Mandelbrot - Center: {} {}i, Zoom: {}, Iterations: {}/{}",
            self.center_re, self.center_im, self.zoom, self.iteration_limit, self.max_iterations,
        )
    }

    fn pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Mandelzoom.Precision", self.precision.clone()),
            ("Mandelzoom.CenterRe", self.center_re.clone()),
            ("Mandelzoom.CenterIm", self.center_im.clone()),
            ("Mandelzoom.Zoom", self.zoom.clone()),
            ("Mandelzoom.MaxIterations", self.max_iterations.to_string()),
            ("Mandelzoom.IterationLimit", self.iteration_limit.to_string()),
            ("Mandelzoom.ColorTheme", self.color_theme.clone()),
            (
                "Mandelzoom.Resolution",
                format!("{}x{}", self.width, self.height),
            ),
        ]
    }
}

/// Write an RGBA buffer as a PNG file with embedded view metadata.
///
/// Uses the `png` crate directly to inject custom tEXt chunks readable by
/// exiftool and most image viewers.
pub fn export_png(buffer: &RenderBuffer, path: &Path, metadata: &ExportMetadata) -> crate::Result<()> {
    if buffer.width == 0 || buffer.height == 0 {
        return Err(RenderError::InvalidDimensions {
            width: buffer.width,
            height: buffer.height,
        });
    }
    if buffer.pixels.len() != buffer.expected_len() {
        return Err(RenderError::BufferSize {
            expected: buffer.expected_len(),
            actual: buffer.pixels.len(),
        });
    }

    let writer = BufWriter::new(File::create(path)?);
    let mut encoder = png::Encoder::new(writer, buffer.width, buffer.height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(png::Compression::Default);

    encoder.add_text_chunk("Software".to_string(), "Mandelzoom".to_string())?;
    encoder.add_text_chunk("Description".to_string(), metadata.description())?;
    for (key, value) in metadata.pairs() {
        encoder.add_text_chunk(key.to_string(), value)?;
    }

    let mut png_writer = encoder.write_header()?;
    png_writer.write_image_data(&buffer.pixels)?;
    png_writer.finish()?;

    debug!(
        "Exported PNG {}x{} to {}",
        buffer.width,
        buffer.height,
        path.display()
    );
    Ok(())
}
