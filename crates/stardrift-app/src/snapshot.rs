//! Headless rendering: run the backdrop into a [`PixelCanvas`] and save a PNG.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use stardrift_backdrop::{Canvas, Color, PixelCanvas, RenderLoop};
use stardrift_config::Config;
use stardrift_render::DEEP_SPACE;
use tracing::info;

/// Errors from producing a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// Creating or writing the output file failed.
    #[error("snapshot I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// PNG encoding failed.
    #[error("PNG encoding failed: {0}")]
    Encoding(#[from] png::EncodingError),

    /// The loop produced no frame to save.
    #[error("no frame rendered (frames = {0})")]
    NoFrame(u32),
}

/// Opaque background the snapshot is composited over.
pub fn background() -> Color {
    Color::rgba(DEEP_SPACE.r as f32, DEEP_SPACE.g as f32, DEEP_SPACE.b as f32, 1.0)
}

/// Simulate `frames` invocations at the configured window size and return the canvas.
///
/// # Errors
///
/// Returns [`SnapshotError::NoFrame`] when `frames` is zero.
pub fn render_frames(config: &Config, frames: u32) -> Result<PixelCanvas, SnapshotError> {
    let canvas = PixelCanvas::new(config.window.width, config.window.height);
    let mut backdrop = RenderLoop::from_config(Some(canvas), &config.backdrop);
    backdrop.start(&mut || {});
    let report = backdrop
        .tick(frames, &mut || {})
        .ok_or(SnapshotError::NoFrame(frames))?;
    backdrop.stop();

    info!(
        frames,
        stars = report.stars_drawn,
        streaks = report.streaks_drawn,
        "Rendered snapshot frames"
    );

    match backdrop.canvas() {
        Some(canvas) => Ok(canvas.clone()),
        None => Err(SnapshotError::NoFrame(frames)),
    }
}

/// Encode the canvas, composited over [`background`], as an RGBA PNG.
pub fn encode_png<W: Write>(canvas: &PixelCanvas, writer: W) -> Result<(), SnapshotError> {
    let mut encoder = png::Encoder::new(writer, canvas.width(), canvas.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(&canvas.composite_rgba8(background()))?;
    writer.finish()?;
    Ok(())
}

/// Render `frames` invocations and write the final frame to `path`.
pub fn write_snapshot(config: &Config, frames: u32, path: &Path) -> Result<(), SnapshotError> {
    let canvas = render_frames(config, frames)?;
    let file = BufWriter::new(File::create(path)?);
    encode_png(&canvas, file)?;
    info!(path = %path.display(), "Snapshot written");
    Ok(())
}
