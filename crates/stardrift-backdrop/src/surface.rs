//! The drawable area and its pixel dimensions.

use glam::Vec2;

use crate::canvas::Canvas;

/// Minimum surface dimension (prevents zero-size surfaces).
pub const MIN_SURFACE_DIMENSION: u32 = 1;

/// Owns the canvas the backdrop paints into.
///
/// Dimensions are always the canvas dimensions and never drop below
/// [`MIN_SURFACE_DIMENSION`].
pub struct Surface<C> {
    canvas: C,
}

impl<C: Canvas> Surface<C> {
    /// Wrap a canvas, clamping zero dimensions up to 1×1.
    pub fn new(mut canvas: C) -> Self {
        if canvas.width() < MIN_SURFACE_DIMENSION || canvas.height() < MIN_SURFACE_DIMENSION {
            let (w, h) = clamp_dimensions(canvas.width(), canvas.height());
            canvas.resize(w, h);
        }
        Self { canvas }
    }

    /// Apply a viewport resize.
    pub fn resize(&mut self, width: u32, height: u32) {
        let (w, h) = clamp_dimensions(width, height);
        self.canvas.resize(w, h);
    }

    /// Width in pixels as a float, for simulation math.
    pub fn width(&self) -> f32 {
        self.canvas.width() as f32
    }

    /// Height in pixels as a float, for simulation math.
    pub fn height(&self) -> f32 {
        self.canvas.height() as f32
    }

    /// Pixel dimensions.
    pub fn size(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    /// Dimensions as a vector. Half of it is the parallax center.
    pub fn extent(&self) -> Vec2 {
        Vec2::new(self.width(), self.height())
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut C {
        &mut self.canvas
    }
}

fn clamp_dimensions(width: u32, height: u32) -> (u32, u32) {
    (
        width.max(MIN_SURFACE_DIMENSION),
        height.max(MIN_SURFACE_DIMENSION),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::RecordingCanvas;

    #[test]
    fn test_reports_canvas_dimensions() {
        let surface = Surface::new(RecordingCanvas::new(1920, 1080));
        assert_eq!(surface.size(), (1920, 1080));
        assert_eq!(surface.extent(), Vec2::new(1920.0, 1080.0));
    }

    #[test]
    fn test_resize_updates_canvas() {
        let mut surface = Surface::new(RecordingCanvas::new(800, 600));
        surface.resize(1024, 768);
        assert_eq!(surface.size(), (1024, 768));
        assert_eq!(surface.canvas().width(), 1024);
    }

    #[test]
    fn test_zero_dimensions_clamped_to_one() {
        let mut surface = Surface::new(RecordingCanvas::new(0, 0));
        assert_eq!(surface.size(), (1, 1));
        surface.resize(0, 500);
        assert_eq!(surface.size(), (1, 500));
    }
}
