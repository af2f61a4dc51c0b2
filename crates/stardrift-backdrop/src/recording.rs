//! A canvas that records draw calls instead of rasterizing them.

use glam::Vec2;

use crate::canvas::{Canvas, Paint, RadialGradient};
use crate::color::Color;

/// One recorded canvas operation.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear,
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    Line {
        from: Vec2,
        to: Vec2,
        width: f32,
        paint: Paint,
    },
    RadialGradient(RadialGradient),
}

/// Keeps the draw commands issued since the last [`Canvas::clear`].
#[derive(Clone, Debug, Default)]
pub struct RecordingCanvas {
    width: u32,
    height: u32,
    commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    /// Commands since the most recent clear, the clear itself included.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn circle_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
            .count()
    }

    pub fn gradient_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::RadialGradient(_)))
            .count()
    }

    /// Lines stroked with a solid color (constellation links and sparkles).
    pub fn solid_lines(&self) -> impl Iterator<Item = (Vec2, Vec2, Color)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Line {
                from,
                to,
                paint: Paint::Solid(color),
                ..
            } => Some((*from, *to, *color)),
            _ => None,
        })
    }

    /// Lines stroked with a gradient (shooting star trails).
    pub fn gradient_line_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| {
                matches!(
                    c,
                    DrawCommand::Line {
                        paint: Paint::Linear(_),
                        ..
                    }
                )
            })
            .count()
    }
}

impl Canvas for RecordingCanvas {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.commands.clear();
    }

    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, paint: &Paint) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            width,
            paint: *paint,
        });
    }

    fn fill_radial_gradient(&mut self, gradient: &RadialGradient) {
        self.commands.push(DrawCommand::RadialGradient(*gradient));
    }
}
