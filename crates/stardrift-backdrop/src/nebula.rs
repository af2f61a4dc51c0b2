//! Slowly wobbling radial glow blobs painted behind the stars.

use std::f32::consts::TAU;

use glam::Vec2;
use stardrift_config::NebulaConfig;
use tracing::debug;

use crate::canvas::{Canvas, GradientStop, RadialGradient};
use crate::color::Color;
use crate::random::RandomSource;

/// Vertical wobble runs slower than horizontal, tracing a Lissajous curve.
const VERTICAL_FREQUENCY: f32 = 0.7;

/// One ambient glow source.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NebulaPoint {
    /// Fixed anchor; the drawn center orbits around it.
    pub anchor: Vec2,
    pub radius: f32,
    pub hue: f32,
    /// Phase advance per frame.
    pub drift: f32,
    pub phase: f32,
}

impl NebulaPoint {
    /// Drawn center for the current phase, given `(horizontal, vertical)` amplitudes.
    pub fn position(&self, wobble: (f32, f32)) -> Vec2 {
        self.anchor
            + Vec2::new(
                self.phase.sin() * wobble.0,
                (self.phase * VERTICAL_FREQUENCY).cos() * wobble.1,
            )
    }
}

#[derive(Clone, Debug)]
pub struct NebulaField {
    config: NebulaConfig,
    points: Vec<NebulaPoint>,
}

impl NebulaField {
    pub fn new(config: NebulaConfig) -> Self {
        Self {
            config,
            points: Vec::new(),
        }
    }

    /// Replace every blob with freshly sampled ones for a `width` x `height` surface.
    pub fn generate(&mut self, width: f32, height: f32, rng: &mut dyn RandomSource) {
        self.points = (0..self.config.count)
            .map(|_| NebulaPoint {
                anchor: Vec2::new(rng.next_f32() * width, rng.next_f32() * height),
                radius: rng.between(self.config.radius),
                hue: rng.between(self.config.hue),
                drift: rng.between(self.config.drift),
                phase: rng.next_f32() * TAU,
            })
            .collect();
        debug!(count = self.points.len(), "Generated nebula field");
    }

    pub fn points(&self) -> &[NebulaPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Advance every blob's phase and paint it. Returns the number drawn.
    pub fn draw<C: Canvas + ?Sized>(&mut self, canvas: &mut C) -> usize {
        for point in &mut self.points {
            point.phase += point.drift;
            canvas.fill_radial_gradient(&RadialGradient {
                center: point.position(self.config.wobble),
                radius: point.radius,
                stops: [
                    GradientStop::new(
                        0.0,
                        Color::hsla(point.hue, 0.7, 0.3, self.config.core_alpha),
                    ),
                    GradientStop::new(0.5, Color::hsla(point.hue, 0.6, 0.2, self.config.mid_alpha)),
                    GradientStop::new(1.0, Color::TRANSPARENT),
                ],
            });
        }
        self.points.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{ChaChaRandom, FixedRandom};
    use crate::recording::{DrawCommand, RecordingCanvas};

    #[test]
    fn test_generate_five_blobs_in_range() {
        let mut field = NebulaField::new(NebulaConfig::default());
        field.generate(1920.0, 1080.0, &mut ChaChaRandom::seeded(5));
        assert_eq!(field.len(), 5);
        for p in field.points() {
            assert!((200.0..=500.0).contains(&p.radius));
            assert!((220.0..=300.0).contains(&p.hue));
            assert!((0.0005..=0.002).contains(&p.drift));
        }
    }

    #[test]
    fn test_position_follows_phase() {
        let point = NebulaPoint {
            anchor: Vec2::new(100.0, 100.0),
            radius: 300.0,
            hue: 250.0,
            drift: 0.001,
            phase: 0.0,
        };
        // sin(0) = 0, cos(0) = 1.
        assert_eq!(point.position((60.0, 40.0)), Vec2::new(100.0, 140.0));
    }

    #[test]
    fn test_draw_advances_phase_not_anchor() {
        let mut field = NebulaField::new(NebulaConfig::default());
        field.generate(800.0, 600.0, &mut FixedRandom::new(0.5));
        let before = field.points()[0];
        let mut canvas = RecordingCanvas::new(800, 600);
        assert_eq!(field.draw(&mut canvas), 5);
        let after = field.points()[0];
        assert_eq!(after.anchor, before.anchor);
        assert_eq!(after.radius, before.radius);
        assert!((after.phase - (before.phase + before.drift)).abs() < 1e-6);
    }

    #[test]
    fn test_gradient_fades_to_transparent() {
        let mut field = NebulaField::new(NebulaConfig::default());
        field.generate(800.0, 600.0, &mut FixedRandom::new(0.5));
        let mut canvas = RecordingCanvas::new(800, 600);
        field.draw(&mut canvas);
        assert_eq!(canvas.gradient_count(), 5);
        let Some(DrawCommand::RadialGradient(gradient)) = canvas.commands().first() else {
            panic!("expected a radial gradient");
        };
        assert!((gradient.stops[0].color.a - 0.025).abs() < 1e-6);
        assert!((gradient.stops[1].color.a - 0.012).abs() < 1e-6);
        assert_eq!(gradient.stops[2].color, Color::TRANSPARENT);
    }
}
