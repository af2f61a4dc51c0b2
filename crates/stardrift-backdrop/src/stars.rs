//! Layered drifting stars with twinkle, pointer parallax and repulsion.
//!
//! Stars are split into [`LAYER_COUNT`] depth layers. Nearer layers drift
//! faster, render larger and brighter, shift further with the pointer and
//! react to it over a wider radius. All motion is applied per frame.

use std::f32::consts::TAU;

use glam::Vec2;
use stardrift_config::{LAYER_COUNT, StarLayersConfig};
use tracing::debug;

use crate::canvas::{Canvas, Paint};
use crate::color::Color;
use crate::random::RandomSource;

/// Index of the nearest layer, the only one that sparkles.
pub const NEAREST_LAYER: u8 = (LAYER_COUNT - 1) as u8;

/// Extra radius of the glow halo around each star core.
const GLOW_PADDING: f32 = 2.0;

/// One simulated point light.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Star {
    /// Unshifted position in surface space.
    pub position: Vec2,
    pub base_size: f32,
    pub base_opacity: f32,
    /// Downward drift per frame.
    pub speed: f32,
    /// Depth layer, 0 farthest.
    pub layer: u8,
    /// Radians.
    pub twinkle_phase: f32,
    /// Radians per frame.
    pub twinkle_speed: f32,
    /// Degrees.
    pub hue: f32,
}

impl Star {
    /// Twinkle factor in `[0, 1]`.
    pub fn twinkle(&self) -> f32 {
        0.5 + 0.5 * self.twinkle_phase.sin()
    }

    /// Opacity after twinkle, always within `[0.6, 1.0] * base_opacity`.
    pub fn rendered_opacity(&self) -> f32 {
        self.base_opacity * (0.6 + 0.4 * self.twinkle())
    }

    /// Core radius after twinkle.
    pub fn rendered_size(&self) -> f32 {
        self.base_size * (0.8 + 0.2 * self.twinkle())
    }
}

/// Shift applied to a star for the pointer's offset from the surface center.
///
/// An absent pointer sits at the center, so the shift is zero.
pub fn parallax_offset(pointer: Option<Vec2>, center: Vec2, scale: f32) -> Vec2 {
    match pointer {
        Some(pointer) => (pointer - center) * scale,
        None => Vec2::ZERO,
    }
}

/// Outward push away from the pointer for a star drawn at `position`.
///
/// Zero when the pointer is absent, at or beyond `radius`, or exactly on the
/// star (no direction to push along).
pub fn repulsion_offset(position: Vec2, pointer: Option<Vec2>, radius: f32, strength: f32) -> Vec2 {
    let Some(pointer) = pointer else {
        return Vec2::ZERO;
    };
    let delta = position - pointer;
    let dist = delta.length();
    if dist > 0.0 && dist < radius {
        delta / dist * ((1.0 - dist / radius) * strength)
    } else {
        Vec2::ZERO
    }
}

/// Owns every star and advances them once per frame.
#[derive(Clone, Debug)]
pub struct StarLayerSystem {
    config: StarLayersConfig,
    stars: Vec<Star>,
}

impl StarLayerSystem {
    /// An empty system. Call [`generate`](Self::generate) before drawing.
    pub fn new(config: StarLayersConfig) -> Self {
        Self {
            config,
            stars: Vec::new(),
        }
    }

    /// Replace the whole star set for a `width` x `height` surface.
    pub fn generate(&mut self, width: f32, height: f32, rng: &mut dyn RandomSource) {
        let mut stars = Vec::with_capacity(self.config.total_stars());
        for (index, layer) in self.config.layers.iter().enumerate() {
            for _ in 0..layer.count {
                stars.push(Star {
                    position: Vec2::new(rng.next_f32() * width, rng.next_f32() * height),
                    base_size: rng.between(layer.size),
                    base_opacity: rng.between(layer.opacity),
                    speed: layer.speed,
                    layer: index as u8,
                    twinkle_phase: rng.next_f32() * TAU,
                    twinkle_speed: rng.between(self.config.twinkle_speed),
                    hue: rng.between(self.config.hue),
                });
            }
        }
        debug!(count = stars.len(), width, height, "Generated star layers");
        self.stars = stars;
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    /// Mutable access, for hosts that script particular star placements.
    pub fn stars_mut(&mut self) -> &mut [Star] {
        &mut self.stars
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    pub fn config(&self) -> &StarLayersConfig {
        &self.config
    }

    /// Number of stars in `layer`.
    pub fn layer_len(&self, layer: u8) -> usize {
        self.stars.iter().filter(|s| s.layer == layer).count()
    }

    /// Advance every star by one frame and draw it. Returns the number drawn.
    pub fn update_and_draw<C: Canvas + ?Sized>(
        &mut self,
        pointer: Option<Vec2>,
        size: Vec2,
        rng: &mut dyn RandomSource,
        canvas: &mut C,
    ) -> usize {
        let center = size / 2.0;
        let margin = self.config.wrap_margin;

        for star in &mut self.stars {
            star.position.y += star.speed;
            if star.position.y > size.y + margin {
                star.position.y = -margin;
                star.position.x = rng.next_f32() * size.x;
            }
            star.twinkle_phase += star.twinkle_speed;

            let layer = &self.config.layers[usize::from(star.layer).min(LAYER_COUNT - 1)];
            let shifted = star.position + parallax_offset(pointer, center, layer.parallax);
            let at = shifted
                + repulsion_offset(
                    shifted,
                    pointer,
                    layer.repulsion_radius,
                    self.config.repulsion_strength,
                );

            draw_star(canvas, star, at, self.config.sparkle_threshold);
        }

        self.stars.len()
    }
}

fn draw_star<C: Canvas + ?Sized>(canvas: &mut C, star: &Star, at: Vec2, sparkle_threshold: f32) {
    let twinkle = star.twinkle();
    let opacity = star.rendered_opacity();
    let size = star.rendered_size();

    canvas.fill_circle(
        at,
        size + GLOW_PADDING,
        Color::hsla(star.hue, 0.6, 0.7, opacity * 0.15),
    );
    canvas.fill_circle(at, size, Color::hsla(star.hue, 0.4, 0.9, opacity));

    if star.layer == NEAREST_LAYER && twinkle > sparkle_threshold {
        let arm = size * 4.0 * twinkle;
        let paint = Paint::Solid(Color::hsla(star.hue, 0.6, 0.8, opacity * 0.3));
        canvas.stroke_line(at - Vec2::X * arm, at + Vec2::X * arm, 0.5, &paint);
        canvas.stroke_line(at - Vec2::Y * arm, at + Vec2::Y * arm, 0.5, &paint);
    }
}
