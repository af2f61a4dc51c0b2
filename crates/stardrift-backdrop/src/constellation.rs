//! Faint lines between nearby bright stars around the pointer.
//!
//! A stateless per-frame query: pick the stars in the linkable layers that
//! sit within range of the pointer, then join every pair closer than the link
//! distance. The pair pass is quadratic in the size of that filtered set,
//! which is bounded by the star counts of the linkable layers.

use glam::Vec2;
use stardrift_config::ConstellationConfig;

use crate::canvas::{Canvas, Paint};
use crate::color::Color;
use crate::stars::Star;

/// One line to draw between two stars.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConstellationLink {
    pub from: Vec2,
    pub to: Vec2,
    pub distance: f32,
    pub opacity: f32,
}

#[derive(Clone, Debug, Default)]
pub struct ConstellationLinker {
    config: ConstellationConfig,
}

impl ConstellationLinker {
    pub fn new(config: ConstellationConfig) -> Self {
        Self { config }
    }

    /// Line opacity for two stars `distance` apart.
    pub fn link_opacity(&self, distance: f32) -> f32 {
        (1.0 - distance / self.config.link_distance) * self.config.max_opacity
    }

    /// Every link for the current frame. Empty when the pointer is absent.
    ///
    /// Distances use the stars' unshifted positions.
    pub fn links(&self, stars: &[Star], pointer: Option<Vec2>) -> Vec<ConstellationLink> {
        let Some(pointer) = pointer else {
            return Vec::new();
        };

        let nearby: Vec<Vec2> = stars
            .iter()
            .filter(|s| s.layer >= self.config.min_layer)
            .map(|s| s.position)
            .filter(|p| p.distance(pointer) < self.config.pointer_radius)
            .collect();

        let mut links = Vec::new();
        for (i, &from) in nearby.iter().enumerate() {
            for &to in &nearby[i + 1..] {
                let distance = from.distance(to);
                if distance < self.config.link_distance {
                    links.push(ConstellationLink {
                        from,
                        to,
                        distance,
                        opacity: self.link_opacity(distance),
                    });
                }
            }
        }
        links
    }

    /// Draw every link for the current frame. Returns the number drawn.
    pub fn draw<C: Canvas + ?Sized>(
        &self,
        stars: &[Star],
        pointer: Option<Vec2>,
        canvas: &mut C,
    ) -> usize {
        let links = self.links(stars, pointer);
        for link in &links {
            let paint = Paint::Solid(Color::rgb8(255, 255, 255, link.opacity));
            canvas.stroke_line(link.from, link.to, self.config.line_width, &paint);
        }
        links.len()
    }
}
