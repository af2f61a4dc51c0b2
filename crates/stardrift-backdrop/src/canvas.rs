//! The 2D drawing interface the backdrop paints through.
//!
//! A [`Canvas`] is any raster target that can clear itself, fill circles,
//! stroke line segments with a solid or gradient paint, and fill a radial
//! gradient disc. Coordinates are in surface pixels with the origin at the
//! top-left corner.

use glam::Vec2;

use crate::color::Color;

/// A color at a relative position along a gradient.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    /// Position in `[0, 1]`.
    pub offset: f32,
    pub color: Color,
}

impl GradientStop {
    pub const fn new(offset: f32, color: Color) -> Self {
        Self { offset, color }
    }
}

/// Two-stop gradient along the segment from `start` to `end`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearGradient {
    pub start: Vec2,
    pub end: Vec2,
    pub stops: [GradientStop; 2],
}

/// Three-stop gradient radiating from `center` out to `radius`.
///
/// Pixels at or beyond `radius` are left untouched.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RadialGradient {
    pub center: Vec2,
    pub radius: f32,
    pub stops: [GradientStop; 3],
}

/// How a stroked line is colored.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Paint {
    Solid(Color),
    Linear(LinearGradient),
}

/// A drawable 2D raster surface.
pub trait Canvas {
    /// Width in device pixels.
    fn width(&self) -> u32;

    /// Height in device pixels.
    fn height(&self) -> u32;

    /// Reallocate to new dimensions. Previous content is discarded.
    fn resize(&mut self, width: u32, height: u32);

    /// Reset every pixel to fully transparent.
    fn clear(&mut self);

    /// Fill a soft-edged circle.
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);

    /// Stroke the segment `from`..`to`.
    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, paint: &Paint);

    /// Fill the disc covered by a radial gradient.
    fn fill_radial_gradient(&mut self, gradient: &RadialGradient);
}

/// Sample a sorted stop list at `t`, interpolating premultiplied channels.
///
/// Returns premultiplied `[r, g, b, a]`. Values before the first stop or after
/// the last stop take that stop's color.
pub fn sample_gradient(stops: &[GradientStop], t: f32) -> [f32; 4] {
    let Some(first) = stops.first() else {
        return [0.0; 4];
    };
    if t <= first.offset {
        return first.color.premultiplied();
    }
    for pair in stops.windows(2) {
        let (lo, hi) = (pair[0], pair[1]);
        if t <= hi.offset {
            let span = hi.offset - lo.offset;
            let local = if span > 0.0 { (t - lo.offset) / span } else { 1.0 };
            let a = lo.color.premultiplied();
            let b = hi.color.premultiplied();
            return std::array::from_fn(|i| a[i] + (b[i] - a[i]) * local);
        }
    }
    stops[stops.len() - 1].color.premultiplied()
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);

    #[test]
    fn test_sample_endpoints() {
        let stops = [
            GradientStop::new(0.0, WHITE),
            GradientStop::new(1.0, Color::TRANSPARENT),
        ];
        assert_eq!(sample_gradient(&stops, -1.0), [1.0; 4]);
        assert_eq!(sample_gradient(&stops, 0.0), [1.0; 4]);
        assert_eq!(sample_gradient(&stops, 1.0), [0.0; 4]);
        assert_eq!(sample_gradient(&stops, 2.0), [0.0; 4]);
    }

    #[test]
    fn test_sample_midpoint_fades_without_darkening() {
        let stops = [
            GradientStop::new(0.0, WHITE),
            GradientStop::new(1.0, Color::TRANSPARENT),
        ];
        let mid = sample_gradient(&stops, 0.5);
        // Premultiplied interpolation: color/alpha ratio stays white.
        assert!((mid[3] - 0.5).abs() < 1e-6);
        assert!((mid[0] / mid[3] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_sample_three_stops() {
        let stops = [
            GradientStop::new(0.0, WHITE.with_alpha(0.4)),
            GradientStop::new(0.5, WHITE.with_alpha(0.2)),
            GradientStop::new(1.0, Color::TRANSPARENT),
        ];
        assert!((sample_gradient(&stops, 0.25)[3] - 0.3).abs() < 1e-6);
        assert!((sample_gradient(&stops, 0.5)[3] - 0.2).abs() < 1e-6);
        assert!((sample_gradient(&stops, 0.75)[3] - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_sample_empty_is_transparent() {
        assert_eq!(sample_gradient(&[], 0.5), [0.0; 4]);
    }
}
