//! Straight-alpha RGBA colors with HSL construction.

/// A color with straight (non-premultiplied) alpha, channels in `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);

    /// Build from normalized channels.
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Build from 8-bit color channels and a normalized alpha.
    pub fn rgb8(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self::rgba(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
            a.clamp(0.0, 1.0),
        )
    }

    /// Build from hue in degrees, saturation and lightness in `[0, 1]`, and alpha.
    pub fn hsla(hue: f32, saturation: f32, lightness: f32, alpha: f32) -> Self {
        let s = saturation.clamp(0.0, 1.0);
        let l = lightness.clamp(0.0, 1.0);
        let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let sector = hue.rem_euclid(360.0) / 60.0;
        let x = chroma * (1.0 - (sector % 2.0 - 1.0).abs());
        let (r, g, b) = match sector as u32 {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };
        let m = l - chroma / 2.0;
        Self::rgba(r + m, g + m, b + m, alpha.clamp(0.0, 1.0))
    }

    /// Same color with a different alpha.
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            a: alpha.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Channels multiplied by alpha, as `[r, g, b, a]`.
    pub fn premultiplied(self) -> [f32; 4] {
        [self.r * self.a, self.g * self.a, self.b * self.a, self.a]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: Color, expected: Color) {
        for (a, e) in [
            (actual.r, expected.r),
            (actual.g, expected.g),
            (actual.b, expected.b),
            (actual.a, expected.a),
        ] {
            assert!((a - e).abs() < 1e-4, "{actual:?} != {expected:?}");
        }
    }

    #[test]
    fn test_hsla_primaries() {
        assert_close(Color::hsla(0.0, 1.0, 0.5, 1.0), Color::rgba(1.0, 0.0, 0.0, 1.0));
        assert_close(Color::hsla(120.0, 1.0, 0.5, 1.0), Color::rgba(0.0, 1.0, 0.0, 1.0));
        assert_close(Color::hsla(240.0, 1.0, 0.5, 1.0), Color::rgba(0.0, 0.0, 1.0, 1.0));
    }

    #[test]
    fn test_hsla_grey_without_saturation() {
        let grey = Color::hsla(250.0, 0.0, 0.7, 0.4);
        assert_close(grey, Color::rgba(0.7, 0.7, 0.7, 0.4));
    }

    #[test]
    fn test_hsla_wraps_hue() {
        assert_close(Color::hsla(480.0, 0.6, 0.7, 1.0), Color::hsla(120.0, 0.6, 0.7, 1.0));
        assert_close(Color::hsla(-120.0, 0.6, 0.7, 1.0), Color::hsla(240.0, 0.6, 0.7, 1.0));
    }

    #[test]
    fn test_star_blue_is_blue_dominant() {
        let c = Color::hsla(240.0, 0.6, 0.7, 1.0);
        assert!(c.b > c.r && c.b > c.g);
    }

    #[test]
    fn test_alpha_is_clamped() {
        assert_eq!(Color::hsla(0.0, 0.5, 0.5, 3.0).a, 1.0);
        assert_eq!(Color::rgb8(255, 255, 255, -1.0).a, 0.0);
    }

    #[test]
    fn test_premultiplied() {
        let p = Color::rgba(1.0, 0.5, 0.0, 0.5).premultiplied();
        assert_eq!(p, [0.5, 0.25, 0.0, 0.5]);
    }
}
