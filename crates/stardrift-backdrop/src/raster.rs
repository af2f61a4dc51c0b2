//! Software rasterizer: a premultiplied RGBA float buffer implementing [`Canvas`].
//!
//! Shapes are anti-aliased by distance to their edge measured from pixel
//! centers, and composited with source-over blending.

use glam::Vec2;

use crate::canvas::{Canvas, Paint, RadialGradient, sample_gradient};
use crate::color::Color;

/// CPU pixel buffer, row-major, premultiplied alpha.
#[derive(Clone, Debug)]
pub struct PixelCanvas {
    width: u32,
    height: u32,
    pixels: Vec<[f32; 4]>,
}

/// Inclusive-exclusive pixel bounds clipped to the canvas.
struct PixelRect {
    x0: u32,
    x1: u32,
    y0: u32,
    y1: u32,
}

impl PixelCanvas {
    /// A fully transparent canvas.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0.0; 4]; (width as usize) * (height as usize)],
        }
    }

    /// Premultiplied color at `(x, y)`, or `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[f32; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[(y * self.width + x) as usize])
    }

    /// Raw premultiplied pixels, row-major.
    pub fn pixels(&self) -> &[[f32; 4]] {
        &self.pixels
    }

    /// Premultiplied RGBA8 bytes, suitable for upload with premultiplied blending.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for pixel in &self.pixels {
            for channel in pixel {
                bytes.push(to_byte(*channel));
            }
        }
        bytes
    }

    /// Opaque RGBA8 bytes with the canvas composited over `background`.
    pub fn composite_rgba8(&self, background: Color) -> Vec<u8> {
        let bg = [background.r, background.g, background.b];
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for pixel in &self.pixels {
            let inv = 1.0 - pixel[3];
            for (channel, base) in pixel.iter().zip(bg) {
                bytes.push(to_byte(channel + base * inv));
            }
            bytes.push(255);
        }
        bytes
    }

    /// Source-over blend of a premultiplied color scaled by `coverage`.
    fn blend(&mut self, x: u32, y: u32, src: [f32; 4], coverage: f32) {
        let idx = (y * self.width + x) as usize;
        let dst = &mut self.pixels[idx];
        let alpha = src[3] * coverage;
        for i in 0..4 {
            dst[i] = (src[i] * coverage + dst[i] * (1.0 - alpha)).min(1.0);
        }
    }

    /// Pixel rectangle covering `min..max`, or `None` if it misses the canvas.
    fn clip(&self, min: Vec2, max: Vec2) -> Option<PixelRect> {
        if !min.is_finite() || !max.is_finite() {
            return None;
        }
        let x0 = min.x.floor().max(0.0);
        let y0 = min.y.floor().max(0.0);
        let x1 = max.x.ceil().min(self.width as f32);
        let y1 = max.y.ceil().min(self.height as f32);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some(PixelRect {
            x0: x0 as u32,
            x1: x1 as u32,
            y0: y0 as u32,
            y1: y1 as u32,
        })
    }
}

fn to_byte(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn pixel_center(x: u32, y: u32) -> Vec2 {
    Vec2::new(x as f32 + 0.5, y as f32 + 0.5)
}

impl Canvas for PixelCanvas {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn resize(&mut self, width: u32, height: u32) {
        *self = Self::new(width, height);
    }

    fn clear(&mut self) {
        self.pixels.fill([0.0; 4]);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        if !(radius > 0.0) || color.a <= 0.0 {
            return;
        }
        let reach = Vec2::splat(radius + 1.0);
        let Some(rect) = self.clip(center - reach, center + reach) else {
            return;
        };
        let src = color.premultiplied();
        for y in rect.y0..rect.y1 {
            for x in rect.x0..rect.x1 {
                let d = pixel_center(x, y).distance(center);
                let coverage = (radius + 0.5 - d).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.blend(x, y, src, coverage);
                }
            }
        }
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, paint: &Paint) {
        if !(width > 0.0) {
            return;
        }
        let half = width / 2.0;
        let reach = Vec2::splat(half + 1.0);
        let Some(rect) = self.clip(from.min(to) - reach, from.max(to) + reach) else {
            return;
        };
        let segment = to - from;
        let length_sq = segment.length_squared();
        for y in rect.y0..rect.y1 {
            for x in rect.x0..rect.x1 {
                let p = pixel_center(x, y);
                let t = if length_sq > 0.0 {
                    ((p - from).dot(segment) / length_sq).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                let d = p.distance(from + segment * t);
                let coverage = (half + 0.5 - d).clamp(0.0, 1.0);
                if coverage <= 0.0 {
                    continue;
                }
                let src = match paint {
                    Paint::Solid(color) => color.premultiplied(),
                    Paint::Linear(gradient) => {
                        let axis = gradient.end - gradient.start;
                        let axis_sq = axis.length_squared();
                        let g = if axis_sq > 0.0 {
                            ((p - gradient.start).dot(axis) / axis_sq).clamp(0.0, 1.0)
                        } else {
                            0.0
                        };
                        sample_gradient(&gradient.stops, g)
                    }
                };
                self.blend(x, y, src, coverage);
            }
        }
    }

    fn fill_radial_gradient(&mut self, gradient: &RadialGradient) {
        if !(gradient.radius > 0.0) {
            return;
        }
        let reach = Vec2::splat(gradient.radius);
        let Some(rect) = self.clip(gradient.center - reach, gradient.center + reach) else {
            return;
        };
        for y in rect.y0..rect.y1 {
            for x in rect.x0..rect.x1 {
                let t = pixel_center(x, y).distance(gradient.center) / gradient.radius;
                if t >= 1.0 {
                    continue;
                }
                let src = sample_gradient(&gradient.stops, t);
                if src[3] > 0.0 {
                    self.blend(x, y, src, 1.0);
                }
            }
        }
    }
}
