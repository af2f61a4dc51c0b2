//! Tuning tables for the animated backdrop.
//!
//! Defaults reproduce the reference look at roughly 60 frames per second.
//! Every per-frame quantity (speeds, drift, decay) is applied once per loop
//! invocation, not per elapsed second.

use serde::{Deserialize, Serialize};

/// Number of star depth layers. Layer 0 is farthest, layer 3 nearest.
pub const LAYER_COUNT: usize = 4;

/// All backdrop tuning, grouped per subsystem.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BackdropConfig {
    /// Drifting star layers.
    pub stars: StarLayersConfig,
    /// Ambient nebula glow blobs.
    pub nebula: NebulaConfig,
    /// Shooting star pool.
    pub shooting_stars: ShootingStarConfig,
    /// Pointer-local constellation links.
    pub constellations: ConstellationConfig,
    /// Fixed random seed. `None` seeds from the operating system.
    pub seed: Option<u64>,
}

/// One depth tier of stars.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct LayerConfig {
    /// Number of stars generated in this layer.
    pub count: u32,
    /// Downward drift in pixels per frame.
    pub speed: f32,
    /// Base size range (radius in pixels).
    pub size: (f32, f32),
    /// Base opacity range.
    pub opacity: (f32, f32),
    /// Fraction of the pointer's offset from the surface center applied as shift.
    pub parallax: f32,
    /// Distance within which the pointer pushes stars of this layer away.
    pub repulsion_radius: f32,
}

/// Star layer table plus the per-star ranges shared by every layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StarLayersConfig {
    /// Layers from farthest (0) to nearest (3).
    pub layers: [LayerConfig; LAYER_COUNT],
    /// Twinkle angular speed range in radians per frame.
    pub twinkle_speed: (f32, f32),
    /// Hue range in degrees.
    pub hue: (f32, f32),
    /// Maximum repulsion displacement in pixels, reached at zero distance.
    pub repulsion_strength: f32,
    /// Distance past the bottom edge before a star wraps, and where it re-enters above the top.
    pub wrap_margin: f32,
    /// Twinkle level above which nearest-layer stars draw a sparkle cross.
    pub sparkle_threshold: f32,
}

/// Nebula glow generation and drift.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NebulaConfig {
    /// Number of glow blobs.
    pub count: u32,
    /// Radius range in pixels.
    pub radius: (f32, f32),
    /// Hue range in degrees.
    pub hue: (f32, f32),
    /// Phase advance range in radians per frame.
    pub drift: (f32, f32),
    /// Horizontal and vertical wobble amplitude in pixels.
    pub wobble: (f32, f32),
    /// Alpha at the gradient center.
    pub core_alpha: f32,
    /// Alpha at the gradient midpoint.
    pub mid_alpha: f32,
}

/// Shooting star spawning and decay.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ShootingStarConfig {
    /// Per-frame spawn probability.
    pub spawn_probability: f32,
    /// Maximum number of streaks alive at once.
    pub max_alive: u32,
    /// Life removed per frame (life starts at 1.0).
    pub life_decay: f32,
    /// Travel angle range in radians.
    pub angle: (f32, f32),
    /// Speed range in pixels per frame.
    pub speed: (f32, f32),
    /// Trail length range in pixels.
    pub length: (f32, f32),
    /// Trail stroke width in pixels.
    pub trail_width: f32,
    /// Head dot radius in pixels.
    pub head_radius: f32,
}

/// Constellation linking around the pointer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ConstellationConfig {
    /// Lowest star layer that can be linked.
    pub min_layer: u8,
    /// Stars farther than this from the pointer are never linked.
    pub pointer_radius: f32,
    /// Maximum distance between two linked stars.
    pub link_distance: f32,
    /// Line alpha for two coincident stars; fades linearly to zero at `link_distance`.
    pub max_opacity: f32,
    /// Line stroke width in pixels.
    pub line_width: f32,
}

impl Default for StarLayersConfig {
    fn default() -> Self {
        Self {
            layers: [
                LayerConfig {
                    count: 120,
                    speed: 0.08,
                    size: (0.4, 1.2),
                    opacity: (0.15, 0.35),
                    parallax: 0.005,
                    repulsion_radius: 40.0,
                },
                LayerConfig {
                    count: 100,
                    speed: 0.18,
                    size: (0.8, 1.8),
                    opacity: (0.25, 0.5),
                    parallax: 0.012,
                    repulsion_radius: 40.0,
                },
                LayerConfig {
                    count: 80,
                    speed: 0.35,
                    size: (1.0, 2.4),
                    opacity: (0.35, 0.65),
                    parallax: 0.025,
                    repulsion_radius: 80.0,
                },
                LayerConfig {
                    count: 40,
                    speed: 0.55,
                    size: (1.5, 3.2),
                    opacity: (0.5, 0.85),
                    parallax: 0.04,
                    repulsion_radius: 80.0,
                },
            ],
            twinkle_speed: (0.005, 0.025),
            hue: (200.0, 280.0),
            repulsion_strength: 15.0,
            wrap_margin: 10.0,
            sparkle_threshold: 0.8,
        }
    }
}

impl StarLayersConfig {
    /// Total number of stars across all layers.
    pub fn total_stars(&self) -> usize {
        self.layers.iter().map(|l| l.count as usize).sum()
    }
}

impl Default for NebulaConfig {
    fn default() -> Self {
        Self {
            count: 5,
            radius: (200.0, 500.0),
            hue: (220.0, 300.0),
            drift: (0.0005, 0.002),
            wobble: (60.0, 40.0),
            core_alpha: 0.025,
            mid_alpha: 0.012,
        }
    }
}

impl Default for ShootingStarConfig {
    fn default() -> Self {
        Self {
            spawn_probability: 0.005,
            max_alive: 2,
            life_decay: 0.015,
            angle: (0.3, 0.8),
            speed: (12.0, 22.0),
            length: (80.0, 200.0),
            trail_width: 1.5,
            head_radius: 3.0,
        }
    }
}

impl Default for ConstellationConfig {
    fn default() -> Self {
        Self {
            min_layer: 2,
            pointer_radius: 180.0,
            link_distance: 120.0,
            max_opacity: 0.15,
            line_width: 0.5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_star_total() {
        assert_eq!(StarLayersConfig::default().total_stars(), 340);
    }

    #[test]
    fn test_layers_grow_toward_viewer() {
        let stars = StarLayersConfig::default();
        for pair in stars.layers.windows(2) {
            assert!(pair[1].speed > pair[0].speed);
            assert!(pair[1].parallax > pair[0].parallax);
            assert!(pair[1].size.1 > pair[0].size.1);
            assert!(pair[1].opacity.1 > pair[0].opacity.1);
        }
    }

    #[test]
    fn test_repulsion_radius_split_at_layer_two() {
        let stars = StarLayersConfig::default();
        let radii: Vec<f32> = stars.layers.iter().map(|l| l.repulsion_radius).collect();
        assert_eq!(radii, vec![40.0, 40.0, 80.0, 80.0]);
    }

    #[test]
    fn test_ranges_are_ordered() {
        let config = BackdropConfig::default();
        let ranges = [
            config.stars.twinkle_speed,
            config.stars.hue,
            config.nebula.radius,
            config.nebula.hue,
            config.nebula.drift,
            config.shooting_stars.angle,
            config.shooting_stars.speed,
            config.shooting_stars.length,
        ];
        for (min, max) in ranges {
            assert!(min <= max, "range ({min}, {max}) is inverted");
        }
    }

    #[test]
    fn test_partial_layer_table_uses_defaults_elsewhere() {
        let ron_str = "(stars: (repulsion_strength: 20.0), seed: Some(7))";
        let config: BackdropConfig = ron::from_str(ron_str).unwrap();
        assert_eq!(config.stars.repulsion_strength, 20.0);
        assert_eq!(config.stars.layers, StarLayersConfig::default().layers);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.nebula, NebulaConfig::default());
    }
}
