//! Bounded pool of short-lived shooting star streaks.

use glam::Vec2;
use stardrift_config::ShootingStarConfig;
use tracing::trace;

use crate::canvas::{Canvas, GradientStop, LinearGradient, Paint};
use crate::color::Color;
use crate::random::RandomSource;

/// Spawn band: streaks start up to this far above and left of the surface.
const SPAWN_MARGIN: f32 = 100.0;
/// Spawn band: streaks start no lower than this fraction of the height.
const SPAWN_HEIGHT_FRACTION: f32 = 0.4;

/// One transient streak. `position` is the head.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShootingStar {
    pub position: Vec2,
    /// Trail length in pixels.
    pub length: f32,
    /// Pixels per frame.
    pub speed: f32,
    /// Travel direction in radians, measured clockwise from +x in screen space.
    pub angle: f32,
    /// Remaining life, 1.0 at spawn.
    pub life: f32,
}

impl ShootingStar {
    /// Unit travel direction.
    pub fn direction(&self) -> Vec2 {
        Vec2::new(self.angle.cos(), self.angle.sin())
    }

    /// End of the trail, opposite the direction of travel.
    pub fn tail(&self) -> Vec2 {
        self.position - self.direction() * self.length
    }
}

/// Spawns, advances, and retires streaks. At most `max_alive` exist at once.
#[derive(Clone, Debug)]
pub struct ShootingStarPool {
    config: ShootingStarConfig,
    streaks: Vec<ShootingStar>,
}

impl ShootingStarPool {
    pub fn new(config: ShootingStarConfig) -> Self {
        let capacity = config.max_alive as usize;
        Self {
            config,
            streaks: Vec::with_capacity(capacity),
        }
    }

    pub fn streaks(&self) -> &[ShootingStar] {
        &self.streaks
    }

    pub fn len(&self) -> usize {
        self.streaks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.streaks.is_empty()
    }

    /// Per-frame spawn check for a `width` x `height` surface.
    ///
    /// Rolls the spawn probability first, then refuses if the pool is full.
    /// Returns whether a streak was added.
    pub fn maybe_spawn(&mut self, width: f32, height: f32, rng: &mut dyn RandomSource) -> bool {
        if !rng.chance(self.config.spawn_probability) {
            return false;
        }
        if self.streaks.len() >= self.config.max_alive as usize {
            return false;
        }
        let streak = ShootingStar {
            position: Vec2::new(
                rng.between((-SPAWN_MARGIN, width)),
                rng.between((-SPAWN_MARGIN, height * SPAWN_HEIGHT_FRACTION)),
            ),
            length: rng.between(self.config.length),
            speed: rng.between(self.config.speed),
            angle: rng.between(self.config.angle),
            life: 1.0,
        };
        trace!(
            x = streak.position.x,
            y = streak.position.y,
            angle = streak.angle,
            "Spawned shooting star"
        );
        self.streaks.push(streak);
        true
    }

    /// Advance and decay every streak, dropping expired ones and drawing the rest.
    ///
    /// Returns the number of streaks drawn.
    pub fn update_and_draw<C: Canvas + ?Sized>(&mut self, canvas: &mut C) -> usize {
        let decay = self.config.life_decay;
        let trail_width = self.config.trail_width;
        let head_radius = self.config.head_radius;
        let mut drawn = 0;

        self.streaks.retain_mut(|streak| {
            streak.position += streak.direction() * streak.speed;
            streak.life -= decay;
            if streak.life <= 0.0 {
                return false;
            }

            let tail = streak.tail();
            let trail = LinearGradient {
                start: streak.position,
                end: tail,
                stops: [
                    GradientStop::new(0.0, Color::rgb8(255, 255, 255, streak.life * 0.9)),
                    GradientStop::new(1.0, Color::TRANSPARENT),
                ],
            };
            canvas.stroke_line(streak.position, tail, trail_width, &Paint::Linear(trail));
            canvas.fill_circle(
                streak.position,
                head_radius,
                Color::rgb8(200, 200, 255, streak.life * 0.6),
            );
            drawn += 1;
            true
        });

        drawn
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{ChaChaRandom, FixedRandom, SequenceRandom};
    use crate::recording::RecordingCanvas;

    fn pool() -> ShootingStarPool {
        ShootingStarPool::new(ShootingStarConfig::default())
    }

    #[test]
    fn test_never_spawns_when_roll_fails() {
        let mut pool = pool();
        let mut rng = FixedRandom::new(0.999);
        for _ in 0..1_000 {
            assert!(!pool.maybe_spawn(1920.0, 1080.0, &mut rng));
        }
        assert!(pool.is_empty());
    }

    #[test]
    fn test_cap_enforced_at_spawn() {
        let mut pool = pool();
        let mut rng = FixedRandom::new(0.0);
        assert!(pool.maybe_spawn(1920.0, 1080.0, &mut rng));
        assert!(pool.maybe_spawn(1920.0, 1080.0, &mut rng));
        assert!(!pool.maybe_spawn(1920.0, 1080.0, &mut rng));
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn test_spawn_attributes_in_range() {
        let mut pool = pool();
        // Roll, x, y, length, speed, angle.
        let mut rng = SequenceRandom::new(vec![0.0, 0.5, 0.5, 0.5, 0.5, 0.5]);
        assert!(pool.maybe_spawn(1000.0, 500.0, &mut rng));
        let s = pool.streaks()[0];
        assert!((s.position.x - 450.0).abs() < 1e-3);
        assert!((s.position.y - 50.0).abs() < 1e-3);
        assert!((s.length - 140.0).abs() < 1e-3);
        assert!((s.speed - 17.0).abs() < 1e-3);
        assert!((s.angle - 0.55).abs() < 1e-5);
        assert_eq!(s.life, 1.0);
    }

    #[test]
    fn test_update_moves_along_angle_and_decays() {
        let mut pool = pool();
        pool.streaks.push(ShootingStar {
            position: Vec2::ZERO,
            length: 100.0,
            speed: 10.0,
            angle: 0.0,
            life: 1.0,
        });
        let mut canvas = RecordingCanvas::new(100, 100);
        assert_eq!(pool.update_and_draw(&mut canvas), 1);
        let s = pool.streaks()[0];
        assert!((s.position - Vec2::new(10.0, 0.0)).length() < 1e-5);
        assert!((s.life - 0.985).abs() < 1e-6);
        assert_eq!(canvas.gradient_line_count(), 1);
        assert_eq!(canvas.circle_count(), 1);
    }

    #[test]
    fn test_life_strictly_decreases_until_removed() {
        let mut pool = pool();
        pool.maybe_spawn(800.0, 600.0, &mut FixedRandom::new(0.0));
        let mut canvas = RecordingCanvas::new(800, 600);
        let mut last = 1.0;
        let mut frames = 0;
        while !pool.is_empty() {
            pool.update_and_draw(&mut canvas);
            if let Some(s) = pool.streaks().first() {
                assert!(s.life < last);
                assert!(s.life > 0.0);
                last = s.life;
            }
            frames += 1;
            assert!(frames < 100, "streak never expired");
        }
        // 1.0 / 0.015 rounds up to 67 frames.
        assert!((66..=68).contains(&frames));
    }

    #[test]
    fn test_expired_streak_not_drawn() {
        let mut pool = pool();
        pool.streaks.push(ShootingStar {
            position: Vec2::ZERO,
            length: 100.0,
            speed: 10.0,
            angle: 0.5,
            life: 0.01,
        });
        let mut canvas = RecordingCanvas::new(100, 100);
        assert_eq!(pool.update_and_draw(&mut canvas), 0);
        assert!(pool.is_empty());
        assert!(canvas.commands().is_empty());
    }

    #[test]
    fn test_random_frames_never_exceed_cap() {
        let mut pool = pool();
        let mut rng = ChaChaRandom::seeded(42);
        let mut canvas = RecordingCanvas::new(1280, 720);
        let config = ShootingStarConfig {
            spawn_probability: 0.5,
            ..ShootingStarConfig::default()
        };
        pool.config = config;
        for _ in 0..5_000 {
            pool.maybe_spawn(1280.0, 720.0, &mut rng);
            assert!(pool.len() <= 2);
            pool.update_and_draw(&mut canvas);
            assert!(pool.len() <= 2);
        }
    }

    #[test]
    fn test_tail_trails_behind_head() {
        let s = ShootingStar {
            position: Vec2::new(100.0, 100.0),
            length: 50.0,
            speed: 10.0,
            angle: 0.0,
            life: 1.0,
        };
        assert!((s.tail() - Vec2::new(50.0, 100.0)).length() < 1e-5);
    }
}
