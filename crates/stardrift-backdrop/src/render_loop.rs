//! The per-frame driver that owns every backdrop subsystem.
//!
//! A frame clears the surface, rolls the shooting star spawn check, then
//! paints nebula, stars, constellation links and shooting stars in that
//! order, each on top of the previous. After a frame the loop asks its host
//! [`FrameScheduler`] for the next one until [`RenderLoop::stop`] is called.
//!
//! Motion constants are per invocation. Hosts with a display rate other than
//! the tuning rate pass a step count to [`RenderLoop::tick`] so the simulation
//! advances at a fixed rate while only the last step is painted.

use glam::Vec2;
use stardrift_config::BackdropConfig;
use tracing::{debug, info, warn};

use crate::canvas::{Canvas, Paint, RadialGradient};
use crate::color::Color;
use crate::constellation::ConstellationLinker;
use crate::nebula::NebulaField;
use crate::pointer::PointerTracker;
use crate::random::{RandomSource, source_for_seed};
use crate::shooting::ShootingStarPool;
use crate::stars::StarLayerSystem;
use crate::surface::Surface;

/// Host facility that schedules the next frame callback.
pub trait FrameScheduler {
    fn request_frame(&mut self);
}

impl<F: FnMut()> FrameScheduler for F {
    fn request_frame(&mut self) {
        self()
    }
}

/// Counts from the most recently painted frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub nebula_drawn: usize,
    pub stars_drawn: usize,
    pub links_drawn: usize,
    pub streaks_drawn: usize,
    /// Streaks spawned across every step of the tick.
    pub spawned: usize,
}

/// Simulation state, separate from the surface so both can be borrowed at once.
struct Scene {
    pointer: PointerTracker,
    stars: StarLayerSystem,
    nebula: NebulaField,
    shooting_stars: ShootingStarPool,
    constellations: ConstellationLinker,
    rng: Box<dyn RandomSource>,
}

impl Scene {
    fn regenerate(&mut self, size: Vec2) {
        self.stars.generate(size.x, size.y, self.rng.as_mut());
        self.nebula.generate(size.x, size.y, self.rng.as_mut());
    }

    fn frame<C: Canvas + ?Sized>(&mut self, canvas: &mut C, size: Vec2) -> FrameReport {
        canvas.clear();
        let pointer = self.pointer.position();
        let spawned = self
            .shooting_stars
            .maybe_spawn(size.x, size.y, self.rng.as_mut());

        let nebula_drawn = self.nebula.draw(canvas);
        let stars_drawn = self
            .stars
            .update_and_draw(pointer, size, self.rng.as_mut(), canvas);
        let links_drawn = self
            .constellations
            .draw(self.stars.stars(), pointer, canvas);
        let streaks_drawn = self.shooting_stars.update_and_draw(canvas);

        FrameReport {
            nebula_drawn,
            stars_drawn,
            links_drawn,
            streaks_drawn,
            spawned: usize::from(spawned),
        }
    }
}

/// Canvas for simulation steps whose output is never shown.
struct DiscardCanvas;

impl Canvas for DiscardCanvas {
    fn width(&self) -> u32 {
        0
    }

    fn height(&self) -> u32 {
        0
    }

    fn resize(&mut self, _width: u32, _height: u32) {}

    fn clear(&mut self) {}

    fn fill_circle(&mut self, _center: Vec2, _radius: f32, _color: Color) {}

    fn stroke_line(&mut self, _from: Vec2, _to: Vec2, _width: f32, _paint: &Paint) {}

    fn fill_radial_gradient(&mut self, _gradient: &RadialGradient) {}
}

/// Owns the surface and every subsystem and drives them once per frame.
///
/// Without a surface the loop is permanently disabled: it never starts and
/// ignores every notification.
pub struct RenderLoop<C> {
    surface: Option<Surface<C>>,
    scene: Scene,
    running: bool,
    frame_count: u64,
}

impl<C: Canvas> RenderLoop<C> {
    /// Build the subsystems and generate the first star and nebula sets.
    pub fn new(canvas: Option<C>, config: &BackdropConfig, rng: Box<dyn RandomSource>) -> Self {
        let mut scene = Scene {
            pointer: PointerTracker::new(),
            stars: StarLayerSystem::new(config.stars.clone()),
            nebula: NebulaField::new(config.nebula.clone()),
            shooting_stars: ShootingStarPool::new(config.shooting_stars.clone()),
            constellations: ConstellationLinker::new(config.constellations.clone()),
            rng,
        };

        let surface = canvas.map(Surface::new);
        match &surface {
            Some(surface) => scene.regenerate(surface.extent()),
            None => warn!("No drawable surface available, backdrop disabled"),
        }

        Self {
            surface,
            scene,
            running: false,
            frame_count: 0,
        }
    }

    /// Like [`new`](Self::new), seeding randomness from `config.seed`.
    pub fn from_config(canvas: Option<C>, config: &BackdropConfig) -> Self {
        Self::new(canvas, config, source_for_seed(config.seed))
    }

    /// Whether a surface exists. A disabled loop never runs.
    pub fn is_enabled(&self) -> bool {
        self.surface.is_some()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Begin running and request the first frame.
    ///
    /// Returns `false` when disabled. Starting a running loop does nothing.
    pub fn start<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S) -> bool {
        let Some(surface) = &self.surface else {
            return false;
        };
        if self.running {
            return true;
        }
        let (width, height) = surface.size();
        info!(width, height, stars = self.scene.stars.len(), "Starting backdrop");
        self.running = true;
        scheduler.request_frame();
        true
    }

    /// Stop after the current frame. No further frames are requested.
    pub fn stop(&mut self) {
        if self.running {
            info!(frames = self.frame_count, "Stopping backdrop");
        }
        self.running = false;
    }

    /// Pointer-move notification in surface coordinates.
    pub fn on_pointer_moved(&mut self, x: f32, y: f32) {
        if self.surface.is_some() {
            self.scene.pointer.on_pointer_moved(x, y);
        }
    }

    /// Viewport-resize notification. Stars and nebula are regenerated
    /// immediately, so the next frame already uses the new dimensions.
    pub fn on_resize(&mut self, width: u32, height: u32) {
        let Some(surface) = &mut self.surface else {
            return;
        };
        surface.resize(width, height);
        let size = surface.extent();
        debug!(width = size.x, height = size.y, "Regenerating backdrop after resize");
        self.scene.regenerate(size);
    }

    /// Run one frame and request the next.
    pub fn frame<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S) -> Option<FrameReport> {
        self.tick(1, scheduler)
    }

    /// Advance `steps` frames, paint the last one and request the next.
    ///
    /// Returns `None` when not running or when `steps` is zero; a running loop
    /// still requests the next frame in the zero-step case.
    pub fn tick<S: FrameScheduler + ?Sized>(
        &mut self,
        steps: u32,
        scheduler: &mut S,
    ) -> Option<FrameReport> {
        if !self.running {
            return None;
        }
        let surface = self.surface.as_mut()?;
        let size = surface.extent();

        let mut report = None;
        let mut spawned = 0;
        for step in 1..=steps {
            let frame = if step == steps {
                self.scene.frame(surface.canvas_mut(), size)
            } else {
                self.scene.frame(&mut DiscardCanvas, size)
            };
            spawned += frame.spawned;
            self.frame_count += 1;
            report = Some(FrameReport { spawned, ..frame });
        }

        scheduler.request_frame();
        report
    }

    /// Total simulated frames since construction.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn surface(&self) -> Option<&Surface<C>> {
        self.surface.as_ref()
    }

    pub fn canvas(&self) -> Option<&C> {
        self.surface.as_ref().map(Surface::canvas)
    }

    pub fn pointer(&self) -> &PointerTracker {
        &self.scene.pointer
    }

    pub fn stars(&self) -> &StarLayerSystem {
        &self.scene.stars
    }

    /// Mutable star access, for scripting placements before a frame.
    pub fn stars_mut(&mut self) -> &mut StarLayerSystem {
        &mut self.scene.stars
    }

    pub fn nebula(&self) -> &NebulaField {
        &self.scene.nebula
    }

    pub fn shooting_stars(&self) -> &ShootingStarPool {
        &self.scene.shooting_stars
    }

    pub fn constellations(&self) -> &ConstellationLinker {
        &self.scene.constellations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::FixedRandom;
    use crate::recording::{DrawCommand, RecordingCanvas};

    fn quiet_loop(width: u32, height: u32) -> RenderLoop<RecordingCanvas> {
        RenderLoop::new(
            Some(RecordingCanvas::new(width, height)),
            &BackdropConfig::default(),
            Box::new(FixedRandom::new(0.999)),
        )
    }

    #[test]
    fn test_missing_surface_never_starts() {
        let mut backdrop: RenderLoop<RecordingCanvas> = RenderLoop::new(
            None,
            &BackdropConfig::default(),
            Box::new(FixedRandom::new(0.5)),
        );
        let mut requests = 0;
        let mut scheduler = || requests += 1;
        assert!(!backdrop.is_enabled());
        assert!(!backdrop.start(&mut scheduler));
        assert!(backdrop.frame(&mut scheduler).is_none());
        backdrop.on_resize(100, 100);
        backdrop.on_pointer_moved(5.0, 5.0);
        assert!(!backdrop.pointer().is_present());
        assert_eq!(requests, 0);
    }

    #[test]
    fn test_frame_before_start_does_nothing() {
        let mut backdrop = quiet_loop(200, 100);
        let mut requests = 0;
        assert!(backdrop.frame(&mut || requests += 1).is_none());
        assert_eq!(requests, 0);
        assert_eq!(backdrop.frame_count(), 0);
    }

    #[test]
    fn test_each_frame_requests_the_next() {
        let mut backdrop = quiet_loop(200, 100);
        let mut requests = 0;
        let mut scheduler = || requests += 1;
        assert!(backdrop.start(&mut scheduler));
        for _ in 0..3 {
            backdrop.frame(&mut scheduler);
        }
        backdrop.stop();
        assert!(backdrop.frame(&mut scheduler).is_none());
        assert_eq!(requests, 4);
        assert_eq!(backdrop.frame_count(), 3);
    }

    #[test]
    fn test_double_start_requests_once() {
        let mut backdrop = quiet_loop(200, 100);
        let mut requests = 0;
        let mut scheduler = || requests += 1;
        backdrop.start(&mut scheduler);
        backdrop.start(&mut scheduler);
        assert_eq!(requests, 1);
    }

    #[test]
    fn test_frame_paints_in_fixed_order() {
        let mut backdrop = quiet_loop(400, 300);
        let mut scheduler = || {};
        backdrop.start(&mut scheduler);
        backdrop.frame(&mut scheduler);
        let commands = backdrop.canvas().unwrap().commands();
        assert_eq!(commands[0], DrawCommand::Clear);
        // Nebula gradients come before any star circle.
        let last_gradient = commands
            .iter()
            .rposition(|c| matches!(c, DrawCommand::RadialGradient(_)))
            .unwrap();
        let first_circle = commands
            .iter()
            .position(|c| matches!(c, DrawCommand::Circle { .. }))
            .unwrap();
        assert!(last_gradient < first_circle);
    }

    #[test]
    fn test_multi_step_tick_paints_once() {
        let mut backdrop = quiet_loop(400, 300);
        let mut scheduler = || {};
        backdrop.start(&mut scheduler);
        let report = backdrop.tick(3, &mut scheduler).unwrap();
        assert_eq!(report.stars_drawn, 340);
        assert_eq!(backdrop.frame_count(), 3);
        let clears = backdrop
            .canvas()
            .unwrap()
            .commands()
            .iter()
            .filter(|c| **c == DrawCommand::Clear)
            .count();
        assert_eq!(clears, 1);
    }

    #[test]
    fn test_zero_step_tick_still_reschedules() {
        let mut backdrop = quiet_loop(400, 300);
        let mut requests = 0;
        let mut scheduler = || requests += 1;
        backdrop.start(&mut scheduler);
        assert!(backdrop.tick(0, &mut scheduler).is_none());
        assert_eq!(requests, 2);
        assert_eq!(backdrop.frame_count(), 0);
    }

    #[test]
    fn test_pointer_moves_reach_tracker() {
        let mut backdrop = quiet_loop(400, 300);
        backdrop.on_pointer_moved(12.0, 34.0);
        assert_eq!(backdrop.pointer().position(), Some(Vec2::new(12.0, 34.0)));
    }
}
