//! Window creation and event handling via winit.
//!
//! Provides [`AppState`] which implements winit's [`ApplicationHandler`] trait,
//! and a [`run`] function to start the event loop.

use std::sync::Arc;
use std::time::{Duration, Instant};

use stardrift_backdrop::{Canvas, PixelCanvas, RenderLoop};
use stardrift_config::Config;
use stardrift_render::{
    BackdropPresenter, FrameEncoder, RenderContext, RenderPassBuilder, SurfaceError,
    init_render_context_blocking,
};
use tracing::{error, info, instrument, warn};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Fullscreen, Window, WindowAttributes, WindowId};

use crate::frame_clock::FrameClock;

/// Error returned when the event loop cannot be created or fails.
#[derive(Debug, thiserror::Error)]
#[error("event loop error: {0}")]
pub struct RunError(#[from] winit::error::EventLoopError);

/// Returns [`WindowAttributes`] based on the given configuration.
pub fn window_attributes_from_config(config: &Config) -> WindowAttributes {
    let attrs = WindowAttributes::default()
        .with_title(config.window.title.clone())
        .with_inner_size(winit::dpi::LogicalSize::new(
            config.window.width as f64,
            config.window.height as f64,
        ));
    if config.window.fullscreen {
        attrs.with_fullscreen(Some(Fullscreen::Borderless(None)))
    } else {
        attrs
    }
}

/// Counts presented frames and reports a rate once per interval.
struct FpsCounter {
    interval: Duration,
    window_start: Instant,
    frames: u32,
}

impl FpsCounter {
    fn new(interval: Duration) -> Self {
        Self {
            interval,
            window_start: Instant::now(),
            frames: 0,
        }
    }

    /// Record a frame at `now`; returns the rate when an interval has elapsed.
    fn frame(&mut self, now: Instant) -> Option<f64> {
        self.frames += 1;
        let elapsed = now.duration_since(self.window_start);
        if elapsed < self.interval {
            return None;
        }
        let fps = f64::from(self.frames) / elapsed.as_secs_f64();
        self.frames = 0;
        self.window_start = now;
        Some(fps)
    }
}

/// Application state: the window, GPU presentation, and the backdrop loop.
pub struct AppState {
    config: Config,
    window: Option<Arc<Window>>,
    gpu: Option<RenderContext>,
    presenter: Option<BackdropPresenter>,
    backdrop: Option<RenderLoop<PixelCanvas>>,
    clock: FrameClock,
    fps: Option<FpsCounter>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let fps = config
            .debug
            .show_fps
            .then(|| FpsCounter::new(Duration::from_secs(1)));
        Self {
            config,
            window: None,
            gpu: None,
            presenter: None,
            backdrop: None,
            clock: FrameClock::new(),
            fps,
        }
    }

    /// The backdrop loop, once the window exists.
    pub fn backdrop(&self) -> Option<&RenderLoop<PixelCanvas>> {
        self.backdrop.as_ref()
    }

    /// Build GPU presentation for `window`. `None` leaves the backdrop without a surface.
    fn initialize_rendering(&mut self, window: &Arc<Window>) -> Option<PixelCanvas> {
        let size = window.inner_size();
        match init_render_context_blocking(Arc::clone(window), self.config.window.vsync) {
            Ok(gpu) => {
                let (width, height) = gpu.size();
                self.presenter = Some(BackdropPresenter::new(
                    &gpu.device,
                    gpu.surface_format,
                    width,
                    height,
                ));
                self.gpu = Some(gpu);
                Some(PixelCanvas::new(size.width.max(1), size.height.max(1)))
            }
            Err(e) => {
                error!("GPU initialization failed, backdrop disabled: {e}");
                None
            }
        }
    }

    fn handle_resize(&mut self, width: u32, height: u32) {
        if let Some(gpu) = &mut self.gpu {
            gpu.resize(width, height);
        }
        if let Some(backdrop) = &mut self.backdrop {
            backdrop.on_resize(width, height);
        }
        info!("Window resized to {width}x{height}");
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(window), Some(backdrop)) = (&self.window, &mut self.backdrop) else {
            return;
        };
        let steps = self.clock.tick();
        let mut scheduler = || window.request_redraw();
        if backdrop.tick(steps, &mut scheduler).is_none() {
            return;
        }

        self.present(event_loop);

        if let Some(fps) = &mut self.fps
            && let Some(rate) = fps.frame(Instant::now())
        {
            info!("FPS: {rate:.1}");
        }
    }

    fn present(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(gpu), Some(presenter), Some(backdrop)) =
            (&self.gpu, &mut self.presenter, &self.backdrop)
        else {
            return;
        };
        let Some(canvas) = backdrop.canvas() else {
            return;
        };

        if let Err(e) = presenter.upload(
            &gpu.device,
            &gpu.queue,
            canvas.width(),
            canvas.height(),
            &canvas.to_rgba8(),
        ) {
            warn!("Skipping frame: {e}");
            return;
        }

        match gpu.get_current_texture() {
            Ok(texture) => {
                let mut frame = FrameEncoder::new(&gpu.device, Arc::clone(&gpu.queue), texture);
                let builder = RenderPassBuilder::new().label("backdrop-pass");
                {
                    let mut pass = frame.begin_render_pass(&builder);
                    presenter.render(&mut pass);
                }
                frame.submit();
            }
            Err(SurfaceError::Lost) => {
                if let Some(gpu) = &mut self.gpu {
                    let (width, height) = gpu.size();
                    gpu.resize(width, height);
                }
            }
            Err(SurfaceError::OutOfMemory) => {
                error!("GPU out of memory");
                event_loop.exit();
            }
            Err(SurfaceError::Timeout) => {
                warn!("Surface timeout, skipping frame");
            }
        }
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match event_loop.create_window(window_attributes_from_config(&self.config)) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let canvas = self.initialize_rendering(&window);
        let mut backdrop = RenderLoop::from_config(canvas, &self.config.backdrop);
        backdrop.start(&mut || window.request_redraw());

        self.backdrop = Some(backdrop);
        self.window = Some(window);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested, shutting down");
                if let Some(backdrop) = &mut self.backdrop {
                    backdrop.stop();
                }
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                self.handle_resize(new_size.width, new_size.height);
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                if let Some(window) = &self.window {
                    let size = window.inner_size();
                    info!("Scale factor changed to {scale_factor:.2}");
                    self.handle_resize(size.width, size.height);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                if let Some(backdrop) = &mut self.backdrop {
                    backdrop.on_pointer_moved(position.x as f32, position.y as f32);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }
}

/// Creates an event loop and runs the backdrop window until it is closed.
///
/// # Errors
///
/// Returns [`RunError`] if the event loop cannot be created or exits abnormally.
#[instrument(skip(config))]
pub fn run(config: Config) -> Result<(), RunError> {
    let event_loop = EventLoop::new()?;
    let mut app = AppState::new(config);
    event_loop.run_app(&mut app)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_has_no_window_or_backdrop() {
        let state = AppState::new(Config::default());
        assert!(state.window.is_none());
        assert!(state.backdrop().is_none());
        assert!(state.fps.is_none());
    }

    #[test]
    fn test_show_fps_enables_counter() {
        let mut config = Config::default();
        config.debug.show_fps = true;
        assert!(AppState::new(config).fps.is_some());
    }

    #[test]
    fn test_window_attributes_from_config() {
        let mut config = Config::default();
        config.window.fullscreen = true;
        let attrs = window_attributes_from_config(&config);
        assert_eq!(attrs.title, "Stardrift");
        assert!(attrs.fullscreen.is_some());
    }

    #[test]
    fn test_fps_counter_reports_once_per_interval() {
        let start = Instant::now();
        let mut counter = FpsCounter {
            interval: Duration::from_secs(1),
            window_start: start,
            frames: 0,
        };
        for i in 1..60 {
            assert!(counter.frame(start + Duration::from_millis(i * 16)).is_none());
        }
        let rate = counter.frame(start + Duration::from_secs(1)).unwrap();
        assert!((rate - 60.0).abs() < 1e-9);
        assert_eq!(counter.frames, 0);
    }
}
