//! Animated, pointer-reactive starfield backdrop.
//!
//! Four layers of drifting, twinkling stars shift with the pointer and push
//! away from it, soft nebula glows wobble behind them, shooting stars streak
//! across now and then, and faint constellation lines join bright stars near
//! the pointer. Everything paints through the [`Canvas`] trait, so the same
//! simulation can drive the software [`PixelCanvas`] or a recording test double.

pub mod canvas;
pub mod color;
pub mod constellation;
pub mod nebula;
pub mod pointer;
pub mod random;
pub mod raster;
pub mod recording;
pub mod render_loop;
pub mod shooting;
pub mod stars;
pub mod surface;

pub use canvas::{Canvas, GradientStop, LinearGradient, Paint, RadialGradient};
pub use color::Color;
pub use constellation::{ConstellationLink, ConstellationLinker};
pub use nebula::{NebulaField, NebulaPoint};
pub use pointer::PointerTracker;
pub use random::{ChaChaRandom, FixedRandom, RandomSource, SequenceRandom, source_for_seed};
pub use raster::PixelCanvas;
pub use recording::{DrawCommand, RecordingCanvas};
pub use render_loop::{FrameReport, FrameScheduler, RenderLoop};
pub use shooting::{ShootingStar, ShootingStarPool};
pub use stars::{Star, StarLayerSystem};
pub use surface::Surface;
