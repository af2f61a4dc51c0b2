//! Stardrift application: the backdrop in a winit window, or rendered headlessly to PNG.

pub mod frame_clock;
pub mod platform;
pub mod snapshot;
pub mod window;
