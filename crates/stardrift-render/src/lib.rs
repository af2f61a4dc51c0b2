//! wgpu presentation for the starfield backdrop: device and surface management,
//! per-frame encoding, and the canvas blit pipeline.

pub mod gpu;
pub mod pass;
pub mod presenter;

pub use gpu::{RenderContext, RenderContextError, SurfaceError, init_render_context_blocking};
pub use pass::{DEEP_SPACE, FrameEncoder, RenderPassBuilder};
pub use presenter::{
    BACKDROP_SHADER_SOURCE, BACKDROP_TEXTURE_FORMAT, BackdropPresenter, PresentError,
    frame_byte_len,
};
