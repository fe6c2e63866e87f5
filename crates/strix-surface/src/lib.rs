//! Rendering surfaces for tab content.
//!
//! A [`RenderSurface`] is the per-tab drawing target the shell hands
//! engine frames to. The engine paints into raw BGRA buffers; the
//! surface owns presentation and can encode its current contents as a
//! PNG for screenshots. Surfaces are created and destroyed on the UI
//! thread and never cross threads.

pub mod screenshot;
pub mod software;

pub use screenshot::encode_bgra_png;
pub use software::SoftwareSurface;

use strix_common::geometry::PhysicalSize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("surface initialization failed: {0}")]
    Init(String),

    #[error("surface is not initialized")]
    NotInitialized,

    #[error("no frame content available")]
    NoFrame,

    #[error("frame encoding failed: {0}")]
    Encode(String),
}

/// Drawing target for one tab's content.
///
/// The shell calls [`upload_frame`](RenderSurface::upload_frame) when a
/// paint is accepted for presentation and
/// [`clear_to_neutral`](RenderSurface::clear_to_neutral) when a stale
/// paint is discarded, so the user sees a solid backdrop instead of
/// misscaled content during a resize.
pub trait RenderSurface {
    /// Acquires whatever backing resources the surface needs. Must be
    /// called before any frame is uploaded.
    fn initialize(&mut self) -> Result<(), SurfaceError>;

    /// True once `initialize` has succeeded and `cleanup` has not run.
    fn is_ready(&self) -> bool;

    /// Updates the surface's view size in physical pixels.
    fn set_view_size(&mut self, size: PhysicalSize);

    /// Replaces the surface contents with a BGRA frame of the given
    /// pixel size. The buffer must hold `width * height * 4` bytes.
    fn upload_frame(&mut self, size: PhysicalSize, pixels: &[u8]);

    /// Drops the current frame and shows the neutral backdrop.
    fn clear_to_neutral(&mut self);

    /// Presents the current contents.
    fn render(&mut self) -> Result<(), SurfaceError>;

    /// Releases backing resources. Safe to call more than once.
    fn cleanup(&mut self);

    /// Encodes the current contents as PNG bytes.
    fn take_screenshot(&self) -> Result<Vec<u8>, SurfaceError>;
}
