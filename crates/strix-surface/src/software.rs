//! CPU-backed surface holding the last presented frame.
//!
//! This is the surface used by the windowed and headless front-ends
//! alike: engine paints already arrive as raw pixel buffers, so
//! presentation is a copy and screenshots are an encode of whatever
//! was shown last.

use strix_common::geometry::PhysicalSize;
use tracing::debug;

use crate::screenshot::encode_bgra_png;
use crate::{RenderSurface, SurfaceError};

/// One BGRA frame as delivered by the engine.
struct Frame {
    size: PhysicalSize,
    pixels: Vec<u8>,
}

pub struct SoftwareSurface {
    ready: bool,
    view_size: PhysicalSize,
    neutral_rgb: [u8; 3],
    frame: Option<Frame>,
    frames_presented: u64,
}

impl SoftwareSurface {
    pub fn new(neutral_rgb: [u8; 3]) -> Self {
        Self {
            ready: false,
            view_size: PhysicalSize::new(0, 0),
            neutral_rgb,
            frame: None,
            frames_presented: 0,
        }
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// Size of the frame currently held, if any.
    pub fn frame_size(&self) -> Option<PhysicalSize> {
        self.frame.as_ref().map(|f| f.size)
    }

    fn neutral_frame(&self, size: PhysicalSize) -> Vec<u8> {
        let [r, g, b] = self.neutral_rgb;
        let count = (size.width.max(0) as usize) * (size.height.max(0) as usize);
        let mut pixels = Vec::with_capacity(count * 4);
        for _ in 0..count {
            pixels.extend_from_slice(&[b, g, r, 0xff]);
        }
        pixels
    }
}

impl RenderSurface for SoftwareSurface {
    fn initialize(&mut self) -> Result<(), SurfaceError> {
        self.ready = true;
        Ok(())
    }

    fn is_ready(&self) -> bool {
        self.ready
    }

    fn set_view_size(&mut self, size: PhysicalSize) {
        self.view_size = size;
    }

    fn upload_frame(&mut self, size: PhysicalSize, pixels: &[u8]) {
        if !self.ready {
            debug!("frame upload before surface init, dropping");
            return;
        }
        self.frame = Some(Frame {
            size,
            pixels: pixels.to_vec(),
        });
    }

    fn clear_to_neutral(&mut self) {
        self.frame = None;
    }

    fn render(&mut self) -> Result<(), SurfaceError> {
        if !self.ready {
            return Err(SurfaceError::NotInitialized);
        }
        self.frames_presented += 1;
        Ok(())
    }

    fn cleanup(&mut self) {
        self.ready = false;
        self.frame = None;
    }

    fn take_screenshot(&self) -> Result<Vec<u8>, SurfaceError> {
        if !self.ready {
            return Err(SurfaceError::NotInitialized);
        }
        match &self.frame {
            Some(frame) => encode_bgra_png(
                frame.size.width.max(0) as u32,
                frame.size.height.max(0) as u32,
                &frame.pixels,
            ),
            // No content yet: a neutral backdrop at the view size is
            // what the user is looking at.
            None => {
                if self.view_size.width <= 0 || self.view_size.height <= 0 {
                    return Err(SurfaceError::NoFrame);
                }
                let pixels = self.neutral_frame(self.view_size);
                encode_bgra_png(
                    self.view_size.width as u32,
                    self.view_size.height as u32,
                    &pixels,
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn ready_surface() -> SoftwareSurface {
        let mut surface = SoftwareSurface::new([0x1e, 0x1e, 0x1e]);
        surface.initialize().unwrap();
        surface
    }

    #[test]
    fn render_before_initialize_fails() {
        let mut surface = SoftwareSurface::new([0, 0, 0]);
        assert!(matches!(
            surface.render(),
            Err(SurfaceError::NotInitialized)
        ));
        surface.initialize().unwrap();
        assert!(surface.render().is_ok());
        assert_eq!(surface.frames_presented(), 1);
    }

    #[test]
    fn screenshot_returns_uploaded_frame() {
        let mut surface = ready_surface();
        // 1x1 pure green in BGRA.
        surface.upload_frame(PhysicalSize::new(1, 1), &[0x00, 0xff, 0x00, 0xff]);

        let png = surface.take_screenshot().unwrap();
        let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (1, 1));
        assert_eq!(decoded.get_pixel(0, 0), &Rgba([0x00, 0xff, 0x00, 0xff]));
    }

    #[test]
    fn clear_to_neutral_falls_back_to_backdrop() {
        let mut surface = ready_surface();
        surface.set_view_size(PhysicalSize::new(2, 2));
        surface.upload_frame(PhysicalSize::new(2, 2), &[0xffu8; 16]);
        surface.clear_to_neutral();

        let png = surface.take_screenshot().unwrap();
        let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
        assert_eq!(decoded.get_pixel(0, 0), &Rgba([0x1e, 0x1e, 0x1e, 0xff]));
    }

    #[test]
    fn screenshot_without_frame_or_view_size_fails() {
        let surface = ready_surface();
        assert!(matches!(
            surface.take_screenshot(),
            Err(SurfaceError::NoFrame)
        ));
    }

    #[test]
    fn upload_before_initialize_is_dropped() {
        let mut surface = SoftwareSurface::new([0, 0, 0]);
        surface.upload_frame(PhysicalSize::new(1, 1), &[0u8; 4]);
        assert!(surface.frame_size().is_none());
    }

    #[test]
    fn cleanup_is_idempotent_and_drops_frame() {
        let mut surface = ready_surface();
        surface.upload_frame(PhysicalSize::new(1, 1), &[0u8; 4]);
        surface.cleanup();
        surface.cleanup();
        assert!(!surface.is_ready());
        assert!(surface.frame_size().is_none());
    }
}
