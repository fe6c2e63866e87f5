use strix_common::geometry::PhysicalSize;

/// What a paint delivery contains.
///
/// View paints carry page content and are subject to the resize
/// size-matching check. Overlay paints are transient engine chrome
/// (drag feedback, popups) and are presented without it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintKind {
    View,
    Overlay,
}

/// One frame delivered by the engine. Pixels are tightly packed BGRA,
/// `size.width * size.height * 4` bytes.
#[derive(Clone)]
pub struct Paint {
    pub kind: PaintKind,
    pub size: PhysicalSize,
    pub scale_factor: f64,
    pub pixels: Vec<u8>,
}

impl Paint {
    /// Solid-fill frame of the given color, alpha opaque.
    pub fn solid(kind: PaintKind, size: PhysicalSize, scale_factor: f64, rgb: [u8; 3]) -> Self {
        let count = (size.width.max(0) as usize) * (size.height.max(0) as usize);
        let [r, g, b] = rgb;
        let mut pixels = Vec::with_capacity(count * 4);
        for _ in 0..count {
            pixels.extend_from_slice(&[b, g, r, 0xff]);
        }
        Self {
            kind,
            size,
            scale_factor,
            pixels,
        }
    }
}

impl std::fmt::Debug for Paint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Paint")
            .field("kind", &self.kind)
            .field("size", &self.size)
            .field("scale_factor", &self.scale_factor)
            .field("pixels_len", &self.pixels.len())
            .finish()
    }
}
