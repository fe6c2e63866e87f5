//! PNG encoding of raw engine frames.

use image::{ImageBuffer, ImageFormat, Rgba};

use crate::SurfaceError;

/// Encodes a BGRA pixel buffer as a PNG image.
///
/// Engine paints arrive in BGRA byte order; PNG wants RGBA, so the red
/// and blue channels are swapped during the copy.
pub fn encode_bgra_png(width: u32, height: u32, bgra: &[u8]) -> Result<Vec<u8>, SurfaceError> {
    if width == 0 || height == 0 {
        return Err(SurfaceError::NoFrame);
    }
    let expected = (width as usize) * (height as usize) * 4;
    if bgra.len() < expected {
        return Err(SurfaceError::Encode(format!(
            "buffer holds {} bytes, frame needs {}",
            bgra.len(),
            expected
        )));
    }

    let mut img: ImageBuffer<Rgba<u8>, Vec<u8>> = ImageBuffer::new(width, height);
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        let idx = ((y * width + x) * 4) as usize;
        *pixel = Rgba([bgra[idx + 2], bgra[idx + 1], bgra[idx], bgra[idx + 3]]);
    }

    let mut out = Vec::new();
    img.write_to(&mut std::io::Cursor::new(&mut out), ImageFormat::Png)
        .map_err(|e| SurfaceError::Encode(e.to_string()))?;
    Ok(out)
}
