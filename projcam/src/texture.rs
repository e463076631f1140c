//! RGBA texture buffers, sampling, and blending
//!
//! [`TextureBuffer`] is the owned raster type on both ends of a bake: the
//! source image is sampled bilinearly, the target is mutated texel by texel.
//! Row-major RGBA8, row 0 at the top of the image; UV space has V=0 at the
//! bottom, so the bake maps `v -> (1 - v)` when addressing rows.

use crate::error::BakeError;

/// RGBA raster buffer
#[derive(Debug, Clone, PartialEq)]
pub struct TextureBuffer {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// RGBA pixel data (4 bytes per pixel, row-major order)
    pub pixels: Vec<u8>,
}

impl TextureBuffer {
    /// Create a new texture buffer initialized to transparent black
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0u8; (width as usize) * (height as usize) * 4],
        }
    }

    /// Create a texture buffer filled with a solid color
    pub fn filled(width: u32, height: u32, color: [u8; 4]) -> Self {
        let mut buffer = Self::new(width, height);
        for chunk in buffer.pixels.chunks_exact_mut(4) {
            chunk.copy_from_slice(&color);
        }
        buffer
    }

    /// Fail with [`BakeError::InvalidSourceImage`] unless the buffer is
    /// non-empty and its pixel data matches its dimensions
    pub fn require_readable(&self) -> Result<(), BakeError> {
        let expected = (self.width as usize) * (self.height as usize) * 4;
        if self.width == 0 || self.height == 0 || self.pixels.len() != expected {
            return Err(BakeError::InvalidSourceImage {
                width: self.width,
                height: self.height,
                bytes: self.pixels.len(),
            });
        }
        Ok(())
    }

    /// Get pixel at (x, y)
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = ((y * self.width + x) * 4) as usize;
        [
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ]
    }

    /// Set pixel at (x, y)
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, color: [u8; 4]) {
        let idx = ((y * self.width + x) * 4) as usize;
        self.pixels[idx..idx + 4].copy_from_slice(&color);
    }

    /// Bilinear sample at continuous image coordinates, u/v in [0,1]
    ///
    /// u runs left to right, v top to bottom (image orientation). Edges are
    /// clamped, so sampling exactly on the border repeats the border pixel.
    pub fn sample_bilinear(&self, u: f32, v: f32) -> [f32; 4] {
        let fx = (u * self.width as f32 - 0.5).clamp(0.0, self.width as f32 - 1.0);
        let fy = (v * self.height as f32 - 0.5).clamp(0.0, self.height as f32 - 1.0);
        let x0 = fx.floor() as u32;
        let y0 = fy.floor() as u32;
        let x1 = (x0 + 1).min(self.width - 1);
        let y1 = (y0 + 1).min(self.height - 1);
        let tx = fx - x0 as f32;
        let ty = fy - y0 as f32;

        let p00 = self.get_pixel(x0, y0);
        let p10 = self.get_pixel(x1, y0);
        let p01 = self.get_pixel(x0, y1);
        let p11 = self.get_pixel(x1, y1);

        let mut out = [0.0f32; 4];
        for c in 0..4 {
            let top = p00[c] as f32 + (p10[c] as f32 - p00[c] as f32) * tx;
            let bottom = p01[c] as f32 + (p11[c] as f32 - p01[c] as f32) * tx;
            out[c] = top + (bottom - top) * ty;
        }
        out
    }
}

/// How a projected sample is composited against existing texel content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    /// Replace the texel with the projected sample
    #[default]
    Overwrite,
    /// Weight the sample by its distance to the projection silhouette and the
    /// surface's incidence angle, fading out toward seams
    AlphaFalloff,
}

/// Linear blend of two RGBA8 colors, `t` in [0,1]
#[inline]
pub fn lerp_rgba(a: [u8; 4], b: [f32; 4], t: f32) -> [u8; 4] {
    let mut out = [0u8; 4];
    for c in 0..4 {
        out[c] = (a[c] as f32 + (b[c] - a[c] as f32) * t)
            .round()
            .clamp(0.0, 255.0) as u8;
    }
    out
}

/// Checkerboard test pattern
pub fn checker(width: u32, height: u32, cell: u32, a: [u8; 4], b: [u8; 4]) -> TextureBuffer {
    let mut buffer = TextureBuffer::new(width, height);
    let cell = cell.max(1);
    for y in 0..height {
        for x in 0..width {
            let color = if ((x / cell) + (y / cell)) % 2 == 0 { a } else { b };
            buffer.set_pixel(x, y, color);
        }
    }
    buffer
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_readable() {
        assert!(TextureBuffer::new(4, 4).require_readable().is_ok());
        assert!(TextureBuffer::new(0, 4).require_readable().is_err());

        let mut truncated = TextureBuffer::new(4, 4);
        truncated.pixels.pop();
        assert!(matches!(
            truncated.require_readable(),
            Err(BakeError::InvalidSourceImage { width: 4, height: 4, .. })
        ));
    }

    #[test]
    fn test_sample_bilinear_center_exact() {
        let mut tex = TextureBuffer::new(2, 2);
        tex.set_pixel(0, 0, [100, 0, 0, 255]);
        tex.set_pixel(1, 0, [200, 0, 0, 255]);
        tex.set_pixel(0, 1, [0, 0, 0, 255]);
        tex.set_pixel(1, 1, [0, 0, 0, 255]);

        // Sampling at a texel center returns that texel exactly
        let s = tex.sample_bilinear(0.25, 0.25);
        assert!((s[0] - 100.0).abs() < 1e-3);

        // Midway between the two top texels
        let mid = tex.sample_bilinear(0.5, 0.25);
        assert!((mid[0] - 150.0).abs() < 1e-3);
    }

    #[test]
    fn test_sample_bilinear_clamps_edges() {
        let tex = TextureBuffer::filled(2, 2, [10, 20, 30, 40]);
        for (u, v) in [(0.0, 0.0), (1.0, 1.0), (-0.5, 0.5), (0.5, 1.5)] {
            let s = tex.sample_bilinear(u, v);
            assert_eq!(s.map(|c| c.round() as u8), [10, 20, 30, 40]);
        }
    }

    #[test]
    fn test_lerp_rgba() {
        let out = lerp_rgba([0, 0, 0, 0], [255.0, 100.0, 0.0, 255.0], 0.5);
        assert_eq!(out, [128, 50, 0, 128]);
        assert_eq!(lerp_rgba([7, 7, 7, 7], [255.0; 4], 0.0), [7, 7, 7, 7]);
    }

    #[test]
    fn test_checker_pattern() {
        let tex = checker(8, 8, 4, [255; 4], [0, 0, 0, 255]);
        assert_eq!(tex.get_pixel(0, 0), [255; 4]);
        assert_eq!(tex.get_pixel(4, 0), [0, 0, 0, 255]);
        assert_eq!(tex.get_pixel(4, 4), [255; 4]);
    }
}
