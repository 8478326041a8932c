use crate::{PickError, PickResult};

/// Bytes per pixel: R, G, B, A.
pub const CHANNELS: usize = 4;

/// Decoded raster in straight (non-premultiplied) RGBA8, row-major,
/// top-left origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> PickResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|px| px.checked_mul(CHANNELS))
            .ok_or(PickError::SizeMismatch {
                expected: usize::MAX,
                actual: data.len(),
            })?;

        if data.len() != expected {
            return Err(PickError::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height
    }

    /// Raw RGBA channels at (x, y), or `None` outside the buffer.
    pub fn rgba(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if !self.contains(x, y) {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * CHANNELS;
        let px = self.data.get(idx..idx + CHANNELS)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}
