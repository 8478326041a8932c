//! Pixel color reading from a loaded buffer.

use crate::buffer::PixelBuffer;
use crate::color::Color;
use crate::{PickError, PickResult};

/// Read the color at (x, y).
///
/// Returns `Ok(None)` for a fully transparent pixel. Partial alpha is ignored
/// and the stored RGB triple is returned as-is. Coordinates outside the buffer
/// are a caller bug and yield [`PickError::OutOfBounds`].
pub fn sample(buffer: &PixelBuffer, x: u32, y: u32) -> PickResult<Option<Color>> {
    let [r, g, b, a] = buffer.rgba(x, y).ok_or(PickError::OutOfBounds {
        x,
        y,
        width: buffer.width(),
        height: buffer.height(),
    })?;

    if a == 0 {
        return Ok(None);
    }

    Ok(Some(Color::new(r, g, b)))
}
