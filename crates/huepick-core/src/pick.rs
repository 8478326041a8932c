use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::mapper::PixelPosition;

/// Result of resolving one click to one pixel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickEvent {
    pub color: Color,
    pub position: PixelPosition,
    pub hex: String,
}

impl PickEvent {
    pub fn new(color: Color, position: PixelPosition) -> Self {
        Self {
            color,
            position,
            hex: color.to_hex(),
        }
    }

    pub fn rgb(&self) -> String {
        self.color.to_rgb_string()
    }
}

/// What the user wants done with a picked color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PickAction {
    /// Put the hex string on the clipboard.
    Copy,
    /// Append a timestamped line to the pick log.
    Save,
    /// Insert the hex string at the host's text cursor.
    Insert,
}
