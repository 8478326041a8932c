//! Click-to-pixel coordinate mapping.
//!
//! The host reports clicks in display coordinates, relative to the viewport,
//! together with the rectangle the image currently occupies on screen. That
//! rectangle may be scaled relative to the image's native resolution, so the
//! click is first made relative to the rectangle and then scaled by
//! `native / displayed` on each axis.

use serde::{Deserialize, Serialize};

/// Pointer position in viewport (display) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportPoint {
    pub x: f64,
    pub y: f64,
}

impl ViewportPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// On-screen rectangle of the displayed image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Unscaled box at the origin: display coordinates equal pixel coordinates.
    pub fn native(width: u32, height: u32) -> Self {
        Self::new(0.0, 0.0, width as f64, height as f64)
    }

    fn is_usable(&self) -> bool {
        self.left.is_finite()
            && self.top.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0
    }
}

/// Integer pixel coordinate inside a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelPosition {
    pub x: u32,
    pub y: u32,
}

impl PixelPosition {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for PixelPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Map a viewport click onto the source pixel grid.
///
/// Returns `None` when the click lands outside the image content (for example
/// on the element's border or padding) or the box is degenerate.
pub fn map_click_to_pixel(
    click: ViewportPoint,
    bbox: BoundingBox,
    buffer_width: u32,
    buffer_height: u32,
) -> Option<PixelPosition> {
    if !bbox.is_usable() || !click.x.is_finite() || !click.y.is_finite() {
        return None;
    }

    let scale_x = buffer_width as f64 / bbox.width;
    let scale_y = buffer_height as f64 / bbox.height;

    let x = ((click.x - bbox.left) * scale_x).floor();
    let y = ((click.y - bbox.top) * scale_y).floor();

    if x < 0.0 || y < 0.0 || x >= buffer_width as f64 || y >= buffer_height as f64 {
        return None;
    }

    Some(PixelPosition::new(x as u32, y as u32))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_box_maps_directly() {
        let bbox = BoundingBox::native(10, 10);
        assert_eq!(
            map_click_to_pixel(ViewportPoint::new(3.7, 9.2), bbox, 10, 10),
            Some(PixelPosition::new(3, 9))
        );
    }

    #[test]
    fn scaled_and_offset_box() {
        // 400x200 image shown at half size, 20px from the left and 10px down.
        let bbox = BoundingBox::new(20.0, 10.0, 200.0, 100.0);
        assert_eq!(
            map_click_to_pixel(ViewportPoint::new(20.0, 10.0), bbox, 400, 200),
            Some(PixelPosition::new(0, 0))
        );
        assert_eq!(
            map_click_to_pixel(ViewportPoint::new(120.5, 60.25), bbox, 400, 200),
            Some(PixelPosition::new(201, 100))
        );
    }

    #[test]
    fn upscaled_box_truncates() {
        // 2x2 image rendered at 100x100.
        let bbox = BoundingBox::new(0.0, 0.0, 100.0, 100.0);
        assert_eq!(
            map_click_to_pixel(ViewportPoint::new(49.99, 50.0), bbox, 2, 2),
            Some(PixelPosition::new(0, 1))
        );
    }

    #[test]
    fn click_just_inside_right_edge_is_last_index() {
        let bbox = BoundingBox::new(5.0, 0.0, 100.0, 100.0);
        let click = ViewportPoint::new(bbox.left + bbox.width - 0.0001, 0.0);
        assert_eq!(
            map_click_to_pixel(click, bbox, 100, 100),
            Some(PixelPosition::new(99, 0))
        );
    }

    #[test]
    fn clicks_outside_content_are_out_of_range() {
        let bbox = BoundingBox::new(10.0, 10.0, 100.0, 100.0);
        for (x, y) in [(9.9, 50.0), (50.0, 9.9), (110.0, 50.0), (50.0, 110.0)] {
            assert_eq!(
                map_click_to_pixel(ViewportPoint::new(x, y), bbox, 100, 100),
                None,
                "({x}, {y})"
            );
        }
    }

    #[test]
    fn degenerate_inputs_are_out_of_range() {
        let click = ViewportPoint::new(0.0, 0.0);
        assert_eq!(map_click_to_pixel(click, BoundingBox::new(0.0, 0.0, 0.0, 10.0), 10, 10), None);
        assert_eq!(map_click_to_pixel(click, BoundingBox::new(0.0, 0.0, -4.0, 10.0), 10, 10), None);
        assert_eq!(map_click_to_pixel(click, BoundingBox::native(10, 10), 0, 10), None);
        assert_eq!(
            map_click_to_pixel(ViewportPoint::new(f64::NAN, 1.0), BoundingBox::native(10, 10), 10, 10),
            None
        );
    }

    #[test]
    fn mapping_is_idempotent() {
        let click = ViewportPoint::new(33.3, 71.9);
        let bbox = BoundingBox::new(1.5, 2.5, 87.0, 91.0);
        let first = map_click_to_pixel(click, bbox, 640, 480);
        let second = map_click_to_pixel(click, bbox, 640, 480);
        assert_eq!(first, second);
        assert!(first.is_some());
    }
}
