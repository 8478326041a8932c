//! huepick-core: pixel sampling, click mapping and pick sessions.
//!
//! Design goal: keep this crate UI-agnostic and host-agnostic.
//! Clipboard, dialogs and text insertion live behind [`HostAdapter`], with
//! concrete hosts in `huepick-platform`.
//!
//! ## Module Structure
//!
//! - `error` - Error types for the core and for host adapters
//! - `color` - RGB color value, hex and `rgb()` formatting
//! - `buffer` - Decoded RGBA pixel buffer
//! - `loader` - Image decoding (raster formats and SVG rasterization)
//! - `sampler` - Color lookup at a pixel coordinate
//! - `mapper` - Display-space click to pixel-space coordinate mapping
//! - `pick` - Pick events and the actions a host can perform with them
//! - `pick_log` - Append-only log of saved picks
//! - `host` - Host adapter trait and notices
//! - `session` - Picker session tying the above together

mod buffer;
mod color;
mod error;
mod host;
mod loader;
mod mapper;
mod pick;
mod pick_log;
mod sampler;
mod session;

pub use buffer::{PixelBuffer, CHANNELS};
pub use color::Color;
pub use error::{HostError, HostResult, PickError, PickResult};
pub use host::{FileFilter, HostAdapter, Notice, NoticeLevel};
pub use loader::{decode, is_supported_path, load, ImageSource, SUPPORTED_EXTENSIONS};
pub use mapper::{map_click_to_pixel, BoundingBox, PixelPosition, ViewportPoint};
pub use pick::{PickAction, PickEvent};
pub use pick_log::{format_line, PickLog, DEFAULT_LOG_FILE};
pub use sampler::sample;
pub use session::{report, PickerSession, Ready, SessionState};
