//! Picker session: one loaded image plus the log its picks are saved to.
//!
//! The session starts out empty. A successful [`PickerSession::initialize`]
//! replaces the buffer wholesale; a failed one leaves the session as it was.
//! Clicks on an empty session are ignored.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::buffer::PixelBuffer;
use crate::host::{FileFilter, HostAdapter, Notice};
use crate::loader::{self, ImageSource};
use crate::mapper::{map_click_to_pixel, BoundingBox, ViewportPoint};
use crate::pick::{PickAction, PickEvent};
use crate::pick_log::PickLog;
use crate::sampler::sample;
use crate::{HostError, PickError, PickResult};

/// Whether an image is available for sampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    Empty,
    Loaded,
}

/// Returned once an image has been loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ready {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug)]
pub struct PickerSession {
    buffer: Option<PixelBuffer>,
    source_name: Option<String>,
    log: PickLog,
}

impl PickerSession {
    pub fn new(log: PickLog) -> Self {
        Self {
            buffer: None,
            source_name: None,
            log,
        }
    }

    pub fn state(&self) -> SessionState {
        if self.buffer.is_some() {
            SessionState::Loaded
        } else {
            SessionState::Empty
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.buffer.is_some()
    }

    pub fn buffer(&self) -> Option<&PixelBuffer> {
        self.buffer.as_ref()
    }

    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.buffer.as_ref().map(|b| (b.width(), b.height()))
    }

    pub fn source_name(&self) -> Option<&str> {
        self.source_name.as_deref()
    }

    pub fn log(&self) -> &PickLog {
        &self.log
    }

    /// Load `source`, replacing any previous image on success.
    pub async fn initialize(&mut self, source: &ImageSource) -> PickResult<Ready> {
        let buffer = loader::load(source).await?;
        let ready = Ready {
            width: buffer.width(),
            height: buffer.height(),
        };
        self.buffer = Some(buffer);
        self.source_name = source.name();
        info!(
            source = ?self.source_name,
            width = ready.width,
            height = ready.height,
            "session ready"
        );
        Ok(ready)
    }

    /// Ask the host for an image file and load it.
    ///
    /// `Ok(None)` when the user dismissed the picker.
    pub async fn initialize_from_picker(
        &mut self,
        host: &dyn HostAdapter,
    ) -> PickResult<Option<Ready>> {
        let Some(path) = host.open_file_picker(&[FileFilter::images()]).await? else {
            debug!("file picker dismissed");
            return Ok(None);
        };
        self.initialize(&ImageSource::Path(path)).await.map(Some)
    }

    /// Resolve a click to a color.
    ///
    /// `None` when no image is loaded, the click is outside the image content,
    /// or the pixel is fully transparent.
    pub fn pick(&self, point: ViewportPoint, bbox: BoundingBox) -> Option<PickEvent> {
        let Some(buffer) = &self.buffer else {
            debug!(?point, "click ignored: no image loaded");
            return None;
        };

        let Some(position) = map_click_to_pixel(point, bbox, buffer.width(), buffer.height())
        else {
            debug!(?point, ?bbox, "click outside image content");
            return None;
        };

        match sample(buffer, position.x, position.y) {
            Ok(Some(color)) => {
                let event = PickEvent::new(color, position);
                debug!(hex = %event.hex, %position, "picked");
                Some(event)
            }
            Ok(None) => {
                debug!(%position, "transparent pixel");
                None
            }
            Err(e) => {
                warn!(error = %e, "mapped position rejected by sampler");
                None
            }
        }
    }

    /// Carry out `action` for `event` through `host`.
    ///
    /// A failed log append is reported to the user as a warning and does not
    /// fail the call; the pick stays available for another action.
    pub async fn apply(
        &self,
        host: &dyn HostAdapter,
        event: &PickEvent,
        action: PickAction,
    ) -> PickResult<()> {
        match action {
            PickAction::Copy => {
                host.write_clipboard(&event.hex).await?;
                host.notify(Notice::info("Color copied to clipboard!")).await;
            }
            PickAction::Save => match self.log.append(&event.hex) {
                Ok(()) => {
                    let msg = format!("Color saved to {}", self.log.file_name());
                    host.notify(Notice::info(msg)).await;
                }
                Err(e) => {
                    warn!(error = %e, "failed to save color");
                    host.notify(Notice::warning("Failed to save color to file"))
                        .await;
                }
            },
            PickAction::Insert => match host.insert_at_cursor(&event.hex).await {
                Ok(()) => {}
                Err(HostError::NoActiveDocument) => {
                    let msg = format!("Color {} - No active editor to insert into", event.hex);
                    host.notify(Notice::info(msg)).await;
                }
                Err(e) => return Err(e.into()),
            },
        }
        Ok(())
    }
}

/// Surface an error to the user through `host`.
pub async fn report(host: &dyn HostAdapter, err: &PickError) {
    let notice = match err {
        PickError::Decode(reason) => Notice::error(format!(
            "Please select a supported image file (PNG, JPG, GIF, BMP, SVG, WebP): {reason}"
        )),
        PickError::SourceNotFound { path, .. } => {
            Notice::error(format!("Image file not found: {}", path.display()))
        }
        PickError::LogAppend { .. } => Notice::warning("Failed to save color to file"),
        other => Notice::error(other.to_string()),
    };
    host.notify(notice).await;
}
