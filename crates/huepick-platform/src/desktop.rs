//! Host adapter backed by native dialogs (`rfd`) and the system clipboard
//! (`arboard`). Enabled with the `desktop` feature.

use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;
use huepick_core::{FileFilter, HostAdapter, HostError, HostResult, Notice, NoticeLevel};
use rfd::{AsyncFileDialog, AsyncMessageDialog, MessageLevel};
use tracing::{debug, warn};

use crate::cursor::DocumentCursor;

pub struct DesktopHost {
    /// Kept alive so the selection survives on X11 after `set_text`.
    clipboard: Mutex<Option<arboard::Clipboard>>,
    document: Option<DocumentCursor>,
}

impl DesktopHost {
    pub fn new() -> Self {
        Self {
            clipboard: Mutex::new(None),
            document: None,
        }
    }

    pub fn with_document(mut self, cursor: DocumentCursor) -> Self {
        self.document = Some(cursor);
        self
    }
}

impl Default for DesktopHost {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HostAdapter for DesktopHost {
    async fn notify(&self, notice: Notice) {
        let level = match notice.level {
            NoticeLevel::Info => MessageLevel::Info,
            NoticeLevel::Warning => MessageLevel::Warning,
            NoticeLevel::Error => MessageLevel::Error,
        };
        AsyncMessageDialog::new()
            .set_level(level)
            .set_title("Image Color Picker")
            .set_description(notice.message)
            .show()
            .await;
    }

    async fn write_clipboard(&self, text: &str) -> HostResult<()> {
        let mut slot = self
            .clipboard
            .lock()
            .map_err(|_| HostError::Unavailable("clipboard lock poisoned".into()))?;
        if slot.is_none() {
            let clipboard = arboard::Clipboard::new()
                .map_err(|e| HostError::Unavailable(format!("clipboard: {e}")))?;
            *slot = Some(clipboard);
        }
        let Some(clipboard) = slot.as_mut() else {
            return Err(HostError::Unavailable("clipboard".into()));
        };
        clipboard.set_text(text).map_err(|e| {
            warn!(error = %e, "clipboard write failed");
            HostError::Unavailable(format!("clipboard: {e}"))
        })?;
        debug!(text, "copied to clipboard");
        Ok(())
    }

    async fn open_file_picker(&self, filters: &[FileFilter]) -> HostResult<Option<PathBuf>> {
        let mut dialog = AsyncFileDialog::new().set_title("Select Image File");
        for filter in filters {
            dialog = dialog.add_filter(filter.name.as_str(), &filter.extensions[..]);
        }
        let picked = dialog.pick_file().await;
        Ok(picked.map(|handle| handle.path().to_path_buf()))
    }

    async fn insert_at_cursor(&self, text: &str) -> HostResult<()> {
        match &self.document {
            Some(cursor) => cursor.insert(text).await,
            None => Err(HostError::NoActiveDocument),
        }
    }
}
