//! Text insertion into a document on disk at a byte offset.

use std::path::{Path, PathBuf};

use huepick_core::{HostError, HostResult};
use tokio::sync::Mutex;
use tracing::debug;

/// Insertion point in a text file. The offset advances past each insert so
/// repeated inserts read in order.
#[derive(Debug)]
pub struct DocumentCursor {
    path: PathBuf,
    offset: Mutex<usize>,
}

impl DocumentCursor {
    pub fn new(path: impl Into<PathBuf>, offset: usize) -> Self {
        Self {
            path: path.into(),
            offset: Mutex::new(offset),
        }
    }

    /// Cursor at the end of the document.
    pub fn at_end(path: impl Into<PathBuf>) -> Self {
        Self::new(path, usize::MAX)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn offset(&self) -> usize {
        *self.offset.lock().await
    }

    /// Insert `text` at the cursor. A missing file is created; an offset past
    /// the end appends.
    pub async fn insert(&self, text: &str) -> HostResult<()> {
        let mut offset = self.offset.lock().await;

        let mut content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
            Err(e) => return Err(e.into()),
        };

        let at = (*offset).min(content.len());
        if !content.is_char_boundary(at) {
            return Err(HostError::InvalidCursor { offset: at });
        }
        content.insert_str(at, text);
        tokio::fs::write(&self.path, content).await?;

        *offset = at + text.len();
        debug!(path = ?self.path, at, text, "inserted text");
        Ok(())
    }
}
