//! Boundary between the picker core and whatever presents it to the user.
//!
//! A host displays the image, captures clicks and performs the side effects
//! of a pick (clipboard, file dialogs, text insertion). The core only ever
//! hands it strings.

use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::loader::SUPPORTED_EXTENSIONS;
use crate::HostResult;

/// Severity of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Warning,
    /// Blocking: the user has to act (e.g. pick another file).
    Error,
}

/// Message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Named group of file extensions for a file picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileFilter {
    pub name: String,
    pub extensions: Vec<String>,
}

impl FileFilter {
    /// The "Images" filter covering every loadable extension.
    pub fn images() -> Self {
        Self {
            name: "Images".into(),
            extensions: SUPPORTED_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }

    /// Whether `path` has one of this filter's extensions (case-insensitive).
    pub fn accepts(&self, path: &std::path::Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| self.extensions.iter().any(|x| x.eq_ignore_ascii_case(e)))
            .unwrap_or(false)
    }
}

/// Capabilities a host environment provides to the picker.
#[async_trait]
pub trait HostAdapter: Send + Sync {
    /// Show a notice to the user.
    async fn notify(&self, notice: Notice);

    /// Place `text` on the system clipboard.
    async fn write_clipboard(&self, text: &str) -> HostResult<()>;

    /// Ask the user for a file. `Ok(None)` when the picker was dismissed.
    async fn open_file_picker(&self, filters: &[FileFilter]) -> HostResult<Option<PathBuf>>;

    /// Insert `text` at the active text cursor.
    ///
    /// Returns [`HostError::NoActiveDocument`](crate::HostError::NoActiveDocument)
    /// when there is nothing to insert into.
    async fn insert_at_cursor(&self, text: &str) -> HostResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn image_filter_accepts_supported_files() {
        let filter = FileFilter::images();
        assert_eq!(filter.name, "Images");
        assert!(filter.accepts(Path::new("shot.PNG")));
        assert!(filter.accepts(Path::new("logo.webp")));
        assert!(!filter.accepts(Path::new("doc.pdf")));
        assert!(!filter.accepts(Path::new("Makefile")));
    }
}
