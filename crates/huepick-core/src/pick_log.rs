//! Append-only log of picked colors.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::{PickError, PickResult};

/// Default log file name, placed in the host's workspace directory.
pub const DEFAULT_LOG_FILE: &str = "picked-colors.txt";

/// ISO-8601 UTC with millisecond precision, e.g. `2026-10-18T09:44:00.123Z`.
const TIMESTAMP: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z");

/// Handle to the file picks are appended to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickLog {
    path: PathBuf,
}

impl PickLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Log file named [`DEFAULT_LOG_FILE`] inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(DEFAULT_LOG_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name for user-facing messages.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    /// Append `hex` stamped with the current time.
    pub fn append(&self, hex: &str) -> PickResult<()> {
        self.append_at(hex, OffsetDateTime::now_utc())
    }

    /// Append `hex` stamped with `at` (converted to UTC).
    pub fn append_at(&self, hex: &str, at: OffsetDateTime) -> PickResult<()> {
        let line = format_line(hex, at);
        self.write_line(&line).map_err(|err| PickError::LogAppend {
            path: self.path.clone(),
            source: err,
        })?;
        info!(path = ?self.path, hex, "saved color");
        Ok(())
    }

    fn write_line(&self, line: &str) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
                debug!(?parent, "created log directory");
            }
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())
    }
}

/// Format one log line: `"<timestamp>: <hex>\n"`.
pub fn format_line(hex: &str, at: OffsetDateTime) -> String {
    let stamp = at
        .to_offset(time::UtcOffset::UTC)
        .format(TIMESTAMP)
        .unwrap_or_else(|_| at.unix_timestamp().to_string());
    format!("{stamp}: {hex}\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_format_line() {
        let at = datetime!(2026-10-18 09:44:00.1234 UTC);
        assert_eq!(format_line("#ff0000", at), "2026-10-18T09:44:00.123Z: #ff0000\n");
    }

    #[test]
    fn test_format_line_converts_to_utc() {
        let at = datetime!(2026-10-18 11:00:00 +02:00);
        assert_eq!(format_line("#000000", at), "2026-10-18T09:00:00.000Z: #000000\n");
    }

    #[test]
    fn test_append_accumulates() {
        let dir = tempfile::tempdir().unwrap();
        let log = PickLog::in_dir(dir.path().join("nested"));

        log.append_at("#ff0000", datetime!(2026-01-02 03:04:05 UTC)).unwrap();
        log.append("#00ff00").unwrap();

        let content = fs::read_to_string(log.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "2026-01-02T03:04:05.000Z: #ff0000");
        assert!(lines[1].ends_with("Z: #00ff00"));
        assert_eq!(lines[1].len(), "2026-01-02T03:04:05.000Z: #00ff00".len());
        assert!(content.ends_with('\n'));
    }

    #[test]
    fn test_append_failure_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be opened for appending.
        let log = PickLog::new(dir.path());
        let err = log.append("#123456").unwrap_err();
        assert!(matches!(err, PickError::LogAppend { .. }));
    }

    #[test]
    fn test_file_name() {
        assert_eq!(PickLog::in_dir("/tmp/ws").file_name(), DEFAULT_LOG_FILE);
    }
}
