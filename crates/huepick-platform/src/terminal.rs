//! Host adapter for a terminal session.
//!
//! - Notices go to stderr (and the log)
//! - The clipboard is set through the OSC 52 escape sequence, which most
//!   terminal emulators forward to the system clipboard
//! - The file picker is a line prompt
//! - Escape sequences and prompts go to a control stream (stderr), keeping
//!   the output stream to one result per line
//! - Text is inserted into a [`DocumentCursor`] when one is configured

use std::path::PathBuf;

use async_trait::async_trait;
use base64::Engine;
use huepick_core::{FileFilter, HostAdapter, HostError, HostResult, Notice, NoticeLevel};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::cursor::DocumentCursor;

type Input = Box<dyn AsyncBufRead + Unpin + Send>;
type Output = Box<dyn AsyncWrite + Unpin + Send>;

pub struct TerminalHost {
    input: Mutex<Input>,
    output: Mutex<Output>,
    control: Mutex<Output>,
    document: Option<DocumentCursor>,
}

impl TerminalHost {
    /// `output` receives result lines; `control` receives clipboard escape
    /// sequences and prompts.
    pub fn new(
        input: impl AsyncBufRead + Unpin + Send + 'static,
        output: impl AsyncWrite + Unpin + Send + 'static,
        control: impl AsyncWrite + Unpin + Send + 'static,
    ) -> Self {
        Self {
            input: Mutex::new(Box::new(input)),
            output: Mutex::new(Box::new(output)),
            control: Mutex::new(Box::new(control)),
            document: None,
        }
    }

    /// Host bound to stdin, stdout and stderr.
    pub fn stdio() -> Self {
        Self::new(
            BufReader::new(tokio::io::stdin()),
            tokio::io::stdout(),
            tokio::io::stderr(),
        )
    }

    /// Insert picks into `cursor`'s document.
    pub fn with_document(mut self, cursor: DocumentCursor) -> Self {
        self.document = Some(cursor);
        self
    }

    pub fn document(&self) -> Option<&DocumentCursor> {
        self.document.as_ref()
    }

    /// Next input line without its line ending. `None` at end of input.
    pub async fn read_line(&self) -> HostResult<Option<String>> {
        let mut input = self.input.lock().await;
        let mut line = String::new();
        if input.read_line(&mut line).await? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    /// Write `text` followed by a newline and flush.
    pub async fn write_line(&self, text: &str) -> HostResult<()> {
        let mut output = self.output.lock().await;
        output.write_all(text.as_bytes()).await?;
        output.write_all(b"\n").await?;
        output.flush().await?;
        Ok(())
    }

    async fn write_control(&self, text: &str) -> HostResult<()> {
        let mut control = self.control.lock().await;
        control.write_all(text.as_bytes()).await?;
        control.flush().await?;
        Ok(())
    }
}

/// OSC 52 "set clipboard" sequence carrying `text`.
pub fn osc52_sequence(text: &str) -> String {
    let payload = base64::engine::general_purpose::STANDARD.encode(text);
    format!("\x1b]52;c;{payload}\x07")
}

fn prompt_for(filters: &[FileFilter]) -> String {
    let exts: Vec<&str> = filters
        .iter()
        .flat_map(|f| f.extensions.iter().map(String::as_str))
        .collect();
    if exts.is_empty() {
        "File: ".to_string()
    } else {
        format!("Image file ({}): ", exts.join(", "))
    }
}

/// Turn a typed answer into a path. Surrounding quotes are stripped, as left
/// behind by drag-and-drop into a terminal.
fn parse_answer(answer: &str) -> Option<PathBuf> {
    let answer = answer.trim();
    let answer = answer
        .strip_prefix(['"', '\''])
        .and_then(|a| a.strip_suffix(['"', '\'']))
        .unwrap_or(answer);
    if answer.is_empty() {
        None
    } else {
        Some(PathBuf::from(answer))
    }
}

#[async_trait]
impl HostAdapter for TerminalHost {
    async fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Info => info!(message = %notice.message, "notice"),
            NoticeLevel::Warning => warn!(message = %notice.message, "notice"),
            NoticeLevel::Error => error!(message = %notice.message, "notice"),
        }
        let tag = match notice.level {
            NoticeLevel::Info => "info",
            NoticeLevel::Warning => "warning",
            NoticeLevel::Error => "error",
        };
        eprintln!("{tag}: {}", notice.message);
    }

    async fn write_clipboard(&self, text: &str) -> HostResult<()> {
        self.write_control(&osc52_sequence(text)).await
    }

    async fn open_file_picker(&self, filters: &[FileFilter]) -> HostResult<Option<PathBuf>> {
        let prompt = prompt_for(filters);
        loop {
            self.write_control(&prompt).await?;
            let Some(line) = self.read_line().await? else {
                return Ok(None);
            };
            let Some(path) = parse_answer(&line) else {
                return Ok(None);
            };
            if filters.is_empty() || filters.iter().any(|f| f.accepts(&path)) {
                return Ok(Some(path));
            }
            self.write_control(&format!("not a supported file: {}\n", path.display()))
                .await?;
        }
    }

    async fn insert_at_cursor(&self, text: &str) -> HostResult<()> {
        match &self.document {
            Some(cursor) => cursor.insert(text).await,
            None => Err(HostError::NoActiveDocument),
        }
    }
}
