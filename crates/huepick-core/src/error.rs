//! Common error types for huepick-core.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading, sampling or acting on a pick.
#[derive(Debug, Error)]
pub enum PickError {
    #[error("cannot decode image: {0}")]
    Decode(String),
    #[error("image file not found: {}", path.display())]
    SourceNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("pixel ({x}, {y}) is outside the {width}x{height} buffer")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
    #[error("size mismatch: expected {expected} bytes, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },
    #[error("failed to append to {}: {source}", path.display())]
    LogAppend {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("host error: {0}")]
    Host(#[from] HostError),
}

/// Result type for core operations.
pub type PickResult<T> = Result<T, PickError>;

/// Errors reported by a host adapter.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("no active document to insert into")]
    NoActiveDocument,
    #[error("host capability unavailable: {0}")]
    Unavailable(String),
    #[error("cursor offset {offset} is not on a character boundary")]
    InvalidCursor { offset: usize },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for host adapter operations.
pub type HostResult<T> = Result<T, HostError>;
