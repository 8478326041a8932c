//! huepick-platform: host adapters for huepick.
//!
//! This crate provides:
//! - `TerminalHost` for command line use (OSC 52 clipboard, prompt-based file picker)
//! - `DesktopHost` with native dialogs and the system clipboard (`desktop` feature)
//! - `DocumentCursor` for inserting picked colors into a text file
//!
//! ## Module Structure
//!
//! - `cursor` - Text insertion at a byte offset
//! - `terminal` - Terminal host adapter
//! - `desktop` - Desktop host adapter

mod cursor;
mod terminal;

#[cfg(feature = "desktop")]
mod desktop;

pub use cursor::DocumentCursor;
pub use terminal::{osc52_sequence, TerminalHost};

#[cfg(feature = "desktop")]
pub use desktop::DesktopHost;
