//! Error types for file-facing processing helpers.
use std::{io, path::PathBuf};

/// Errors that can occur around Markdown processing.
///
/// Rendering itself never fails; malformed input degrades to unchanged
/// output. These errors come from reading sources.
#[derive(Debug, thiserror::Error)]
pub enum MarkdownError {
  #[error("Failed to read file {}: {source}", path.display())]
  Read {
    path:   PathBuf,
    #[source]
    source: io::Error,
  },
}
