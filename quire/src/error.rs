use std::io;

use thiserror::Error;

/// Top-level error type for the quire crate.
#[derive(Debug, Error)]
pub enum QuireError {
  #[error("Configuration error: {0}")]
  Config(String),

  #[error("I/O error: {0}")]
  Io(#[from] io::Error),

  #[error(transparent)]
  Markdown(#[from] quire_commonmark::MarkdownError),

  #[error("Thread pool error: {0}")]
  ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
