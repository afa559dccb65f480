//! Markdown processing module with modular organization.
//!
//! # Architecture
//!
//! The processor module is organized into focused submodules:
//!
//! - [`core`]: Main processor implementation and processing pipeline
//! - [`process`]: High-level processing functions with error recovery
//! - [`types`]: Core type definitions, configuration structures and the tree
//!   pass traits
pub mod core;
pub mod process;
pub mod types;

pub use core::collect_markdown_files;

pub use process::{
  ProcessorPreset,
  create_processor,
  process_batch,
  process_markdown_file,
  process_markdown_string,
  process_with_recovery,
};
pub use types::{
  HastTransformer,
  MarkdownOptions,
  MarkdownOptionsBuilder,
  MarkdownProcessor,
  MdastTransformer,
};
