//! Type definitions for the Markdown processor.
//!
//! Contains all the core types used by the processor, including:
//! - Configuration options (`MarkdownOptions`)
//! - The main processor struct (`MarkdownProcessor`)
//! - The tree pass traits (`MdastTransformer`, `HastTransformer`)
//!
//! # Examples
//!
//! ```
//! use quire_commonmark::{MarkdownOptions, MarkdownProcessor};
//!
//! let options = MarkdownOptions {
//!   own_domain: Some("example.com".to_string()),
//!   ..Default::default()
//! };
//!
//! let processor = MarkdownProcessor::new(options);
//! ```
use std::sync::Arc;

use crate::{hast, mdast};

/// Options for configuring the Markdown processor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownOptions {
  /// Enable GitHub Flavored Markdown (GFM) extensions.
  pub gfm: bool,

  /// Domain of the site being built. Absolute links that do not mention it
  /// are external. Without one every absolute link is external.
  pub own_domain: Option<String>,

  /// Open external links in a new tab.
  pub external_links: bool,

  /// Turn credit comments after images into captioned figures.
  pub image_credits: bool,
}

impl MarkdownOptions {
  /// Enable all available features based on compile-time feature flags.
  #[must_use]
  pub const fn with_all_features() -> Self {
    Self {
      gfm:            cfg!(feature = "gfm"),
      own_domain:     None,
      external_links: true,
      image_credits:  true,
    }
  }

  /// Own domain to classify links against; empty when none is configured.
  #[must_use]
  pub fn own_domain(&self) -> &str {
    self.own_domain.as_deref().unwrap_or_default()
  }
}

impl Default for MarkdownOptions {
  fn default() -> Self {
    Self::with_all_features()
  }
}

/// Main Markdown processor.
///
/// Can be cheaply cloned and shared between threads; passes are held behind
/// `Arc` and carry no per-document state.
#[derive(Clone)]
pub struct MarkdownProcessor {
  pub(crate) options:         MarkdownOptions,
  pub(crate) document_passes: Vec<Arc<dyn MdastTransformer + Send + Sync>>,
  pub(crate) render_passes:   Vec<Arc<dyn HastTransformer + Send + Sync>>,
}

/// A pass over the document tree, run between parsing and compilation.
pub trait MdastTransformer {
  fn transform(&self, tree: &mut mdast::Node);
}

/// A pass over the render tree, run between compilation and serialization.
pub trait HastTransformer {
  fn transform(&self, tree: &mut hast::Node);
}

/// Builder for constructing `MarkdownOptions` with method chaining.
#[derive(Debug, Clone)]
pub struct MarkdownOptionsBuilder {
  options: MarkdownOptions,
}

impl MarkdownOptionsBuilder {
  /// Create a new builder with default options.
  #[must_use]
  pub fn new() -> Self {
    Self {
      options: MarkdownOptions::default(),
    }
  }

  /// Enable or disable GitHub Flavored Markdown.
  #[must_use]
  pub const fn gfm(mut self, enabled: bool) -> Self {
    self.options.gfm = enabled;
    self
  }

  /// Set the own domain used to classify links.
  #[must_use]
  pub fn own_domain<S: Into<String>>(mut self, domain: Option<S>) -> Self {
    self.options.own_domain = domain.map(Into::into);
    self
  }

  /// Enable or disable external link annotation.
  #[must_use]
  pub const fn external_links(mut self, enabled: bool) -> Self {
    self.options.external_links = enabled;
    self
  }

  /// Enable or disable image credit figures.
  #[must_use]
  pub const fn image_credits(mut self, enabled: bool) -> Self {
    self.options.image_credits = enabled;
    self
  }

  /// Build the final `MarkdownOptions`.
  #[must_use]
  pub fn build(self) -> MarkdownOptions {
    self.options
  }
}

impl Default for MarkdownOptionsBuilder {
  fn default() -> Self {
    Self::new()
  }
}
