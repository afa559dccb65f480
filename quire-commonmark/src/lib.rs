//! # quire-commonmark
//!
//! Markdown to HTML for quire sites. Documents are parsed with `comrak` into
//! an owned document tree, rewritten by tree passes, compiled into a render
//! tree, rewritten again and serialized.
//!
//! ## Quick Start
//!
//! ```rust
//! use quire_commonmark::{MarkdownOptions, MarkdownProcessor};
//!
//! let processor = MarkdownProcessor::new(MarkdownOptions {
//!   own_domain: Some("example.com".to_string()),
//!   ..Default::default()
//! });
//! let result = processor.render(
//!   "# Harbour\n\n![Boats](boats.jpg)\n<!-- credit: Jane Doe -->\n",
//! );
//!
//! assert!(result.html.contains("<figcaption class=\"image-credit\">Jane Doe</figcaption>"));
//! assert_eq!(result.title.as_deref(), Some("Harbour"));
//! ```
//!
//! ## Features
//!
//! - **External links** open in a new tab with `rel="noopener noreferrer"`
//! - **Image credits**: a `<!-- credit: ... -->` comment after an image turns
//!   it into a captioned `figure`
//! - **Header extraction** with slug anchors
//! - **Error recovery** with graceful degradation for malformed input
//! - **Custom passes** over either tree via [`MdastTransformer`] and
//!   [`HastTransformer`]
pub mod compile;
pub mod error;
pub mod hast;
pub mod mdast;
pub mod parse;
pub mod processor;
pub mod serialize;
pub mod transform;
mod types;
pub mod utils;
pub mod visit;

pub use crate::{
  error::MarkdownError,
  processor::{
    HastTransformer,
    MarkdownOptions,
    MarkdownOptionsBuilder,
    MarkdownProcessor,
    MdastTransformer,
  },
  types::{Header, MarkdownResult},
};
