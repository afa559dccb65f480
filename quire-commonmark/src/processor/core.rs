//! Core implementation of the Markdown processor.
//!
//! This module contains the main implementation of `MarkdownProcessor` and its
//! methods, focused on the rendering pipeline:
//!
//! parse → document passes → compile → render passes → serialize
use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use comrak::options::Options;
use log::trace;
use walkdir::WalkDir;

use super::types::{
  HastTransformer,
  MarkdownOptions,
  MarkdownProcessor,
  MdastTransformer,
};
use crate::{
  compile::{compile, heading_id},
  hast,
  mdast,
  parse::parse_markdown,
  serialize::to_html,
  transform::{ExternalLinks, FigureWrapper, ImageCredits},
  types::{Header, MarkdownResult},
  utils,
  visit::walk,
};

impl MarkdownProcessor {
  /// Create a new `MarkdownProcessor` with the given options.
  ///
  /// Credit extraction runs before external link annotation on the document
  /// tree; figure wrapping runs on the render tree.
  #[must_use]
  pub fn new(options: MarkdownOptions) -> Self {
    let mut document_passes: Vec<Arc<dyn MdastTransformer + Send + Sync>> =
      Vec::new();
    let mut render_passes: Vec<Arc<dyn HastTransformer + Send + Sync>> =
      Vec::new();

    if options.image_credits {
      document_passes.push(Arc::new(ImageCredits));
      render_passes.push(Arc::new(FigureWrapper));
    }
    if options.external_links {
      document_passes.push(Arc::new(ExternalLinks::new(options.own_domain())));
    }

    Self {
      options,
      document_passes,
      render_passes,
    }
  }

  /// Access processor options.
  #[must_use]
  pub const fn options(&self) -> &MarkdownOptions {
    &self.options
  }

  /// Append a pass over the document tree, run after the built-in ones.
  #[must_use]
  pub fn with_document_transformer<T>(mut self, transformer: T) -> Self
  where
    T: MdastTransformer + Send + Sync + 'static,
  {
    self.document_passes.push(Arc::new(transformer));
    self
  }

  /// Append a pass over the render tree, run after the built-in ones.
  #[must_use]
  pub fn with_render_transformer<T>(mut self, transformer: T) -> Self
  where
    T: HastTransformer + Send + Sync + 'static,
  {
    self.render_passes.push(Arc::new(transformer));
    self
  }

  /// Parse markdown into a document tree without running any pass. A leading
  /// front matter block is not part of the document.
  #[must_use]
  pub fn parse_tree(&self, markdown: &str) -> mdast::Node {
    let (_, body) = utils::split_front_matter(markdown);
    parse_markdown(body, &self.comrak_options())
  }

  /// Parse markdown and run the document passes.
  #[must_use]
  pub fn document_tree(&self, markdown: &str) -> mdast::Node {
    let mut tree = self.parse_tree(markdown);
    for pass in &self.document_passes {
      pass.transform(&mut tree);
    }
    tree
  }

  /// Compile a document tree and run the render passes.
  #[must_use]
  pub fn compile_tree(&self, document: &mdast::Node) -> hast::Node {
    let mut tree = compile(document);
    for pass in &self.render_passes {
      pass.transform(&mut tree);
    }
    tree
  }

  /// Render Markdown to HTML, extracting headers and title.
  #[must_use]
  pub fn render(&self, markdown: &str) -> MarkdownResult {
    let document = self.document_tree(markdown);
    let (headers, title) = Self::extract_headers(&document);
    let html = to_html(&self.compile_tree(&document));

    MarkdownResult {
      html,
      headers,
      title,
    }
  }

  /// Extract headers and title from a document tree. The title is the text
  /// of the first level 1 heading.
  #[must_use]
  pub fn extract_headers(
    document: &mdast::Node,
  ) -> (Vec<Header>, Option<String>) {
    let mut headers = Vec::new();
    let mut found_title = None;

    walk(document, &mut |node, _| {
      let mdast::Node::Heading { depth, .. } = node else {
        return;
      };

      let text = node.text_content().trim().to_string();
      if *depth == 1 && found_title.is_none() {
        found_title = Some(text.clone());
      }
      headers.push(Header {
        id: heading_id(&text),
        text,
        level: *depth,
      });
    });

    (headers, found_title)
  }

  /// Build comrak options from `MarkdownOptions` and feature flags.
  fn comrak_options(&self) -> Options<'_> {
    let mut options = Options::default();
    if self.options.gfm {
      options.extension.table = true;
      options.extension.strikethrough = true;
      options.extension.autolink = true;
    }
    options
  }
}

/// Collect all markdown files from the input directory
pub fn collect_markdown_files(input_dir: &Path) -> Vec<PathBuf> {
  let mut files = Vec::with_capacity(100);

  for entry in WalkDir::new(input_dir)
    .follow_links(true)
    .into_iter()
    .filter_map(Result::ok)
  {
    let path = entry.path();
    if path.is_file() && path.extension().is_some_and(|ext| ext == "md") {
      files.push(path.to_owned());
    }
  }

  files.sort();
  trace!("Found {} markdown files to process", files.len());
  files
}

#[cfg(test)]
#[allow(clippy::expect_used, reason = "Fine in tests")]
mod tests {
  use super::*;

  struct Shout;

  impl HastTransformer for Shout {
    fn transform(&self, tree: &mut hast::Node) {
      crate::visit::walk_mut(tree, &mut |node: &mut hast::Node| {
        if let hast::Node::Text { value } = node {
          *value = value.to_uppercase();
        }
      });
    }
  }

  #[test]
  fn test_render_runs_all_stages() {
    let processor = MarkdownProcessor::new(MarkdownOptions {
      own_domain: Some("example.com".to_string()),
      ..Default::default()
    });

    let result = processor.render(
      "# Hello\n\n![a](a.png)\n<!-- credit: Jane -->\n\n[out](https://other.org) \
       [in](https://example.com/x)\n",
    );

    assert_eq!(result.title.as_deref(), Some("Hello"));
    assert!(result.html.contains("<h1 id=\"hello\">Hello</h1>"));
    assert!(result.html.contains(
      "<figure class=\"image-with-credit\">\n<img src=\"a.png\" alt=\"a\" \
       /><figcaption class=\"image-credit\">Jane</figcaption>\n</figure>"
    ));
    assert!(result.html.contains(
      "<a href=\"https://other.org\" target=\"_blank\" rel=\"noopener \
       noreferrer\">out</a>"
    ));
    assert!(
      result
        .html
        .contains("<a href=\"https://example.com/x\">in</a>")
    );
    assert!(!result.html.contains("credit:"));
    assert!(!result.html.contains("data-credit"));
  }

  #[test]
  fn test_disabled_passes_leave_content_alone() {
    let processor = MarkdownProcessor::new(MarkdownOptions {
      external_links: false,
      image_credits: false,
      ..Default::default()
    });

    let result = processor
      .render("![a](a.png)\n<!-- credit: Jane -->\n\n[x](https://x.org)\n");

    assert!(result.html.contains("<!-- credit: Jane -->"));
    assert!(!result.html.contains("<figure"));
    assert!(!result.html.contains("target="));
  }

  #[test]
  fn test_front_matter_is_not_rendered() {
    let processor = MarkdownProcessor::new(MarkdownOptions::default());
    let result = processor.render("---\ntitle: Post\n---\n# Body\n");

    assert_eq!(result.html, "<h1 id=\"body\">Body</h1>\n");
  }

  #[test]
  fn test_headers_are_extracted_in_order() {
    let processor = MarkdownProcessor::new(MarkdownOptions::default());
    let result =
      processor.render("## Intro\n\n# The *Title*\n\n### Deep `code`\n");

    assert_eq!(result.title.as_deref(), Some("The Title"));
    assert_eq!(
      result
        .headers
        .iter()
        .map(|h| (h.level, h.id.as_str()))
        .collect::<Vec<_>>(),
      [(2_u8, "intro"), (1, "the-title"), (3, "deep-code")]
    );
  }

  #[test]
  fn test_custom_render_pass_runs_after_builtins() {
    let processor = MarkdownProcessor::new(MarkdownOptions::default())
      .with_render_transformer(Shout);

    let result = processor.render("![a](a.png)\n<!-- credit: Jane -->\n");
    assert!(result.html.contains(">JANE</figcaption>"));
  }

  #[test]
  fn test_collect_markdown_files() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let nested = dir.path().join("posts");
    std::fs::create_dir_all(&nested).expect("Failed to create posts dir");
    for path in [
      dir.path().join("index.md"),
      nested.join("first.md"),
      nested.join("image.png"),
    ] {
      std::fs::write(path, "x").expect("Failed to write file");
    }

    let files = collect_markdown_files(dir.path());
    assert_eq!(files, [dir.path().join("index.md"), nested.join("first.md")]);
  }
}
