//! Main processing functions for Markdown content.
use std::{
  fs,
  io::Error,
  path::{Path, PathBuf},
};

use log::error;

use super::types::{MarkdownOptions, MarkdownProcessor};
use crate::{error::MarkdownError, types::MarkdownResult};

/// Process markdown content with error recovery.
///
/// Rendering does not fail on malformed input, but a panic in a pass must not
/// take a whole build down. The document degrades to an error placeholder
/// instead.
///
/// # Arguments
///
/// * `processor` - The configured markdown processor
/// * `content` - The raw markdown content to process
///
/// # Returns
///
/// A `MarkdownResult` with processed HTML, headers, and title
#[must_use]
pub fn process_with_recovery(
  processor: &MarkdownProcessor,
  content: &str,
) -> MarkdownResult {
  match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
    processor.render(content)
  })) {
    Ok(result) => result,
    Err(panic_err) => {
      if let Some(message) = panic_err.downcast_ref::<String>() {
        error!("Panic during markdown processing: {message}");
      } else if let Some(message) = panic_err.downcast_ref::<&str>() {
        error!("Panic during markdown processing: {message}");
      } else {
        error!("Unknown panic during markdown processing");
      }

      MarkdownResult {
        html:    "<div class=\"error\">Critical error processing markdown \
                  content</div>"
          .to_string(),
        headers: Vec::new(),
        title:   None,
      }
    },
  }
}

/// Process a batch of markdown files with consistent error handling.
///
/// This function processes multiple markdown files using the same processor
/// configuration, collecting results and handling errors gracefully.
///
/// # Arguments
/// * `processor` - The configured markdown processor
/// * `files` - Iterator of file paths to process
/// * `read_file_fn` - Function to read file content from path
///
/// # Returns
/// Vector of tuples containing (`file_path`, `processing_result`)
pub fn process_batch<I, F>(
  processor: &MarkdownProcessor,
  files: I,
  read_file_fn: F,
) -> Vec<(PathBuf, Result<MarkdownResult, MarkdownError>)>
where
  I: Iterator<Item = PathBuf>,
  F: Fn(&Path) -> Result<String, Error>,
{
  files
    .map(|path| {
      let result = match read_file_fn(&path) {
        Ok(content) => Ok(process_with_recovery(processor, &content)),
        Err(source) => {
          Err(MarkdownError::Read {
            path: path.clone(),
            source,
          })
        },
      };
      (path, result)
    })
    .collect()
}

/// Create a processor with sensible defaults for library usage.
///
/// # Arguments
///
/// * `preset` - The preset configuration to use
///
/// # Returns
///
/// A configured `MarkdownProcessor`
#[must_use]
pub fn create_processor(preset: ProcessorPreset) -> MarkdownProcessor {
  let options = match preset {
    ProcessorPreset::Basic => {
      MarkdownOptions {
        gfm:            true,
        own_domain:     None,
        external_links: false,
        image_credits:  false,
      }
    },
    ProcessorPreset::Blog => {
      MarkdownOptions {
        gfm:            true,
        own_domain:     None,
        external_links: true,
        image_credits:  true,
      }
    },
  };

  MarkdownProcessor::new(options)
}

/// Preset configurations for common use cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessorPreset {
  /// Plain GitHub Flavored Markdown (GFM), no tree passes
  Basic,
  /// GFM with external link annotation and image credit figures
  Blog,
}

/// Process markdown content from a string with error recovery.
///
/// This is a convenience function that combines processor creation and
/// content processing in a single call.
#[must_use]
pub fn process_markdown_string(
  content: &str,
  preset: ProcessorPreset,
) -> MarkdownResult {
  let processor = create_processor(preset);
  process_with_recovery(&processor, content)
}

/// Process markdown content from a file with error recovery.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn process_markdown_file(
  file_path: &Path,
  preset: ProcessorPreset,
) -> Result<MarkdownResult, MarkdownError> {
  let content =
    fs::read_to_string(file_path).map_err(|source| MarkdownError::Read {
      path: file_path.to_path_buf(),
      source,
    })?;

  let processor = create_processor(preset);
  Ok(process_with_recovery(&processor, &content))
}

#[cfg(test)]
mod tests {
  use std::path::Path;

  use super::*;
  use crate::{hast, processor::types::HastTransformer};

  struct Explode;

  impl HastTransformer for Explode {
    #[allow(clippy::panic, reason = "Fine in tests")]
    fn transform(&self, _tree: &mut hast::Node) {
      panic!("render pass failed");
    }
  }

  #[test]
  fn test_process_markdown_string() {
    let content = "# Test Header\n\nSome content.";
    let result = process_markdown_string(content, ProcessorPreset::Basic);

    assert!(result.html.contains("<h1"));
    assert!(result.html.contains("Test Header"));
    assert_eq!(result.title, Some("Test Header".to_string()));
    assert_eq!(result.headers.len(), 1);
  }

  #[test]
  fn test_create_processor_presets() {
    let basic = create_processor(ProcessorPreset::Basic);
    assert!(basic.options().gfm);
    assert!(!basic.options().external_links);
    assert!(!basic.options().image_credits);

    let blog = create_processor(ProcessorPreset::Blog);
    assert!(blog.options().gfm);
    assert!(blog.options().external_links);
    assert!(blog.options().image_credits);
  }

  #[test]
  fn test_recovery_from_panicking_pass() {
    let processor =
      create_processor(ProcessorPreset::Basic).with_render_transformer(Explode);
    let result = process_with_recovery(&processor, "# Title");

    assert!(result.html.contains("class=\"error\""));
    assert!(result.headers.is_empty());
    assert_eq!(result.title, None);
  }

  #[test]
  #[allow(clippy::panic)]
  fn test_process_batch() {
    let processor = create_processor(ProcessorPreset::Blog);
    let paths = vec![
      Path::new("test1.md"),
      Path::new("test2.md"),
      Path::new("missing.md"),
    ];

    let read_fn = |path: &Path| -> Result<String, std::io::Error> {
      match path.file_name().and_then(|n| n.to_str()) {
        Some("test1.md") => Ok("# Test 1".to_string()),
        Some("test2.md") => {
          Ok("![b](b.png)\n<!-- credit: Test 2 -->".to_string())
        },
        _ => {
          Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "File not found",
          ))
        },
      }
    };

    let results = process_batch(
      &processor,
      paths.into_iter().map(std::path::Path::to_path_buf),
      read_fn,
    );
    assert_eq!(results.len(), 3);

    for (path, result) in results {
      match (path.to_str(), result) {
        (Some("test1.md"), Ok(markdown_result)) => {
          assert!(markdown_result.html.contains("<h1"));
        },
        (Some("test2.md"), Ok(markdown_result)) => {
          assert!(
            markdown_result
              .html
              .contains("<figcaption class=\"image-credit\">Test 2</figcaption>")
          );
        },
        (Some("missing.md"), Err(e)) => {
          assert!(e.to_string().contains("missing.md"));
        },
        (path, result) => panic!("Unexpected result for {path:?}: {result:?}"),
      }
    }
  }
}
