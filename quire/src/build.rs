//! Batch rendering of a content directory.
use std::{
  fs,
  path::{Path, PathBuf},
};

use log::{debug, info};
use quire_commonmark::{
  MarkdownProcessor,
  processor::{collect_markdown_files, process_with_recovery},
};
use rayon::prelude::*;

use crate::{config::Config, error::QuireError};

/// Render every markdown file under the configured input directory and write
/// `<name>.html` next to where it sits in the input layout.
///
/// Documents are rendered in parallel on a pool sized by `config.jobs` (or
/// the CPU count). They share the processor but no mutable state.
///
/// # Returns
///
/// The paths of the written HTML files, in input order.
///
/// # Errors
///
/// Returns an error if no input directory is configured, the thread pool
/// cannot be built, or a file cannot be read or written.
pub fn build_site(config: &Config) -> Result<Vec<PathBuf>, QuireError> {
  let Some(input_dir) = config.input_dir.as_deref() else {
    return Err(QuireError::Config(
      "No input directory configured. Pass --input-dir or set input_dir."
        .to_string(),
    ));
  };

  info!("Input directory: {}", input_dir.display());
  let files = collect_markdown_files(input_dir);
  info!("Found {} markdown files", files.len());

  fs::create_dir_all(&config.output_dir)?;
  info!("Output directory: {}", config.output_dir.display());

  let processor = MarkdownProcessor::new(config.markdown_options());
  let thread_count = config.jobs.unwrap_or_else(num_cpus::get);
  let pool = rayon::ThreadPoolBuilder::new()
    .num_threads(thread_count)
    .build()?;

  pool.install(|| {
    files
      .par_iter()
      .map(|file| {
        render_file(&processor, file, input_dir, &config.output_dir)
      })
      .collect()
  })
}

/// Render one file and write the result below `output_dir`.
///
/// # Errors
///
/// Returns an error if the source cannot be read or the output cannot be
/// written.
pub fn render_file(
  processor: &MarkdownProcessor,
  file: &Path,
  input_dir: &Path,
  output_dir: &Path,
) -> Result<PathBuf, QuireError> {
  let content = read_markdown(file)?;
  let result = process_with_recovery(processor, &content);

  let output_path = output_dir.join(output_relative_path(file, input_dir));
  if let Some(parent) = output_path.parent() {
    fs::create_dir_all(parent)?;
  }
  fs::write(&output_path, result.html)?;

  debug!("{} -> {}", file.display(), output_path.display());
  Ok(output_path)
}

/// Read a markdown source file.
///
/// # Errors
///
/// Returns [`quire_commonmark::MarkdownError::Read`] naming the file.
pub fn read_markdown(file: &Path) -> Result<String, QuireError> {
  fs::read_to_string(file).map_err(|source| {
    QuireError::Markdown(quire_commonmark::MarkdownError::Read {
      path: file.to_path_buf(),
      source,
    })
  })
}

/// Where the HTML for `file` goes, relative to the output directory.
fn output_relative_path(file: &Path, input_dir: &Path) -> PathBuf {
  let mut relative = match file.strip_prefix(input_dir) {
    Ok(relative) => relative.to_path_buf(),
    Err(_) => file.file_name().map(PathBuf::from).unwrap_or_default(),
  };
  relative.set_extension("html");
  relative
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_output_relative_path_mirrors_input() {
    let input = Path::new("content");
    assert_eq!(
      output_relative_path(Path::new("content/posts/boats.md"), input),
      PathBuf::from("posts/boats.html")
    );
    assert_eq!(
      output_relative_path(Path::new("elsewhere/about.md"), input),
      PathBuf::from("about.html")
    );
  }

  #[test]
  fn test_build_without_input_dir_fails() {
    let err = build_site(&Config::default());
    assert!(matches!(err, Err(QuireError::Config(_))));
  }
}
