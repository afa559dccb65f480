use thiserror::Error;

/// Error type for template operations.
#[derive(Debug, Error)]
pub enum TemplateError {
  /// The requested configuration format is not supported.
  #[error("Unsupported config format: {0}")]
  UnsupportedFormat(String),
}

/// Default configuration template in TOML, commented so that a fresh
/// `quire.toml` explains itself.
pub const DEFAULT_TOML_TEMPLATE: &str = r#"# quire configuration file

# Directory containing markdown posts and pages
input_dir = "content"

# Output directory for generated HTML
output_dir = "dist"

# Public URL of the site. Links pointing at its host are internal.
# site_url = "https://example.com/"

# Host to treat as internal; overrides the one derived from site_url
# own_domain = "example.com"

# Number of threads to use for parallel processing (defaults to CPU count)
# jobs = 4

# Enable GitHub Flavored Markdown: tables, strikethrough and autolinks
gfm = true

# Open links to other sites in a new tab with rel="noopener noreferrer"
external_links = true

# Turn `<!-- credit: ... -->` after an image into a captioned figure
image_credits = true
"#;

/// Default configuration template in JSON. JSON has no comments, so every
/// optional field is spelled out with its default.
pub const DEFAULT_JSON_TEMPLATE: &str = r#"{
  "input_dir": "content",
  "output_dir": "dist",
  "site_url": null,
  "own_domain": null,
  "jobs": null,
  "gfm": true,
  "external_links": true,
  "image_credits": true
}
"#;

/// Get the default configuration template for the given format.
///
/// # Errors
///
/// Returns [`TemplateError::UnsupportedFormat`] for anything other than
/// `toml` or `json`.
pub fn get_template(format: &str) -> Result<&'static str, TemplateError> {
  match format.to_lowercase().as_str() {
    "toml" => Ok(DEFAULT_TOML_TEMPLATE),
    "json" => Ok(DEFAULT_JSON_TEMPLATE),
    _ => Err(TemplateError::UnsupportedFormat(format.to_string())),
  }
}
