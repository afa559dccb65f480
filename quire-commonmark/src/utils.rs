use regex::Regex;

/// Slugify a string for use as an anchor ID.
/// Converts to lowercase, replaces non-alphanumeric characters with dashes,
/// and trims leading/trailing dashes.
#[must_use]
pub fn slugify(text: &str) -> String {
  text
    .to_lowercase()
    .replace(|c: char| !c.is_alphanumeric() && c != '-' && c != '_', "-")
    .trim_matches('-')
    .to_string()
}

/// Split a leading `---` delimited front matter block off the document.
///
/// Returns the front matter (without delimiters) and the remaining body. When
/// the document has no closed front matter block the whole input is the
/// body.
#[must_use]
pub fn split_front_matter(content: &str) -> (Option<&str>, &str) {
  let Some(rest) = content
    .strip_prefix("---\n")
    .or_else(|| content.strip_prefix("---\r\n"))
  else {
    return (None, content);
  };

  let mut offset = 0;
  for line in rest.split_inclusive('\n') {
    if line.trim_end() == "---" {
      return (Some(&rest[..offset]), &rest[offset + line.len()..]);
    }
    offset += line.len();
  }

  (None, content)
}

/// Create a regex that never matches anything.
///
/// Used as a fallback when a pattern fails to compile, so that a broken
/// pattern disables one transformation instead of the whole pipeline.
#[must_use]
pub fn never_matching_regex() -> Regex {
  #[allow(
    clippy::expect_used,
    reason = "This pattern is guaranteed to be valid"
  )]
  Regex::new(r"[^\s\S]").expect("regex pattern [^\\s\\S] should always compile")
}
