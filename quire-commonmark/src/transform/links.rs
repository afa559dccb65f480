//! External link handling.
//!
//! Links leaving the site open in a new tab, with `rel="noopener
//! noreferrer"` so the opened page gets no handle on the opener.
use log::debug;

use crate::{
  mdast::Node,
  processor::types::MdastTransformer,
  visit::walk_mut,
};

/// Render property naming the browsing context of a link.
pub const TARGET_PROPERTY: &str = "target";
/// Render property holding the link relationship.
pub const REL_PROPERTY: &str = "rel";

const ABSOLUTE_PREFIXES: [&str; 3] = ["http://", "https://", "//"];

/// Whether `url` points away from `own_domain`.
///
/// A URL is external when it is non-empty, absolute (`http://`, `https://`
/// or protocol-relative `//`) and does not mention the own domain anywhere.
/// An empty own domain excludes nothing, so every absolute URL counts.
#[must_use]
pub fn is_external(url: Option<&str>, own_domain: &str) -> bool {
  let Some(url) = url.filter(|url| !url.is_empty()) else {
    return false;
  };

  ABSOLUTE_PREFIXES
    .iter()
    .any(|prefix| url.starts_with(prefix))
    && (own_domain.is_empty() || !url.contains(own_domain))
}

/// Derive the own domain from a site URL such as `https://example.com/`.
///
/// Scheme, credentials, port, path, query and fragment are dropped. Returns
/// `None` when nothing resembling a host is left.
#[must_use]
pub fn own_domain_from_site_url(site_url: &str) -> Option<String> {
  let trimmed = site_url.trim();
  let without_scheme = trimmed
    .split_once("://")
    .map_or(trimmed, |(_, rest)| rest)
    .trim_start_matches('/');
  let authority = without_scheme
    .split(['/', '?', '#'])
    .next()
    .unwrap_or_default();
  let host_and_port = authority
    .rsplit_once('@')
    .map_or(authority, |(_, host)| host);
  let host = host_and_port
    .split_once(':')
    .map_or(host_and_port, |(host, _)| host);

  (!host.is_empty()).then(|| host.to_string())
}

/// Mark every external link in the tree to open safely in a new tab.
///
/// Visits the whole tree, whatever the node types, and returns the number of
/// links marked. Running it again leaves the same two properties in place.
pub fn annotate_external_links(tree: &mut Node, own_domain: &str) -> usize {
  let mut annotated = 0;

  walk_mut(tree, &mut |node: &mut Node| {
    let Node::Link { url, data, .. } = node else {
      return;
    };
    if !is_external(Some(url.as_str()), own_domain) {
      return;
    }

    data.set_property(TARGET_PROPERTY, "_blank");
    data.set_property(REL_PROPERTY, "noopener noreferrer");
    annotated += 1;
    debug!("Marked external link {url}");
  });

  annotated
}

/// Document pass marking external links relative to a configured own domain.
#[derive(Debug, Clone, Default)]
pub struct ExternalLinks {
  own_domain: String,
}

impl ExternalLinks {
  #[must_use]
  pub fn new(own_domain: impl Into<String>) -> Self {
    Self {
      own_domain: own_domain.into(),
    }
  }

  #[must_use]
  pub fn own_domain(&self) -> &str {
    &self.own_domain
  }
}

impl MdastTransformer for ExternalLinks {
  fn transform(&self, tree: &mut Node) {
    annotate_external_links(tree, &self.own_domain);
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_is_external() {
    assert!(is_external(Some("https://other.com/x"), "example.com"));
    assert!(is_external(Some("http://other.com"), "example.com"));
    assert!(is_external(Some("//cdn.other.com/lib.js"), "example.com"));
    assert!(!is_external(Some("https://example.com/x"), "example.com"));
    assert!(!is_external(Some("/relative/path"), "example.com"));
    assert!(!is_external(Some("#section"), "example.com"));
    assert!(!is_external(Some("mailto:me@other.com"), "example.com"));
    assert!(!is_external(Some(""), "example.com"));
    assert!(!is_external(None, "example.com"));
  }

  #[test]
  fn test_own_domain_anywhere_in_url_counts_as_internal() {
    assert!(!is_external(
      Some("https://blog.example.com/post"),
      "example.com"
    ));
    assert!(!is_external(
      Some("https://other.com/?ref=example.com"),
      "example.com"
    ));
  }

  #[test]
  fn test_empty_own_domain_excludes_nothing() {
    assert!(is_external(Some("https://example.com"), ""));
    assert!(!is_external(Some("/about"), ""));
  }

  #[test]
  fn test_own_domain_from_site_url() {
    assert_eq!(
      own_domain_from_site_url("https://example.com/"),
      Some("example.com".to_string())
    );
    assert_eq!(
      own_domain_from_site_url("http://user@blog.example.com:8080/a?b#c"),
      Some("blog.example.com".to_string())
    );
    assert_eq!(
      own_domain_from_site_url("example.com"),
      Some("example.com".to_string())
    );
    assert_eq!(own_domain_from_site_url("https:///"), None);
    assert_eq!(own_domain_from_site_url(""), None);
  }

  #[test]
  fn test_annotate_marks_nested_external_links_only() {
    let mut tree = Node::root(vec![
      Node::paragraph(vec![
        Node::link("http://foo.com", vec![Node::text("foo")]),
        Node::text(" and "),
        Node::link("/about", vec![Node::text("about")]),
      ]),
      Node::BlockQuote {
        children: vec![Node::paragraph(vec![Node::Emphasis {
          children: vec![Node::link("https://bar.org", vec![])],
        }])],
      },
    ]);

    assert_eq!(annotate_external_links(&mut tree, "mysite.com"), 2);

    let mut links = Vec::new();
    crate::visit::walk(&tree, &mut |node, _| {
      if let Node::Link { url, data, .. } = node {
        links.push((url.clone(), data.clone()));
      }
    });

    assert_eq!(links.len(), 3);
    assert_eq!(links[0].1.property(TARGET_PROPERTY), Some("_blank"));
    assert_eq!(links[0].1.property(REL_PROPERTY), Some("noopener noreferrer"));
    assert!(links[1].1.is_empty());
    assert_eq!(links[2].1.property(TARGET_PROPERTY), Some("_blank"));
  }

  #[test]
  fn test_annotate_is_idempotent() {
    let mut once = Node::root(vec![Node::link("https://other.com", vec![])]);
    annotate_external_links(&mut once, "example.com");

    let mut twice = once.clone();
    annotate_external_links(&mut twice, "example.com");

    assert_eq!(once, twice);
    let data = twice
      .children()
      .and_then(|children| children.first())
      .and_then(Node::data)
      .cloned()
      .unwrap_or_default();
    assert_eq!(data.h_properties.len(), 2);
  }
}
