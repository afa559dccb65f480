//! Image credit comments.
//!
//! An author credits an image by placing a comment right after it:
//!
//! ```markdown
//! ![Harbour at dawn](harbour.jpg)
//! <!-- credit: Jane Doe -->
//! ```
//!
//! [`extract_credits`] copies the credit onto the image as the
//! [`CREDIT_PROPERTY`] render property. The comment stays where it is; the
//! figure wrapper removes it once the credited image has been rendered.
use std::sync::LazyLock;

use log::debug;
use regex::Regex;

use crate::{
  mdast::Node,
  processor::types::MdastTransformer,
  utils::never_matching_regex,
  visit::{NodePath, node_at_mut, previous_sibling_index, walk},
};

/// Render property carrying a credit from the document tree to the figure
/// wrapper. It lives for a single render and never reaches the output: the
/// wrapper strips it from every image it wraps.
pub const CREDIT_PROPERTY: &str = "data-credit";

// Either a leading `<!-- credit: ... -->` comment, which ends at its first
// `-->`, or a bare `credit: ...` comment body as seen in the render tree.
// A credit never spans lines.
static CREDIT_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(
    r"(?i)^\s*(?:<!--[ \t]*credit:[ \t]*(?P<delimited>(?:[^-\n]|-[^-\n]|--[^>\n])*?)[ \t]*-->|credit:[ \t]*(?P<bare>[^\n]*?)\s*$)",
  )
  .unwrap_or_else(|e| {
    log::error!(
      "Failed to compile CREDIT_RE regex: {e}\n Falling back to never \
       matching regex."
    );
    never_matching_regex()
  })
});

/// The credit text and the end offset of the credit comment at the start of
/// `value`.
fn credit_match(value: &str) -> Option<(&str, usize)> {
  let caps = CREDIT_RE.captures(value)?;
  let end = caps.get(0)?.end();
  caps
    .name("delimited")
    .or_else(|| caps.name("bare"))
    .map(|credit| credit.as_str().trim())
    .filter(|credit| !credit.is_empty())
    .map(|credit| (credit, end))
}

/// The credit text of a credit comment, trimmed. Returns `None` for anything
/// else, including comments with an empty credit.
#[must_use]
pub fn match_credit(value: &str) -> Option<&str> {
  credit_match(value).map(|(credit, _)| credit)
}

/// Markup following the credit comment at the start of `value`, such as a
/// second comment on the same line. Empty when the credit comment is all
/// there is; `None` when `value` is not a credit comment.
#[must_use]
pub fn credit_remainder(value: &str) -> Option<&str> {
  credit_match(value).map(|(_, end)| &value[end..])
}

/// Coordinates of the image a credit comment belongs to, given the
/// comment's siblings, its index among them and the path of their parent.
///
/// That is the nearest preceding sibling when it is an image, or the only
/// image among the direct children of a preceding paragraph.
fn credited_image(
  siblings: &[Node],
  index: usize,
  parent_path: &NodePath,
) -> Option<NodePath> {
  let previous = previous_sibling_index(siblings, index)?;
  let previous_path = parent_path.child(previous);

  match siblings.get(previous)? {
    Node::Image { .. } => Some(previous_path),
    Node::Paragraph { children } => {
      let mut images = children
        .iter()
        .enumerate()
        .filter(|(_, child)| child.is_image());
      match (images.next(), images.next()) {
        (Some((image, _)), None) => Some(previous_path.child(image)),
        _ => None,
      }
    },
    _ => None,
  }
}

/// Find where the credited image of each credit comment lives.
fn collect_credits(tree: &Node) -> Vec<(NodePath, String)> {
  let mut credits = Vec::new();

  walk(tree, &mut |node, position| {
    let (Node::Html { value }, Some(position)) = (node, position) else {
      return;
    };
    let Some(credit) = match_credit(value) else {
      return;
    };

    match credited_image(
      position.siblings(),
      position.index,
      &position.parent_path,
    ) {
      Some(path) => credits.push((path, credit.to_string())),
      None => debug!("Credit comment '{credit}' does not follow an image"),
    }
  });

  credits
}

/// Attach the credit of every credit comment to the image it follows and
/// return the number of images credited.
///
/// Only image metadata changes; the shape of the tree does not. Comments
/// that follow no image are left alone.
pub fn extract_credits(tree: &mut Node) -> usize {
  let credits = collect_credits(tree);
  let mut attached = 0;

  for (path, credit) in credits {
    let Some(data) = node_at_mut(tree, &path).and_then(Node::data_mut) else {
      continue;
    };
    debug!("Attaching credit '{credit}' to image at {:?}", path.as_slice());
    data.set_property(CREDIT_PROPERTY, credit);
    attached += 1;
  }

  attached
}

/// Document pass attaching credit comments to the images they follow.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageCredits;

impl MdastTransformer for ImageCredits {
  fn transform(&self, tree: &mut Node) {
    extract_credits(tree);
  }
}
