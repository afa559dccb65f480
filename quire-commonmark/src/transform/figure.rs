//! Figures for credited images.
//!
//! Runs on the render tree after [`super::credits`] has marked images with
//! [`CREDIT_PROPERTY`]. Every credited `img` becomes
//!
//! ```html
//! <figure class="image-with-credit">
//!   <img src="..." alt="...">
//!   <figcaption class="image-credit">Jane Doe</figcaption>
//! </figure>
//! ```
//!
//! and the credit comment that produced it is dropped. Markup that shares a
//! raw node with the comment, such as a second comment, is kept.
use log::debug;

use super::credits::{CREDIT_PROPERTY, credit_remainder, match_credit};
use crate::{
  hast::{Element, Node},
  processor::types::HastTransformer,
  visit::{
    Edit,
    EditKind,
    Position,
    apply_edits,
    previous_sibling_index,
    walk,
  },
};

/// Class of the generated `figure` element.
pub const FIGURE_CLASS: &str = "image-with-credit";
/// Class of the generated `figcaption` element.
pub const CAPTION_CLASS: &str = "image-credit";

/// The credit carried by `node` if it is a credited `img` element.
fn credit_of(node: &Node) -> Option<&str> {
  node
    .element_named("img")
    .and_then(|img| img.property(CREDIT_PROPERTY))
}

/// Markup left over once the credit comment in `node` is taken out. Raw
/// markup may carry more after the credit, such as a second comment.
fn credit_comment_rest(node: &Node) -> Option<&str> {
  match node {
    Node::Comment { value } => match_credit(value).map(|_| ""),
    Node::Raw { value } => credit_remainder(value).map(str::trim_start),
    _ => None,
  }
}

/// Whether `node` is a credit comment and nothing else.
fn is_bare_credit_comment(node: &Node) -> bool {
  credit_comment_rest(node).is_some_and(|rest| rest.trim().is_empty())
}

/// Whether a paragraph holding an image is only there to wrap it: apart from
/// the image it holds nothing but whitespace and credit comments.
fn wraps_only(paragraph: &Element, image: usize) -> bool {
  paragraph
    .children
    .iter()
    .enumerate()
    .filter(|&(index, _)| index != image)
    .all(|(_, child)| {
      matches!(child, Node::Text { value } if value.trim().is_empty())
        || is_bare_credit_comment(child)
    })
}

/// Whether the node before a credit comment is a credited image, either
/// directly or as the only image of a paragraph.
fn follows_credited_image(node: &Node) -> bool {
  if credit_of(node).is_some() {
    return true;
  }

  let Some(paragraph) = node.element_named("p") else {
    return false;
  };
  let mut images = paragraph
    .children
    .iter()
    .filter(|child| child.element_named("img").is_some());
  match (images.next(), images.next()) {
    (Some(image), None) => credit_of(image).is_some(),
    _ => false,
  }
}

/// Copy of a credited image without the credit marker.
fn strip_credit(img: &Element) -> Element {
  let mut stripped = img.clone();
  stripped.properties.shift_remove(CREDIT_PROPERTY);
  stripped
}

/// Build the figure replacing a credited image.
#[must_use]
pub fn build_figure(img: &Element, credit: &str) -> Node {
  let caption = Element::new("figcaption")
    .with_property("class", CAPTION_CLASS)
    .with_children(vec![Node::text(credit)]);

  Element::new("figure")
    .with_property("class", FIGURE_CLASS)
    .with_children(vec![strip_credit(img).into(), caption.into()])
    .into()
}

/// Plan the replacement of a credited image at `position`.
fn plan_figure(
  img: &Element,
  credit: &str,
  position: &Position<'_, Node>,
) -> Edit<Node> {
  if let Some(paragraph) = position.parent.element_named("p") {
    if wraps_only(paragraph, position.index) {
      // The paragraph goes away with the image; a root paragraph has
      // nowhere to be replaced from.
      if let Some((grandparent, index)) = position.parent_path.split_last() {
        return Edit::replace(grandparent, index, build_figure(img, credit));
      }
    }
  }

  Edit::replace(
    position.parent_path.clone(),
    position.index,
    build_figure(img, credit),
  )
}

/// Plan every removal and replacement without touching the tree.
fn collect_edits(tree: &Node) -> Vec<Edit<Node>> {
  let mut edits = Vec::new();

  walk(tree, &mut |node, position| {
    let Some(position) = position else {
      return;
    };

    if let Some(rest) = credit_comment_rest(node) {
      let siblings = position.siblings();
      let credited = previous_sibling_index(siblings, position.index)
        .and_then(|previous| siblings.get(previous))
        .is_some_and(follows_credited_image);
      if !credited {
        return;
      }
      if rest.trim().is_empty() {
        edits.push(Edit::remove(position.parent_path.clone(), position.index));
      } else {
        edits.push(Edit::replace(
          position.parent_path.clone(),
          position.index,
          Node::raw(rest),
        ));
      }
      return;
    }

    let (Some(img), Some(credit)) = (node.element_named("img"), credit_of(node))
    else {
      return;
    };

    if position.parent.element_named("figure").is_some() {
      // Already a figure; only the marker has to go.
      debug!("Image {:?} is already inside a figure", img.property("src"));
      edits.push(Edit::replace(
        position.parent_path.clone(),
        position.index,
        strip_credit(img).into(),
      ));
      return;
    }

    debug!("Wrapping image {:?} credited to '{credit}'", img.property("src"));
    edits.push(plan_figure(img, credit, position));
  });

  edits
}

/// Wrap every credited image in a captioned figure and remove the credit
/// comments that named them. Returns the number of figures built.
///
/// All edits are planned against the unchanged tree first and then applied
/// from the last coordinate to the first, so earlier edits never move the
/// nodes later ones point at.
pub fn wrap_credited_images(tree: &mut Node) -> usize {
  let edits = collect_edits(tree);
  let figures = edits
    .iter()
    .filter(|edit| match &edit.kind {
      EditKind::Replace(node) => node.element_named("figure").is_some(),
      EditKind::Remove => false,
    })
    .count();

  let applied = apply_edits(tree, edits);
  debug!("Applied {applied} edits for {figures} credited images");

  figures
}

/// Render pass turning credited images into figures.
#[derive(Debug, Clone, Copy, Default)]
pub struct FigureWrapper;

impl HastTransformer for FigureWrapper {
  fn transform(&self, tree: &mut Node) {
    wrap_credited_images(tree);
  }
}
