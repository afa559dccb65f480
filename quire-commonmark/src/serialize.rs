//! HTML output for render trees.
use std::fmt::Write;

use crate::hast::{Element, Node};

/// Elements that never have content or a closing tag.
const VOID_ELEMENTS: [&str; 4] = ["br", "hr", "img", "input"];

/// Blocks holding other blocks: a newline follows both tags.
const BLOCK_CONTAINERS: [&str; 8] = [
  "blockquote",
  "figure",
  "ol",
  "table",
  "tbody",
  "thead",
  "tr",
  "ul",
];

/// Blocks holding inline content: a newline follows the closing tag.
const BLOCK_LEAVES: [&str; 14] = [
  "div",
  "figcaption",
  "h1",
  "h2",
  "h3",
  "h4",
  "h5",
  "h6",
  "hr",
  "li",
  "p",
  "pre",
  "td",
  "th",
];

/// Serialize a render tree to HTML.
///
/// Text and attribute values are escaped. [`Node::Raw`] markup is written
/// verbatim.
#[must_use]
pub fn to_html(tree: &Node) -> String {
  let mut html = String::new();
  write_node(tree, &mut html);
  html
}

fn write_node(node: &Node, out: &mut String) {
  match node {
    Node::Root { children } => {
      for child in children {
        write_node(child, out);
      }
    },
    Node::Element(element) => write_element(element, out),
    Node::Text { value } => out.push_str(&html_escape::encode_text(value)),
    Node::Comment { value } => {
      out.push_str("<!--");
      out.push_str(value);
      out.push_str("-->");
    },
    Node::Raw { value } => out.push_str(value),
  }
}

fn write_element(element: &Element, out: &mut String) {
  let tag = element.tag_name.as_str();

  out.push('<');
  out.push_str(tag);
  for (key, value) in &element.properties {
    let _ = write!(
      out,
      " {key}=\"{}\"",
      html_escape::encode_double_quoted_attribute(value)
    );
  }

  if VOID_ELEMENTS.contains(&tag) {
    out.push_str(" />");
    if BLOCK_LEAVES.contains(&tag) {
      out.push('\n');
    }
    return;
  }

  out.push('>');
  if BLOCK_CONTAINERS.contains(&tag) {
    out.push('\n');
  }
  for child in &element.children {
    write_node(child, out);
  }
  out.push_str("</");
  out.push_str(tag);
  out.push('>');

  if BLOCK_CONTAINERS.contains(&tag) || BLOCK_LEAVES.contains(&tag) {
    out.push('\n');
  }
}
