//! Markdown parsing.
//!
//! comrak does the parsing; its arena AST is then copied into an owned
//! [`mdast::Node`](crate::mdast::Node) tree that passes can rewrite freely.
use comrak::{
  Arena,
  nodes::{AstNode, ListType, NodeValue, TableAlignment},
  options::Options,
  parse_document,
};

use crate::mdast::{Align, Data, Node};

/// Parse markdown into a document tree.
#[must_use]
pub fn parse_markdown(content: &str, options: &Options<'_>) -> Node {
  let arena = Arena::new();
  let root = parse_document(&arena, content, options);
  Node::root(convert_children(root))
}

fn convert_children<'a>(node: &'a AstNode<'a>) -> Vec<Node> {
  let mut children = Vec::new();
  for child in node.children() {
    convert(child, &mut children);
  }
  children
}

/// Append the conversion of `node` to `out`.
///
/// Adjacent text is merged and soft breaks become newlines, so a run of
/// inline text is a single node. Node kinds without a counterpart are
/// replaced by their children.
fn convert<'a>(node: &'a AstNode<'a>, out: &mut Vec<Node>) {
  let converted = match &node.data.borrow().value {
    NodeValue::Document => Node::root(convert_children(node)),
    NodeValue::Paragraph => Node::paragraph(convert_children(node)),
    NodeValue::Heading(heading) => {
      Node::Heading {
        depth:    heading.level,
        children: convert_children(node),
      }
    },
    NodeValue::BlockQuote => {
      Node::BlockQuote {
        children: convert_children(node),
      }
    },
    NodeValue::List(list) => {
      let ordered = matches!(list.list_type, ListType::Ordered);
      Node::List {
        ordered,
        start: ordered.then_some(list.start),
        spread: !list.tight,
        children: convert_children(node),
      }
    },
    NodeValue::Item(_) => {
      Node::ListItem {
        children: convert_children(node),
      }
    },
    NodeValue::CodeBlock(block) => {
      Node::Code {
        lang:  block.info.split_whitespace().next().map(str::to_string),
        value: block.literal.to_string(),
      }
    },
    NodeValue::HtmlBlock(block) => Node::html(block.literal.to_string()),
    NodeValue::ThematicBreak => Node::ThematicBreak,
    NodeValue::Table(table) => {
      Node::Table {
        align:    table.alignments.iter().map(alignment).collect(),
        children: convert_children(node),
      }
    },
    NodeValue::TableRow(header) => {
      Node::TableRow {
        header:   *header,
        children: convert_children(node),
      }
    },
    NodeValue::TableCell => {
      Node::TableCell {
        children: convert_children(node),
      }
    },
    NodeValue::Text(text) => {
      push_text(out, text);
      return;
    },
    NodeValue::SoftBreak => {
      push_text(out, "\n");
      return;
    },
    NodeValue::LineBreak => Node::Break,
    NodeValue::Code(code) => {
      Node::InlineCode {
        value: code.literal.to_string(),
      }
    },
    NodeValue::HtmlInline(html) => Node::html(html.to_string()),
    NodeValue::Emph => {
      Node::Emphasis {
        children: convert_children(node),
      }
    },
    NodeValue::Strong => {
      Node::Strong {
        children: convert_children(node),
      }
    },
    NodeValue::Strikethrough => {
      Node::Delete {
        children: convert_children(node),
      }
    },
    NodeValue::Link(link) => {
      Node::Link {
        url:      link.url.to_string(),
        title:    non_empty(&link.title),
        children: convert_children(node),
        data:     Data::default(),
      }
    },
    NodeValue::Image(link) => {
      // Alt text is the plain text of the image description.
      let alt = Node::paragraph(convert_children(node)).text_content();
      Node::Image {
        url: link.url.to_string(),
        alt,
        title: non_empty(&link.title),
        data: Data::default(),
      }
    },
    _ => {
      for child in node.children() {
        convert(child, out);
      }
      return;
    },
  };

  out.push(converted);
}

fn push_text(out: &mut Vec<Node>, text: &str) {
  if let Some(Node::Text { value }) = out.last_mut() {
    value.push_str(text);
  } else {
    out.push(Node::text(text));
  }
}

fn non_empty(value: &str) -> Option<String> {
  (!value.is_empty()).then(|| value.to_string())
}

const fn alignment(alignment: &TableAlignment) -> Option<Align> {
  match alignment {
    TableAlignment::Left => Some(Align::Left),
    TableAlignment::Center => Some(Align::Center),
    TableAlignment::Right => Some(Align::Right),
    TableAlignment::None => None,
  }
}
