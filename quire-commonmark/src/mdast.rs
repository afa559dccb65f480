//! Document tree produced from parsed Markdown.
//!
//! The shape follows the familiar mdast vocabulary (`paragraph`, `image`,
//! `html`, ...) but every node kind is a closed variant, so each traversal site
//! has to say what it does with each kind of node.
//!
//! Only [`Node::Link`] and [`Node::Image`] carry [`Data`], the metadata mapping
//! whose render properties are copied verbatim onto the compiled element.
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Ordered attribute-like mapping. Insertion order is kept so rendered
/// attributes come out in a stable order.
pub type Properties = IndexMap<String, String>;

/// Metadata attached to a node for later stages of the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Data {
  /// Properties handed to the render tree as element attributes.
  #[serde(
    default,
    rename = "hProperties",
    skip_serializing_if = "IndexMap::is_empty"
  )]
  pub h_properties: Properties,
}

impl Data {
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.h_properties.is_empty()
  }

  /// Set a render property, replacing any previous value.
  pub fn set_property(
    &mut self,
    key: impl Into<String>,
    value: impl Into<String>,
  ) {
    self.h_properties.insert(key.into(), value.into());
  }

  #[must_use]
  pub fn property(&self, key: &str) -> Option<&str> {
    self.h_properties.get(key).map(String::as_str)
  }
}

/// Column alignment of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
  Left,
  Center,
  Right,
}

impl Align {
  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Left => "left",
      Self::Center => "center",
      Self::Right => "right",
    }
  }
}

/// A node of the document tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Node {
  Root {
    children: Vec<Node>,
  },
  Paragraph {
    children: Vec<Node>,
  },
  Heading {
    depth:    u8,
    children: Vec<Node>,
  },
  BlockQuote {
    children: Vec<Node>,
  },
  List {
    ordered:  bool,
    start:    Option<usize>,
    /// Loose list: items are separated by blank lines and keep their
    /// paragraphs when rendered.
    spread:   bool,
    children: Vec<Node>,
  },
  ListItem {
    children: Vec<Node>,
  },
  Code {
    lang:  Option<String>,
    value: String,
  },
  ThematicBreak,
  Table {
    align:    Vec<Option<Align>>,
    children: Vec<Node>,
  },
  TableRow {
    header:   bool,
    children: Vec<Node>,
  },
  TableCell {
    children: Vec<Node>,
  },
  Emphasis {
    children: Vec<Node>,
  },
  Strong {
    children: Vec<Node>,
  },
  Delete {
    children: Vec<Node>,
  },
  InlineCode {
    value: String,
  },
  Break,
  Text {
    value: String,
  },
  Link {
    url:      String,
    title:    Option<String>,
    children: Vec<Node>,
    #[serde(default, skip_serializing_if = "Data::is_empty")]
    data:     Data,
  },
  Image {
    url:   String,
    alt:   String,
    title: Option<String>,
    #[serde(default, skip_serializing_if = "Data::is_empty")]
    data:  Data,
  },
  /// Raw markup, including markup comments.
  Html {
    value: String,
  },
}

impl Node {
  #[must_use]
  pub fn root(children: Vec<Self>) -> Self {
    Self::Root { children }
  }

  #[must_use]
  pub fn paragraph(children: Vec<Self>) -> Self {
    Self::Paragraph { children }
  }

  #[must_use]
  pub fn text(value: impl Into<String>) -> Self {
    Self::Text {
      value: value.into(),
    }
  }

  #[must_use]
  pub fn html(value: impl Into<String>) -> Self {
    Self::Html {
      value: value.into(),
    }
  }

  #[must_use]
  pub fn image(url: impl Into<String>, alt: impl Into<String>) -> Self {
    Self::Image {
      url:   url.into(),
      alt:   alt.into(),
      title: None,
      data:  Data::default(),
    }
  }

  #[must_use]
  pub fn link(url: impl Into<String>, children: Vec<Self>) -> Self {
    Self::Link {
      url: url.into(),
      title: None,
      children,
      data: Data::default(),
    }
  }

  /// Name of the node kind, as used in the serialized `type` tag.
  #[must_use]
  pub const fn kind(&self) -> &'static str {
    match self {
      Self::Root { .. } => "root",
      Self::Paragraph { .. } => "paragraph",
      Self::Heading { .. } => "heading",
      Self::BlockQuote { .. } => "blockQuote",
      Self::List { .. } => "list",
      Self::ListItem { .. } => "listItem",
      Self::Code { .. } => "code",
      Self::ThematicBreak => "thematicBreak",
      Self::Table { .. } => "table",
      Self::TableRow { .. } => "tableRow",
      Self::TableCell { .. } => "tableCell",
      Self::Emphasis { .. } => "emphasis",
      Self::Strong { .. } => "strong",
      Self::Delete { .. } => "delete",
      Self::InlineCode { .. } => "inlineCode",
      Self::Break => "break",
      Self::Text { .. } => "text",
      Self::Link { .. } => "link",
      Self::Image { .. } => "image",
      Self::Html { .. } => "html",
    }
  }

  /// Child nodes, or `None` for leaves.
  #[must_use]
  pub fn children(&self) -> Option<&[Self]> {
    match self {
      Self::Root { children }
      | Self::Paragraph { children }
      | Self::Heading { children, .. }
      | Self::BlockQuote { children }
      | Self::List { children, .. }
      | Self::ListItem { children }
      | Self::Table { children, .. }
      | Self::TableRow { children, .. }
      | Self::TableCell { children }
      | Self::Emphasis { children }
      | Self::Strong { children }
      | Self::Delete { children }
      | Self::Link { children, .. } => Some(children),
      Self::Code { .. }
      | Self::ThematicBreak
      | Self::InlineCode { .. }
      | Self::Break
      | Self::Text { .. }
      | Self::Image { .. }
      | Self::Html { .. } => None,
    }
  }

  pub fn children_mut(&mut self) -> Option<&mut Vec<Self>> {
    match self {
      Self::Root { children }
      | Self::Paragraph { children }
      | Self::Heading { children, .. }
      | Self::BlockQuote { children }
      | Self::List { children, .. }
      | Self::ListItem { children }
      | Self::Table { children, .. }
      | Self::TableRow { children, .. }
      | Self::TableCell { children }
      | Self::Emphasis { children }
      | Self::Strong { children }
      | Self::Delete { children }
      | Self::Link { children, .. } => Some(children),
      Self::Code { .. }
      | Self::ThematicBreak
      | Self::InlineCode { .. }
      | Self::Break
      | Self::Text { .. }
      | Self::Image { .. }
      | Self::Html { .. } => None,
    }
  }

  /// Metadata of nodes that can carry it.
  #[must_use]
  pub const fn data(&self) -> Option<&Data> {
    match self {
      Self::Link { data, .. } | Self::Image { data, .. } => Some(data),
      _ => None,
    }
  }

  pub const fn data_mut(&mut self) -> Option<&mut Data> {
    match self {
      Self::Link { data, .. } | Self::Image { data, .. } => Some(data),
      _ => None,
    }
  }

  #[must_use]
  pub const fn is_image(&self) -> bool {
    matches!(self, Self::Image { .. })
  }

  /// Plain text of the node and its descendants. Images and raw markup do not
  /// contribute.
  #[must_use]
  pub fn text_content(&self) -> String {
    let mut text = String::new();
    self.push_text(&mut text);
    text
  }

  fn push_text(&self, out: &mut String) {
    match self {
      Self::Text { value } | Self::InlineCode { value } => out.push_str(value),
      Self::Code { value, .. } => out.push_str(value),
      Self::Break => out.push('\n'),
      Self::Image { .. } | Self::Html { .. } | Self::ThematicBreak => {},
      _ => {
        for child in self.children().unwrap_or_default() {
          child.push_text(out);
        }
      },
    }
  }
}
