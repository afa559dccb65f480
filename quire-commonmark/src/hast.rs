//! Render tree: elements, text and markup leaves ready for serialization.
use serde::{Deserialize, Serialize};

pub use crate::mdast::Properties;

/// An element with a tag name, ordered attributes and children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
  pub tag_name:   String,
  #[serde(default)]
  pub properties: Properties,
  #[serde(default)]
  pub children:   Vec<Node>,
}

impl Element {
  #[must_use]
  pub fn new(tag_name: impl Into<String>) -> Self {
    Self {
      tag_name:   tag_name.into(),
      properties: Properties::new(),
      children:   Vec::new(),
    }
  }

  #[must_use]
  pub fn with_property(
    mut self,
    key: impl Into<String>,
    value: impl Into<String>,
  ) -> Self {
    self.properties.insert(key.into(), value.into());
    self
  }

  #[must_use]
  pub fn with_properties(mut self, properties: Properties) -> Self {
    self.properties.extend(properties);
    self
  }

  #[must_use]
  pub fn with_children(mut self, children: Vec<Node>) -> Self {
    self.children = children;
    self
  }

  #[must_use]
  pub fn is(&self, tag_name: &str) -> bool {
    self.tag_name == tag_name
  }

  #[must_use]
  pub fn property(&self, key: &str) -> Option<&str> {
    self.properties.get(key).map(String::as_str)
  }
}

impl From<Element> for Node {
  fn from(element: Element) -> Self {
    Self::Element(element)
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Node {
  Root { children: Vec<Node> },
  Element(Element),
  Text { value: String },
  /// A markup comment; `value` is the text between the delimiters.
  Comment { value: String },
  /// Markup passed through verbatim.
  Raw { value: String },
}

impl Node {
  #[must_use]
  pub fn root(children: Vec<Self>) -> Self {
    Self::Root { children }
  }

  #[must_use]
  pub fn text(value: impl Into<String>) -> Self {
    Self::Text {
      value: value.into(),
    }
  }

  #[must_use]
  pub fn comment(value: impl Into<String>) -> Self {
    Self::Comment {
      value: value.into(),
    }
  }

  #[must_use]
  pub fn raw(value: impl Into<String>) -> Self {
    Self::Raw {
      value: value.into(),
    }
  }

  #[must_use]
  pub const fn as_element(&self) -> Option<&Element> {
    match self {
      Self::Element(element) => Some(element),
      _ => None,
    }
  }

  /// The element if it has the given tag name.
  #[must_use]
  pub fn element_named(&self, tag_name: &str) -> Option<&Element> {
    self.as_element().filter(|element| element.is(tag_name))
  }

  #[must_use]
  pub fn children(&self) -> Option<&[Self]> {
    match self {
      Self::Root { children } => Some(children),
      Self::Element(element) => Some(&element.children),
      Self::Text { .. } | Self::Comment { .. } | Self::Raw { .. } => None,
    }
  }

  pub fn children_mut(&mut self) -> Option<&mut Vec<Self>> {
    match self {
      Self::Root { children } => Some(children),
      Self::Element(element) => Some(&mut element.children),
      Self::Text { .. } | Self::Comment { .. } | Self::Raw { .. } => None,
    }
  }
}
