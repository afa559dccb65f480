//! Document tree to render tree compilation.
use crate::{
  hast::{self, Element},
  mdast::{self, Align},
  utils::slugify,
};

/// Compile a document tree into a render tree.
///
/// Render properties in link and image [`Data`](mdast::Data) become
/// attributes of the produced `a` and `img` elements.
#[must_use]
pub fn compile(tree: &mdast::Node) -> hast::Node {
  match tree {
    mdast::Node::Root { children } => hast::Node::root(compile_all(children)),
    node => hast::Node::root(compile_node(node, false)),
  }
}

fn compile_all(nodes: &[mdast::Node]) -> Vec<hast::Node> {
  nodes.iter().flat_map(|node| compile_node(node, false)).collect()
}

/// Children of a list item; paragraphs of tight lists are unwrapped.
fn compile_item(nodes: &[mdast::Node], tight: bool) -> Vec<hast::Node> {
  nodes
    .iter()
    .flat_map(|node| compile_node(node, tight))
    .collect()
}

fn element(tag_name: &str, children: Vec<hast::Node>) -> hast::Node {
  Element::new(tag_name).with_children(children).into()
}

/// Comment text when `value` is a single markup comment and nothing else.
fn comment_body(value: &str) -> Option<&str> {
  let inner = value.trim().strip_prefix("<!--")?.strip_suffix("-->")?;
  (!inner.contains("-->")).then_some(inner)
}

/// Id given to a heading with the given text.
#[must_use]
pub fn heading_id(text: &str) -> String {
  slugify(text)
}

fn compile_node(node: &mdast::Node, unwrap_paragraph: bool) -> Vec<hast::Node> {
  let compiled = match node {
    mdast::Node::Root { children } => hast::Node::root(compile_all(children)),
    mdast::Node::Paragraph { children } if unwrap_paragraph => {
      return compile_all(children);
    },
    mdast::Node::Paragraph { children } => element("p", compile_all(children)),
    mdast::Node::Heading { depth, children } => {
      Element::new(format!("h{}", (*depth).clamp(1, 6)))
        .with_property("id", heading_id(&node.text_content()))
        .with_children(compile_all(children))
        .into()
    },
    mdast::Node::BlockQuote { children } => {
      element("blockquote", compile_all(children))
    },
    mdast::Node::List {
      ordered,
      start,
      spread,
      children,
    } => {
      let items = children
        .iter()
        .map(|item| {
          let contents = item.children().unwrap_or_default();
          element("li", compile_item(contents, !spread))
        })
        .collect::<Vec<_>>();
      let mut list = Element::new(if *ordered { "ol" } else { "ul" });
      if let Some(start) = start.filter(|start| *start != 1) {
        list = list.with_property("start", start.to_string());
      }
      list.with_children(items).into()
    },
    mdast::Node::ListItem { children } => element("li", compile_all(children)),
    mdast::Node::Code { lang, value } => {
      let mut code = Element::new("code");
      if let Some(lang) = lang {
        code = code.with_property("class", format!("language-{lang}"));
      }
      element("pre", vec![
        code.with_children(vec![hast::Node::text(value.as_str())]).into(),
      ])
    },
    mdast::Node::ThematicBreak => element("hr", Vec::new()),
    mdast::Node::Table { align, children } => compile_table(align, children),
    mdast::Node::TableRow { children, .. } => element("tr", compile_all(children)),
    mdast::Node::TableCell { children } => element("td", compile_all(children)),
    mdast::Node::Emphasis { children } => element("em", compile_all(children)),
    mdast::Node::Strong { children } => element("strong", compile_all(children)),
    mdast::Node::Delete { children } => element("del", compile_all(children)),
    mdast::Node::InlineCode { value } => {
      element("code", vec![hast::Node::text(value.as_str())])
    },
    mdast::Node::Break => element("br", Vec::new()),
    mdast::Node::Text { value } => hast::Node::text(value.as_str()),
    mdast::Node::Link {
      url,
      title,
      children,
      data,
    } => {
      let mut link = Element::new("a").with_property("href", url.as_str());
      if let Some(title) = title {
        link = link.with_property("title", title.as_str());
      }
      link
        .with_properties(data.h_properties.clone())
        .with_children(compile_all(children))
        .into()
    },
    mdast::Node::Image {
      url,
      alt,
      title,
      data,
    } => {
      let mut img = Element::new("img")
        .with_property("src", url.as_str())
        .with_property("alt", alt.as_str());
      if let Some(title) = title {
        img = img.with_property("title", title.as_str());
      }
      img.with_properties(data.h_properties.clone()).into()
    },
    mdast::Node::Html { value } => {
      comment_body(value).map_or_else(
        || hast::Node::raw(value.as_str()),
        hast::Node::comment,
      )
    },
  };

  vec![compiled]
}

fn compile_table(align: &[Option<Align>], rows: &[mdast::Node]) -> hast::Node {
  let mut head = Vec::new();
  let mut body = Vec::new();

  for row in rows {
    let header = matches!(row, mdast::Node::TableRow { header: true, .. });
    let cells = row
      .children()
      .unwrap_or_default()
      .iter()
      .enumerate()
      .map(|(column, cell)| {
        let mut cell_element = Element::new(if header { "th" } else { "td" });
        if let Some(align) = align.get(column).copied().flatten() {
          cell_element = cell_element
            .with_property("style", format!("text-align: {}", align.as_str()));
        }
        cell_element
          .with_children(compile_all(cell.children().unwrap_or_default()))
          .into()
      })
      .collect::<Vec<hast::Node>>();

    if header {
      head.push(element("tr", cells));
    } else {
      body.push(element("tr", cells));
    }
  }

  let mut sections = vec![element("thead", head)];
  if !body.is_empty() {
    sections.push(element("tbody", body));
  }
  element("table", sections)
}
