//! Tree traversal with explicit coordinates.
//!
//! Nodes never point back at their parents. Instead [`walk`] hands every
//! visitor the parent and the index of the node inside it, and structural
//! rewrites are expressed as [`Edit`]s against [`NodePath`] coordinates that
//! are applied after traversal has finished.
use std::cmp::Reverse;

use log::trace;

use crate::{hast, mdast};

/// A tree whose nodes may own an ordered list of children.
pub trait Tree: Sized {
  fn children(&self) -> Option<&[Self]>;

  fn children_mut(&mut self) -> Option<&mut Vec<Self>>;

  /// Whether the node is a text leaf made only of whitespace. Such nodes are
  /// layout noise between the nodes that matter and are skipped when looking
  /// for siblings.
  fn is_whitespace_text(&self) -> bool;
}

impl Tree for mdast::Node {
  fn children(&self) -> Option<&[Self]> {
    Self::children(self)
  }

  fn children_mut(&mut self) -> Option<&mut Vec<Self>> {
    Self::children_mut(self)
  }

  fn is_whitespace_text(&self) -> bool {
    matches!(self, Self::Text { value } if value.trim().is_empty())
  }
}

impl Tree for hast::Node {
  fn children(&self) -> Option<&[Self]> {
    Self::children(self)
  }

  fn children_mut(&mut self) -> Option<&mut Vec<Self>> {
    Self::children_mut(self)
  }

  fn is_whitespace_text(&self) -> bool {
    matches!(self, Self::Text { value } if value.trim().is_empty())
  }
}

/// Child indices leading from the root to a node. The root itself has the
/// empty path.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodePath(Vec<usize>);

impl NodePath {
  #[must_use]
  pub const fn root() -> Self {
    Self(Vec::new())
  }

  /// Path of the child at `index` below this node.
  #[must_use]
  pub fn child(&self, index: usize) -> Self {
    let mut indices = Vec::with_capacity(self.0.len() + 1);
    indices.extend_from_slice(&self.0);
    indices.push(index);
    Self(indices)
  }

  /// Split into the parent path and the index within the parent.
  #[must_use]
  pub fn split_last(&self) -> Option<(Self, usize)> {
    let (last, parent) = self.0.split_last()?;
    Some((Self(parent.to_vec()), *last))
  }

  #[must_use]
  pub fn as_slice(&self) -> &[usize] {
    &self.0
  }
}

impl From<Vec<usize>> for NodePath {
  fn from(indices: Vec<usize>) -> Self {
    Self(indices)
  }
}

/// Where a visited node sits: its parent, its index among the parent's
/// children and the parent's own coordinates.
#[derive(Debug)]
pub struct Position<'a, T> {
  pub parent:      &'a T,
  pub index:       usize,
  pub parent_path: NodePath,
}

impl<T: Tree> Position<'_, T> {
  /// Siblings of the visited node, itself included.
  #[must_use]
  pub fn siblings(&self) -> &[T] {
    self.parent.children().unwrap_or_default()
  }

  /// Coordinates of the visited node.
  #[must_use]
  pub fn path(&self) -> NodePath {
    self.parent_path.child(self.index)
  }
}

/// Visit every node depth-first, in pre-order.
///
/// The root is visited with `None`; every other node with its [`Position`].
pub fn walk<'a, T, F>(root: &'a T, visitor: &mut F)
where
  T: Tree,
  F: FnMut(&'a T, Option<&Position<'a, T>>),
{
  visitor(root, None);
  walk_children(root, &NodePath::root(), visitor);
}

fn walk_children<'a, T, F>(
  parent: &'a T,
  parent_path: &NodePath,
  visitor: &mut F,
) where
  T: Tree,
  F: FnMut(&'a T, Option<&Position<'a, T>>),
{
  let Some(children) = parent.children() else {
    return;
  };

  for (index, child) in children.iter().enumerate() {
    let position = Position {
      parent,
      index,
      parent_path: parent_path.clone(),
    };
    visitor(child, Some(&position));
    walk_children(child, &position.path(), visitor);
  }
}

/// Visit every node depth-first, in pre-order, with mutable access.
///
/// No [`Position`] is available here since a parent cannot stay borrowed while
/// one of its children is handed out mutably. Passes that need coordinates
/// collect them with [`walk`] and apply changes afterwards.
pub fn walk_mut<T, F>(node: &mut T, visitor: &mut F)
where
  T: Tree,
  F: FnMut(&mut T),
{
  visitor(node);
  if let Some(children) = node.children_mut() {
    for child in children {
      walk_mut(child, visitor);
    }
  }
}

/// Resolve a path to a node for editing. Returns `None` once a coordinate no
/// longer exists.
pub fn node_at_mut<'a, T: Tree>(
  root: &'a mut T,
  path: &NodePath,
) -> Option<&'a mut T> {
  let mut node = root;
  for &index in path.as_slice() {
    node = node.children_mut()?.get_mut(index)?;
  }
  Some(node)
}

/// Index of the nearest sibling before `index` that is not whitespace-only
/// text.
#[must_use]
pub fn previous_sibling_index<T: Tree>(
  siblings: &[T],
  index: usize,
) -> Option<usize> {
  siblings
    .get(..index)?
    .iter()
    .rposition(|node| !node.is_whitespace_text())
}

/// The change an [`Edit`] makes at its coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditKind<T> {
  Remove,
  Replace(T),
}

/// A planned structural change: remove or replace the child at `index` of the
/// node found at `parent`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit<T> {
  pub parent: NodePath,
  pub index:  usize,
  pub kind:   EditKind<T>,
}

impl<T> Edit<T> {
  #[must_use]
  pub const fn remove(parent: NodePath, index: usize) -> Self {
    Self {
      parent,
      index,
      kind: EditKind::Remove,
    }
  }

  #[must_use]
  pub const fn replace(parent: NodePath, index: usize, node: T) -> Self {
    Self {
      parent,
      index,
      kind: EditKind::Replace(node),
    }
  }

  /// Coordinates of the node the edit touches.
  #[must_use]
  pub fn target(&self) -> NodePath {
    self.parent.child(self.index)
  }
}

/// Apply edits collected during a traversal and return how many were applied.
///
/// Edits run in descending order of their target path. A change at some
/// coordinate only ever shifts later siblings and their descendants, and all
/// of those have already been handled by the time it runs, so every
/// coordinate computed before the first edit stays valid. Duplicate targets
/// are applied once; targets that do not resolve are skipped.
pub fn apply_edits<T: Tree>(root: &mut T, edits: Vec<Edit<T>>) -> usize {
  let mut edits = edits
    .into_iter()
    .map(|edit| (edit.target(), edit))
    .collect::<Vec<_>>();
  edits.sort_by_key(|(target, _)| Reverse(target.clone()));

  let mut applied = 0;
  let mut last_target: Option<NodePath> = None;

  for (target, edit) in edits {
    if last_target.as_ref() == Some(&target) {
      trace!("Skipping duplicate edit at {:?}", target.as_slice());
      continue;
    }
    last_target = Some(target);

    let Some(children) =
      node_at_mut(root, &edit.parent).and_then(Tree::children_mut)
    else {
      trace!("Edit parent {:?} no longer resolves", edit.parent.as_slice());
      continue;
    };
    if edit.index >= children.len() {
      continue;
    }

    match edit.kind {
      EditKind::Remove => {
        children.remove(edit.index);
      },
      EditKind::Replace(node) => children[edit.index] = node,
    }
    applied += 1;
  }

  applied
}
