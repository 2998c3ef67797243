use std::convert::TryFrom;
use std::ops::Deref;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::{TagNode, TagType};

/// An NBT List: zero or more unnamed nodes that all share one tag type.
///
/// Every method that adds or replaces a node checks it against
/// [`value_type`][TagList::value_type] and fails with
/// [`Error::InvalidAssignment`] without touching the list when it does not
/// match.
///
/// ```
/// # use nbtree::{TagList, TagNode, TagType};
/// let mut list = TagList::new(TagType::Byte);
/// list.push(TagNode::Byte(1)).unwrap();
///
/// assert!(list.push(TagNode::Int(2)).is_err());
/// assert_eq!(list.len(), 1);
/// ```
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct TagList {
    value_type: TagType,
    items: Vec<TagNode>,
}

impl Default for TagList {
    /// An empty list of `End`, which is how empty lists usually appear on disk.
    fn default() -> Self {
        Self::new(TagType::End)
    }
}

impl TagList {
    pub fn new(value_type: TagType) -> Self {
        Self {
            value_type,
            items: Vec::new(),
        }
    }

    /// Build a list from existing nodes, checking each one.
    pub fn from_nodes(value_type: TagType, nodes: Vec<TagNode>) -> Result<Self> {
        if let Some(bad) = nodes.iter().find(|n| n.tag_type() != value_type) {
            return Err(Error::invalid_assignment(value_type, bad.tag_type()));
        }
        Ok(Self {
            value_type,
            items: nodes,
        })
    }

    /// The tag type every element of this list has.
    pub fn value_type(&self) -> TagType {
        self.value_type
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TagNode> {
        self.items.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<ElementMut<'_>> {
        self.items.get_mut(index).map(|node| ElementMut { node })
    }

    pub fn push(&mut self, node: TagNode) -> Result<()> {
        self.check(&node)?;
        self.items.push(node);
        Ok(())
    }

    /// Insert at `index`, shifting later elements up.
    ///
    /// # Panics
    /// If `index > len`, as [`Vec::insert`] does.
    pub fn insert(&mut self, index: usize, node: TagNode) -> Result<()> {
        self.check(&node)?;
        self.items.insert(index, node);
        Ok(())
    }

    /// Replace the element at `index`, returning the old one.
    ///
    /// # Panics
    /// If `index >= len`.
    pub fn set(&mut self, index: usize, node: TagNode) -> Result<TagNode> {
        self.check(&node)?;
        Ok(std::mem::replace(&mut self.items[index], node))
    }

    pub fn remove(&mut self, index: usize) -> Option<TagNode> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    pub fn pop(&mut self) -> Option<TagNode> {
        self.items.pop()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Keep only the elements matching `f`. The inverse of the classic
    /// remove-all-matching operation.
    pub fn retain(&mut self, f: impl FnMut(&TagNode) -> bool) {
        self.items.retain(f);
    }

    pub fn reverse(&mut self) {
        self.items.reverse();
    }

    pub fn find(&self, mut f: impl FnMut(&TagNode) -> bool) -> Option<&TagNode> {
        self.items.iter().find(|n| f(n))
    }

    /// Change the element type. If it differs from the current one the list
    /// is emptied first.
    pub fn change_value_type(&mut self, value_type: TagType) {
        if value_type == self.value_type {
            return;
        }
        self.items.clear();
        self.value_type = value_type;
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TagNode> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = ElementMut<'_>> {
        self.items.iter_mut().map(|node| ElementMut { node })
    }

    pub fn into_vec(self) -> Vec<TagNode> {
        self.items
    }

    fn check(&self, node: &TagNode) -> Result<()> {
        if node.tag_type() != self.value_type {
            return Err(Error::invalid_assignment(self.value_type, node.tag_type()));
        }
        Ok(())
    }
}

/// Builds a list typed after its first element. An empty vector gives an
/// empty list of `End`.
impl TryFrom<Vec<TagNode>> for TagList {
    type Error = Error;

    fn try_from(nodes: Vec<TagNode>) -> Result<Self> {
        let value_type = nodes.first().map_or(TagType::End, TagNode::tag_type);
        Self::from_nodes(value_type, nodes)
    }
}

impl<'a> IntoIterator for &'a TagList {
    type Item = &'a TagNode;
    type IntoIter = std::slice::Iter<'a, TagNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl IntoIterator for TagList {
    type Item = TagNode;
    type IntoIter = std::vec::IntoIter<TagNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

/// Mutable handle to a list element. Reads go through `Deref`; writes only
/// through the `as_*_mut` accessors, which cannot change the element's type.
pub struct ElementMut<'a> {
    pub(super) node: &'a mut TagNode,
}

impl Deref for ElementMut<'_> {
    type Target = TagNode;

    fn deref(&self) -> &TagNode {
        self.node
    }
}
