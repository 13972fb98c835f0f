//! Borrowed views into an [`IndexedTree`][crate::IndexedTree]: single nodes and in-order
//! iteration.

use std::fmt;
use std::iter::FusedIterator;

use slab::Slab;

use crate::identifier::Identifier;
use crate::tree::Node;

/// A read-only handle to one node of a tree. Handles borrow the tree, so it can't change while
/// they are alive.
///
/// Two handles are equal when they refer to the same node of the same tree.
pub struct NodeRef<'a, T> {
    nodes: &'a Slab<Node<T>>,
    slot: usize,
}

impl<'a, T> Clone for NodeRef<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T> Copy for NodeRef<'a, T> {}

impl<'a, T> NodeRef<'a, T> {
    pub(crate) fn new(nodes: &'a Slab<Node<T>>, slot: usize) -> Self {
        Self { nodes, slot }
    }

    fn node(&self) -> &'a Node<T> {
        &self.nodes[self.slot]
    }

    /// The node's identifier.
    pub fn identifier(&self) -> Identifier {
        self.node().identifier
    }

    /// The node's value.
    pub fn value(&self) -> &'a T {
        &self.node().value
    }

    /// The root of the left subtree, if there is one.
    pub fn left(&self) -> Option<NodeRef<'a, T>> {
        self.node().left.map(|slot| Self::new(self.nodes, slot))
    }

    /// The root of the right subtree, if there is one.
    pub fn right(&self) -> Option<NodeRef<'a, T>> {
        self.node().right.map(|slot| Self::new(self.nodes, slot))
    }
}

impl<'a, T> PartialEq for NodeRef<'a, T> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.nodes, other.nodes) && self.slot == other.slot
    }
}

impl<'a, T> Eq for NodeRef<'a, T> {}

impl<'a, T> fmt::Debug for NodeRef<'a, T>
where
    T: fmt::Debug,
{
    /// Children are shown by identifier only, so formatting never walks the subtree.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("identifier", &self.identifier())
            .field("value", self.value())
            .field("left", &self.left().map(|left| left.identifier()))
            .field("right", &self.right().map(|right| right.identifier()))
            .finish()
    }
}

/// In-order iterator over `(identifier, value)` pairs, created by
/// [`IndexedTree::iter`][crate::IndexedTree::iter].
///
/// Only the path down to the next node is kept on a stack, so the tree is walked lazily.
pub struct Iter<'a, T> {
    nodes: &'a Slab<Node<T>>,
    stack: Vec<usize>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(nodes: &'a Slab<Node<T>>, root: Option<usize>) -> Self {
        let mut iter = Self {
            nodes,
            stack: Vec::new(),
            remaining: nodes.len(),
        };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut cursor: Option<usize>) {
        while let Some(slot) = cursor {
            self.stack.push(slot);
            cursor = self.nodes[slot].left;
        }
    }
}

impl<'a, T> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes,
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

/// Lists the pairs the iterator has yet to yield.
impl<'a, T> fmt::Debug for Iter<'a, T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (Identifier, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let slot = self.stack.pop()?;
        let nodes = self.nodes;
        let node = &nodes[slot];
        self.push_left_spine(node.right);
        self.remaining -= 1;
        Some((node.identifier, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T> FusedIterator for Iter<'a, T> {}

#[cfg(test)]
mod tests {
    use crate::IndexedTree;

    #[test]
    fn test_len_counts_down() {
        let mut tree = IndexedTree::new();
        for x in [2, 1, 3] {
            tree.insert(x).unwrap();
        }

        let mut iter = tree.iter();
        assert_eq!(iter.len(), 3);
        iter.next();
        assert_eq!(iter.len(), 2);
        iter.next();
        iter.next();
        assert_eq!(iter.len(), 0);
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn test_deep_left_spine() {
        let mut tree = IndexedTree::new();
        for x in (0..1000).rev() {
            tree.insert(x).unwrap();
        }

        assert!(tree.iter().map(|(_, v)| *v).eq(0..1000));
    }

    #[test]
    fn test_node_ref_equality() {
        let mut tree = IndexedTree::new();
        let a = tree.insert(1).unwrap();
        let b = tree.insert(2).unwrap();

        assert_eq!(tree.find(a), tree.root());
        assert_ne!(tree.find(b), tree.root());
        assert_eq!(tree.root().unwrap().right(), tree.find(b));
    }

    #[test]
    fn test_debug_shows_shape() {
        let mut tree = IndexedTree::new();
        tree.insert(1).unwrap();

        let debug = format!("{:?}", tree.root().unwrap());
        assert!(debug.contains("value: 1"));
        assert!(debug.contains("left: None"));
    }

    #[test]
    fn test_debug_shows_children_by_identifier() {
        let mut tree = IndexedTree::new();
        tree.insert(2).unwrap();
        let left = tree.insert(1).unwrap();
        tree.insert(0).unwrap();

        let debug = format!("{:?}", tree.root().unwrap());
        assert!(debug.contains(&format!("left: Some({:?})", left)));
        assert!(!debug.contains("value: 0"));
    }

    #[test]
    fn test_iter_debug_lists_remaining() {
        let mut tree = IndexedTree::new();
        let one = tree.insert(1).unwrap();
        let two = tree.insert(2).unwrap();

        let mut iter = tree.iter();
        assert_eq!(
            format!("{:?}", iter),
            format!("[({:?}, 1), ({:?}, 2)]", one, two)
        );
        iter.next();
        assert_eq!(format!("{:?}", iter), format!("[({:?}, 2)]", two));
    }
}
