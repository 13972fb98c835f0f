//! A Binary Search Tree whose nodes are also reachable through a random identifier.
//!
//! Nodes live in an arena and refer to each other by slot. Each node is owned by exactly one
//! link (its parent's `left`/`right`, or the tree's root) while the identifier index maps
//! identifiers to the same slots without owning anything. Every mutation restores the index so
//! that it names exactly the nodes reachable from the root.
//!
//! # Examples
//!
//! ```
//! use indexed_bst::IndexedTree;
//!
//! let mut tree = IndexedTree::new();
//!
//! let apple = tree.insert("apple").unwrap();
//! let cherry = tree.insert("cherry").unwrap();
//! tree.insert("banana").unwrap();
//!
//! // Iteration is in value order.
//! let fruit: Vec<_> = tree.iter().map(|(_, fruit)| *fruit).collect();
//! assert_eq!(fruit, ["apple", "banana", "cherry"]);
//!
//! // Nodes are found by identifier, not value.
//! assert_eq!(tree.get(cherry), Some(&"cherry"));
//!
//! // Updating a value leaves the node where it is.
//! let old = tree.update(apple, "zucchini").unwrap();
//! assert_eq!(old, "apple");
//! assert_eq!(tree.find_by_value(&"zucchini").len(), 1);
//! ```

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

use log::{debug, trace, warn};
use slab::Slab;

use crate::config::{CollisionPolicy, DuplicatePlacement, RemovalStrategy, TreeConfig};
use crate::error::{Error, Result};
use crate::identifier::{Identifier, IdentifierSource, RandomIds};
use crate::iter::{Iter, NodeRef};

/// A single arena entry. `parent` mirrors the owning link so a node can be spliced out without
/// searching for whoever points at it.
#[derive(Clone)]
pub(crate) struct Node<T> {
    pub(crate) identifier: Identifier,
    pub(crate) value: T,
    pub(crate) left: Option<usize>,
    pub(crate) right: Option<usize>,
    pub(crate) parent: Option<usize>,
}

/// An unbalanced Binary Search Tree ordered by value, with an index from node identifiers to
/// nodes.
///
/// Insertion orders nodes by value and hands back a freshly generated [`Identifier`]. Lookup,
/// update, and removal all take that identifier. See [`RemovalStrategy`] for how removal locates
/// its target.
///
/// The tree is not internally synchronised. Wrap it in a [`SharedTree`][crate::SharedTree] to
/// use it from several threads.
#[derive(Clone)]
pub struct IndexedTree<T, S = RandomIds> {
    nodes: Slab<Node<T>>,
    root: Option<usize>,
    index: HashMap<Identifier, usize>,
    source: S,
    config: TreeConfig,
}

impl<T> Default for IndexedTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> IndexedTree<T> {
    /// Generates a new, empty tree with the default configuration and random identifiers.
    pub fn new() -> Self {
        Self::with_config(TreeConfig::default())
    }

    /// Generates a new, empty tree with the given configuration and random identifiers.
    pub fn with_config(config: TreeConfig) -> Self {
        Self::with_source(RandomIds::new(), config)
    }
}

impl<T, S> IndexedTree<T, S>
where
    S: IdentifierSource,
{
    /// Generates a new, empty tree that takes its identifiers from `source`.
    ///
    /// # Examples
    ///
    /// ```
    /// use indexed_bst::identifier::RandomIds;
    /// use indexed_bst::{IndexedTree, TreeConfig};
    ///
    /// let mut a = IndexedTree::with_source(RandomIds::seeded(1), TreeConfig::default());
    /// let mut b = IndexedTree::with_source(RandomIds::seeded(1), TreeConfig::default());
    ///
    /// assert_eq!(a.insert(10).unwrap(), b.insert(20).unwrap());
    /// ```
    pub fn with_source(source: S, config: TreeConfig) -> Self {
        Self {
            nodes: Slab::new(),
            root: None,
            index: HashMap::new(),
            source,
            config,
        }
    }

    /// Inserts `value` as a new leaf and returns the identifier it was given.
    ///
    /// Smaller values go left and larger values go right. Where an equal value goes depends on
    /// the tree's [`DuplicatePlacement`]. The tree is never rebalanced.
    ///
    /// Fails only when the [`CollisionPolicy`] is `Retry` and every identifier it tried is
    /// already taken.
    ///
    /// # Examples
    ///
    /// ```
    /// use indexed_bst::IndexedTree;
    ///
    /// let mut tree = IndexedTree::new();
    /// let id = tree.insert(5).unwrap();
    ///
    /// assert_eq!(tree.get(id), Some(&5));
    /// assert_eq!(tree.root().map(|root| root.identifier()), Some(id));
    /// ```
    pub fn insert(&mut self, value: T) -> Result<Identifier>
    where
        T: Ord,
    {
        let identifier = self.fresh_identifier()?;

        let mut parent = None;
        let mut go_left = false;
        let mut cursor = self.root;
        while let Some(slot) = cursor {
            let node = &self.nodes[slot];
            go_left = match (value.cmp(&node.value), self.config.duplicates) {
                (Ordering::Less, _) | (Ordering::Equal, DuplicatePlacement::Left) => true,
                (Ordering::Greater, _) | (Ordering::Equal, DuplicatePlacement::Right) => false,
            };
            parent = Some(slot);
            cursor = if go_left { node.left } else { node.right };
        }

        let slot = self.nodes.insert(Node {
            identifier,
            value,
            left: None,
            right: None,
            parent,
        });
        match parent {
            None => self.root = Some(slot),
            Some(parent) if go_left => self.nodes[parent].left = Some(slot),
            Some(parent) => self.nodes[parent].right = Some(slot),
        }

        if let Some(shadowed) = self.index.insert(identifier, slot) {
            warn!(
                "identifier {} reused, node in slot {} is no longer indexed",
                identifier, shadowed
            );
        }
        trace!("inserted {} into slot {} under {:?}", identifier, slot, parent);

        self.check_index();
        Ok(identifier)
    }

    /// Asks the source for an identifier, honouring the collision policy.
    fn fresh_identifier(&mut self) -> Result<Identifier> {
        let max_attempts = match self.config.collisions {
            CollisionPolicy::Accept => return Ok(self.source.generate()),
            CollisionPolicy::Retry { max_attempts } => max_attempts.max(1),
        };

        let mut last = self.source.generate();
        for _ in 1..max_attempts {
            if !self.index.contains_key(&last) {
                return Ok(last);
            }
            debug!("identifier {} already in use, generating another", last);
            last = self.source.generate();
        }

        if self.index.contains_key(&last) {
            Err(Error::IdentifierCollision {
                last,
                attempts: max_attempts,
            })
        } else {
            Ok(last)
        }
    }
}

impl<T, S> IndexedTree<T, S> {
    /// The configuration this tree was built with.
    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// Number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Removes every node.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.index.clear();
        self.root = None;
    }

    /// The root node, for read-only inspection of the tree's shape.
    pub fn root(&self) -> Option<NodeRef<'_, T>> {
        self.root.map(|slot| NodeRef::new(&self.nodes, slot))
    }

    /// Finds the node with the given identifier using the index. No tree traversal happens.
    ///
    /// # Examples
    ///
    /// ```
    /// use indexed_bst::IndexedTree;
    ///
    /// let mut tree = IndexedTree::new();
    /// let id = tree.insert('x').unwrap();
    ///
    /// let node = tree.find(id).unwrap();
    /// assert_eq!(node.identifier(), id);
    /// assert_eq!(node.value(), &'x');
    /// ```
    pub fn find(&self, identifier: Identifier) -> Option<NodeRef<'_, T>> {
        self.index
            .get(&identifier)
            .map(|&slot| NodeRef::new(&self.nodes, slot))
    }

    /// The value of the node with the given identifier.
    pub fn get(&self, identifier: Identifier) -> Option<&T> {
        self.find(identifier).map(|node| node.value())
    }

    /// Whether a node with the given identifier is in the tree.
    pub fn contains(&self, identifier: Identifier) -> bool {
        self.index.contains_key(&identifier)
    }

    /// Replaces the value of the node with the given identifier and returns the old value.
    ///
    /// The node is **not** moved, so the tree may stop being ordered by value. Iteration then
    /// follows the tree's shape rather than the new values.
    ///
    /// # Examples
    ///
    /// ```
    /// use indexed_bst::IndexedTree;
    ///
    /// let mut tree = IndexedTree::new();
    /// let three = tree.insert(3).unwrap();
    /// tree.insert(5).unwrap();
    ///
    /// assert_eq!(tree.update(three, 100), Ok(3));
    ///
    /// let values: Vec<_> = tree.iter().map(|(_, v)| *v).collect();
    /// assert_eq!(values, [100, 5]);
    /// ```
    pub fn update(&mut self, identifier: Identifier, value: T) -> Result<T> {
        match self.index.get(&identifier) {
            Some(&slot) => Ok(std::mem::replace(&mut self.nodes[slot].value, value)),
            None => {
                debug!("update: no node with identifier {}", identifier);
                Err(Error::NodeNotFound(identifier))
            }
        }
    }

    /// Removes the node with the given identifier and returns its value.
    ///
    /// How the node is located depends on the tree's [`RemovalStrategy`]. With the default
    /// [`IdentifierDescent`][RemovalStrategy::IdentifierDescent], the search can miss a node that
    /// is present, in which case nothing changes and `NodeNotFound` is returned.
    ///
    /// When the node has two children, its in-order successor's identifier and value are moved
    /// into it and the successor's old position is spliced out. The surviving node then answers
    /// [`find`][Self::find] under the successor's identifier.
    ///
    /// # Examples
    ///
    /// ```
    /// use indexed_bst::{Error, IndexedTree};
    ///
    /// let mut tree = IndexedTree::new();
    /// let id = tree.insert(5).unwrap();
    ///
    /// assert_eq!(tree.remove(id), Ok(5));
    /// assert_eq!(tree.remove(id), Err(Error::NodeNotFound(id)));
    /// assert!(tree.is_empty());
    /// ```
    pub fn remove(&mut self, identifier: Identifier) -> Result<T> {
        let located = match self.config.removal {
            RemovalStrategy::IdentifierDescent => self.descend(identifier),
            RemovalStrategy::IndexLookup => self.index.get(&identifier).copied(),
        };
        let Some(slot) = located else {
            debug!("remove: no node with identifier {}", identifier);
            return Err(Error::NodeNotFound(identifier));
        };

        let value = self.splice(slot);
        self.check_index();
        Ok(value)
    }

    /// Walks down from the root steering by identifier.
    fn descend(&self, identifier: Identifier) -> Option<usize> {
        let mut cursor = self.root;
        while let Some(slot) = cursor {
            let node = &self.nodes[slot];
            cursor = match identifier.cmp(&node.identifier) {
                Ordering::Equal => return Some(slot),
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
            };
        }
        None
    }

    /// Takes the node in `slot` out of the tree, keeping the index in step, and returns the
    /// value it held.
    fn splice(&mut self, slot: usize) -> T {
        let node = &self.nodes[slot];
        match (node.left, node.right) {
            (Some(_), Some(right)) => {
                // The successor has no left child so it can be unlinked directly.
                let successor = self.leftmost(right);
                let successor_right = self.nodes[successor].right;
                self.replace_in_parent(successor, successor_right);
                // An accepted collision may have handed the successor's entry to a newer node.
                let successor_indexed =
                    self.index.get(&self.nodes[successor].identifier) == Some(&successor);
                let Node {
                    identifier, value, ..
                } = self.nodes.remove(successor);

                let target = &mut self.nodes[slot];
                let old_identifier = std::mem::replace(&mut target.identifier, identifier);
                let old_value = std::mem::replace(&mut target.value, value);
                self.unindex(old_identifier, slot);
                if successor_indexed {
                    self.index.insert(identifier, slot);
                }

                trace!(
                    "removed {}, successor {} moved into slot {}",
                    old_identifier,
                    identifier,
                    slot
                );
                old_value
            }
            (child, None) | (None, child) => {
                self.replace_in_parent(slot, child);
                let Node {
                    identifier, value, ..
                } = self.nodes.remove(slot);
                self.unindex(identifier, slot);

                trace!("removed {} from slot {}", identifier, slot);
                value
            }
        }
    }

    /// Points whatever link owns `slot` at `replacement` instead.
    fn replace_in_parent(&mut self, slot: usize, replacement: Option<usize>) {
        let parent = self.nodes[slot].parent;
        match parent {
            None => self.root = replacement,
            Some(parent) => {
                let parent = &mut self.nodes[parent];
                if parent.left == Some(slot) {
                    parent.left = replacement;
                } else {
                    parent.right = replacement;
                }
            }
        }
        if let Some(replacement) = replacement {
            self.nodes[replacement].parent = parent;
        }
    }

    fn leftmost(&self, mut slot: usize) -> usize {
        while let Some(left) = self.nodes[slot].left {
            slot = left;
        }
        slot
    }

    /// Drops the index entry for `identifier` if it belongs to `slot`. An accepted collision can
    /// leave the entry pointing at a different node, which must keep it.
    fn unindex(&mut self, identifier: Identifier, slot: usize) {
        if self.index.get(&identifier) == Some(&slot) {
            self.index.remove(&identifier);
        }
    }

    /// Iterates over `(identifier, value)` pairs in order: left subtree, node, right subtree.
    /// Until a value is [updated][Self::update] this is ascending value order.
    ///
    /// # Examples
    ///
    /// ```
    /// use indexed_bst::IndexedTree;
    ///
    /// let mut tree = IndexedTree::new();
    /// for x in [5, 3, 8] {
    ///     tree.insert(x).unwrap();
    /// }
    ///
    /// let values: Vec<_> = tree.iter().map(|(_, v)| *v).collect();
    /// assert_eq!(values, [3, 5, 8]);
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.nodes, self.root)
    }

    /// Every node whose value equals `value`, in the same order as [`iter`][Self::iter].
    ///
    /// This visits the whole tree so it also finds nodes whose values were changed by
    /// [`update`][Self::update].
    pub fn find_by_value(&self, value: &T) -> Vec<(Identifier, &T)>
    where
        T: PartialEq,
    {
        self.iter().filter(|(_, v)| *v == value).collect()
    }

    /// Number of nodes on the longest path from the root to a leaf. Zero for an empty tree.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<(usize, usize)> = self.root.map(|root| (root, 1)).into_iter().collect();
        while let Some((slot, depth)) = stack.pop() {
            height = height.max(depth);
            let node = &self.nodes[slot];
            stack.extend(node.left.map(|left| (left, depth + 1)));
            stack.extend(node.right.map(|right| (right, depth + 1)));
        }
        height
    }

    /// Checks that the identifier index names exactly the nodes reachable from the root, and
    /// that every node's parent link agrees with the tree's shape.
    ///
    /// This only fails after an identifier collision was accepted (see
    /// [`CollisionPolicy::Accept`]).
    pub fn is_consistent(&self) -> bool {
        let mut reachable = 0;
        let mut stack: Vec<(usize, Option<usize>)> =
            self.root.map(|root| (root, None)).into_iter().collect();
        while let Some((slot, parent)) = stack.pop() {
            let Some(node) = self.nodes.get(slot) else {
                return false;
            };
            if node.parent != parent || self.index.get(&node.identifier) != Some(&slot) {
                return false;
            }

            reachable += 1;
            if reachable > self.nodes.len() {
                return false;
            }
            stack.extend(node.left.map(|left| (left, Some(slot))));
            stack.extend(node.right.map(|right| (right, Some(slot))));
        }

        reachable == self.index.len() && reachable == self.nodes.len()
    }

    /// Cheap sanity check run after every mutation in debug builds.
    fn check_index(&self) {
        if cfg!(debug_assertions) && self.config.collisions != CollisionPolicy::Accept {
            assert_eq!(self.index.len(), self.nodes.len());
            assert_eq!(self.root.is_none(), self.nodes.is_empty());
        }
    }
}

impl<'a, T, S> IntoIterator for &'a IndexedTree<T, S> {
    type Item = (Identifier, &'a T);
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Lists the tree one `ID: <identifier>, Value: <value>` line per node, in iteration order.
impl<T, S> fmt::Display for IndexedTree<T, S>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (identifier, value) in self {
            writeln!(f, "ID: {}, Value: {}", identifier, value)?;
        }
        Ok(())
    }
}

impl<T, S> fmt::Debug for IndexedTree<T, S>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndexedTree")
            .field("len", &self.len())
            .field("config", &self.config)
            .field("root", &self.root().map(|root| root.identifier()))
            .field("nodes", &self.iter())
            .finish()
    }
}
