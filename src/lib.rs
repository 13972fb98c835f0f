//! This crate provides a Binary Search Tree whose nodes can be reached two ways: by value, through
//! the usual tree ordering, and by a random identifier handed out when each node is inserted.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to insert, find, and delete
//! stored records. It is defined recursively using the notion of a `Node`, which stores a value
//! and sometimes has child `Node`s. The invariant is:
//!
//! 1. For every `Node`, all the `Node`s in its left subtree have a value less than or equal to
//!    its own value.
//! 2. For every `Node`, all the `Node`s in its right subtree have a value greater than its own
//!    value.
//!
//! The tree here is never rebalanced, so its height is only `O(lg N)` when values arrive in a
//! friendly order. Visiting the left subtree, then the node, then the right subtree yields the
//! values in ascending order.
//!
//! ## Identifiers
//!
//! Every node is also given an [`Identifier`]: eight random hexadecimal digits. An index maps
//! identifiers to nodes so that [`find`][IndexedTree::find], [`update`][IndexedTree::update] and
//! (optionally) [`remove`][IndexedTree::remove] don't have to walk the tree. The index never owns
//! a node; it is kept in step with the tree by every mutation, so it always names exactly the
//! nodes reachable from the root.
//!
//! Two things follow from ordering the tree by value but addressing it by identifier:
//!
//! * [`update`][IndexedTree::update] changes a value in place without moving the node, so
//!   afterwards the tree may no longer be ordered by value.
//! * By default, removal walks down from the root steering by identifier. Since nodes were
//!   placed by value, that walk can miss a node that is present. See [`RemovalStrategy`] for the
//!   alternative that always finds it.
//!
//! ## Example
//!
//! ```
//! use indexed_bst::IndexedTree;
//!
//! let mut tree = IndexedTree::new();
//! for x in [5, 3, 8, 6, 9] {
//!     tree.insert(x).unwrap();
//! }
//!
//! let root = tree.root().map(|root| root.identifier()).unwrap();
//! assert_eq!(tree.get(root), Some(&5));
//!
//! // Removing the root moves its successor's identifier and value into it.
//! let six = tree.find_by_value(&6)[0].0;
//! tree.remove(root).unwrap();
//!
//! assert_eq!(tree.find(six), tree.root());
//! let values: Vec<_> = tree.iter().map(|(_, v)| *v).collect();
//! assert_eq!(values, [3, 6, 8, 9]);
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod identifier;

mod config;
mod error;
mod iter;
mod registry;
mod shared;
mod tree;

pub use config::{CollisionPolicy, DuplicatePlacement, RemovalStrategy, TreeConfig};
pub use error::{Error, Result};
pub use identifier::Identifier;
pub use iter::{Iter, NodeRef};
pub use registry::TreeRegistry;
pub use shared::SharedTree;
pub use tree::IndexedTree;
