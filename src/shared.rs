//! A tree that can be shared between threads.
//!
//! The tree and its identifier index are updated together, and a reader that looked at one
//! halfway through a mutation could see them disagree. So every operation here holds one lock
//! on the whole tree for its full duration. Nothing ever locks part of a tree.
//!
//! # Examples
//!
//! ```
//! use std::thread;
//!
//! use indexed_bst::SharedTree;
//!
//! let tree = SharedTree::new();
//!
//! let handles: Vec<_> = (0..4)
//!     .map(|t| {
//!         let tree = tree.clone();
//!         thread::spawn(move || {
//!             for x in 0..10 {
//!                 tree.insert(t * 10 + x).unwrap();
//!             }
//!         })
//!     })
//!     .collect();
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//!
//! assert_eq!(tree.len(), 40);
//! assert!(tree.lock().is_consistent());
//! ```

use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use crate::config::TreeConfig;
use crate::error::Result;
use crate::identifier::{Identifier, IdentifierSource, RandomIds};
use crate::tree::IndexedTree;

/// A cloneable, thread-safe handle to an [`IndexedTree`]. Clones share the same tree.
///
/// Operations that would hand out references into the tree return owned copies instead, since
/// the lock is released when they return. Use [`lock`][Self::lock] to borrow the tree for
/// several steps at once.
pub struct SharedTree<T, S = RandomIds> {
    inner: Arc<Mutex<IndexedTree<T, S>>>,
}

impl<T, S> Clone for SharedTree<T, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Default for SharedTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SharedTree<T> {
    /// A new, empty shared tree with the default configuration.
    pub fn new() -> Self {
        Self::from_tree(IndexedTree::new())
    }

    /// A new, empty shared tree with the given configuration.
    pub fn with_config(config: TreeConfig) -> Self {
        Self::from_tree(IndexedTree::with_config(config))
    }
}

impl<T, S> From<IndexedTree<T, S>> for SharedTree<T, S> {
    fn from(tree: IndexedTree<T, S>) -> Self {
        Self::from_tree(tree)
    }
}

impl<T, S> SharedTree<T, S> {
    /// Shares an existing tree.
    pub fn from_tree(tree: IndexedTree<T, S>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(tree)),
        }
    }

    /// Locks the tree until the returned guard is dropped.
    pub fn lock(&self) -> MutexGuard<'_, IndexedTree<T, S>> {
        self.inner.lock()
    }

    /// Gets the tree back if this is the last handle to it.
    pub fn try_unwrap(self) -> std::result::Result<IndexedTree<T, S>, Self> {
        Arc::try_unwrap(self.inner)
            .map(Mutex::into_inner)
            .map_err(|inner| Self { inner })
    }

    /// See [`IndexedTree::insert`].
    pub fn insert(&self, value: T) -> Result<Identifier>
    where
        T: Ord,
        S: IdentifierSource,
    {
        self.lock().insert(value)
    }

    /// See [`IndexedTree::remove`].
    pub fn remove(&self, identifier: Identifier) -> Result<T> {
        self.lock().remove(identifier)
    }

    /// See [`IndexedTree::update`].
    pub fn update(&self, identifier: Identifier, value: T) -> Result<T> {
        self.lock().update(identifier, value)
    }

    /// A copy of the value stored under `identifier`.
    pub fn find(&self, identifier: Identifier) -> Option<T>
    where
        T: Clone,
    {
        self.lock().get(identifier).cloned()
    }

    /// See [`IndexedTree::find_by_value`].
    pub fn find_by_value(&self, value: &T) -> Vec<(Identifier, T)>
    where
        T: PartialEq + Clone,
    {
        self.lock()
            .find_by_value(value)
            .into_iter()
            .map(|(identifier, value)| (identifier, value.clone()))
            .collect()
    }

    /// Every `(identifier, value)` pair in iteration order, copied out under a single lock.
    pub fn snapshot(&self) -> Vec<(Identifier, T)>
    where
        T: Clone,
    {
        self.lock()
            .iter()
            .map(|(identifier, value)| (identifier, value.clone()))
            .collect()
    }

    /// Number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
