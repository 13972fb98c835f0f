//! Named trees.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use log::debug;

use crate::config::TreeConfig;
use crate::error::{Error, Result};
use crate::tree::IndexedTree;

/// A collection of [`IndexedTree`]s, each under a unique name. Every tree is created with the
/// registry's [`TreeConfig`].
///
/// # Examples
///
/// ```
/// use indexed_bst::{Error, TreeRegistry};
///
/// let mut registry = TreeRegistry::new();
///
/// let fruit = registry.create("FruitTree").unwrap();
/// fruit.insert("apple").unwrap();
///
/// assert_eq!(
///     registry.create("FruitTree").err(),
///     Some(Error::AlreadyExists("FruitTree".into()))
/// );
/// assert_eq!(registry.get("FruitTree").unwrap().len(), 1);
///
/// registry.delete("FruitTree").unwrap();
/// assert!(registry.get("FruitTree").is_err());
/// ```
#[derive(Debug)]
pub struct TreeRegistry<T> {
    trees: HashMap<String, IndexedTree<T>>,
    config: TreeConfig,
}

impl<T> Default for TreeRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TreeRegistry<T> {
    /// An empty registry whose trees use the default configuration.
    pub fn new() -> Self {
        Self::with_config(TreeConfig::default())
    }

    /// An empty registry whose trees use `config`.
    pub fn with_config(config: TreeConfig) -> Self {
        Self {
            trees: HashMap::new(),
            config,
        }
    }

    /// Creates an empty tree called `name` and returns it. If the name is taken, the existing
    /// tree is left alone and `AlreadyExists` is returned.
    pub fn create(&mut self, name: impl Into<String>) -> Result<&mut IndexedTree<T>> {
        let config = self.config;
        match self.trees.entry(name.into()) {
            Entry::Occupied(entry) => {
                debug!("tree {:?} already exists", entry.key());
                Err(Error::AlreadyExists(entry.key().clone()))
            }
            Entry::Vacant(entry) => {
                debug!("creating tree {:?}", entry.key());
                Ok(entry.insert(IndexedTree::with_config(config)))
            }
        }
    }

    /// The tree called `name`.
    pub fn get(&self, name: &str) -> Result<&IndexedTree<T>> {
        self.trees
            .get(name)
            .ok_or_else(|| Error::TreeNotFound(name.to_owned()))
    }

    /// The tree called `name`, mutably.
    pub fn get_mut(&mut self, name: &str) -> Result<&mut IndexedTree<T>> {
        self.trees
            .get_mut(name)
            .ok_or_else(|| Error::TreeNotFound(name.to_owned()))
    }

    /// Removes the tree called `name` from the registry and hands it back.
    pub fn delete(&mut self, name: &str) -> Result<IndexedTree<T>> {
        match self.trees.remove(name) {
            Some(tree) => {
                debug!("deleted tree {:?}", name);
                Ok(tree)
            }
            None => Err(Error::TreeNotFound(name.to_owned())),
        }
    }

    /// Whether there is a tree called `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.trees.contains_key(name)
    }

    /// The names of all trees, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.trees.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of trees.
    pub fn len(&self) -> usize {
        self.trees.len()
    }

    /// Whether there are no trees.
    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }
}
