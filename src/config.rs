//! Knobs that change how an [`IndexedTree`][crate::IndexedTree] behaves. The defaults reproduce
//! the classic behaviour: identifier-ordered removal and left-leaning duplicates, with the one
//! addition that identifiers are retried until they are unique within the tree.

/// How [`IndexedTree::remove`][crate::IndexedTree::remove] finds the node to delete.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum RemovalStrategy {
    /// Walk down from the root comparing the target identifier against each node's identifier,
    /// going left when it is smaller and right when it is larger.
    ///
    /// The tree is ordered by value, not identifier, so this walk can miss a node that is in the
    /// tree. When it does, removal reports [`NodeNotFound`][crate::Error::NodeNotFound] and leaves
    /// the tree untouched.
    #[default]
    IdentifierDescent,
    /// Look the node up in the identifier index and splice it out by rewiring its parent. Never
    /// misses a node that is in the tree.
    IndexLookup,
}

/// Where a value equal to an existing node's value is placed on insertion.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum DuplicatePlacement {
    /// Equal values go into the left subtree. In-order traversal yields duplicates newest first.
    #[default]
    Left,
    /// Equal values go into the right subtree. In-order traversal yields duplicates in insertion
    /// order.
    Right,
}

/// What insertion does when the identifier source hands out an identifier already in the tree.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CollisionPolicy {
    /// Keep the duplicate. The newer node shadows the older one in the index, so the older node
    /// can no longer be found by identifier.
    Accept,
    /// Ask the source again, up to `max_attempts` identifiers in total, and fail with
    /// [`IdentifierCollision`][crate::Error::IdentifierCollision] if none of them is free.
    Retry {
        /// Total number of identifiers to try. Zero behaves like one.
        max_attempts: usize,
    },
}

impl Default for CollisionPolicy {
    fn default() -> Self {
        Self::Retry { max_attempts: 16 }
    }
}

/// Configuration for a single tree.
///
/// # Examples
///
/// ```
/// use indexed_bst::{CollisionPolicy, DuplicatePlacement, RemovalStrategy, TreeConfig};
///
/// let config = TreeConfig::default()
///     .with_removal(RemovalStrategy::IndexLookup)
///     .with_duplicates(DuplicatePlacement::Right);
///
/// assert_eq!(config.removal, RemovalStrategy::IndexLookup);
/// assert_eq!(config.collisions, CollisionPolicy::Retry { max_attempts: 16 });
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TreeConfig {
    /// How removal locates its target.
    pub removal: RemovalStrategy,
    /// Which side equal values are inserted on.
    pub duplicates: DuplicatePlacement,
    /// What to do about repeated identifiers.
    pub collisions: CollisionPolicy,
}

impl TreeConfig {
    /// Replaces the removal strategy.
    pub fn with_removal(self, removal: RemovalStrategy) -> Self {
        Self { removal, ..self }
    }

    /// Replaces the duplicate placement.
    pub fn with_duplicates(self, duplicates: DuplicatePlacement) -> Self {
        Self { duplicates, ..self }
    }

    /// Replaces the collision policy.
    pub fn with_collisions(self, collisions: CollisionPolicy) -> Self {
        Self { collisions, ..self }
    }
}
