//! Errors reported by trees and the registry. Nothing here is fatal: every
//! variant describes a condition the caller can recover from.

use thiserror::Error;

use crate::identifier::Identifier;

/// Convenience alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Everything that can go wrong when working with an [`IndexedTree`][crate::IndexedTree] or a
/// [`TreeRegistry`][crate::TreeRegistry].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// No node in the tree carries this identifier (or, for removal by identifier descent, the
    /// descent did not reach it).
    #[error("no node with identifier {0}")]
    NodeNotFound(Identifier),
    /// The registry has no tree under this name.
    #[error("no tree named {0:?}")]
    TreeNotFound(String),
    /// The registry already has a tree under this name. The existing tree is left untouched.
    #[error("a tree named {0:?} already exists")]
    AlreadyExists(String),
    /// Every generated identifier was already in use by the tree.
    #[error("no unused identifier after {attempts} attempts (last tried {last})")]
    IdentifierCollision {
        /// The final identifier that collided.
        last: Identifier,
        /// How many identifiers were generated before giving up.
        attempts: usize,
    },
    /// A string could not be parsed as an [`Identifier`].
    #[error("malformed identifier {0:?}: expected 8 characters from 0-9A-F")]
    MalformedIdentifier(String),
}

impl Error {
    /// Whether this is one of the "something was absent" errors, for either a node or a tree.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NodeNotFound(_) | Self::TreeNotFound(_))
    }
}
