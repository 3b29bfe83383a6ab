//! Commit-time error definitions.

use thiserror::Error;

use crate::registry::DefinitionError;

/// Reasons a commit is rejected. The store keeps its previous state in every case.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// A parent chain revisits a container.
    #[error("inheritance cycle: {}", chain.join(" -> "))]
    Cycle { chain: Vec<String> },

    /// An explicit parent names no container in the registry.
    #[error("container '{container}' inherits from unknown container '{parent}'")]
    UnresolvedParent { container: String, parent: String },

    /// Two definitions claim the same name or alias.
    #[error("container name '{name}' is claimed by both '{first}' and '{second}'")]
    DuplicateName {
        name: String,
        first: String,
        second: String,
    },

    /// A definition built in code declares an empty name.
    #[error("container '{container}' declares an empty name")]
    EmptyName { container: String },

    /// `commit()` called on a transaction that already committed.
    #[error("transaction already committed")]
    AlreadyCommitted,

    /// A definition map could not be parsed.
    #[error("invalid container definition: {0}")]
    Definition(#[from] DefinitionError),
}
