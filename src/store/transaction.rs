//! Batched, all-or-nothing updates to a [`ContainerConfig`].

use std::sync::Arc;

use super::{CommitSummary, ContainerConfig, StoreError};
use crate::registry::RawDefinition;

/// A queued registry mutation.
#[derive(Debug, Clone)]
pub(crate) enum Operation {
    Clear,
    Add(Arc<RawDefinition>),
    Remove(String),
}

/// Ordered queue of registry changes, applied atomically by [`Transaction::commit`].
///
/// ```
/// use container_config::{ContainerConfig, RawDefinition};
///
/// let config = ContainerConfig::new();
/// config
///     .new_transaction()
///     .clear_containers()
///     .add_container(RawDefinition::new("default").property("inherited", "yes"))
///     .add_container(RawDefinition::new("extra"))
///     .commit()
///     .unwrap();
///
/// assert_eq!(config.get_string("extra", "inherited").as_deref(), Some("yes"));
/// ```
#[must_use = "a transaction does nothing until committed"]
#[derive(Debug)]
pub struct Transaction<'a> {
    store: &'a ContainerConfig,
    operations: Vec<Operation>,
    committed: bool,
}

impl<'a> Transaction<'a> {
    pub(crate) fn new(store: &'a ContainerConfig) -> Self {
        Self {
            store,
            operations: Vec::new(),
            committed: false,
        }
    }

    /// Empty the registry at this point in the queue.
    /// Containers added earlier in the same transaction are dropped too.
    pub fn clear_containers(&mut self) -> &mut Self {
        self.push(Operation::Clear)
    }

    /// Insert the definition, replacing any entry with the same primary name.
    pub fn add_container(&mut self, definition: RawDefinition) -> &mut Self {
        self.push(Operation::Add(Arc::new(definition)))
    }

    /// Remove the entry whose primary name is `name`, if present.
    pub fn remove_container(&mut self, name: impl Into<String>) -> &mut Self {
        self.push(Operation::Remove(name.into()))
    }

    /// Number of queued operations.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Apply the queue on top of the latest committed registry and publish the result.
    ///
    /// On error nothing is published. A transaction commits at most once.
    pub fn commit(&mut self) -> Result<CommitSummary, StoreError> {
        if self.committed {
            tracing::warn!("Rejected commit of an already committed transaction");
            return Err(StoreError::AlreadyCommitted);
        }
        self.committed = true;
        self.store.apply(std::mem::take(&mut self.operations))
    }

    fn push(&mut self, operation: Operation) -> &mut Self {
        if self.committed {
            tracing::warn!(?operation, "Ignoring operation queued after commit");
        } else {
            self.operations.push(operation);
        }
        self
    }
}
