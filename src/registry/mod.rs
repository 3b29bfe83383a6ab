//! Raw definition registry.
//!
//! # Responsibilities
//! - Hold the last committed raw definitions, keyed by primary name
//! - Provide the working copy a transaction mutates
//! - Map every name and alias back to its primary name
//!
//! # Design Decisions
//! - Entries are `Arc<RawDefinition>`: cloning a registry copies pointers, not definitions
//! - Replacing an entry discards the old definition whole; merging only happens at resolve time

pub mod definition;

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::store::StoreError;

pub use definition::{DefinitionError, DefinitionKeys, RawDefinition};

/// Name or alias -> primary name.
pub type NameIndex<'a> = HashMap<&'a str, &'a str>;

/// Committed raw definitions, one per primary name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    entries: BTreeMap<String, Arc<RawDefinition>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or fully replace the entry for the definition's primary name.
    pub fn insert(&mut self, definition: Arc<RawDefinition>) -> Option<Arc<RawDefinition>> {
        self.entries
            .insert(definition.primary_name().to_string(), definition)
    }

    /// Remove by primary name. Absent names are a no-op.
    pub fn remove(&mut self, primary: &str) -> Option<Arc<RawDefinition>> {
        self.entries.remove(primary)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn get(&self, primary: &str) -> Option<&Arc<RawDefinition>> {
        self.entries.get(primary)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<RawDefinition>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Index every name of every definition.
    ///
    /// Fails if two definitions claim the same name, or a name is empty.
    pub fn name_index(&self) -> Result<NameIndex<'_>, StoreError> {
        let mut index = NameIndex::with_capacity(self.entries.len());
        for (primary, definition) in &self.entries {
            for name in definition.names() {
                if name.is_empty() {
                    return Err(StoreError::EmptyName {
                        container: primary.clone(),
                    });
                }
                if let Some(existing) = index.insert(name.as_str(), primary.as_str()) {
                    if existing != primary {
                        return Err(StoreError::DuplicateName {
                            name: name.clone(),
                            first: existing.to_string(),
                            second: primary.clone(),
                        });
                    }
                }
            }
        }
        Ok(index)
    }
}
