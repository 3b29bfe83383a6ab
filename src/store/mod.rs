//! Container configuration store.
//!
//! # Responsibilities
//! - Publish fully resolved container snapshots to readers
//! - Serialize commits and apply them all-or-nothing
//! - Answer typed property lookups with documented coercion
//!
//! # Concurrency
//! - Readers load the current `Arc<Snapshot>` from an `ArcSwap`; no locks, and every
//!   lookup sees exactly one committed state
//! - Writers take `commit_lock`, rebuild from the latest committed registry and swap
//!   the snapshot in one store; a failed build publishes nothing

pub mod error;
pub mod transaction;

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

use arc_swap::ArcSwap;

use crate::config::schema::ContainerSettings;
use crate::contributor::{ConfigContributor, ContributionContext};
use crate::observability::metrics;
use crate::registry::{DefinitionKeys, RawDefinition};
use crate::resolve::{build_snapshot, Snapshot};
use crate::value::{coerce, TruthyTokens, Value, ValueMap};

pub use error::StoreError;
pub use transaction::Transaction;
use transaction::Operation;

/// Outcome of a successful commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitSummary {
    /// Raw definitions in the committed registry.
    pub definitions: usize,
    /// Visible names, aliases included.
    pub visible: usize,
}

/// Multi-tenant container configuration with inheritance and aliases.
#[derive(Debug)]
pub struct ContainerConfig {
    state: ArcSwap<Snapshot>,
    commit_lock: Mutex<()>,
    root: String,
    keys: DefinitionKeys,
    truthy: TruthyTokens,
}

impl ContainerConfig {
    /// Empty store with the default settings (`default` root, `names`/`parent` keys).
    pub fn new() -> Self {
        Self::with_settings(&ContainerSettings::default())
    }

    pub fn with_settings(settings: &ContainerSettings) -> Self {
        Self {
            state: ArcSwap::from_pointee(Snapshot::default()),
            commit_lock: Mutex::new(()),
            root: settings.root.clone(),
            keys: settings.definition_keys(),
            truthy: settings.truthy(),
        }
    }

    /// Name of the container every definition inherits from by default.
    pub fn root_container(&self) -> &str {
        &self.root
    }

    /// Parse a definition map using this store's reserved keys.
    pub fn parse_definition(&self, map: ValueMap) -> Result<RawDefinition, StoreError> {
        Ok(RawDefinition::from_map(map, &self.keys)?)
    }

    pub fn definition_keys(&self) -> &DefinitionKeys {
        &self.keys
    }

    pub fn new_transaction(&self) -> Transaction<'_> {
        Transaction::new(self)
    }

    /// Replace every container with `definitions` in one commit.
    pub fn replace_all<I>(&self, definitions: I) -> Result<CommitSummary, StoreError>
    where
        I: IntoIterator<Item = RawDefinition>,
    {
        let mut tx = self.new_transaction();
        tx.clear_containers();
        for definition in definitions {
            tx.add_container(definition);
        }
        tx.commit()
    }

    /// The currently published snapshot. Holding it pins that state.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.state.load_full()
    }

    /// All visible container names, aliases included.
    pub fn get_containers(&self) -> BTreeSet<String> {
        self.state.load().containers.keys().cloned().collect()
    }

    /// Resolved properties of `name`, reserved keys excluded.
    pub fn get_properties(&self, name: &str) -> Option<Arc<ValueMap>> {
        self.state.load().get(name).cloned()
    }

    /// Raw property lookup without coercion.
    pub fn get(&self, name: &str, key: &str) -> Option<Value> {
        self.lookup(name, key, |v| Some(v.clone()))
    }

    pub fn get_string(&self, name: &str, key: &str) -> Option<String> {
        self.lookup(name, key, coerce::as_string)
    }

    pub fn get_int(&self, name: &str, key: &str) -> Option<i64> {
        self.lookup(name, key, coerce::as_int)
    }

    /// `false` when the container or key is missing.
    pub fn get_bool(&self, name: &str, key: &str) -> bool {
        self.lookup(name, key, |v| Some(coerce::as_bool(v, &self.truthy)))
            .unwrap_or(false)
    }

    pub fn get_list(&self, name: &str, key: &str) -> Option<Vec<Value>> {
        self.lookup(name, key, coerce::as_list)
    }

    pub fn get_map(&self, name: &str, key: &str) -> Option<ValueMap> {
        self.lookup(name, key, coerce::as_map)
    }

    /// Copy of `name`'s properties after every contributor has run, in order.
    pub fn contributed_properties(
        &self,
        name: &str,
        host: Option<&str>,
        contributors: &[&dyn ConfigContributor],
    ) -> Option<ValueMap> {
        let mut properties = ValueMap::clone(&*self.get_properties(name)?);
        let context = ContributionContext {
            container: name.to_string(),
            host: host.map(str::to_string),
        };
        for contributor in contributors {
            contributor.contribute(&mut properties, &context);
        }
        Some(properties)
    }

    fn lookup<T>(
        &self,
        name: &str,
        key: &str,
        convert: impl FnOnce(&Value) -> Option<T>,
    ) -> Option<T> {
        self.state.load().get(name)?.get(key).and_then(convert)
    }

    /// The commit protocol. Called by [`Transaction::commit`].
    fn apply(&self, operations: Vec<Operation>) -> Result<CommitSummary, StoreError> {
        let started = Instant::now();
        let _guard = self
            .commit_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let current = self.state.load_full();
        let mut working = current.registry.as_ref().clone();
        for operation in operations {
            match operation {
                Operation::Clear => working.clear(),
                Operation::Add(definition) => {
                    working.insert(definition);
                }
                Operation::Remove(name) => {
                    working.remove(&name);
                }
            }
        }

        match build_snapshot(working, &self.root) {
            Ok(snapshot) => {
                let summary = CommitSummary {
                    definitions: snapshot.registry.len(),
                    visible: snapshot.containers.len(),
                };
                self.state.store(Arc::new(snapshot));
                metrics::record_commit("success", started, summary.visible);
                tracing::info!(
                    definitions = summary.definitions,
                    visible = summary.visible,
                    "Committed container configuration"
                );
                Ok(summary)
            }
            Err(error) => {
                metrics::record_commit("rejected", started, current.containers.len());
                tracing::warn!(%error, "Commit rejected, keeping previous configuration");
                Err(error)
            }
        }
    }
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self::new()
    }
}
