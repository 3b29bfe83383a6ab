//! Inheritance resolution and alias expansion.
//!
//! # Data Flow
//! ```text
//! Registry (raw, keyed by primary name)
//!     → name_index (alias → primary)
//!     → resolve_chain per primary (walk parents, fold root → self)
//!     → one Arc<ValueMap> per definition, registered under every name
//!     → Snapshot
//! ```
//!
//! # Design Decisions
//! - Parents may be referenced by any name or alias
//! - The implicit parent is the root container; if it is not registered the
//!   definition resolves to its own properties only
//! - An explicit parent that is not registered fails the whole build
//! - Everything is recomputed on every build; within one build each ancestor
//!   is merged once and shared by its descendants

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::merge::{merge_chain, merge_maps};
use crate::registry::{NameIndex, RawDefinition, Registry};
use crate::store::StoreError;
use crate::value::ValueMap;

/// The complete, resolved view installed by a commit.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    /// Raw definitions this snapshot was resolved from.
    pub registry: Arc<Registry>,

    /// Every visible name and alias -> resolved properties.
    /// Aliases of one definition share the same `Arc`.
    pub containers: HashMap<String, Arc<ValueMap>>,
}

impl Snapshot {
    pub fn get(&self, name: &str) -> Option<&Arc<ValueMap>> {
        self.containers.get(name)
    }
}

/// Parent of `definition` as a primary name, or `None` at the top of the chain.
fn parent_of<'a>(
    definition: &'a RawDefinition,
    index: &NameIndex<'a>,
    root: &str,
) -> Result<Option<&'a str>, StoreError> {
    match definition.declared_parent() {
        Some(parent) => index.get(parent).copied().map(Some).ok_or_else(|| {
            StoreError::UnresolvedParent {
                container: definition.primary_name().to_string(),
                parent: parent.to_string(),
            }
        }),
        None if definition.has_name(root) => Ok(None),
        None => Ok(index.get(root).copied()),
    }
}

/// Resolves parent chains, reusing every map it has already produced.
///
/// Lives for one `build_snapshot`; nothing carries over between commits.
struct ChainResolver<'r, 'i> {
    registry: &'r Registry,
    index: &'i NameIndex<'r>,
    root: &'i str,
    resolved: HashMap<&'r str, Arc<ValueMap>>,
}

/// Definitions still to fold (self first), plus the resolved ancestor they sit on.
type PendingChain<'r> = (Vec<(&'r str, &'r RawDefinition)>, Option<Arc<ValueMap>>);

impl<'r, 'i> ChainResolver<'r, 'i> {
    fn new(registry: &'r Registry, index: &'i NameIndex<'r>, root: &'i str) -> Self {
        Self {
            registry,
            index,
            root,
            resolved: HashMap::with_capacity(registry.len()),
        }
    }

    /// Walk parents from `primary` until the top of the chain or an already resolved ancestor.
    fn walk(&self, primary: &'r str) -> Result<PendingChain<'r>, StoreError> {
        let mut pending: Vec<(&'r str, &'r RawDefinition)> = Vec::new();
        let mut on_path: HashSet<&'r str> = HashSet::new();
        let mut current = Some(primary);

        while let Some(name) = current.take() {
            if let Some(done) = self.resolved.get(name) {
                return Ok((pending, Some(Arc::clone(done))));
            }
            if !on_path.insert(name) {
                let mut chain: Vec<String> = pending.iter().map(|(n, _)| n.to_string()).collect();
                chain.push(name.to_string());
                return Err(StoreError::Cycle { chain });
            }

            let definition = self.registry.get(name).ok_or_else(|| {
                StoreError::UnresolvedParent {
                    container: pending.last().map(|(n, _)| n.to_string()).unwrap_or_default(),
                    parent: name.to_string(),
                }
            })?;

            current = parent_of(definition, self.index, self.root)?;
            pending.push((name, definition.as_ref()));
        }

        Ok((pending, None))
    }

    fn resolve(&mut self, primary: &'r str) -> Result<Arc<ValueMap>, StoreError> {
        let (pending, base) = self.walk(primary)?;
        let mut resolved = base.unwrap_or_default();
        for (name, definition) in pending.into_iter().rev() {
            let merged = merge_maps(ValueMap::clone(&resolved), definition.properties().clone());
            resolved = Arc::new(merged);
            self.resolved.insert(name, Arc::clone(&resolved));
        }
        Ok(resolved)
    }
}

/// Resolve the definition registered under `primary` against its ancestors.
pub fn resolve_chain<'r>(
    primary: &'r str,
    registry: &'r Registry,
    index: &NameIndex<'r>,
    root: &str,
) -> Result<ValueMap, StoreError> {
    let (pending, _) = ChainResolver::new(registry, index, root).walk(primary)?;
    Ok(merge_chain(pending.iter().rev().map(|(_, d)| d.properties())))
}

/// Resolve every definition and expand aliases into a new snapshot.
pub fn build_snapshot(registry: Registry, root: &str) -> Result<Snapshot, StoreError> {
    let mut containers = HashMap::new();
    {
        let index = registry.name_index()?;
        let mut resolver = ChainResolver::new(&registry, &index, root);
        for (primary, definition) in registry.iter() {
            let resolved = resolver.resolve(primary)?;
            tracing::debug!(
                container = %primary,
                aliases = definition.names().len() - 1,
                keys = resolved.len(),
                "Resolved container"
            );
            for name in definition.names() {
                containers.insert(name.clone(), Arc::clone(&resolved));
            }
        }
    }

    Ok(Snapshot {
        registry: Arc::new(registry),
        containers,
    })
}
