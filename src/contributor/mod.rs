//! Per-request configuration contributors.
//!
//! A contributor receives a private copy of a container's resolved properties
//! and may add computed entries before the map is handed downstream. The store
//! only guarantees the starting point; contributors never affect what other
//! readers see.

use crate::value::{Value, ValueMap};

/// Where a contribution is being made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContributionContext {
    /// Container the properties were resolved for.
    pub container: String,

    /// Requesting host, when known.
    pub host: Option<String>,
}

/// Adds dynamically computed values to a container's property map.
pub trait ConfigContributor: Send + Sync {
    fn contribute(&self, properties: &mut ValueMap, context: &ContributionContext);
}

/// Inserts a fixed set of properties, overwriting existing keys.
#[derive(Debug, Clone, Default)]
pub struct StaticContributor {
    properties: ValueMap,
}

impl StaticContributor {
    pub fn new(properties: ValueMap) -> Self {
        Self { properties }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}

impl ConfigContributor for StaticContributor {
    fn contribute(&self, properties: &mut ValueMap, _context: &ContributionContext) {
        properties.extend(self.properties.clone());
    }
}

impl<F> ConfigContributor for F
where
    F: Fn(&mut ValueMap, &ContributionContext) + Send + Sync,
{
    fn contribute(&self, properties: &mut ValueMap, context: &ContributionContext) {
        self(properties, context)
    }
}
