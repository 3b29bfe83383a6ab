//! Definition sources.
//!
//! # Responsibilities
//! - Supply raw container definitions to the store
//! - Parse JSON and TOML definition files
//! - Drive full reloads (`clear` + add everything + commit)
//!
//! # Design Decisions
//! - Sources only produce definitions; inheritance and aliases are the store's job
//! - A source that fails to load leaves the store untouched

pub mod file;

use thiserror::Error;

use crate::registry::{DefinitionError, RawDefinition};
use crate::store::{CommitSummary, ContainerConfig, StoreError};
use crate::value::ValueError;

pub use file::FileSource;

/// Errors producing definitions.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("unsupported value: {0}")]
    Value(#[from] ValueError),

    #[error("definition #{index} is a {found}, expected a map")]
    NotAMap { index: usize, found: &'static str },

    #[error("definition #{index}: {error}")]
    Definition {
        index: usize,
        #[source]
        error: DefinitionError,
    },

    #[error("unsupported definition file format: {0}")]
    UnsupportedFormat(String),
}

/// Errors reloading a store from a source.
#[derive(Debug, Error)]
pub enum ReloadError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Commit(#[from] StoreError),
}

/// Anything that can hand the store a complete set of definitions.
pub trait DefinitionSource: Send + Sync {
    fn load(&self) -> Result<Vec<RawDefinition>, SourceError>;

    /// Human-readable origin, for logs.
    fn describe(&self) -> String;
}

/// Fixed, in-memory definitions.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    definitions: Vec<RawDefinition>,
}

impl StaticSource {
    pub fn new(definitions: Vec<RawDefinition>) -> Self {
        Self { definitions }
    }
}

impl DefinitionSource for StaticSource {
    fn load(&self) -> Result<Vec<RawDefinition>, SourceError> {
        Ok(self.definitions.clone())
    }

    fn describe(&self) -> String {
        format!("{} static definitions", self.definitions.len())
    }
}

impl ContainerConfig {
    /// Replace the whole configuration with what `source` currently holds.
    pub fn reload(&self, source: &dyn DefinitionSource) -> Result<CommitSummary, ReloadError> {
        let definitions = source.load().inspect_err(|error| {
            tracing::warn!(source = %source.describe(), %error, "Failed to load definitions");
        })?;
        tracing::debug!(
            source = %source.describe(),
            count = definitions.len(),
            "Loaded container definitions"
        );
        Ok(self.replace_all(definitions)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingSource;

    impl DefinitionSource for FailingSource {
        fn load(&self) -> Result<Vec<RawDefinition>, SourceError> {
            Err(SourceError::UnsupportedFormat("xml".into()))
        }

        fn describe(&self) -> String {
            "failing".into()
        }
    }

    #[test]
    fn test_reload_replaces_everything() {
        let store = ContainerConfig::new();
        store
            .new_transaction()
            .add_container(RawDefinition::new("stale"))
            .commit()
            .unwrap();

        let source = StaticSource::new(vec![
            RawDefinition::new("default").property("k", "v"),
            RawDefinition::new("fresh"),
        ]);
        let summary = store.reload(&source).unwrap();

        assert_eq!(summary.definitions, 2);
        assert!(!store.get_containers().contains("stale"));
        assert_eq!(store.get_string("fresh", "k").as_deref(), Some("v"));
    }

    #[test]
    fn test_failed_load_keeps_state() {
        let store = ContainerConfig::new();
        store
            .new_transaction()
            .add_container(RawDefinition::new("kept"))
            .commit()
            .unwrap();

        assert!(matches!(
            store.reload(&FailingSource),
            Err(ReloadError::Source(SourceError::UnsupportedFormat(_)))
        ));
        assert!(store.get_containers().contains("kept"));
    }

    #[test]
    fn test_failed_commit_is_reported() {
        let store = ContainerConfig::new();
        let source = StaticSource::new(vec![RawDefinition::new("a").parent("missing")]);
        assert!(matches!(
            store.reload(&source),
            Err(ReloadError::Commit(StoreError::UnresolvedParent { .. }))
        ));
    }
}
