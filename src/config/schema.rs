//! Configuration schema definitions.
//!
//! Settings for the store itself, the definition source and observability.
//! All types derive Serde traits for deserialization from TOML files.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::registry::DefinitionKeys;
use crate::value::TruthyTokens;

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct StoreConfig {
    /// Inheritance and reserved-key settings.
    pub containers: ContainerSettings,

    /// Where container definitions are loaded from.
    pub source: SourceConfig,

    /// Logging and metrics settings.
    pub observability: ObservabilityConfig,
}

/// How definitions are interpreted.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ContainerSettings {
    /// Container every definition inherits from unless it names a parent.
    pub root: String,

    /// Reserved key holding the list of container names (primary first).
    pub names_key: String,

    /// Reserved key holding the explicit parent name.
    pub parent_key: String,

    /// Strings `get_bool` reads as true (case-insensitive).
    pub truthy_tokens: Vec<String>,
}

impl ContainerSettings {
    pub fn definition_keys(&self) -> DefinitionKeys {
        DefinitionKeys {
            names: self.names_key.clone(),
            parent: self.parent_key.clone(),
        }
    }

    pub fn truthy(&self) -> TruthyTokens {
        TruthyTokens::new(&self.truthy_tokens)
    }
}

impl Default for ContainerSettings {
    fn default() -> Self {
        let keys = DefinitionKeys::default();
        Self {
            root: "default".to_string(),
            names_key: keys.names,
            parent_key: keys.parent,
            truthy_tokens: vec!["true".to_string()],
        }
    }
}

/// Definition source settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct SourceConfig {
    /// JSON or TOML file with container definitions.
    pub path: Option<PathBuf>,

    /// Reload when the file changes.
    pub watch: bool,

    /// Poll interval for the file watcher.
    pub poll_interval_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            path: None,
            watch: false,
            poll_interval_secs: 2,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
