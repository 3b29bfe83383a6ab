//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → StoreConfig (validated, immutable)
//!     → ContainerSettings handed to the store at construction
//!
//! On definition file change:
//!     watcher.rs detects change
//!     → FileSource re-reads definitions
//!     → consumer commits them as one transaction
//! ```
//!
//! # Design Decisions
//! - Settings are immutable once loaded; changing them means a new store
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, ConfigError};
pub use schema::{ContainerSettings, ObservabilityConfig, SourceConfig, StoreConfig};
pub use watcher::DefinitionWatcher;
