//! Multi-tenant container configuration store.
//!
//! Containers are named property maps that inherit from a parent (by default the
//! `default` container), deep-merge their own values on top, and may be visible
//! under several aliases. Updates are queued on a [`Transaction`] and published
//! atomically; readers always see one fully resolved snapshot.

pub mod config;
pub mod contributor;
pub mod merge;
pub mod observability;
pub mod registry;
pub mod resolve;
pub mod source;
pub mod store;
pub mod value;

pub use config::schema::StoreConfig;
pub use contributor::{ConfigContributor, ContributionContext};
pub use registry::{DefinitionError, RawDefinition};
pub use store::{CommitSummary, ContainerConfig, StoreError, Transaction};
pub use value::{Value, ValueMap};
