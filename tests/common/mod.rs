//! Shared helpers for integration tests.

#![allow(dead_code)]

use container_config::{ContainerConfig, RawDefinition, Value};

/// Definition named `name` with `key, value` pairs.
pub fn make_container<V: Into<Value>>(name: &str, values: Vec<(&str, V)>) -> RawDefinition {
    values
        .into_iter()
        .fold(RawDefinition::new(name), |def, (k, v)| def.property(k, v))
}

/// The `default` container with `inherited = "yes"`.
pub fn default_container() -> RawDefinition {
    make_container("default", vec![("inherited", "yes")])
}

/// `extra` with no own properties.
pub fn extra_container() -> RawDefinition {
    RawDefinition::new("extra")
}

/// A store holding only the `default` container.
pub fn store_with_default() -> ContainerConfig {
    let config = ContainerConfig::new();
    config
        .new_transaction()
        .clear_containers()
        .add_container(default_container())
        .commit()
        .unwrap();
    config
}
