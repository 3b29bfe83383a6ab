//! Raw (unmerged) container definitions.

use thiserror::Error;

use crate::value::{Value, ValueMap};

/// Reserved keys consumed from a definition map before it is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionKeys {
    pub names: String,
    pub parent: String,
}

impl Default for DefinitionKeys {
    fn default() -> Self {
        Self {
            names: "names".to_string(),
            parent: "parent".to_string(),
        }
    }
}

/// Errors parsing a definition map.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DefinitionError {
    #[error("definition has no '{0}' key")]
    MissingNames(String),

    #[error("'{0}' must be a non-empty list of container names")]
    EmptyNames(String),

    #[error("'{key}' entries must be non-empty strings, found {found}")]
    InvalidName { key: String, found: String },

    #[error("'{key}' must be a container name, found {found}")]
    InvalidParent { key: String, found: String },
}

/// A container definition as submitted: names, optional parent, own properties.
///
/// `properties` never contains the reserved keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDefinition {
    names: Vec<String>,
    parent: Option<String>,
    properties: ValueMap,
}

impl RawDefinition {
    /// Start a definition whose primary name is `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            names: vec![name.into()],
            parent: None,
            properties: ValueMap::new(),
        }
    }

    pub fn alias(mut self, name: impl Into<String>) -> Self {
        self.names.push(name.into());
        self
    }

    pub fn parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Parse a definition map, consuming the reserved keys.
    ///
    /// A bare string under the names key is accepted as a one-element list.
    pub fn from_map(mut map: ValueMap, keys: &DefinitionKeys) -> Result<Self, DefinitionError> {
        let names = match map.remove(&keys.names) {
            None => return Err(DefinitionError::MissingNames(keys.names.clone())),
            Some(Value::Str(name)) => vec![name],
            Some(Value::List(items)) => items
                .into_iter()
                .map(|item| match item {
                    Value::Str(name) => Ok(name),
                    other => Err(DefinitionError::InvalidName {
                        key: keys.names.clone(),
                        found: other.kind().to_string(),
                    }),
                })
                .collect::<Result<Vec<_>, _>>()?,
            Some(other) => {
                return Err(DefinitionError::InvalidName {
                    key: keys.names.clone(),
                    found: other.kind().to_string(),
                })
            }
        };

        if names.is_empty() {
            return Err(DefinitionError::EmptyNames(keys.names.clone()));
        }
        if names.iter().any(String::is_empty) {
            return Err(DefinitionError::InvalidName {
                key: keys.names.clone(),
                found: "empty string".to_string(),
            });
        }

        let parent = match map.remove(&keys.parent) {
            None => None,
            Some(Value::Str(parent)) if !parent.is_empty() => Some(parent),
            Some(other) => {
                return Err(DefinitionError::InvalidParent {
                    key: keys.parent.clone(),
                    found: other.to_string(),
                })
            }
        };

        Ok(Self {
            names,
            parent,
            properties: map,
        })
    }

    /// The canonical name; registry entries are keyed by it.
    pub fn primary_name(&self) -> &str {
        &self.names[0]
    }

    /// All names, primary first.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// The explicitly declared parent, if any.
    pub fn declared_parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    pub fn properties(&self) -> &ValueMap {
        &self.properties
    }

    pub fn has_name(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }
}

impl TryFrom<ValueMap> for RawDefinition {
    type Error = DefinitionError;

    fn try_from(map: ValueMap) -> Result<Self, Self::Error> {
        Self::from_map(map, &DefinitionKeys::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_map;

    #[test]
    fn test_parse_strips_reserved_keys() {
        let def = RawDefinition::try_from(value_map! {
            "names" => vec!["original", "alias"],
            "parent" => "base",
            "property" => "value",
        })
        .unwrap();

        assert_eq!(def.primary_name(), "original");
        assert_eq!(def.names(), ["original", "alias"]);
        assert_eq!(def.declared_parent(), Some("base"));
        assert_eq!(def.properties(), &value_map! { "property" => "value" });
    }

    #[test]
    fn test_parse_custom_keys() {
        let keys = DefinitionKeys {
            names: "gadgets.container".to_string(),
            parent: "gadgets.parent".to_string(),
        };
        let def = RawDefinition::from_map(
            value_map! { "gadgets.container" => vec!["extra"], "names" => "kept" },
            &keys,
        )
        .unwrap();

        assert_eq!(def.primary_name(), "extra");
        assert_eq!(def.properties()["names"], Value::from("kept"));
    }

    #[test]
    fn test_parse_single_string_name() {
        let def = RawDefinition::try_from(value_map! { "names" => "solo" }).unwrap();
        assert_eq!(def.names(), ["solo"]);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            RawDefinition::try_from(value_map! { "a" => 1 }),
            Err(DefinitionError::MissingNames("names".into()))
        );
        assert_eq!(
            RawDefinition::try_from(value_map! { "names" => Value::List(vec![]) }),
            Err(DefinitionError::EmptyNames("names".into()))
        );
        assert!(matches!(
            RawDefinition::try_from(value_map! { "names" => vec![1] }),
            Err(DefinitionError::InvalidName { .. })
        ));
        assert!(matches!(
            RawDefinition::try_from(value_map! { "names" => vec![""] }),
            Err(DefinitionError::InvalidName { .. })
        ));
        assert!(matches!(
            RawDefinition::try_from(value_map! { "names" => "x", "parent" => 3 }),
            Err(DefinitionError::InvalidParent { .. })
        ));
    }

    #[test]
    fn test_builder() {
        let def = RawDefinition::new("new")
            .alias("newer")
            .parent("default")
            .property("user", "anne");
        assert!(def.has_name("newer"));
        assert_eq!(def.declared_parent(), Some("default"));
        assert_eq!(def.properties()["user"], Value::from("anne"));
    }
}
