//! File-backed definition source.
//!
//! Formats, chosen by extension:
//! - `.json`: one definition object, or an array of them
//! - `.toml`: `[[containers]]` tables

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::{DefinitionSource, SourceError};
use crate::registry::{DefinitionKeys, RawDefinition};
use crate::value::{Value, ValueMap};

#[derive(Debug, Deserialize)]
struct TomlDefinitions {
    #[serde(default)]
    containers: Vec<ValueMap>,
}

/// Loads definitions from a JSON or TOML file on every `load`.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    keys: DefinitionKeys,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>, keys: DefinitionKeys) -> Self {
        Self {
            path: path.into(),
            keys,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_maps(&self) -> Result<Vec<Value>, SourceError> {
        let content = fs::read_to_string(&self.path).map_err(|source| SourceError::Io {
            path: self.path.display().to_string(),
            source,
        })?;

        let extension = self
            .path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "json" => parse_json(&content),
            "toml" => {
                let file: TomlDefinitions = toml::from_str(&content)?;
                Ok(file.containers.into_iter().map(Value::Map).collect())
            }
            other => Err(SourceError::UnsupportedFormat(other.to_string())),
        }
    }
}

fn parse_json(content: &str) -> Result<Vec<Value>, SourceError> {
    let json: serde_json::Value = serde_json::from_str(content)?;
    Ok(match Value::try_from(json)? {
        Value::List(items) => items,
        single => vec![single],
    })
}

impl DefinitionSource for FileSource {
    fn load(&self) -> Result<Vec<RawDefinition>, SourceError> {
        self.read_maps()?
            .into_iter()
            .enumerate()
            .map(|(index, value)| match value {
                Value::Map(map) => RawDefinition::from_map(map, &self.keys)
                    .map_err(|error| SourceError::Definition { index, error }),
                other => Err(SourceError::NotAMap {
                    index,
                    found: other.kind(),
                }),
            })
            .collect()
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_json_array() {
        let file = write_temp(
            ".json",
            r#"[
                {"names": ["default"], "inherited": "yes"},
                {"names": ["extra", "bonus"], "parent": "default", "geo": {"lat": 42}}
            ]"#,
        );
        let definitions = FileSource::new(file.path(), DefinitionKeys::default())
            .load()
            .unwrap();

        assert_eq!(definitions.len(), 2);
        assert_eq!(definitions[1].names(), ["extra", "bonus"]);
        assert_eq!(definitions[1].declared_parent(), Some("default"));
        assert!(definitions[1].properties().contains_key("geo"));
    }

    #[test]
    fn test_json_single_object() {
        let file = write_temp(".json", r#"{"names": "solo", "k": 1}"#);
        let definitions = FileSource::new(file.path(), DefinitionKeys::default())
            .load()
            .unwrap();
        assert_eq!(definitions.len(), 1);
        assert_eq!(definitions[0].primary_name(), "solo");
    }

    #[test]
    fn test_toml_tables() {
        let file = write_temp(
            ".toml",
            r#"
            [[containers]]
            names = ["default"]
            user = "peter"

            [[containers]]
            names = ["new"]
            user = "anne"
            [containers.map]
            longitude = 130
            "#,
        );
        let definitions = FileSource::new(file.path(), DefinitionKeys::default())
            .load()
            .unwrap();

        assert_eq!(definitions.len(), 2);
        assert_eq!(definitions[1].primary_name(), "new");
        assert_eq!(
            definitions[1].properties()["map"],
            Value::Map(crate::value_map! { "longitude" => 130 })
        );
    }

    #[test]
    fn test_errors() {
        let array_of_scalars = write_temp(".json", "[1]");
        assert!(matches!(
            FileSource::new(array_of_scalars.path(), DefinitionKeys::default()).load(),
            Err(SourceError::NotAMap { index: 0, found: "int" })
        ));

        let nameless = write_temp(".json", r#"[{"k": 1}]"#);
        assert!(matches!(
            FileSource::new(nameless.path(), DefinitionKeys::default()).load(),
            Err(SourceError::Definition { index: 0, .. })
        ));

        let yaml = write_temp(".yaml", "names: [a]");
        assert!(matches!(
            FileSource::new(yaml.path(), DefinitionKeys::default()).load(),
            Err(SourceError::UnsupportedFormat(ext)) if ext == "yaml"
        ));

        let nulls = write_temp(".json", r#"{"names": ["a"], "k": null}"#);
        assert!(matches!(
            FileSource::new(nulls.path(), DefinitionKeys::default()).load(),
            Err(SourceError::Value(_))
        ));
    }
}
