//! Loading definitions from JSON and TOML files
//!
//! Definitions mirror the in-memory model. Fields and reserved declarations
//! carry a `kind` tag:
//!
//! ```json
//! {
//!   "package": "foo",
//!   "messages": [{
//!     "name": "Beacon",
//!     "reserved": [{ "kind": "range", "lower": 6, "upper": 9 }],
//!     "fields": [
//!       { "kind": "scalar", "name": "Continent", "typing": "string", "tag": 21 },
//!       { "kind": "custom_map", "name": "CustomMap", "key_typing": "string",
//!         "value_typing": "Event", "tag": 23 }
//!     ]
//!   }]
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Result, SpecError};
use crate::spec::Spec;

/// Supported definition file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionFormat {
    Json,
    Toml,
}

impl DefinitionFormat {
    /// Pick a format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "json" => Some(DefinitionFormat::Json),
            "toml" => Some(DefinitionFormat::Toml),
            _ => None,
        }
    }
}

impl Spec {
    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

/// Read a definition file, choosing the parser by extension
pub fn load_spec(path: impl AsRef<Path>) -> Result<Spec> {
    let path = path.as_ref();
    let format = DefinitionFormat::from_path(path)
        .ok_or_else(|| SpecError::UnsupportedFormat(path.display().to_string()))?;

    let content = fs::read_to_string(path)?;
    tracing::debug!(path = %path.display(), ?format, "loading definition");

    let spec = match format {
        DefinitionFormat::Json => Spec::from_json_str(&content)?,
        DefinitionFormat::Toml => Spec::from_toml_str(&content)?,
    };
    tracing::trace!(messages = spec.messages.len(), "definition loaded");
    Ok(spec)
}

/// Every `*.json` / `*.toml` definition under `dir`, sorted by path
pub fn discover_specs(dir: impl AsRef<Path>) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| DefinitionFormat::from_path(p).is_some())
        .collect();
    paths.sort();
    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Field;
    use crate::reserved::Reserved;
    use crate::types::{FieldRule, FieldType};

    const BEACON_TOML: &str = r#"
package = "foo"
imports = ["common.proto"]

[[messages]]
name = "Beacon"
comment = "Emitted by devices"

[[messages.reserved]]
kind = "tag"
tag = 1

[[messages.fields]]
kind = "scalar"
name = "Continent"
typing = "string"
tag = 21
rule = "repeated"

[[messages.fields]]
kind = "map"
name = "Counts"
key_typing = "string"
value_typing = 4
tag = 22
"#;

    #[test]
    fn test_from_toml() {
        let spec = Spec::from_toml_str(BEACON_TOML).unwrap();
        assert_eq!(spec.package, "foo");
        assert_eq!(spec.imports, vec!["common.proto"]);
        let beacon = &spec.messages[0];
        assert_eq!(beacon.comment, "Emitted by devices");
        assert_eq!(beacon.reserved, vec![Reserved::tag(1)]);
        assert_eq!(beacon.fields[0].rule(), FieldRule::Repeated);
        assert_eq!(
            beacon.fields[1],
            Field::map("Counts", FieldType::String, FieldType::UInt32, 22)
        );
    }

    #[test]
    fn test_from_json() {
        let spec = Spec::from_json_str(
            r#"{"package": "foo", "messages": [{"name": "Ping", "fields": [
                {"kind": "custom", "name": "at", "typing": "google.protobuf.Timestamp", "tag": 1}
            ]}]}"#,
        )
        .unwrap();
        assert_eq!(
            spec.messages[0].fields[0],
            Field::custom("at", "google.protobuf.Timestamp", 1)
        );
    }

    #[test]
    fn test_unknown_kind_is_an_error() {
        let err = Spec::from_json_str(
            r#"{"messages": [{"name": "Ping", "fields": [{"kind": "list", "name": "x", "tag": 1}]}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, SpecError::Json(_)));
    }

    #[test]
    fn test_load_and_discover() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.toml"), BEACON_TOML).unwrap();
        fs::write(dir.path().join("a.json"), r#"{"messages": [{"name": "A"}]}"#).unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested/c.json"), r#"{"messages": [{"name": "C"}]}"#).unwrap();

        let found = discover_specs(dir.path());
        let names: Vec<String> = found
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_string_lossy().replace('\\', "/"))
            .collect();
        assert_eq!(names, vec!["a.json", "b.toml", "nested/c.json"]);

        let spec = load_spec(&found[1]).unwrap();
        assert_eq!(spec.messages[0].name, "Beacon");
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spec.yaml");
        fs::write(&path, "messages: []").unwrap();
        assert!(matches!(load_spec(&path), Err(SpecError::UnsupportedFormat(_))));
    }
}
