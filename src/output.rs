//! Writing generated files and checking them for drift
//!
//! A generated file is `<stem>.<extension>` plus, optionally, a
//! `sha256sum`-style sidecar. Drift is reported as a line diff between the
//! file on disk and a fresh render of its definition.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use similar::{ChangeTag, TextDiff};

use crate::checksum::Checksum;
use crate::config::GeneratorConfig;
use crate::error::{Result, SpecError, ValidationError};
use crate::spec::Spec;

/// A generated file that no longer matches its definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Drift {
    /// `-`/`+` prefixed lines, on-disk text first
    pub diff: String,
    pub removed: usize,
    pub added: usize,
}

/// State of the checksum sidecar next to a generated file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidecarStatus {
    Missing,
    Matches,
    /// The file was edited after generation
    Mismatch,
    Malformed,
}

impl SidecarStatus {
    /// Compare `content` with the sidecar recorded for `path`
    pub fn read(path: &Path, content: &str) -> Self {
        let Ok(line) = fs::read_to_string(Checksum::sidecar_path(path)) else {
            return SidecarStatus::Missing;
        };
        match Checksum::parse_sidecar(&line) {
            Some(recorded) if recorded.verify(content) => SidecarStatus::Matches,
            Some(_) => SidecarStatus::Mismatch,
            None => SidecarStatus::Malformed,
        }
    }
}

/// Render `spec` and compare it with previously generated `actual` text.
///
/// Returns `None` when the file is up to date.
pub fn check_drift(spec: &Spec, actual: &str) -> std::result::Result<Option<Drift>, ValidationError> {
    let expected = spec.render()?;
    if expected == actual {
        return Ok(None);
    }

    let mut drift = Drift {
        diff: String::new(),
        removed: 0,
        added: 0,
    };
    let diff = TextDiff::from_lines(actual, expected.as_str());
    for change in diff.iter_all_changes() {
        let sign = match change.tag() {
            ChangeTag::Delete => {
                drift.removed += 1;
                "-"
            }
            ChangeTag::Insert => {
                drift.added += 1;
                "+"
            }
            ChangeTag::Equal => continue,
        };
        drift.diff.push_str(sign);
        drift.diff.push_str(change.value());
        if change.missing_newline() {
            drift.diff.push('\n');
        }
    }
    Ok(Some(drift))
}

/// Write rendered text, creating parent directories, plus a checksum sidecar
/// when `write_checksum` is set
pub fn write_output(path: &Path, text: &str, write_checksum: bool) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, text)?;

    if write_checksum {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        fs::write(
            Checksum::sidecar_path(path),
            Checksum::from_str(text).sidecar_line(&file_name),
        )?;
    }
    tracing::info!(path = %path.display(), bytes = text.len(), "wrote proto3 definition");
    Ok(())
}

/// Pair every input with its output path, refusing two inputs that would
/// overwrite the same file
pub fn plan_outputs(config: &GeneratorConfig, inputs: &[PathBuf]) -> Result<Vec<(PathBuf, PathBuf)>> {
    let mut claimed: HashMap<PathBuf, &Path> = HashMap::new();
    let mut plan = Vec::with_capacity(inputs.len());

    for input in inputs {
        let output = config.output_path_for(input);
        if let Some(first) = claimed.insert(output.clone(), input) {
            return Err(SpecError::OutputCollision {
                output: output.display().to_string(),
                first: first.display().to_string(),
                second: input.display().to_string(),
            });
        }
        plan.push((input.clone(), output));
    }
    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Field;
    use crate::message::Message;
    use crate::types::FieldType;

    fn sample() -> Spec {
        Spec::new("foo").message(
            Message::new("Beacon").field(Field::scalar("device_id", FieldType::String, 1)),
        )
    }

    #[test]
    fn test_up_to_date() {
        let spec = sample();
        let text = spec.render().unwrap();
        assert_eq!(check_drift(&spec, &text).unwrap(), None);
    }

    #[test]
    fn test_drift_diff() {
        let spec = sample();
        let stale = spec.render().unwrap().replace("device_id = 1", "device = 1");

        let drift = check_drift(&spec, &stale).unwrap().unwrap();
        assert_eq!(drift.removed, 1);
        assert_eq!(drift.added, 1);
        assert!(drift.diff.contains("-  string device = 1;\n"));
        assert!(drift.diff.contains("+  string device_id = 1;\n"));
    }

    #[test]
    fn test_drift_on_invalid_definition() {
        let spec = Spec::new("foo");
        assert!(check_drift(&spec, "").is_err());
    }

    #[test]
    fn test_write_output_with_sidecar() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gen/beacon.proto");
        let text = sample().render().unwrap();

        write_output(&path, &text, true).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), text);

        let sidecar = fs::read_to_string(Checksum::sidecar_path(&path)).unwrap();
        assert!(sidecar.ends_with("  beacon.proto\n"));
        assert_eq!(SidecarStatus::read(&path, &text), SidecarStatus::Matches);
        assert_eq!(
            SidecarStatus::read(&path, "message Edited {\n}"),
            SidecarStatus::Mismatch
        );
    }

    #[test]
    fn test_write_output_without_sidecar() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("beacon.proto");

        write_output(&path, "x", false).unwrap();
        assert!(!Checksum::sidecar_path(&path).exists());
        assert_eq!(SidecarStatus::read(&path, "x"), SidecarStatus::Missing);
    }

    #[test]
    fn test_malformed_sidecar() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("beacon.proto");
        fs::write(Checksum::sidecar_path(&path), "garbage\n").unwrap();
        assert_eq!(SidecarStatus::read(&path, "x"), SidecarStatus::Malformed);
    }

    #[test]
    fn test_plan_outputs() {
        let config = GeneratorConfig::default();
        let inputs = vec![
            PathBuf::from("defs/telemetry.v1.toml"),
            PathBuf::from("defs/telemetry.v2.toml"),
        ];
        let plan = plan_outputs(&config, &inputs).unwrap();
        assert_eq!(plan[0].1, PathBuf::from("defs/telemetry.v1.proto"));
        assert_eq!(plan[1].1, PathBuf::from("defs/telemetry.v2.proto"));
    }

    #[test]
    fn test_plan_outputs_collision() {
        let mut config = GeneratorConfig::default();
        config.output.dir = Some(PathBuf::from("gen"));
        let inputs = vec![PathBuf::from("a/x.json"), PathBuf::from("nested/x.json")];

        let err = plan_outputs(&config, &inputs).unwrap_err();
        assert!(matches!(err, SpecError::OutputCollision { .. }));
        assert!(err.to_string().contains("nested/x.json"));
    }

    #[test]
    fn test_plan_outputs_same_stem_other_format() {
        let config = GeneratorConfig::default();
        let inputs = vec![PathBuf::from("defs/x.json"), PathBuf::from("defs/x.toml")];
        assert!(plan_outputs(&config, &inputs).is_err());
    }
}
