//! Configuration for the `protospec` driver
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (protospec.toml)
//! - Environment variables (PROTOSPEC__*)
//!
//! ## Example config file (protospec.toml):
//! ```toml
//! [output]
//! dir = "generated/proto"
//! extension = "proto"
//! write_checksums = true
//!
//! [lint]
//! enabled = true
//! deny_warnings = false
//!
//! [logging]
//! filter = "protospec=info"
//! ```

use config_crate::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration for the generator
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Where and how rendered files are written
    #[serde(default)]
    pub output: OutputConfig,

    /// Style lint settings
    #[serde(default)]
    pub lint: LintConfig,

    /// Log filter used when RUST_LOG is unset
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output directory for batch renders (defaults to next to the input)
    #[serde(default)]
    pub dir: Option<PathBuf>,

    /// Extension of rendered files, without the dot
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Write `<file>.sha256` next to every rendered file
    #[serde(default = "default_true")]
    pub write_checksums: bool,
}

/// Lint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LintConfig {
    /// Run the style linter during `render` and `batch`
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Treat lint warnings as failures
    #[serde(default)]
    pub deny_warnings: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive
    #[serde(default = "default_filter")]
    pub filter: String,
}

fn default_extension() -> String {
    "proto".to_string()
}

fn default_true() -> bool {
    true
}

fn default_filter() -> String {
    "warn".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: None,
            extension: default_extension(),
            write_checksums: true,
        }
    }
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            deny_warnings: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

impl GeneratorConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration, layering an explicit file over the default locations
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        let config_locations = ["protospec.toml", ".protospec.toml", "config/protospec.toml"];
        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        if let Some(config_dir) = directories::ProjectDirs::from("dev", "familiar", "protospec") {
            let xdg_config = config_dir.config_dir().join("protospec.toml");
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix("PROTOSPEC")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Save configuration to a file
    pub fn save(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, content)
    }

    /// Output path for a definition file: `<dir or input dir>/<stem>.<extension>`
    pub fn output_path_for(&self, input: &Path) -> PathBuf {
        let stem = input.file_stem().unwrap_or_default();
        let dir = match &self.output.dir {
            Some(dir) => dir.clone(),
            None => input.parent().map(Path::to_path_buf).unwrap_or_default(),
        };
        dir.join(format!("{}.{}", stem.to_string_lossy(), self.output.extension))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GeneratorConfig::default();
        assert_eq!(config.output.extension, "proto");
        assert!(config.output.write_checksums);
        assert!(config.lint.enabled);
        assert!(!config.lint.deny_warnings);
        assert_eq!(config.logging.filter, "warn");
    }

    #[test]
    fn test_serialize_config() {
        let config = GeneratorConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[output]"));
        assert!(toml_str.contains("[lint]"));
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(
            &path,
            "[output]\nextension = \"pb.txt\"\nwrite_checksums = false\n\n[lint]\ndeny_warnings = true\n",
        )
        .unwrap();

        let config = GeneratorConfig::load_from(Some(path.as_path())).unwrap();
        assert_eq!(config.output.extension, "pb.txt");
        assert!(!config.output.write_checksums);
        assert!(config.lint.deny_warnings);
        assert!(config.lint.enabled);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("saved.toml");
        let mut config = GeneratorConfig::default();
        config.output.dir = Some(PathBuf::from("out"));
        config.save(&path).unwrap();

        let reloaded = GeneratorConfig::load_from(Some(path.as_path())).unwrap();
        assert_eq!(reloaded.output.dir, Some(PathBuf::from("out")));
    }

    #[test]
    fn test_output_path_for() {
        let mut config = GeneratorConfig::default();
        assert_eq!(
            config.output_path_for(Path::new("defs/beacon.json")),
            PathBuf::from("defs/beacon.proto")
        );
        config.output.dir = Some(PathBuf::from("gen"));
        assert_eq!(
            config.output_path_for(Path::new("defs/beacon.toml")),
            PathBuf::from("gen/beacon.proto")
        );
    }

    #[test]
    fn test_output_path_keeps_dotted_stem() {
        let config = GeneratorConfig::default();
        assert_eq!(
            config.output_path_for(Path::new("defs/telemetry.v1.toml")),
            PathBuf::from("defs/telemetry.v1.proto")
        );
        assert_ne!(
            config.output_path_for(Path::new("defs/telemetry.v1.toml")),
            config.output_path_for(Path::new("defs/telemetry.v2.toml"))
        );
    }
}
