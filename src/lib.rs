//! proto3 Definition Generator
//!
//! Builds proto3 `.proto` text from an in-memory description of messages,
//! fields, enums, reserved declarations and oneofs. Every render validates
//! the whole tree first, so output is either a complete document or an error.
//!
//! ## Features
//!
//! - **Structural Validation**: required names, legal map keys, enum aliasing,
//!   reserved ranges, non-empty oneofs
//! - **Deterministic Output**: fixed section order, two-space indentation,
//!   enum values sorted by tag
//! - **Definition Files**: JSON and TOML definitions load straight into the model
//! - **Style Lint**: naming and tag-clash warnings that never block rendering
//! - **Checksums**: SHA256 sidecars for generated files
//! - **Drift Checks**: line diffs between a definition and its generated file
//!
//! ## Layout
//!
//! ```text
//! Spec
//! ├── imports
//! ├── enums ──────────── Enum ── EnumValue
//! └── messages ───────── Message
//!                        ├── messages (nested)
//!                        ├── enums
//!                        ├── reserved ── Name | Tag | Range
//!                        ├── fields ──── Scalar | Custom | Map | CustomMap
//!                        └── oneofs ──── OneOf ── fields
//! ```

pub mod checksum;
pub mod config;
pub mod enumeration;
pub mod error;
pub mod field;
pub mod lint;
pub mod loader;
pub mod message;
pub mod oneof;
pub mod output;
pub mod reserved;
pub mod spec;
pub mod types;

pub use checksum::Checksum;
pub use config::GeneratorConfig;
pub use enumeration::{Enum, EnumValue};
pub use error::{Result, SpecError, ValidationError};
pub use field::Field;
pub use lint::{LintResult, StyleLinter};
pub use loader::{discover_specs, load_spec};
pub use message::Message;
pub use oneof::OneOf;
pub use output::{check_drift, plan_outputs, write_output, Drift, SidecarStatus};
pub use reserved::Reserved;
pub use spec::Spec;
pub use types::{FieldRule, FieldType, Tag};
