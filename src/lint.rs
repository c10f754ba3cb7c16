//! Style Linting
//!
//! Checks that a structurally valid definition also follows the proto3 style
//! guide and will not be rejected by `protoc` for tag clashes. Findings are
//! warnings only; rendering never depends on them.
//!
//! ## Lints
//! 1. **Naming**: PascalCase messages/enums, lower_snake_case fields/oneofs,
//!    UPPER_SNAKE_CASE enum values
//! 2. **Tag clashes**: duplicate field tags within a message
//! 3. **Reserved use**: fields that reuse a reserved tag or name
//! 4. **Enum zero**: the lowest enum tag must be zero, so the zero value
//!    renders first

use regex::Regex;
use std::collections::HashMap;

use crate::enumeration::Enum;
use crate::field::Field;
use crate::message::Message;
use crate::reserved::Reserved;
use crate::spec::Spec;
use crate::types::Tag;

/// Result of linting one definition
#[derive(Debug, Default)]
pub struct LintResult {
    pub spec_id: String,
    pub warnings: Vec<LintWarning>,
}

impl LintResult {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn has(&self, code: &str) -> bool {
        self.warnings.iter().any(|w| w.code == code)
    }
}

#[derive(Debug)]
pub struct LintWarning {
    pub code: &'static str,
    pub message: String,
    /// Dotted location, e.g. `Beacon.Event.Habitat` or `Beacon.test_oneof.name`
    pub path: String,
}

/// The proto3 style linter
pub struct StyleLinter {
    pascal_case: Regex,
    snake_case: Regex,
    screaming_case: Regex,
}

impl Default for StyleLinter {
    fn default() -> Self {
        Self::new()
    }
}

impl StyleLinter {
    pub fn new() -> Self {
        Self {
            pascal_case: Regex::new(r"^[A-Z][A-Za-z0-9]*$").unwrap(),
            snake_case: Regex::new(r"^[a-z][a-z0-9]*(_[a-z0-9]+)*$").unwrap(),
            screaming_case: Regex::new(r"^[A-Z][A-Z0-9]*(_[A-Z0-9]+)*$").unwrap(),
        }
    }

    /// Lint a whole document
    pub fn lint(&self, spec_id: &str, spec: &Spec) -> LintResult {
        let mut result = LintResult {
            spec_id: spec_id.to_string(),
            ..Default::default()
        };

        for enumeration in &spec.enums {
            self.lint_enum(enumeration, "", &mut result);
        }
        for message in &spec.messages {
            self.lint_message(message, "", &mut result);
        }
        result
    }

    fn lint_message(&self, message: &Message, parent: &str, result: &mut LintResult) {
        let path = join(parent, &message.name);

        if !self.pascal_case.is_match(&message.name) {
            warn(
                result,
                "MESSAGE_NAME_CASE",
                format!("Message name '{}' should be PascalCase", message.name),
                &path,
            );
        }

        let members = message.oneofs.iter().flat_map(|oneof| {
            let group = join(&path, &oneof.name);
            oneof.fields.iter().map(move |f| (join(&group, f.name()), f))
        });
        let all_fields = message
            .fields
            .iter()
            .map(|f| (join(&path, f.name()), f))
            .chain(members);

        let mut tags: HashMap<Tag, &str> = HashMap::new();
        for (field_path, field) in all_fields {
            self.lint_field(field, &message.reserved, &field_path, result);

            if let Some(previous) = tags.insert(field.tag(), field.name()) {
                warn(
                    result,
                    "DUPLICATE_FIELD_TAG",
                    format!("Field '{}' reuses tag {} of field '{}'", field.name(), field.tag(), previous),
                    &field_path,
                );
            }
        }

        for oneof in &message.oneofs {
            if !self.snake_case.is_match(&oneof.name) {
                warn(
                    result,
                    "FIELD_NAME_CASE",
                    format!("Oneof name '{}' should be lower_snake_case", oneof.name),
                    &join(&path, &oneof.name),
                );
            }
        }

        for enumeration in &message.enums {
            self.lint_enum(enumeration, &path, result);
        }
        for nested in &message.messages {
            self.lint_message(nested, &path, result);
        }
    }

    fn lint_field(&self, field: &Field, reserved: &[Reserved], path: &str, result: &mut LintResult) {
        if !self.snake_case.is_match(field.name()) {
            warn(
                result,
                "FIELD_NAME_CASE",
                format!("Field name '{}' should be lower_snake_case", field.name()),
                path,
            );
        }

        for declaration in reserved {
            if declaration.covers_tag(field.tag()) {
                warn(
                    result,
                    "RESERVED_TAG_IN_USE",
                    format!("Field '{}' uses reserved tag {}", field.name(), field.tag()),
                    path,
                );
            }
            if matches!(declaration, Reserved::Name { name } if name == field.name()) {
                warn(
                    result,
                    "RESERVED_NAME_IN_USE",
                    format!("Field name '{}' is reserved", field.name()),
                    path,
                );
            }
        }
    }

    fn lint_enum(&self, enumeration: &Enum, parent: &str, result: &mut LintResult) {
        let path = join(parent, &enumeration.name);

        if !self.pascal_case.is_match(&enumeration.name) {
            warn(
                result,
                "MESSAGE_NAME_CASE",
                format!("Enum name '{}' should be PascalCase", enumeration.name),
                &path,
            );
        }

        for value in &enumeration.values {
            if !self.screaming_case.is_match(&value.name) {
                warn(
                    result,
                    "ENUM_VALUE_CASE",
                    format!("Enum value '{}' should be UPPER_SNAKE_CASE", value.name),
                    &join(&path, &value.name),
                );
            }
        }

        if let Some(first) = enumeration.sorted_values().first() {
            if first.tag != 0 {
                warn(
                    result,
                    "ENUM_ZERO_FIRST",
                    format!(
                        "Enum '{}' starts at {}; proto3 requires a zero first value",
                        enumeration.name, first.tag
                    ),
                    &path,
                );
            }
        }
    }
}

fn join(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", parent, name)
    }
}

fn warn(result: &mut LintResult, code: &'static str, message: String, path: &str) {
    result.warnings.push(LintWarning {
        code,
        message,
        path: path.to_string(),
    });
}
