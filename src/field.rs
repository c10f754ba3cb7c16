//! Message fields
//!
//! Four shapes share one line format: built-in scalar, custom (opaque type
//! name, e.g. an imported or sibling message), and the two map flavors.
//!
//! See <https://protobuf.dev/programming-guides/proto3/#maps>

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::types::{comment_suffix, FieldRule, FieldType, Tag};

/// A single field declaration inside a message or oneof
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Field {
    /// Field typed with a built-in scalar
    Scalar {
        name: String,
        tag: Tag,
        #[serde(default)]
        rule: FieldRule,
        #[serde(default, skip_serializing_if = "String::is_empty")]
        comment: String,
        typing: FieldType,
    },
    /// Field typed with an unchecked type name
    Custom {
        name: String,
        tag: Tag,
        #[serde(default)]
        rule: FieldRule,
        #[serde(default, skip_serializing_if = "String::is_empty")]
        comment: String,
        typing: String,
    },
    /// Map between two built-in scalars
    Map {
        name: String,
        tag: Tag,
        #[serde(default)]
        rule: FieldRule,
        #[serde(default, skip_serializing_if = "String::is_empty")]
        comment: String,
        key_typing: FieldType,
        value_typing: FieldType,
    },
    /// Map from a built-in scalar key to a custom value type
    CustomMap {
        name: String,
        tag: Tag,
        #[serde(default)]
        rule: FieldRule,
        #[serde(default, skip_serializing_if = "String::is_empty")]
        comment: String,
        key_typing: FieldType,
        value_typing: String,
    },
}

impl Field {
    pub fn scalar(name: impl Into<String>, typing: FieldType, tag: Tag) -> Self {
        Field::Scalar {
            name: name.into(),
            tag,
            rule: FieldRule::Singular,
            comment: String::new(),
            typing,
        }
    }

    pub fn custom(name: impl Into<String>, typing: impl Into<String>, tag: Tag) -> Self {
        Field::Custom {
            name: name.into(),
            tag,
            rule: FieldRule::Singular,
            comment: String::new(),
            typing: typing.into(),
        }
    }

    pub fn map(name: impl Into<String>, key_typing: FieldType, value_typing: FieldType, tag: Tag) -> Self {
        Field::Map {
            name: name.into(),
            tag,
            rule: FieldRule::Singular,
            comment: String::new(),
            key_typing,
            value_typing,
        }
    }

    pub fn custom_map(
        name: impl Into<String>,
        key_typing: FieldType,
        value_typing: impl Into<String>,
        tag: Tag,
    ) -> Self {
        Field::CustomMap {
            name: name.into(),
            tag,
            rule: FieldRule::Singular,
            comment: String::new(),
            key_typing,
            value_typing: value_typing.into(),
        }
    }

    /// Set the field rule
    pub fn with_rule(mut self, new_rule: FieldRule) -> Self {
        match &mut self {
            Field::Scalar { rule, .. }
            | Field::Custom { rule, .. }
            | Field::Map { rule, .. }
            | Field::CustomMap { rule, .. } => *rule = new_rule,
        }
        self
    }

    /// Mark the field `repeated`
    pub fn repeated(self) -> Self {
        self.with_rule(FieldRule::Repeated)
    }

    /// Attach a trailing comment
    pub fn with_comment(mut self, text: impl Into<String>) -> Self {
        match &mut self {
            Field::Scalar { comment, .. }
            | Field::Custom { comment, .. }
            | Field::Map { comment, .. }
            | Field::CustomMap { comment, .. } => *comment = text.into(),
        }
        self
    }

    pub fn name(&self) -> &str {
        match self {
            Field::Scalar { name, .. }
            | Field::Custom { name, .. }
            | Field::Map { name, .. }
            | Field::CustomMap { name, .. } => name,
        }
    }

    pub fn tag(&self) -> Tag {
        match self {
            Field::Scalar { tag, .. }
            | Field::Custom { tag, .. }
            | Field::Map { tag, .. }
            | Field::CustomMap { tag, .. } => *tag,
        }
    }

    pub fn rule(&self) -> FieldRule {
        match self {
            Field::Scalar { rule, .. }
            | Field::Custom { rule, .. }
            | Field::Map { rule, .. }
            | Field::CustomMap { rule, .. } => *rule,
        }
    }

    pub fn comment(&self) -> &str {
        match self {
            Field::Scalar { comment, .. }
            | Field::Custom { comment, .. }
            | Field::Map { comment, .. }
            | Field::CustomMap { comment, .. } => comment,
        }
    }

    /// Label used in validation messages
    fn label(&self) -> &'static str {
        match self {
            Field::Scalar { .. } => "ScalarField",
            Field::Custom { .. } => "CustomField",
            Field::Map { .. } => "MapField",
            Field::CustomMap { .. } => "CustomMapField",
        }
    }

    pub fn is_map(&self) -> bool {
        matches!(self, Field::Map { .. } | Field::CustomMap { .. })
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let label = self.label();
        let name = self.name();

        if name.is_empty() {
            return Err(ValidationError::new(format!("{} must have a non-empty name", label)));
        }
        if self.tag() < 0 {
            return Err(ValidationError::new(format!(
                "{} {} must have a non-negative integer for tag (got {})",
                label,
                name,
                self.tag()
            )));
        }

        if let Field::Map { key_typing, .. } | Field::CustomMap { key_typing, .. } = self {
            if !key_typing.is_valid_map_key() {
                return Err(ValidationError::new(format!(
                    "Map field {} must use a scalar integral or string type for the map key",
                    name
                )));
            }
            if self.rule().is_repeated() {
                return Err(ValidationError::new(format!(
                    "{} {} cannot use repeated rule",
                    label, name
                )));
            }
        }

        Ok(())
    }

    /// One unindented line, e.g. `repeated string Habitat = 10;   // What am I?`
    pub fn render(&self) -> Result<String, ValidationError> {
        self.validate()?;

        let declaration = match self {
            Field::Scalar { typing, .. } => typing.keyword().to_string(),
            Field::Custom { typing, .. } => typing.clone(),
            Field::Map {
                key_typing,
                value_typing,
                ..
            } => format!("map<{}, {}>", key_typing.keyword(), value_typing.keyword()),
            Field::CustomMap {
                key_typing,
                value_typing,
                ..
            } => format!("map<{}, {}>", key_typing.keyword(), value_typing),
        };

        Ok(format!(
            "{}{} {} = {};{}",
            self.rule().keyword(),
            declaration,
            self.name(),
            self.tag(),
            comment_suffix(self.comment())
        ))
    }
}
