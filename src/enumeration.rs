//! Enumerations
//!
//! See <https://protobuf.dev/programming-guides/proto3/#enum>

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::ValidationError;
use crate::types::{comment_suffix, indent, Tag};

/// A single named value within an enumeration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumValue {
    pub name: String,
    pub tag: Tag,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub comment: String,
}

impl EnumValue {
    pub fn new(name: impl Into<String>, tag: Tag) -> Self {
        Self {
            name: name.into(),
            tag,
            comment: String::new(),
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }
}

/// An enumeration type
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Enum {
    pub name: String,
    #[serde(default)]
    pub values: Vec<EnumValue>,
    /// Emits `option allow_alias = true;` and permits duplicate tags
    #[serde(default)]
    pub allow_alias: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub comment: String,
}

impl Enum {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn value(mut self, value: EnumValue) -> Self {
        self.values.push(value);
        self
    }

    pub fn allow_alias(mut self) -> Self {
        self.allow_alias = true;
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.is_empty() {
            return Err(ValidationError::new("Enum must have a non-empty name"));
        }
        if self.values.is_empty() {
            return Err(ValidationError::new(format!(
                "Enum {} must have non-empty set of values",
                self.name
            )));
        }
        if !self.allow_alias {
            let mut tags: HashMap<Tag, &str> = HashMap::new();
            for value in &self.values {
                if let Some(existing) = tags.insert(value.tag, &value.name) {
                    return Err(ValidationError::new(format!(
                        "Enum value {} has tag {} already used by {} while aliasing is not allowed in {}",
                        value.name, value.tag, existing, self.name
                    )));
                }
            }
        }
        Ok(())
    }

    /// Reorder `values` by ascending tag, keeping input order among equal tags.
    ///
    /// `render` emits this order without touching `self`.
    pub fn sort_values(&mut self) {
        self.values.sort_by_key(|v| v.tag);
    }

    /// Values in the order they are rendered
    pub fn sorted_values(&self) -> Vec<&EnumValue> {
        let mut values: Vec<&EnumValue> = self.values.iter().collect();
        values.sort_by_key(|v| v.tag);
        values
    }

    pub fn render(&self, depth: usize) -> Result<String, ValidationError> {
        self.validate()?;

        let mut output = String::new();
        if !self.comment.is_empty() {
            output.push_str(&format!("{}// {}\n", indent(depth), self.comment));
        }
        output.push_str(&format!("{}enum {} {{\n", indent(depth), self.name));
        if self.allow_alias {
            output.push_str(&format!("{}option allow_alias = true;\n", indent(depth + 1)));
        }
        for value in self.sorted_values() {
            output.push_str(&format!(
                "{}{} = {};{}\n",
                indent(depth + 1),
                value.name,
                value.tag,
                comment_suffix(&value.comment)
            ));
        }
        output.push_str(&format!("{}}}", indent(depth)));
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playback_state() -> Enum {
        Enum::new("PlaybackState")
            .allow_alias()
            .value(EnumValue::new("Stopped", 2))
            .value(EnumValue::new("Playing", 1))
            .value(EnumValue::new("Waiting", 0))
            .value(EnumValue::new("Started", 1))
    }

    #[test]
    fn test_render_sorted_with_alias() {
        let rendered = playback_state().render(0).unwrap();
        assert_eq!(
            rendered,
            "enum PlaybackState {\n  option allow_alias = true;\n  Waiting = 0;\n  Playing = 1;\n  Started = 1;\n  Stopped = 2;\n}"
        );
    }

    #[test]
    fn test_render_is_non_destructive() {
        let e = playback_state();
        let first = e.render(1).unwrap();
        let second = e.render(1).unwrap();
        assert_eq!(first, second);
        assert_eq!(e.values[0].name, "Stopped");
    }

    #[test]
    fn test_sort_values_in_place() {
        let mut e = playback_state();
        e.sort_values();
        let names: Vec<&str> = e.values.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["Waiting", "Playing", "Started", "Stopped"]);
    }

    #[test]
    fn test_duplicate_tag_requires_alias() {
        let mut e = playback_state();
        assert!(e.validate().is_ok());
        e.allow_alias = false;
        let err = e.validate().unwrap_err();
        assert!(err.message().contains("Started"));
    }

    #[test]
    fn test_comments_and_indent() {
        let e = Enum::new("Country")
            .with_comment("ISO subset")
            .value(EnumValue::new("US", 0))
            .value(EnumValue::new("CA", 1).with_comment("Canada"));
        assert_eq!(
            e.render(1).unwrap(),
            "  // ISO subset\n  enum Country {\n    US = 0;\n    CA = 1;   // Canada\n  }"
        );
    }

    #[test]
    fn test_required_attributes() {
        assert!(Enum::new("").value(EnumValue::new("A", 0)).validate().is_err());
        assert!(Enum::new("Empty").validate().is_err());
        assert!(Enum::new("Empty").render(0).is_err());
    }

    #[test]
    fn test_negative_and_sparse_tags_accepted() {
        let e = Enum::new("Sparse")
            .value(EnumValue::new("HIGH", 100))
            .value(EnumValue::new("LOW", -5));
        assert!(e.validate().is_ok());
        assert_eq!(e.render(0).unwrap(), "enum Sparse {\n  LOW = -5;\n  HIGH = 100;\n}");
    }
}
