//! Oneof groups
//!
//! See <https://protobuf.dev/programming-guides/proto3/#oneof>

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::field::Field;
use crate::types::indent;

/// A set of fields of which at most one is set at a time
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OneOf {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub comment: String,
}

impl OneOf {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.is_empty() {
            return Err(ValidationError::new("OneOf must have a non-empty name"));
        }
        if self.fields.is_empty() {
            return Err(ValidationError::new(format!(
                "OneOf {} must have non-empty set of fields",
                self.name
            )));
        }
        for field in &self.fields {
            field.validate()?;
        }
        Ok(())
    }

    pub fn render(&self, depth: usize) -> Result<String, ValidationError> {
        self.validate()?;

        let mut output = String::new();
        if !self.comment.is_empty() {
            output.push_str(&format!("{}// {}\n", indent(depth), self.comment));
        }
        output.push_str(&format!("{}oneof {} {{\n", indent(depth), self.name));
        for field in &self.fields {
            output.push_str(&format!("{}{}\n", indent(depth + 1), field.render()?));
        }
        output.push_str(&format!("{}}}", indent(depth)));
        Ok(output)
    }
}
