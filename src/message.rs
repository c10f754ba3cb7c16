//! Message definitions
//!
//! A message owns its nested messages, enums, reserved declarations, fields
//! and oneofs. Rendering emits them in that order, each block nested one
//! level deeper than the message header.

use serde::{Deserialize, Serialize};

use crate::enumeration::Enum;
use crate::error::ValidationError;
use crate::field::Field;
use crate::oneof::OneOf;
use crate::reserved::Reserved;
use crate::types::indent;

/// A single message definition
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Message {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub comment: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<Message>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reserved: Vec<Reserved>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<Field>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub oneofs: Vec<OneOf>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub enums: Vec<Enum>,
}

impl Message {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    pub fn message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    pub fn reserved(mut self, reserved: Reserved) -> Self {
        self.reserved.push(reserved);
        self
    }

    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn oneof(mut self, oneof: OneOf) -> Self {
        self.oneofs.push(oneof);
        self
    }

    pub fn enumeration(mut self, enumeration: Enum) -> Self {
        self.enums.push(enumeration);
        self
    }

    /// Validate the message and every child, stopping at the first failure.
    ///
    /// Children are checked in a fixed order: fields, nested messages,
    /// reserved declarations, enums, oneofs.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.is_empty() {
            return Err(ValidationError::new("Message name cannot be empty"));
        }
        for field in &self.fields {
            field.validate()?;
        }
        for message in &self.messages {
            message.validate()?;
        }
        for reserved in &self.reserved {
            reserved.validate()?;
        }
        for enumeration in &self.enums {
            enumeration.validate()?;
        }
        for oneof in &self.oneofs {
            oneof.validate()?;
        }
        Ok(())
    }

    pub fn render(&self, depth: usize) -> Result<String, ValidationError> {
        self.validate()?;

        let mut output = String::new();
        if !self.comment.is_empty() {
            output.push_str(&format!("{}// {}\n", indent(depth), self.comment));
        }
        output.push_str(&format!("{}message {} {{\n", indent(depth), self.name));

        for message in &self.messages {
            output.push_str(&message.render(depth + 1)?);
            output.push_str("\n\n");
        }

        for enumeration in &self.enums {
            output.push_str(&enumeration.render(depth + 1)?);
            output.push_str("\n\n");
        }

        if !self.reserved.is_empty() {
            for reserved in &self.reserved {
                output.push_str(&format!("{}reserved {};\n", indent(depth + 1), reserved.render()?));
            }
            output.push('\n');
        }

        if !self.fields.is_empty() {
            for field in &self.fields {
                output.push_str(&format!("{}{}\n", indent(depth + 1), field.render()?));
            }
            output.push('\n');
        }

        for oneof in &self.oneofs {
            output.push_str(&oneof.render(depth + 1)?);
            output.push('\n');
        }

        output.push_str(&format!("{}}}", indent(depth)));
        Ok(output)
    }
}
