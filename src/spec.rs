//! Top-level proto3 document

use serde::{Deserialize, Serialize};

use crate::enumeration::Enum;
use crate::error::ValidationError;
use crate::message::Message;

/// First line of every rendered document
pub const SYNTAX_HEADER: &str = "syntax = \"proto3\";";

/// A complete `.proto` file
///
/// ```
/// use proto3_spec::{Field, FieldType, Message, Spec};
///
/// let spec = Spec::new("foo")
///     .message(Message::new("Ping").field(Field::scalar("id", FieldType::Int64, 1)));
/// let text = spec.render().unwrap();
/// assert!(text.starts_with("syntax = \"proto3\";\npackage foo;\n"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Spec {
    /// See <https://protobuf.dev/programming-guides/proto3/#packages>
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub package: String,
    /// Emitted as `option java_package = "...";`
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub java_package: String,
    /// Opaque import paths, emitted as-is
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub imports: Vec<String>,
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub enums: Vec<Enum>,
}

impl Spec {
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            ..Default::default()
        }
    }

    pub fn with_java_package(mut self, java_package: impl Into<String>) -> Self {
        self.java_package = java_package.into();
        self
    }

    pub fn import(mut self, path: impl Into<String>) -> Self {
        self.imports.push(path.into());
        self
    }

    pub fn message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    pub fn enumeration(mut self, enumeration: Enum) -> Self {
        self.enums.push(enumeration);
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.messages.is_empty() {
            return Err(ValidationError::new("Spec must contain at least one message"));
        }
        for message in &self.messages {
            message.validate()?;
        }
        for enumeration in &self.enums {
            enumeration.validate()?;
        }
        Ok(())
    }

    /// Render the whole document, or nothing if any part of it is invalid
    pub fn render(&self) -> Result<String, ValidationError> {
        self.validate()?;
        tracing::debug!(
            package = %self.package,
            messages = self.messages.len(),
            enums = self.enums.len(),
            "rendering proto3 document"
        );

        let mut output = String::new();
        output.push_str(SYNTAX_HEADER);
        output.push('\n');
        if !self.package.is_empty() {
            output.push_str(&format!("package {};\n", self.package));
        }
        if !self.java_package.is_empty() {
            output.push_str(&format!("option java_package = \"{}\";\n", self.java_package));
        }
        for import in &self.imports {
            output.push_str(&format!("import \"{}\";\n", import));
        }

        for enumeration in &self.enums {
            output.push_str(&format!("\n{}\n", enumeration.render(0)?));
        }

        for message in &self.messages {
            output.push_str(&format!("\n{}\n", message.render(0)?));
        }

        Ok(output)
    }
}
