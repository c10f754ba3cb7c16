//! Reserved names and tags within a message
//!
//! See <https://protobuf.dev/programming-guides/proto3/#reserved>

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::types::Tag;

/// A name or tag that cannot be reused within a message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Reserved {
    /// A reserved field name, rendered quoted
    Name { name: String },
    /// A single reserved tag
    Tag { tag: Tag },
    /// An inclusive range of reserved tags, rendered `lower to upper`
    Range { lower: Tag, upper: Tag },
}

impl Reserved {
    pub fn name(name: impl Into<String>) -> Self {
        Reserved::Name { name: name.into() }
    }

    pub fn tag(tag: Tag) -> Self {
        Reserved::Tag { tag }
    }

    pub fn range(lower: Tag, upper: Tag) -> Self {
        Reserved::Range { lower, upper }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            Reserved::Name { name } if name.is_empty() => Err(ValidationError::new(
                "ReservedName field must have a non-empty name",
            )),
            Reserved::Name { .. } | Reserved::Tag { .. } => Ok(()),
            Reserved::Range { lower, upper } => {
                if *lower < 0 {
                    return Err(ValidationError::new(format!(
                        "ReservedTagRange lower-tag must be greater-than-or-equal to zero (got {})",
                        lower
                    )));
                }
                if lower >= upper {
                    return Err(ValidationError::new(format!(
                        "ReservedTagRange upper-tag must be greater-than lower-tag ({} to {})",
                        lower, upper
                    )));
                }
                Ok(())
            }
        }
    }

    /// The value following `reserved` on its line, without indentation or `;`
    pub fn render(&self) -> Result<String, ValidationError> {
        self.validate()?;
        Ok(match self {
            Reserved::Name { name } => format!("\"{}\"", name),
            Reserved::Tag { tag } => tag.to_string(),
            Reserved::Range { lower, upper } => format!("{} to {}", lower, upper),
        })
    }

    /// Whether `tag` falls under this declaration
    pub fn covers_tag(&self, tag: Tag) -> bool {
        match self {
            Reserved::Name { .. } => false,
            Reserved::Tag { tag: reserved } => *reserved == tag,
            Reserved::Range { lower, upper } => (*lower..=*upper).contains(&tag),
        }
    }
}
