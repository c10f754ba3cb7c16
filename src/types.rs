//! Primitive proto3 types: scalar field types, field rules, tags
//!
//! See <https://protobuf.dev/programming-guides/proto3/#scalar>

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric identifier of a field or enum value.
///
/// Signed so that negative values can be represented and rejected explicitly.
pub type Tag = i32;

/// Keyword for each built-in scalar type, indexed by its numeric code
const SCALAR_KEYWORDS: [&str; 15] = [
    "double", "float", "int32", "int64", "uint32", "uint64", "sint32", "sint64", "fixed32",
    "fixed64", "sfixed32", "sfixed64", "bool", "string", "bytes",
];

/// Built-in scalar type of a field, map key, or map value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    Double,
    Float,
    Int32,
    Int64,
    UInt32,
    UInt64,
    SInt32,
    SInt64,
    Fixed32,
    Fixed64,
    SFixed32,
    SFixed64,
    Bool,
    String,
    Bytes,
    /// A numeric code outside the scalar table. Renders as an empty token.
    Unrecognized(u8),
}

impl FieldType {
    const ALL: [FieldType; 15] = [
        FieldType::Double,
        FieldType::Float,
        FieldType::Int32,
        FieldType::Int64,
        FieldType::UInt32,
        FieldType::UInt64,
        FieldType::SInt32,
        FieldType::SInt64,
        FieldType::Fixed32,
        FieldType::Fixed64,
        FieldType::SFixed32,
        FieldType::SFixed64,
        FieldType::Bool,
        FieldType::String,
        FieldType::Bytes,
    ];

    /// Map a numeric code (0 = double .. 14 = bytes) to a type
    pub fn from_code(code: u8) -> Self {
        Self::ALL
            .get(code as usize)
            .copied()
            .unwrap_or(FieldType::Unrecognized(code))
    }

    /// Numeric code of this type
    pub fn code(&self) -> u8 {
        match self {
            FieldType::Unrecognized(code) => *code,
            known => Self::ALL.iter().position(|t| t == known).unwrap_or_default() as u8,
        }
    }

    /// Look a type up by its proto3 keyword
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        SCALAR_KEYWORDS
            .iter()
            .position(|k| *k == keyword)
            .map(|i| Self::ALL[i])
    }

    /// The proto3 keyword, or `""` for an unrecognized code
    pub fn keyword(&self) -> &'static str {
        match self {
            FieldType::Unrecognized(_) => "",
            known => SCALAR_KEYWORDS[known.code() as usize],
        }
    }

    /// Floating point and byte-sequence types cannot key a map
    pub fn is_valid_map_key(&self) -> bool {
        !matches!(self, FieldType::Double | FieldType::Float | FieldType::Bytes)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FieldTypeRepr {
    Code(u8),
    Keyword(String),
}

impl<'de> Deserialize<'de> for FieldType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match FieldTypeRepr::deserialize(deserializer)? {
            FieldTypeRepr::Code(code) => Ok(FieldType::from_code(code)),
            FieldTypeRepr::Keyword(keyword) => FieldType::from_keyword(&keyword)
                .ok_or_else(|| de::Error::custom(format!("unknown scalar type `{}`", keyword))),
        }
    }
}

impl Serialize for FieldType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldType::Unrecognized(code) => serializer.serialize_u8(*code),
            known => serializer.serialize_str(known.keyword()),
        }
    }
}

/// Additional rule applied to a field
///
/// See <https://protobuf.dev/programming-guides/proto3/#field-labels>
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldRule {
    #[default]
    #[serde(alias = "none")]
    Singular,
    Repeated,
}

impl FieldRule {
    /// Token prefixed to a field line, including its trailing space
    pub fn keyword(&self) -> &'static str {
        match self {
            FieldRule::Singular => "",
            FieldRule::Repeated => "repeated ",
        }
    }

    pub fn is_repeated(&self) -> bool {
        matches!(self, FieldRule::Repeated)
    }
}

/// Two spaces per nesting level
pub fn indent(depth: usize) -> String {
    "  ".repeat(depth)
}

/// Trailing `   // comment` for field and enum value lines
pub(crate) fn comment_suffix(comment: &str) -> String {
    if comment.is_empty() {
        String::new()
    } else {
        format!("   // {}", comment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_table() {
        assert_eq!(FieldType::Double.keyword(), "double");
        assert_eq!(FieldType::Int32.keyword(), "int32");
        assert_eq!(FieldType::SInt64.keyword(), "sint64");
        assert_eq!(FieldType::SFixed32.keyword(), "sfixed32");
        assert_eq!(FieldType::Bool.keyword(), "bool");
        assert_eq!(FieldType::String.keyword(), "string");
        assert_eq!(FieldType::Bytes.keyword(), "bytes");
    }

    #[test]
    fn test_unrecognized_code_renders_empty() {
        let t = FieldType::from_code(42);
        assert_eq!(t, FieldType::Unrecognized(42));
        assert_eq!(t.keyword(), "");
        assert_eq!(t.code(), 42);
    }

    #[test]
    fn test_codes_match_table_order() {
        for code in 0..15u8 {
            let t = FieldType::from_code(code);
            assert_eq!(t.code(), code);
            assert_eq!(FieldType::from_keyword(t.keyword()), Some(t));
        }
    }

    #[test]
    fn test_map_key_legality() {
        assert!(!FieldType::Double.is_valid_map_key());
        assert!(!FieldType::Float.is_valid_map_key());
        assert!(!FieldType::Bytes.is_valid_map_key());
        assert!(FieldType::String.is_valid_map_key());
        assert!(FieldType::Fixed64.is_valid_map_key());
    }

    #[test]
    fn test_field_type_serde() {
        let from_keyword: FieldType = serde_json::from_str("\"uint64\"").unwrap();
        assert_eq!(from_keyword, FieldType::UInt64);
        let from_code: FieldType = serde_json::from_str("13").unwrap();
        assert_eq!(from_code, FieldType::String);
        assert!(serde_json::from_str::<FieldType>("\"varchar\"").is_err());
        assert_eq!(serde_json::to_string(&FieldType::Bool).unwrap(), "\"bool\"");
        assert_eq!(serde_json::to_string(&FieldType::Unrecognized(99)).unwrap(), "99");
    }

    #[test]
    fn test_rule_keyword() {
        assert_eq!(FieldRule::Singular.keyword(), "");
        assert_eq!(FieldRule::Repeated.keyword(), "repeated ");
        let rule: FieldRule = serde_json::from_str("\"none\"").unwrap();
        assert_eq!(rule, FieldRule::Singular);
    }

    #[test]
    fn test_indent() {
        assert_eq!(indent(0), "");
        assert_eq!(indent(1), "  ");
        assert_eq!(indent(3), "      ");
    }
}
