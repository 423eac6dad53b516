//! Index specs and typed coercion
//!
//! An index spec pairs a dotted path with an [`IndexType`]. The type decides
//! how projected values are coerced before they are stored in a soup's
//! indexed data and, in turn, how queries compare them: numeric types
//! compare numerically, string types lexicographically.

use crate::value::value_to_text;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::fmt;
use std::str::FromStr;

/// Type of an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexType {
    /// Text, compared lexicographically
    String,
    /// Whole numbers
    Integer,
    /// Floating point numbers
    Floating,
    /// Text searched by `match` queries
    FullText,
}

impl IndexType {
    /// Wire name of the type.
    pub fn as_str(&self) -> &'static str {
        match self {
            IndexType::String => "string",
            IndexType::Integer => "integer",
            IndexType::Floating => "floating",
            IndexType::FullText => "full_text",
        }
    }

    /// Coerce a projected value into this index type.
    ///
    /// - `string` / `full_text`: non-string values are rendered as text;
    ///   null stays null.
    /// - `integer`: strings are parsed as a leading signed integer
    ///   (unparsable strings become null); other values pass through.
    /// - `floating`: strings are parsed as `f64` (unparsable strings become
    ///   null); other values pass through.
    pub fn coerce(&self, value: Value) -> Value {
        match self {
            IndexType::String | IndexType::FullText => match value {
                Value::Null | Value::String(_) => value,
                other => Value::String(value_to_text(&other)),
            },
            IndexType::Integer => match value {
                Value::String(s) => parse_leading_integer(&s)
                    .map(Value::from)
                    .unwrap_or(Value::Null),
                other => other,
            },
            IndexType::Floating => match value {
                Value::String(s) => s
                    .trim()
                    .parse::<f64>()
                    .ok()
                    .and_then(Number::from_f64)
                    .map(Value::Number)
                    .unwrap_or(Value::Null),
                other => other,
            },
        }
    }
}

impl fmt::Display for IndexType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IndexType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "string" => Ok(IndexType::String),
            "integer" => Ok(IndexType::Integer),
            "floating" => Ok(IndexType::Floating),
            "full_text" => Ok(IndexType::FullText),
            other => Err(format!("unknown index type '{}'", other)),
        }
    }
}

/// Parse the leading `[+-]digits` of a string, ignoring leading whitespace
/// and anything after the digits.
fn parse_leading_integer(s: &str) -> Option<i64> {
    let trimmed = s.trim_start();
    let (sign, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => ("-", &trimmed[1..]),
        Some(b'+') => ("", &trimmed[1..]),
        _ => ("", trimmed),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    format!("{}{}", sign, &digits[..end]).parse().ok()
}

/// A `{path, type}` index declaration.
///
/// # Example
///
/// ```
/// use soupstore_core::{IndexSpec, IndexType};
///
/// let spec: IndexSpec = serde_json::from_str(r#"{"path": "Name", "type": "string"}"#).unwrap();
/// assert_eq!(spec, IndexSpec::new("Name", IndexType::String));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IndexSpec {
    /// Dotted field path
    pub path: String,
    /// Coercion and comparison type
    #[serde(rename = "type")]
    pub index_type: IndexType,
}

impl IndexSpec {
    /// Create an index spec
    pub fn new(path: impl Into<String>, index_type: IndexType) -> Self {
        IndexSpec {
            path: path.into(),
            index_type,
        }
    }

    /// `string` index on `path`
    pub fn string(path: impl Into<String>) -> Self {
        Self::new(path, IndexType::String)
    }

    /// `integer` index on `path`
    pub fn integer(path: impl Into<String>) -> Self {
        Self::new(path, IndexType::Integer)
    }

    /// `floating` index on `path`
    pub fn floating(path: impl Into<String>) -> Self {
        Self::new(path, IndexType::Floating)
    }

    /// `full_text` index on `path`
    pub fn full_text(path: impl Into<String>) -> Self {
        Self::new(path, IndexType::FullText)
    }
}
