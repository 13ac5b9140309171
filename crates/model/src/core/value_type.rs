use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// Declared type of a field, or checked type of an expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ValueType {
    String,
    Int,
    Uint,
    Double,
    Bool,
    Timestamp,
    Duration,
    Bytes,
    List(Box<ValueType>),
    Map(Box<ValueType>, Box<ValueType>),
    /// Type of the `null` literal; never declared for a field.
    Null,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown value type '{0}'")]
pub struct ParseTypeError(pub String);

impl ValueType {
    pub fn list(elem: ValueType) -> Self {
        ValueType::List(Box::new(elem))
    }

    pub fn map(key: ValueType, value: ValueType) -> Self {
        ValueType::Map(Box::new(key), Box::new(value))
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, ValueType::Int | ValueType::Uint | ValueType::Double)
    }

    /// Types that support the ordering operators `<`, `<=`, `>`, `>=`.
    pub fn is_ordered(&self) -> bool {
        matches!(
            self,
            ValueType::Int
                | ValueType::Uint
                | ValueType::Double
                | ValueType::String
                | ValueType::Bytes
                | ValueType::Timestamp
                | ValueType::Duration
        )
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::String => write!(f, "string"),
            ValueType::Int => write!(f, "int"),
            ValueType::Uint => write!(f, "uint"),
            ValueType::Double => write!(f, "double"),
            ValueType::Bool => write!(f, "bool"),
            ValueType::Timestamp => write!(f, "timestamp"),
            ValueType::Duration => write!(f, "duration"),
            ValueType::Bytes => write!(f, "bytes"),
            ValueType::List(elem) => write!(f, "list({elem})"),
            ValueType::Map(key, value) => write!(f, "map({key}, {value})"),
            ValueType::Null => write!(f, "null_type"),
        }
    }
}

impl FromStr for ValueType {
    type Err = ParseTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (ty, rest) = parse_type(s.trim()).ok_or_else(|| ParseTypeError(s.to_string()))?;
        if rest.trim().is_empty() {
            Ok(ty)
        } else {
            Err(ParseTypeError(s.to_string()))
        }
    }
}

impl TryFrom<String> for ValueType {
    type Error = ParseTypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ValueType> for String {
    fn from(value: ValueType) -> Self {
        value.to_string()
    }
}

/// Parses one type from the front of `input`, returning the unparsed rest.
fn parse_type(input: &str) -> Option<(ValueType, &str)> {
    let input = input.trim_start();
    let end = input
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '.'))
        .unwrap_or(input.len());
    let (name, rest) = input.split_at(end);

    let simple = match name {
        "string" => Some(ValueType::String),
        "int" => Some(ValueType::Int),
        "uint" => Some(ValueType::Uint),
        "double" => Some(ValueType::Double),
        "bool" => Some(ValueType::Bool),
        "timestamp" | "google.protobuf.Timestamp" => Some(ValueType::Timestamp),
        "duration" | "google.protobuf.Duration" => Some(ValueType::Duration),
        "bytes" => Some(ValueType::Bytes),
        "null_type" => Some(ValueType::Null),
        _ => None,
    };
    if let Some(ty) = simple {
        return Some((ty, rest));
    }

    let rest = rest.trim_start().strip_prefix('(')?;
    match name {
        "list" => {
            let (elem, rest) = parse_type(rest)?;
            let rest = rest.trim_start().strip_prefix(')')?;
            Some((ValueType::list(elem), rest))
        }
        "map" => {
            let (key, rest) = parse_type(rest)?;
            let rest = rest.trim_start().strip_prefix(',')?;
            let (value, rest) = parse_type(rest)?;
            let rest = rest.trim_start().strip_prefix(')')?;
            Some((ValueType::map(key, value), rest))
        }
        _ => None,
    }
}
