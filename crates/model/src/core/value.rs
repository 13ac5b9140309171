use crate::core::value_type::ValueType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A literal value carried by an expression tree or bound to a query parameter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Value {
    Int(i64),
    Uint(u64),
    Float(f64),
    String(String),
    Boolean(bool),
    Bytes(Vec<u8>),
    Null,
}

impl Value {
    /// The type a value of this kind checks as.
    pub fn kind(&self) -> ValueType {
        match self {
            Value::Int(_) => ValueType::Int,
            Value::Uint(_) => ValueType::Uint,
            Value::Float(_) => ValueType::Double,
            Value::String(_) => ValueType::String,
            Value::Boolean(_) => ValueType::Bool,
            Value::Bytes(_) => ValueType::Bytes,
            Value::Null => ValueType::Null,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

/// Renders the value in expression-language spelling. Only used for
/// diagnostics; values reach SQL exclusively as bound parameters.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{v}"),
            Value::Uint(v) => write!(f, "{v}u"),
            Value::Float(v) => write!(f, "{v:?}"),
            Value::String(v) => write!(f, "{v:?}"),
            Value::Boolean(v) => write!(f, "{v}"),
            Value::Bytes(v) => {
                let hex = v
                    .iter()
                    .fold(String::new(), |acc, byte: &u8| acc + &format!("\\x{byte:02x}"));
                write!(f, "b\"{hex}\"")
            }
            Value::Null => write!(f, "null"),
        }
    }
}
