use crate::{
    error::{ConversionError, ErrorCode},
    schema::Schema,
};
use model::{
    checked::expr::{CheckedExpr, CheckedKind},
    core::{value::Value, value_type::ValueType},
};

/// Field named by an operand. A selection yields its last segment.
pub(super) fn field_name(expr: &CheckedExpr) -> Result<&str, ConversionError> {
    match &expr.kind {
        CheckedKind::Identifier(name) => Ok(name),
        CheckedKind::Select { field, .. } => Ok(field),
        _ => Err(ConversionError::new(
            ErrorCode::UnsupportedOperation,
            "operand is not a field identifier",
        )),
    }
}

/// Literal value of an operand. Bytes literals have no bound form here.
pub(super) fn constant(expr: &CheckedExpr) -> Result<Value, ConversionError> {
    match &expr.kind {
        CheckedKind::Literal(Value::Bytes(_)) => Err(ConversionError::new(
            ErrorCode::UnsupportedOperation,
            "unsupported constant type: bytes",
        )),
        CheckedKind::Literal(value) => Ok(value.clone()),
        _ => Err(ConversionError::new(
            ErrorCode::UnsupportedOperation,
            "operand is not a constant",
        )),
    }
}

/// Runtime check of a literal against the field's declared scalar type.
/// Only `string`, `int`, `uint`, `double` and `bool` fields are checked;
/// undeclared fields and `timestamp`, `duration`, `bytes`, list and map
/// fields accept any literal kind.
pub(super) fn check_literal_type(
    schema: &Schema,
    field: &str,
    value: &Value,
) -> Result<(), ConversionError> {
    let Some(declared) = schema.type_of(field) else {
        return Ok(());
    };
    let scalar = matches!(
        declared,
        ValueType::String | ValueType::Int | ValueType::Uint | ValueType::Double | ValueType::Bool
    );
    if !scalar || value.kind() == *declared {
        return Ok(());
    }
    Err(ConversionError::new(
        ErrorCode::TypeMismatch,
        format!(
            "type mismatch for field {}: expected {}, got {}",
            field,
            declared,
            value.kind()
        ),
    ))
}
