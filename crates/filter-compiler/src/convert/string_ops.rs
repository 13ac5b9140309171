use super::{ConvertResult, PredicateCompiler, expect_arity, operands};
use crate::{
    error::{ContractViolation, ConversionError, ErrorCode},
    escape::StringOp,
};
use model::{
    checked::expr::CheckedExpr,
    core::{value::Value, value_type::ValueType},
};
use planner::Predicate;

impl PredicateCompiler<'_> {
    /// `field.contains("x")` and friends become a single LIKE on the
    /// escaped literal.
    pub(super) fn compile_string_op(
        &self,
        function: &str,
        op: StringOp,
        target: Option<&CheckedExpr>,
        args: &[CheckedExpr],
    ) -> ConvertResult<Predicate> {
        let receiver =
            target.ok_or_else(|| ContractViolation::MissingReceiver(function.to_string()))?;
        expect_arity(function, args, 1)?;

        let field = operands::field_name(receiver)?;
        if let Some(declared) = self.schema.type_of(field) {
            if *declared != ValueType::String {
                return Err(ConversionError::new(
                    ErrorCode::TypeMismatch,
                    format!("{}() on field {} of type {}", function, field, declared),
                )
                .into());
            }
        }

        let Value::String(literal) = operands::constant(&args[0])? else {
            return Err(ConversionError::new(
                ErrorCode::TypeMismatch,
                format!("{}() requires a string argument", function),
            )
            .into());
        };

        Ok(Predicate::Like {
            column: self.schema.resolve_column(field).to_string(),
            pattern: op.pattern(&literal),
        })
    }
}
