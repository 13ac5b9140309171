use super::{ConvertResult, PredicateCompiler, expect_arity, operands};
use crate::error::{ConversionError, ErrorCode};
use model::checked::expr::CheckedExpr;
use planner::{CompareOp, Predicate};

impl PredicateCompiler<'_> {
    /// `field <op> literal`. Equality against `null` becomes a null check
    /// since `col = NULL` never matches.
    pub(super) fn compile_comparison(
        &self,
        function: &str,
        args: &[CheckedExpr],
        op: CompareOp,
    ) -> ConvertResult<Predicate> {
        expect_arity(function, args, 2)?;
        let field = operands::field_name(&args[0])?;
        let value = operands::constant(&args[1])?;
        let column = self.schema.resolve_column(field);

        if value.is_null() {
            return match op {
                CompareOp::Eq => Ok(Predicate::NullCheck {
                    column: column.to_string(),
                    is_null: true,
                }),
                CompareOp::NotEq => Ok(Predicate::NullCheck {
                    column: column.to_string(),
                    is_null: false,
                }),
                _ => Err(ConversionError::new(
                    ErrorCode::TypeMismatch,
                    format!("ordering comparison of field {} against null", field),
                )
                .into()),
            };
        }

        operands::check_literal_type(self.schema, field, &value)?;
        Ok(Predicate::compare(column, op, value))
    }
}
