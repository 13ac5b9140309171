use super::{ConvertResult, PredicateCompiler, expect_arity, operands};
use crate::error::{ConversionError, ErrorCode};
use model::checked::{
    expr::{CheckedExpr, CheckedKind},
    functions,
};
use planner::Predicate;

impl PredicateCompiler<'_> {
    /// `field in [literals]`. The list size is checked before any value is
    /// materialized; an empty list can never match.
    pub(super) fn compile_membership(&self, args: &[CheckedExpr]) -> ConvertResult<Predicate> {
        expect_arity(functions::IN, args, 2)?;
        let field = operands::field_name(&args[0])?;

        let CheckedKind::List(elements) = &args[1].kind else {
            return Err(ConversionError::new(
                ErrorCode::UnsupportedOperation,
                "right operand of 'in' is not a list literal",
            )
            .into());
        };

        self.limits.check_in_size(elements.len())?;
        let column = self.schema.resolve_column(field).to_string();
        if elements.is_empty() {
            return Ok(Predicate::AlwaysFalse);
        }

        let mut values = Vec::with_capacity(elements.len());
        for (index, element) in elements.iter().enumerate() {
            let value = operands::constant(element)?;
            if value.is_null() {
                return Err(ConversionError::new(
                    ErrorCode::TypeMismatch,
                    format!("null at position {} in list for field {}", index, field),
                )
                .into());
            }
            operands::check_literal_type(self.schema, field, &value)?;
            values.push(value);
        }

        Ok(Predicate::In { column, values })
    }
}
