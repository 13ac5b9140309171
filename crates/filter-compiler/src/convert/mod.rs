//! Translation of a typed expression tree into a [`Predicate`].

mod comparison;
mod logical;
mod membership;
mod operands;
mod string_ops;

use crate::{
    error::{ContractViolation, ConversionError, ConvertError, ErrorCode},
    escape::StringOp,
    limits::Limits,
    observer::SecurityObserver,
    schema::Schema,
};
use model::{
    checked::{
        expr::{CheckedExpr, CheckedKind},
        functions,
    },
    core::value::Value,
};
use planner::{CompareOp, Predicate};

pub type ConvertResult<T> = Result<T, ConvertError>;

/// Recursive compiler for one conversion. Borrowed state only; build one
/// per call.
pub struct PredicateCompiler<'a> {
    schema: &'a Schema,
    limits: &'a Limits,
    observer: &'a dyn SecurityObserver,
    source: &'a str,
}

impl<'a> PredicateCompiler<'a> {
    pub fn new(
        schema: &'a Schema,
        limits: &'a Limits,
        observer: &'a dyn SecurityObserver,
        source: &'a str,
    ) -> Self {
        PredicateCompiler {
            schema,
            limits,
            observer,
            source,
        }
    }

    pub fn compile(&self, expr: &CheckedExpr) -> ConvertResult<Predicate> {
        match &expr.kind {
            CheckedKind::Literal(Value::Boolean(value)) => Ok(Predicate::BoolLiteral(*value)),
            CheckedKind::Literal(other) => {
                Err(ContractViolation::NonBooleanLiteral(other.kind()).into())
            }
            CheckedKind::Identifier(name) => Ok(Predicate::compare(
                self.schema.resolve_column(name),
                CompareOp::Eq,
                Value::Boolean(true),
            )),
            CheckedKind::Call {
                function,
                target,
                args,
            } => self.compile_call(function, target.as_deref(), args),
            CheckedKind::Select { .. } | CheckedKind::List(_) => Err(ConversionError::new(
                ErrorCode::UnsupportedOperation,
                "field selections and lists cannot be used as a condition",
            )
            .into()),
        }
    }

    fn compile_call(
        &self,
        function: &str,
        target: Option<&CheckedExpr>,
        args: &[CheckedExpr],
    ) -> ConvertResult<Predicate> {
        match function {
            functions::LOGICAL_AND => self.compile_connective(function, args, Predicate::and),
            functions::LOGICAL_OR => self.compile_connective(function, args, Predicate::or),
            functions::LOGICAL_NOT => self.compile_not(args),
            functions::EQUALS => self.compile_comparison(function, args, CompareOp::Eq),
            functions::NOT_EQUALS => self.compile_comparison(function, args, CompareOp::NotEq),
            functions::LESS => self.compile_comparison(function, args, CompareOp::Lt),
            functions::LESS_EQUALS => self.compile_comparison(function, args, CompareOp::LtEq),
            functions::GREATER => self.compile_comparison(function, args, CompareOp::Gt),
            functions::GREATER_EQUALS => self.compile_comparison(function, args, CompareOp::GtEq),
            functions::IN => self.compile_membership(args),
            _ => match StringOp::from_function(function) {
                Some(op) => self.compile_string_op(function, op, target, args),
                None => {
                    self.observer.unsupported_operation(self.source, function);
                    Err(ConversionError::new(
                        ErrorCode::UnsupportedOperation,
                        format!("unsupported function: {}", function),
                    )
                    .into())
                }
            },
        }
    }
}

fn expect_arity(function: &str, args: &[CheckedExpr], expected: usize) -> ConvertResult<()> {
    if args.len() != expected {
        return Err(ContractViolation::Arity {
            function: function.to_string(),
            expected,
            found: args.len(),
        }
        .into());
    }
    Ok(())
}
