use super::{ConvertResult, PredicateCompiler, expect_arity};
use model::checked::{expr::CheckedExpr, functions};
use planner::Predicate;

impl PredicateCompiler<'_> {
    pub(super) fn compile_connective(
        &self,
        function: &str,
        args: &[CheckedExpr],
        combine: fn(Predicate, Predicate) -> Predicate,
    ) -> ConvertResult<Predicate> {
        expect_arity(function, args, 2)?;
        let left = self.compile(&args[0])?;
        let right = self.compile(&args[1])?;
        Ok(combine(left, right))
    }

    pub(super) fn compile_not(&self, args: &[CheckedExpr]) -> ConvertResult<Predicate> {
        expect_arity(functions::LOGICAL_NOT, args, 1)?;
        Ok(Predicate::negate(self.compile(&args[0])?))
    }
}
