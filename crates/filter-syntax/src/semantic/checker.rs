use crate::{
    ast::{
        expr::{Expression, ExpressionKind},
        operator::{BinaryOperator, UnaryOperator},
        span::Span,
    },
    errors::{Diagnostic, Diagnostics},
    semantic::environment::Environment,
};
use model::{
    checked::{expr::CheckedExpr, functions},
    core::value_type::ValueType,
};

/// Assigns a type to every node of a parsed expression. Checking continues
/// past the first failure so that all problems are reported together.
pub struct Checker<'a> {
    env: &'a Environment,
    issues: Vec<Diagnostic>,
}

impl<'a> Checker<'a> {
    pub fn new(env: &'a Environment) -> Self {
        Checker {
            env,
            issues: Vec::new(),
        }
    }

    pub fn check(mut self, expr: &Expression) -> Result<CheckedExpr, Diagnostics> {
        match self.visit(expr) {
            Some(checked) if self.issues.is_empty() => Ok(checked),
            _ => {
                if self.issues.is_empty() {
                    self.issues
                        .push(Diagnostic::check(expr.span, "expression could not be typed"));
                }
                Err(Diagnostics::new(self.issues))
            }
        }
    }

    fn visit(&mut self, expr: &Expression) -> Option<CheckedExpr> {
        match &expr.kind {
            ExpressionKind::Literal(literal) => Some(CheckedExpr::literal(literal.clone().into())),
            ExpressionKind::Identifier(name) => self.visit_identifier(name, expr.span),
            ExpressionKind::Select { operand, field } => {
                if let Some(name) = expr.qualified_name() {
                    if let Some(ty) = self.env.lookup(&name) {
                        return Some(CheckedExpr::ident(&name, ty.clone()));
                    }
                }
                self.visit_select(operand, field, expr.span)
            }
            ExpressionKind::Unary { operator, operand } => {
                self.visit_unary(*operator, operand, expr.span)
            }
            ExpressionKind::Binary {
                left,
                operator,
                right,
            } => self.visit_binary(left, *operator, right, expr.span),
            ExpressionKind::FunctionCall {
                target,
                name,
                arguments,
            } => self.visit_call(target.as_deref(), name, arguments, expr.span),
            ExpressionKind::List(elements) => self.visit_list(elements, expr.span),
        }
    }

    fn visit_identifier(&mut self, name: &str, span: Span) -> Option<CheckedExpr> {
        match self.env.lookup(name) {
            Some(ty) => Some(CheckedExpr::ident(name, ty.clone())),
            None => self.error(span, format!("undeclared reference to '{}'", name)),
        }
    }

    fn visit_select(&mut self, operand: &Expression, field: &str, span: Span) -> Option<CheckedExpr> {
        let operand = self.visit(operand)?;
        match &operand.ty {
            ValueType::Map(key, value) if **key == ValueType::String => {
                let ty = value.as_ref().clone();
                Some(CheckedExpr::select(operand, field, ty))
            }
            other => self.error(
                span,
                format!("type '{}' does not support field selection", other),
            ),
        }
    }

    fn visit_unary(
        &mut self,
        operator: UnaryOperator,
        operand: &Expression,
        span: Span,
    ) -> Option<CheckedExpr> {
        let operand = self.visit(operand)?;
        let function = operator.function_name();
        let accepted = match operator {
            UnaryOperator::Not => operand.ty == ValueType::Bool,
            UnaryOperator::Negate => matches!(operand.ty, ValueType::Int | ValueType::Double),
        };

        if !accepted {
            return self.no_overload(span, function, &[&operand.ty]);
        }
        let ty = operand.ty.clone();
        Some(CheckedExpr::call(function, vec![operand], ty))
    }

    fn visit_binary(
        &mut self,
        left: &Expression,
        operator: BinaryOperator,
        right: &Expression,
        span: Span,
    ) -> Option<CheckedExpr> {
        let left = self.visit(left);
        let right = self.visit(right);
        let (left, right) = (left?, right?);
        let function = operator.function_name();

        let result = match operator {
            BinaryOperator::And | BinaryOperator::Or => {
                (left.ty == ValueType::Bool && right.ty == ValueType::Bool).then_some(ValueType::Bool)
            }
            BinaryOperator::Equal | BinaryOperator::NotEqual => (left.ty == right.ty
                || left.ty == ValueType::Null
                || right.ty == ValueType::Null)
                .then_some(ValueType::Bool),
            BinaryOperator::In => membership_compatible(&left.ty, &right.ty).then_some(ValueType::Bool),
            op if op.is_ordering() => {
                (left.ty == right.ty && left.ty.is_ordered()).then_some(ValueType::Bool)
            }
            _ => (left.ty == right.ty && left.ty.is_numeric()).then(|| left.ty.clone()),
        };

        match result {
            Some(ty) => Some(CheckedExpr::call(function, vec![left, right], ty)),
            None => self.no_overload(span, function, &[&left.ty, &right.ty]),
        }
    }

    fn visit_call(
        &mut self,
        target: Option<&Expression>,
        name: &str,
        arguments: &[Expression],
        span: Span,
    ) -> Option<CheckedExpr> {
        let target = match target {
            Some(t) => Some(self.visit(t)),
            None => None,
        };
        let args: Vec<Option<CheckedExpr>> = arguments.iter().map(|a| self.visit(a)).collect();
        let target = match target {
            Some(t) => Some(t?),
            None => None,
        };
        let args: Vec<CheckedExpr> = args.into_iter().collect::<Option<Vec<_>>>()?;

        match name {
            functions::CONTAINS | functions::STARTS_WITH | functions::ENDS_WITH | functions::MATCHES => {
                match target {
                    Some(receiver)
                        if receiver.ty == ValueType::String
                            && args.len() == 1
                            && args[0].ty == ValueType::String =>
                    {
                        Some(CheckedExpr::member_call(receiver, name, args, ValueType::Bool))
                    }
                    Some(receiver) => {
                        let mut types = vec![&receiver.ty];
                        types.extend(args.iter().map(|a| &a.ty));
                        self.no_overload(span, name, &types)
                    }
                    None => self.error(span, format!("'{}' must be called as a method", name)),
                }
            }
            functions::SIZE => match target {
                Some(receiver) if args.is_empty() && is_sized(&receiver.ty) => {
                    Some(CheckedExpr::member_call(receiver, name, args, ValueType::Int))
                }
                None if args.len() == 1 && is_sized(&args[0].ty) => {
                    Some(CheckedExpr::call(name, args, ValueType::Int))
                }
                receiver => {
                    let mut types: Vec<&ValueType> = receiver.iter().map(|r| &r.ty).collect();
                    types.extend(args.iter().map(|a| &a.ty));
                    self.no_overload(span, name, &types)
                }
            },
            _ => self.error(span, format!("undeclared reference to '{}'", name)),
        }
    }

    fn visit_list(&mut self, elements: &[Expression], span: Span) -> Option<CheckedExpr> {
        let checked: Vec<Option<CheckedExpr>> = elements.iter().map(|e| self.visit(e)).collect();
        let checked = checked.into_iter().collect::<Option<Vec<_>>>()?;

        let mut elem_ty = ValueType::Null;
        for element in &checked {
            if element.ty == ValueType::Null {
                continue;
            }
            if elem_ty == ValueType::Null {
                elem_ty = element.ty.clone();
            } else if elem_ty != element.ty {
                return self.error(
                    span,
                    format!(
                        "list elements must share one type, found '{}' and '{}'",
                        elem_ty, element.ty
                    ),
                );
            }
        }

        Some(CheckedExpr::list(checked, elem_ty))
    }

    fn no_overload(&mut self, span: Span, function: &str, types: &[&ValueType]) -> Option<CheckedExpr> {
        let rendered: Vec<String> = types.iter().map(|t| t.to_string()).collect();
        self.error(
            span,
            format!(
                "found no matching overload for '{}' applied to '({})'",
                function,
                rendered.join(", ")
            ),
        )
    }

    fn error(&mut self, span: Span, message: String) -> Option<CheckedExpr> {
        self.issues.push(Diagnostic::check(span, message));
        None
    }
}

fn membership_compatible(needle: &ValueType, haystack: &ValueType) -> bool {
    match haystack {
        ValueType::List(elem) => {
            **elem == ValueType::Null || *needle == ValueType::Null || **elem == *needle
        }
        ValueType::Map(key, _) => **key == *needle,
        _ => false,
    }
}

fn is_sized(ty: &ValueType) -> bool {
    matches!(
        ty,
        ValueType::String | ValueType::Bytes | ValueType::List(_) | ValueType::Map(_, _)
    )
}
