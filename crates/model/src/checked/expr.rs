use crate::core::{value::Value, value_type::ValueType};

/// A type-checked expression tree, as produced by the expression compiler.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckedExpr {
    pub kind: CheckedKind,
    pub ty: ValueType,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CheckedKind {
    Literal(Value),
    Identifier(String),
    /// `operand.field`
    Select {
        operand: Box<CheckedExpr>,
        field: String,
    },
    /// Operator or function application. Member calls such as
    /// `name.contains("x")` carry the receiver in `target`.
    Call {
        function: String,
        target: Option<Box<CheckedExpr>>,
        args: Vec<CheckedExpr>,
    },
    List(Vec<CheckedExpr>),
}

impl CheckedExpr {
    pub fn new(kind: CheckedKind, ty: ValueType) -> Self {
        CheckedExpr { kind, ty }
    }

    pub fn literal(value: Value) -> Self {
        let ty = value.kind();
        CheckedExpr::new(CheckedKind::Literal(value), ty)
    }

    pub fn ident(name: &str, ty: ValueType) -> Self {
        CheckedExpr::new(CheckedKind::Identifier(name.to_string()), ty)
    }

    pub fn select(operand: CheckedExpr, field: &str, ty: ValueType) -> Self {
        CheckedExpr::new(
            CheckedKind::Select {
                operand: Box::new(operand),
                field: field.to_string(),
            },
            ty,
        )
    }

    pub fn call(function: &str, args: Vec<CheckedExpr>, ty: ValueType) -> Self {
        CheckedExpr::new(
            CheckedKind::Call {
                function: function.to_string(),
                target: None,
                args,
            },
            ty,
        )
    }

    pub fn member_call(
        target: CheckedExpr,
        function: &str,
        args: Vec<CheckedExpr>,
        ty: ValueType,
    ) -> Self {
        CheckedExpr::new(
            CheckedKind::Call {
                function: function.to_string(),
                target: Some(Box::new(target)),
                args,
            },
            ty,
        )
    }

    pub fn list(elements: Vec<CheckedExpr>, elem_ty: ValueType) -> Self {
        CheckedExpr::new(CheckedKind::List(elements), ValueType::list(elem_ty))
    }

    /// Direct children in evaluation order (call target first).
    pub fn children(&self) -> Vec<&CheckedExpr> {
        match &self.kind {
            CheckedKind::Literal(_) | CheckedKind::Identifier(_) => vec![],
            CheckedKind::Select { operand, .. } => vec![operand.as_ref()],
            CheckedKind::Call { target, args, .. } => {
                target.iter().map(|t| t.as_ref()).chain(args.iter()).collect()
            }
            CheckedKind::List(elements) => elements.iter().collect(),
        }
    }
}
