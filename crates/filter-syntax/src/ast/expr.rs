use crate::ast::{
    literal::Literal,
    operator::{BinaryOperator, UnaryOperator},
    span::Span,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    pub kind: ExpressionKind,
    pub span: Span,
    /// Levels of nesting below and including this node; leaves are 1.
    pub depth: usize,
}

impl Expression {
    pub fn new(kind: ExpressionKind, span: Span) -> Self {
        let depth = 1 + kind.children().map(|child| child.depth).max().unwrap_or(0);
        Expression { kind, span, depth }
    }

    /// Dotted name for identifier/select chains such as `user.profile.name`.
    pub fn qualified_name(&self) -> Option<String> {
        match &self.kind {
            ExpressionKind::Identifier(name) => Some(name.clone()),
            ExpressionKind::Select { operand, field } => operand
                .qualified_name()
                .map(|prefix| format!("{}.{}", prefix, field)),
            _ => None,
        }
    }
}

/// Expression types
#[derive(Debug, Clone, PartialEq)]
pub enum ExpressionKind {
    Literal(Literal),
    Identifier(String),
    Select {
        operand: Box<Expression>,
        field: String,
    },
    Binary {
        left: Box<Expression>,
        operator: BinaryOperator,
        right: Box<Expression>,
    },
    Unary {
        operator: UnaryOperator,
        operand: Box<Expression>,
    },
    FunctionCall {
        target: Option<Box<Expression>>,
        name: String,
        arguments: Vec<Expression>,
    },
    List(Vec<Expression>),
}

impl ExpressionKind {
    /// Direct sub-expressions, receiver first.
    pub fn children(&self) -> impl Iterator<Item = &Expression> {
        let (boxed, rest): (Vec<&Expression>, &[Expression]) = match self {
            ExpressionKind::Literal(_) | ExpressionKind::Identifier(_) => (vec![], &[]),
            ExpressionKind::Select { operand, .. } => (vec![operand.as_ref()], &[]),
            ExpressionKind::Binary { left, right, .. } => (vec![left.as_ref(), right.as_ref()], &[]),
            ExpressionKind::Unary { operand, .. } => (vec![operand.as_ref()], &[]),
            ExpressionKind::FunctionCall {
                target, arguments, ..
            } => (target.iter().map(|t| t.as_ref()).collect(), arguments.as_slice()),
            ExpressionKind::List(elements) => (vec![], elements.as_slice()),
        };
        boxed.into_iter().chain(rest.iter())
    }
}
