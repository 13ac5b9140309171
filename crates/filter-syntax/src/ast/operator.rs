use model::checked::functions;
use std::fmt;

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Equal,
    NotEqual,
    GreaterThan,
    LessThan,
    GreaterOrEqual,
    LessOrEqual,
    In,
    And,
    Or,
}

impl BinaryOperator {
    /// Overload name the checker assigns to this operator.
    pub fn function_name(&self) -> &'static str {
        match self {
            BinaryOperator::Add => functions::ADD,
            BinaryOperator::Subtract => functions::SUBTRACT,
            BinaryOperator::Multiply => functions::MULTIPLY,
            BinaryOperator::Divide => functions::DIVIDE,
            BinaryOperator::Modulo => functions::MODULO,
            BinaryOperator::Equal => functions::EQUALS,
            BinaryOperator::NotEqual => functions::NOT_EQUALS,
            BinaryOperator::GreaterThan => functions::GREATER,
            BinaryOperator::LessThan => functions::LESS,
            BinaryOperator::GreaterOrEqual => functions::GREATER_EQUALS,
            BinaryOperator::LessOrEqual => functions::LESS_EQUALS,
            BinaryOperator::In => functions::IN,
            BinaryOperator::And => functions::LOGICAL_AND,
            BinaryOperator::Or => functions::LOGICAL_OR,
        }
    }

    pub fn is_ordering(&self) -> bool {
        matches!(
            self,
            BinaryOperator::GreaterThan
                | BinaryOperator::LessThan
                | BinaryOperator::GreaterOrEqual
                | BinaryOperator::LessOrEqual
        )
    }

    pub fn is_arithmetic(&self) -> bool {
        matches!(
            self,
            BinaryOperator::Add
                | BinaryOperator::Subtract
                | BinaryOperator::Multiply
                | BinaryOperator::Divide
                | BinaryOperator::Modulo
        )
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BinaryOperator::Add => write!(f, "+"),
            BinaryOperator::Subtract => write!(f, "-"),
            BinaryOperator::Multiply => write!(f, "*"),
            BinaryOperator::Divide => write!(f, "/"),
            BinaryOperator::Modulo => write!(f, "%"),
            BinaryOperator::Equal => write!(f, "=="),
            BinaryOperator::NotEqual => write!(f, "!="),
            BinaryOperator::GreaterThan => write!(f, ">"),
            BinaryOperator::LessThan => write!(f, "<"),
            BinaryOperator::GreaterOrEqual => write!(f, ">="),
            BinaryOperator::LessOrEqual => write!(f, "<="),
            BinaryOperator::In => write!(f, "in"),
            BinaryOperator::And => write!(f, "&&"),
            BinaryOperator::Or => write!(f, "||"),
        }
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Not,
    Negate,
}

impl UnaryOperator {
    pub fn function_name(&self) -> &'static str {
        match self {
            UnaryOperator::Not => functions::LOGICAL_NOT,
            UnaryOperator::Negate => functions::NEGATE,
        }
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnaryOperator::Not => write!(f, "!"),
            UnaryOperator::Negate => write!(f, "-"),
        }
    }
}
