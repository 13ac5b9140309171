use model::core::value::Value;
use std::{collections::BTreeSet, fmt};

/// Comparison operators a predicate can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
}

impl CompareOp {
    pub fn as_sql(&self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::NotEq => "<>",
            CompareOp::Lt => "<",
            CompareOp::LtEq => "<=",
            CompareOp::Gt => ">",
            CompareOp::GtEq => ">=",
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// Parameterized boolean condition over table columns. Literal values are
/// only ever carried as bound parameters, never spliced into SQL text.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Comparison {
        column: String,
        op: CompareOp,
        value: Value,
    },
    NullCheck {
        column: String,
        is_null: bool,
    },
    And(Box<Predicate>, Box<Predicate>),
    Or(Box<Predicate>, Box<Predicate>),
    Not(Box<Predicate>),
    Like {
        column: String,
        pattern: String,
    },
    In {
        column: String,
        values: Vec<Value>,
    },
    BoolLiteral(bool),
    AlwaysFalse,
}

impl Predicate {
    pub fn compare(column: impl Into<String>, op: CompareOp, value: Value) -> Self {
        Predicate::Comparison {
            column: column.into(),
            op,
            value,
        }
    }

    pub fn and(left: Predicate, right: Predicate) -> Self {
        Predicate::And(Box::new(left), Box::new(right))
    }

    pub fn or(left: Predicate, right: Predicate) -> Self {
        Predicate::Or(Box::new(left), Box::new(right))
    }

    pub fn negate(inner: Predicate) -> Self {
        Predicate::Not(Box::new(inner))
    }

    /// Sorted, de-duplicated column names referenced anywhere in the tree.
    pub fn columns(&self) -> Vec<String> {
        let mut columns = BTreeSet::new();
        self.collect_columns(&mut columns);
        columns.into_iter().collect()
    }

    fn collect_columns(&self, out: &mut BTreeSet<String>) {
        match self {
            Predicate::Comparison { column, .. }
            | Predicate::NullCheck { column, .. }
            | Predicate::Like { column, .. }
            | Predicate::In { column, .. } => {
                out.insert(column.clone());
            }
            Predicate::And(left, right) | Predicate::Or(left, right) => {
                left.collect_columns(out);
                right.collect_columns(out);
            }
            Predicate::Not(inner) => inner.collect_columns(out),
            Predicate::BoolLiteral(_) | Predicate::AlwaysFalse => {}
        }
    }

    /// Bound values in the order they appear in the rendered SQL.
    pub fn bound_values(&self) -> Vec<Value> {
        let mut values = Vec::new();
        self.collect_values(&mut values);
        values
    }

    fn collect_values(&self, out: &mut Vec<Value>) {
        match self {
            Predicate::Comparison { value, .. } => out.push(value.clone()),
            Predicate::Like { pattern, .. } => out.push(Value::String(pattern.clone())),
            Predicate::In { values, .. } => out.extend(values.iter().cloned()),
            Predicate::And(left, right) | Predicate::Or(left, right) => {
                left.collect_values(out);
                right.collect_values(out);
            }
            Predicate::Not(inner) => inner.collect_values(out),
            Predicate::NullCheck { .. } | Predicate::BoolLiteral(_) | Predicate::AlwaysFalse => {}
        }
    }
}
