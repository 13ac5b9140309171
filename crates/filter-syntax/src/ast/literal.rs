use model::core::value::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    String(String),
    Bytes(Vec<u8>),
    Int(i64),
    Uint(u64),
    Double(f64),
    Boolean(bool),
    Null,
}

impl From<Literal> for Value {
    fn from(literal: Literal) -> Self {
        match literal {
            Literal::String(s) => Value::String(s),
            Literal::Bytes(b) => Value::Bytes(b),
            Literal::Int(i) => Value::Int(i),
            Literal::Uint(u) => Value::Uint(u),
            Literal::Double(d) => Value::Float(d),
            Literal::Boolean(b) => Value::Boolean(b),
            Literal::Null => Value::Null,
        }
    }
}
