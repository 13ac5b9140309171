use filter_compiler::{Config, ConvertError, Converter, ErrorCode};
use model::core::{value::Value, value_type::ValueType};
use planner::{MySql, Postgres};

pub fn config() -> Config {
    Config::default()
        .field("status", ValueType::String)
        .mapped_field("age", ValueType::Int, "user_age")
        .field("score", ValueType::Double)
        .field("count", ValueType::Uint)
        .mapped_field("active", ValueType::Bool, "is_active")
        .field("name", ValueType::String)
        .field("email", ValueType::String)
        .field("salary", ValueType::Int)
        .field("tags", ValueType::list(ValueType::String))
        .field("labels", ValueType::map(ValueType::String, ValueType::String))
        .field("created", ValueType::Timestamp)
}

pub fn converter() -> Converter {
    Converter::new(config()).unwrap()
}

pub fn postgres(converter: &Converter, source: &str) -> (String, Vec<Value>) {
    converter.convert(source).unwrap().render(&Postgres)
}

pub fn mysql(converter: &Converter, source: &str) -> (String, Vec<Value>) {
    converter.convert(source).unwrap().render(&MySql)
}

pub fn code_of(result: Result<impl std::fmt::Debug, ConvertError>) -> ErrorCode {
    match result {
        Err(err) => err.code().expect("expected a user-facing rejection"),
        Ok(value) => panic!("expected rejection, got {:?}", value),
    }
}

pub fn roles(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

pub fn s(value: &str) -> Value {
    Value::String(value.to_string())
}
