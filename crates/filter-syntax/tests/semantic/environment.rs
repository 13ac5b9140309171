use filter_syntax::{Environment, EnvironmentError};
use model::core::value_type::ValueType;

#[test]
fn test_declare_after_construction() {
    let mut env = Environment::new([("status", ValueType::String)]).unwrap();
    env.declare("age", ValueType::Int).unwrap();
    assert_eq!(env.lookup("age"), Some(&ValueType::Int));
    assert_eq!(
        env.declare("age", ValueType::Int),
        Err(EnvironmentError::Duplicate("age".to_string()))
    );
}

#[test]
fn test_empty_environment_rejects_every_reference() {
    let env = Environment::new(Vec::<(String, ValueType)>::new()).unwrap();
    assert!(env.is_empty());
    assert!(env.compile("anything == 1").is_err());
    assert!(env.compile("true").is_ok());
}
