use crate::common::{code_of, config, converter};
use filter_compiler::{ContractViolation, ConvertError, Converter, ErrorCode, ExpressionCompiler};
use filter_syntax::Diagnostics;
use model::{
    checked::{expr::CheckedExpr, functions},
    core::{value::Value, value_type::ValueType},
};

/// Hands back a fixed tree regardless of input.
struct FixedTree(CheckedExpr);

impl ExpressionCompiler for FixedTree {
    fn compile(&self, _source: &str) -> Result<CheckedExpr, Diagnostics> {
        Ok(self.0.clone())
    }
}

#[test]
fn test_type_mismatch_caught_by_checker() {
    let err = converter().convert("status == 123").unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::InvalidSyntax));
    assert_eq!(err.to_string(), "invalid filter expression syntax");
}

#[test]
fn test_non_boolean_result() {
    let err = converter().convert("age + 5").unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::InvalidType));
    assert_eq!(err.to_string(), "filter expression must evaluate to boolean");
}

#[test]
fn test_unknown_field_and_bad_syntax() {
    let c = converter();
    for source in ["unknown == 1", "", "status ==", "status = 'x'", "(age > 1"] {
        assert_eq!(
            code_of(c.convert(source)),
            ErrorCode::InvalidSyntax,
            "source: {:?}",
            source
        );
    }
}

#[test]
fn test_public_message_hides_field_names() {
    let err = converter().convert("secret_field == 1").unwrap_err();
    assert!(!err.to_string().contains("secret_field"));
    match err {
        ConvertError::Rejected(inner) => assert!(inner.internal().contains("secret_field")),
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_unsupported_operations() {
    let c = converter();
    for source in [
        r#"status.matches("^a")"#,
        "size(name) > 3",
        r#""x" in tags"#,
        "status in tags",
        r#""team" in labels"#,
    ] {
        assert_eq!(
            code_of(c.convert(source)),
            ErrorCode::UnsupportedOperation,
            "source: {:?}",
            source
        );
    }
    let err = c.convert(r#"status.matches("^a")"#).unwrap_err();
    assert_eq!(err.to_string(), "unsupported filter operation");
}

#[test]
fn test_null_in_membership_list() {
    let err = converter().convert(r#"status in ["a", null]"#).unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::TypeMismatch));
    assert_eq!(err.to_string(), "invalid comparison type");
}

#[test]
fn test_runtime_type_check_behind_lenient_compiler() {
    let tree = CheckedExpr::call(
        functions::EQUALS,
        vec![
            CheckedExpr::ident("status", ValueType::String),
            CheckedExpr::literal(Value::Int(123)),
        ],
        ValueType::Bool,
    );
    let c = Converter::with_compiler(config(), FixedTree(tree));
    let err = c.convert("status == 123").unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::TypeMismatch));
    assert!(!err.to_string().contains("status"));
}

#[test]
fn test_malformed_tree_is_contract_violation() {
    let leaf = CheckedExpr::ident("active", ValueType::Bool);
    let tree = CheckedExpr::call(functions::LOGICAL_AND, vec![leaf], ValueType::Bool);
    let c = Converter::with_compiler(config(), FixedTree(tree));

    let err = c.convert("active").unwrap_err();
    assert!(matches!(
        err,
        ConvertError::Contract(ContractViolation::Arity { found: 1, .. })
    ));
    assert_eq!(err.code(), None);
    assert_eq!(
        err.to_string(),
        "internal error while converting filter expression"
    );
}

#[test]
fn test_setup_rejects_duplicate_and_malformed_fields() {
    let duplicate = config().field("status", ValueType::Int);
    assert!(Converter::new(duplicate).is_err());

    let malformed = config().field("bad name", ValueType::Int);
    let err = Converter::new(malformed).err().unwrap();
    assert!(err.to_string().contains("bad name"));
}
