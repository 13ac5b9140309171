use filter_syntax::{Environment, errors::Phase};
use model::{
    checked::{
        expr::{CheckedExpr, CheckedKind},
        functions,
    },
    core::{value::Value, value_type::ValueType},
};

fn env() -> Environment {
    Environment::new([
        ("status", ValueType::String),
        ("age", ValueType::Int),
        ("score", ValueType::Double),
        ("count", ValueType::Uint),
        ("active", ValueType::Bool),
        ("user.email", ValueType::String),
        ("labels", ValueType::map(ValueType::String, ValueType::String)),
        ("tags", ValueType::list(ValueType::String)),
    ])
    .unwrap()
}

fn function_of(expr: &CheckedExpr) -> &str {
    match &expr.kind {
        CheckedKind::Call { function, .. } => function,
        other => panic!("expected call, got {:?}", other),
    }
}

#[test]
fn test_comparison_is_boolean() {
    let checked = env().compile(r#"status == "active""#).unwrap();
    assert_eq!(checked.ty, ValueType::Bool);
    assert_eq!(function_of(&checked), functions::EQUALS);
}

#[test]
fn test_mismatched_equality_is_rejected() {
    let diags = env().compile("status == 123").unwrap_err();
    let first = diags.first().unwrap();
    assert_eq!(first.phase, Phase::Check);
    assert!(first.message.contains("_==_"), "{}", first.message);
}

#[test]
fn test_null_comparison_accepted_for_any_type() {
    assert!(env().compile("status == null").is_ok());
    assert!(env().compile("null != age").is_ok());
}

#[test]
fn test_arithmetic_yields_numeric_type() {
    let checked = env().compile("age + 5").unwrap();
    assert_eq!(checked.ty, ValueType::Int);
    assert!(env().compile("age + 5.0").is_err());
}

#[test]
fn test_ordering_requires_ordered_same_types() {
    assert!(env().compile("score >= 1.5").is_ok());
    assert!(env().compile("count < 10u").is_ok());
    assert!(env().compile("active > false").is_err());
    assert!(env().compile("count < 10").is_err());
}

#[test]
fn test_undeclared_reference() {
    let diags = env().compile("unknown == 1").unwrap_err();
    assert!(diags.first().unwrap().message.contains("unknown"));
}

#[test]
fn test_dotted_declaration_resolves_as_identifier() {
    let checked = env().compile(r#"user.email == "a@b.c""#).unwrap();
    let CheckedKind::Call { args, .. } = &checked.kind else {
        panic!("expected call");
    };
    assert_eq!(args[0].kind, CheckedKind::Identifier("user.email".to_string()));
}

#[test]
fn test_map_field_selection() {
    let checked = env().compile(r#"labels.team == "core""#).unwrap();
    let CheckedKind::Call { args, .. } = &checked.kind else {
        panic!("expected call");
    };
    assert!(matches!(&args[0].kind, CheckedKind::Select { field, .. } if field == "team"));
    assert_eq!(args[0].ty, ValueType::String);
}

#[test]
fn test_selection_on_scalar_is_rejected() {
    assert!(env().compile(r#"status.value == "x""#).is_err());
}

#[test]
fn test_string_functions() {
    for func in ["contains", "startsWith", "endsWith", "matches"] {
        let source = format!(r#"status.{}("ac")"#, func);
        let checked = env().compile(&source).unwrap();
        assert_eq!(checked.ty, ValueType::Bool);
        assert_eq!(function_of(&checked), func);
    }
    assert!(env().compile("age.contains(\"1\")").is_err());
    assert!(env().compile("status.contains(1)").is_err());
    assert!(env().compile("status.contains(\"a\", \"b\")").is_err());
    assert!(env().compile("contains(status, \"a\")").is_err());
}

#[test]
fn test_size_overloads() {
    assert_eq!(env().compile("size(status)").unwrap().ty, ValueType::Int);
    assert_eq!(env().compile("tags.size()").unwrap().ty, ValueType::Int);
    assert!(env().compile("size(age)").is_err());
}

#[test]
fn test_unknown_function_is_rejected() {
    let diags = env().compile("status.lowerAscii() == \"x\"").unwrap_err();
    assert!(diags.first().unwrap().message.contains("lowerAscii"));
}

#[test]
fn test_in_list_types() {
    let checked = env().compile(r#"status in ["a", "b"]"#).unwrap();
    assert_eq!(function_of(&checked), functions::IN);
    assert!(env().compile("status in []").is_ok());
    assert!(env().compile(r#"status in ["a", null]"#).is_ok());
    assert!(env().compile("status in [1, 2]").is_err());
    assert!(env().compile(r#"age in [1, "2"]"#).is_err());
    assert!(env().compile(r#""x" in tags"#).is_ok());
    assert!(env().compile(r#""team" in labels"#).is_ok());
}

#[test]
fn test_list_literal_type() {
    let checked = env().compile("[1, 2, 3]").unwrap();
    assert_eq!(checked.ty, ValueType::list(ValueType::Int));
    let CheckedKind::List(elements) = &checked.kind else {
        panic!("expected list");
    };
    assert_eq!(elements[2].kind, CheckedKind::Literal(Value::Int(3)));
}

#[test]
fn test_logical_operators_require_bool() {
    assert!(env().compile("active && !active").is_ok());
    assert!(env().compile("active && status").is_err());
    assert!(env().compile("!age").is_err());
}

#[test]
fn test_all_problems_reported() {
    let diags = env().compile("missing == 1 && other == 2").unwrap_err();
    assert_eq!(diags.len(), 2);
}

#[test]
fn test_syntax_error_reported_as_parse_phase() {
    let diags = env().compile("status ==").unwrap_err();
    assert_eq!(diags.first().unwrap().phase, Phase::Parse);
}
