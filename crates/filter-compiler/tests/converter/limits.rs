use crate::common::{code_of, config};
use filter_compiler::{Converter, ErrorCode};

fn nested(levels: usize) -> String {
    let mut source = "active".to_string();
    for _ in 0..levels {
        source = format!("({}) && active", source);
    }
    source
}

#[test]
fn test_length_limit() {
    let c = Converter::new(config().max_expression_length(20)).unwrap();
    assert!(c.convert(r#"status == "abcdefg""#).is_ok());
    assert_eq!(
        code_of(c.convert(r#"status == "abcdefghi""#)),
        ErrorCode::TooLong
    );
}

#[test]
fn test_length_checked_before_compilation() {
    let c = Converter::new(config().max_expression_length(5)).unwrap();
    assert_eq!(code_of(c.convert("((((((")), ErrorCode::TooLong);
}

#[test]
fn test_depth_limit() {
    let c = Converter::new(config().max_expression_depth(10)).unwrap();
    let ok = c.convert(&nested(9)).unwrap();
    assert_eq!(ok.depth, 10);
    assert_eq!(code_of(c.convert(&nested(15))), ErrorCode::TooComplex);
}

#[test]
fn test_flat_chains_stay_shallow() {
    let c = Converter::new(config().max_expression_depth(10)).unwrap();
    let source = vec!["active"; 64].join(" && ");
    let conversion = c.convert(&source).unwrap();
    assert_eq!(conversion.depth, 7);
}

#[test]
fn test_in_list_limit() {
    let c = Converter::new(config().max_in_clause_size(3)).unwrap();
    assert!(c.convert("age in [1, 2, 3]").is_ok());
    assert_eq!(
        code_of(c.convert("age in [1, 2, 3, 4]")),
        ErrorCode::ListTooLarge
    );
}

#[test]
fn test_zero_limits_use_defaults() {
    let c = Converter::new(config()).unwrap();
    assert_eq!(c.limits().max_length, 10_000);
    assert_eq!(c.limits().max_depth, 50);
    assert_eq!(c.limits().max_in_size, 1_000);

    let long = format!(r#"status == "{}""#, "x".repeat(10_000));
    assert_eq!(code_of(c.convert(&long)), ErrorCode::TooLong);
}

#[test]
fn test_deep_nesting_rejected_without_exhausting_stack() {
    let c = Converter::new(config()).unwrap();
    for n in [200, 600, 2000] {
        let source = format!("{}active{}", "(".repeat(n), ")".repeat(n));
        assert_eq!(
            code_of(c.convert(&source)),
            ErrorCode::InvalidSyntax,
            "nesting {}",
            n
        );
    }

    let negations = format!("{}(active){}", "!(".repeat(1000), ")".repeat(1000));
    assert_eq!(code_of(c.convert(&negations)), ErrorCode::InvalidSyntax);

    let sum = format!("age{} > 0", " + 1".repeat(2000));
    assert_eq!(code_of(c.convert(&sum)), ErrorCode::InvalidSyntax);
}

#[test]
fn test_redundant_parentheses_within_bound() {
    let c = Converter::new(config()).unwrap();
    let source = format!("{}active{}", "(".repeat(40), ")".repeat(40));
    assert_eq!(c.convert(&source).unwrap().depth, 1);
}
