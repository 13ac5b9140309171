use filter_syntax::{
    ast::{expr::ExpressionKind, literal::Literal},
    builder::parse,
};

fn literal(input: &str) -> Literal {
    match parse(input).unwrap().kind {
        ExpressionKind::Literal(lit) => lit,
        other => panic!("expected literal, got {:?}", other),
    }
}

#[test]
fn test_scalar_literals() {
    assert_eq!(literal("null"), Literal::Null);
    assert_eq!(literal("true"), Literal::Boolean(true));
    assert_eq!(literal("false"), Literal::Boolean(false));
    assert_eq!(literal("123"), Literal::Int(123));
    assert_eq!(literal("0xff"), Literal::Int(255));
    assert_eq!(literal("7U"), Literal::Uint(7));
    assert_eq!(literal("3.25"), Literal::Double(3.25));
    assert_eq!(literal("2e-2"), Literal::Double(0.02));
}

#[test]
fn test_string_quoting_styles() {
    assert_eq!(literal("'single'"), Literal::String("single".to_string()));
    assert_eq!(literal(r#""double""#), Literal::String("double".to_string()));
    assert_eq!(literal(r#"'it\'s'"#), Literal::String("it's".to_string()));
    assert_eq!(literal(r#""é""#), Literal::String("\u{e9}".to_string()));
    assert_eq!(literal(r#"R'\d+'"#), Literal::String("\\d+".to_string()));
}

#[test]
fn test_bytes_literal() {
    assert_eq!(literal(r#"b"ab""#), Literal::Bytes(b"ab".to_vec()));
    assert_eq!(literal(r#"b'\x00\x7f'"#), Literal::Bytes(vec![0x00, 0x7f]));
}

#[test]
fn test_unicode_escape_rejected_in_bytes() {
    assert!(parse(r#"b"\u0041""#).is_err());
}

#[test]
fn test_unterminated_string_is_syntax_error() {
    assert!(parse(r#"name == "abc"#).is_err());
}
