use crate::common::{converter, mysql, postgres, s};
use model::core::value::Value;
use planner::Predicate;

#[test]
fn test_simple_equality() {
    let (sql, params) = postgres(&converter(), r#"status == "active""#);
    assert_eq!(sql, r#""status" = $1"#);
    assert_eq!(params, vec![s("active")]);
}

#[test]
fn test_column_mapping_and_conjunction() {
    let (sql, params) = postgres(&converter(), r#"age > 18 && status != "banned""#);
    assert_eq!(sql, r#"("user_age" > $1 AND "status" <> $2)"#);
    assert_eq!(params, vec![Value::Int(18), s("banned")]);
}

#[test]
fn test_chains_are_balanced() {
    let (sql, _) = mysql(&converter(), "age == 1 || age == 2 || age == 3 || age == 4");
    assert_eq!(
        sql,
        "((`user_age` = ? OR `user_age` = ?) OR (`user_age` = ? OR `user_age` = ?))"
    );

    let (sql, _) = mysql(&converter(), "active && active && active");
    assert_eq!(
        sql,
        "((`is_active` = ? AND `is_active` = ?) AND `is_active` = ?)"
    );
}

#[test]
fn test_not_and_bare_boolean_field() {
    let (sql, params) = postgres(&converter(), "!active");
    assert_eq!(sql, r#"NOT ("is_active" = $1)"#);
    assert_eq!(params, vec![Value::Boolean(true)]);

    let (sql, _) = postgres(&converter(), "active");
    assert_eq!(sql, r#""is_active" = $1"#);
}

#[test]
fn test_boolean_constants() {
    let (sql, params) = postgres(&converter(), "true");
    assert_eq!(sql, "TRUE");
    assert!(params.is_empty());
    assert_eq!(postgres(&converter(), "false").0, "FALSE");
}

#[test]
fn test_membership() {
    let (sql, params) = mysql(&converter(), r#"status in ["a", "b", "c"]"#);
    assert_eq!(sql, "`status` IN (?,?,?)");
    assert_eq!(params, vec![s("a"), s("b"), s("c")]);
}

#[test]
fn test_empty_membership_never_matches() {
    let conversion = converter().convert("status in []").unwrap();
    assert_eq!(conversion.predicate, Predicate::AlwaysFalse);
    let (sql, params) = postgres(&converter(), "status in []");
    assert_eq!(sql, "(1=0)");
    assert!(params.is_empty());
}

#[test]
fn test_string_operators() {
    let c = converter();
    let (sql, params) = postgres(&c, r#"name.contains("50%_off")"#);
    assert_eq!(sql, r#""name" LIKE $1"#);
    assert_eq!(params, vec![s(r"%50\%\_off%")]);

    assert_eq!(postgres(&c, r#"name.startsWith("Jo")"#).1, vec![s("Jo%")]);
    assert_eq!(postgres(&c, r#"name.endsWith("son")"#).1, vec![s("%son")]);
}

#[test]
fn test_like_escaping_of_backslash() {
    let (_, params) = postgres(&converter(), r#"name.contains("%_\\")"#);
    assert_eq!(params, vec![s(r"%\%\_\\%")]);
}

#[test]
fn test_null_checks() {
    let (sql, params) = postgres(&converter(), "email == null");
    assert_eq!(sql, r#""email" IS NULL"#);
    assert!(params.is_empty());

    let (sql, _) = postgres(&converter(), "email != null");
    assert_eq!(sql, r#""email" IS NOT NULL"#);
}

#[test]
fn test_numeric_kinds() {
    let c = converter();
    assert_eq!(postgres(&c, "score >= 4.5").1, vec![Value::Float(4.5)]);
    assert_eq!(postgres(&c, "count < 10u").1, vec![Value::Uint(10)]);
    assert_eq!(postgres(&c, "age > -3").1, vec![Value::Int(-3)]);
}

#[test]
fn test_literals_never_appear_in_sql() {
    let (sql, params) = postgres(&converter(), r#"status == "x' OR 1=1 --""#);
    assert_eq!(sql, r#""status" = $1"#);
    assert!(!sql.contains("1=1"));
    assert_eq!(params, vec![s("x' OR 1=1 --")]);
}

#[test]
fn test_mixed_expression() {
    let (sql, params) = postgres(
        &converter(),
        r#"(status == "active" || status == "pending") && !(age < 18) && name.startsWith("A")"#,
    );
    assert_eq!(
        sql,
        r#"((("status" = $1 OR "status" = $2) AND NOT ("user_age" < $3)) AND "name" LIKE $4)"#
    );
    assert_eq!(params.len(), 4);
}

#[test]
fn test_depth_and_columns_reported() {
    let conversion = converter()
        .convert(r#"status == "a" && age > 1"#)
        .unwrap();
    assert_eq!(conversion.depth, 3);
    assert_eq!(conversion.columns(), vec!["status", "user_age"]);
}

#[test]
fn test_conversion_is_deterministic() {
    let c = converter();
    let source = r#"status in ["a", "b"] && name.contains("x") || age >= 3"#;
    let first = c.convert(source).unwrap();
    let second = c.convert(source).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_converter_is_shareable_across_threads() {
    let c = std::sync::Arc::new(converter());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let c = c.clone();
            std::thread::spawn(move || c.convert(&format!("age == {}", i)).unwrap())
        })
        .collect();
    for handle in handles {
        assert!(handle.join().is_ok());
    }
}
