use crate::common::{code_of, config, converter, roles};
use filter_compiler::{Config, Converter, ErrorCode};

fn secured() -> Converter {
    Converter::new(
        config()
            .public_field("status")
            .public_field("name")
            .acl("salary", ["hr", "admin"]),
    )
    .unwrap()
}

#[test]
fn test_public_fields_need_no_roles() {
    assert!(
        secured()
            .convert_with_auth(r#"status == "a" && name.contains("salary")"#, &[])
            .is_ok()
    );
}

#[test]
fn test_restricted_field_requires_role() {
    let c = secured();
    assert!(c.convert_with_auth("salary > 100", &roles(&["hr"])).is_ok());

    let err = c
        .convert_with_auth("salary > 100", &roles(&["viewer"]))
        .unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::UnauthorizedField));
    let message = err.to_string();
    assert_eq!(
        message,
        "access denied: insufficient permissions for requested filter"
    );
    for field in ["salary", "status", "name", "age"] {
        assert!(!message.contains(field));
    }
}

#[test]
fn test_one_restricted_field_rejects_whole_expression() {
    let c = secured();
    assert_eq!(
        code_of(c.convert_with_auth(r#"status == "a" || salary > 1"#, &roles(&["viewer"]))),
        ErrorCode::UnauthorizedField
    );
}

#[test]
fn test_unlisted_field_is_denied_when_policy_enabled() {
    let c = secured();
    assert_eq!(
        code_of(c.convert_with_auth("age in [1, 2]", &roles(&["admin"]))),
        ErrorCode::UnauthorizedField
    );
}

#[test]
fn test_acl_only_policy_is_enabled() {
    let c = Converter::new(config().acl("salary", ["hr"])).unwrap();
    assert_eq!(
        code_of(c.convert_with_auth(r#"status == "a""#, &[])),
        ErrorCode::UnauthorizedField
    );
}

#[test]
fn test_plain_convert_skips_authorization() {
    assert!(secured().convert("salary > 100").is_ok());
}

#[test]
fn test_empty_policy_allows_everything() {
    let c = converter();
    assert!(!c.policy().is_enabled());
    assert!(c.convert_with_auth("salary > 100", &[]).is_ok());
}

#[test]
fn test_syntax_checked_before_authorization() {
    let c = secured();
    assert_eq!(
        code_of(c.convert_with_auth("salary >", &roles(&["viewer"]))),
        ErrorCode::InvalidSyntax
    );
}

#[test]
fn test_policy_from_json() {
    let config = Config::from_json_str(
        r#"{
            "fields": [{"name": "salary", "type": "int", "column": "emp_salary"}],
            "field_acl": {"salary": ["hr"]}
        }"#,
    )
    .unwrap();
    let c = Converter::new(config).unwrap();
    let conversion = c.convert_with_auth("salary >= 10", &roles(&["hr"])).unwrap();
    assert_eq!(conversion.columns(), vec!["emp_salary"]);
}
