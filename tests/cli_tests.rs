use schema_query::EvalLimits;
use schema_query::cli::{CheckOptions, CheckResult, CliError, execute_check, get_doc_category};
use serde_json::json;

const SCHEMA: &str = r#"{
    "type": "object",
    "properties": {
        "subject": {"type": "object", "properties": {"karyotypic_sex": {"type": "string"}}},
        "samples": {"type": "array", "items": {"type": "object", "properties": {"id": {"type": "string"}}}}
    }
}"#;

const INPUT: &str = r#"{"subject": {"karyotypic_sex": "XO"}, "samples": [{"id": "a1"}, {"id": "b2"}]}"#;

fn options(query: &str) -> CheckOptions {
    CheckOptions {
        query: query.to_string(),
        schema: SCHEMA.to_string(),
        input: Some(INPUT.to_string()),
        ..Default::default()
    }
}

#[test]
fn test_check_matches() {
    let result = execute_check(&options(r#"["eq", ["resolve", "subject", "karyotypic_sex"], "XO"]"#));
    assert_eq!(result.unwrap(), CheckResult::Matched(true));

    let result = execute_check(&options(r#"["co", ["resolve", "samples", "[item]", "id"], "z"]"#));
    assert_eq!(result.unwrap(), CheckResult::Matched(false));
}

#[test]
fn test_check_raw_value() {
    let opts = CheckOptions {
        raw: true,
        ..options(r#"["resolve", "samples", "[item]", "id"]"#)
    };
    assert_eq!(execute_check(&opts).unwrap(), CheckResult::Evaluated(json!(["a1", "b2"])));
}

#[test]
fn test_check_syntax_only() {
    let opts = CheckOptions {
        query: r##"["#not", ["#eq", 1, 2]]"##.to_string(),
        syntax_only: true,
        ..Default::default()
    };
    assert_eq!(
        execute_check(&opts).unwrap(),
        CheckResult::SyntaxValid(json!(["not", ["eq", 1, 2]]))
    );
}

#[test]
fn test_check_requires_input() {
    let opts = CheckOptions {
        input: None,
        ..options(r#"["eq", 1, 1]"#)
    };
    assert!(matches!(execute_check(&opts), Err(CliError::NoInput)));
}

#[test]
fn test_check_reports_query_errors() {
    let err = execute_check(&options(r#"["xor", true, true]"#)).unwrap_err();
    assert!(matches!(err, CliError::Query(_)));
    assert_eq!(err.to_string(), "Query error: Unknown operator: xor");
}

#[test]
fn test_check_reports_bad_schema() {
    let opts = CheckOptions {
        schema: r#"{"type": "tuple"}"#.to_string(),
        ..options(r#"["eq", 1, 1]"#)
    };
    assert!(matches!(execute_check(&opts), Err(CliError::Schema(_))));
}

#[test]
fn test_check_rejects_zero_depth_limit() {
    let opts = CheckOptions {
        limits: EvalLimits::default().with_max_depth(0),
        ..options(r#"["eq", 1, 1]"#)
    };
    assert!(matches!(execute_check(&opts), Err(CliError::Config(_))));
}

#[test]
fn test_docs_categories() {
    assert!(get_doc_category("ops").unwrap().contains("BROADCASTING"));
    assert!(get_doc_category("paths").is_ok());
    assert!(matches!(get_doc_category("lambdas"), Err(CliError::UnknownCategory(_))));
}

#[test]
fn test_operators_doc_is_complete() {
    let doc = get_doc_category("operators").unwrap();
    assert!(doc.contains(r##"("#eq")"##));
    assert!(doc.contains("ORDERING"));
    assert!(doc.trim_end().ends_with("inside 'and' and 'or'."));
}
