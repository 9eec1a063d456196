use schema_query::{CompareOp, EvalLimits, Operator, Parser, PathToken, QueryError, QueryExpr, Value};
use serde_json::json;

fn parse(doc: serde_json::Value) -> Result<QueryExpr, QueryError> {
    Parser::default().parse(&doc)
}

#[test]
fn test_non_array_values_are_literals() {
    assert_eq!(parse(json!(5)).unwrap(), QueryExpr::Literal(Value::Integer(5)));
    assert_eq!(parse(json!(2.5)).unwrap(), QueryExpr::Literal(Value::Float(2.5)));
    assert_eq!(parse(json!("and")).unwrap(), QueryExpr::literal("and"));
    assert_eq!(parse(json!(null)).unwrap(), QueryExpr::Literal(Value::Null));
    assert_eq!(
        parse(json!({"a": 1})).unwrap(),
        QueryExpr::Literal(Value::from(json!({"a": 1})))
    );
}

#[test]
fn test_comparison_call() {
    let expr = parse(json!(["le", ["resolve", "age"], 40])).unwrap();
    assert_eq!(
        expr,
        QueryExpr::Compare {
            op: CompareOp::Le,
            left: Box::new(QueryExpr::Resolve(vec![PathToken::Property("age".into())])),
            right: Box::new(QueryExpr::Literal(Value::Integer(40))),
        }
    );
}

#[test]
fn test_wildcard_token() {
    let expr = parse(json!(["resolve", "biosamples", "[item]", "id"])).unwrap();
    assert_eq!(
        expr,
        QueryExpr::Resolve(vec![
            PathToken::Property("biosamples".into()),
            PathToken::Wildcard,
            PathToken::Property("id".into()),
        ])
    );
}

#[test]
fn test_empty_resolve() {
    assert_eq!(parse(json!(["resolve"])).unwrap(), QueryExpr::Resolve(vec![]));
}

#[test]
fn test_full_query() {
    let expr = parse(json!(["and",
        ["eq", ["resolve", "subject", "karyotypic_sex"], "XO"],
        ["co", ["resolve", "biosamples", "[item]", "procedure", "code", "id"], "TE"]]))
    .unwrap();

    let expected = QueryExpr::and(
        QueryExpr::eq(QueryExpr::resolve(["subject", "karyotypic_sex"]), "XO"),
        QueryExpr::contains(
            QueryExpr::resolve(["biosamples", "[item]", "procedure", "code", "id"]),
            "TE",
        ),
    );
    assert_eq!(expr, expected);
}

#[test]
fn test_legacy_hash_tokens() {
    let legacy = parse(json!(["#not", ["#eq", ["#resolve", "id"], "x"]])).unwrap();
    let bare = parse(json!(["not", ["eq", ["resolve", "id"], "x"]])).unwrap();
    assert_eq!(legacy, bare);
}

#[test]
fn test_every_operator_token_is_recognised() {
    for op in Operator::ALL {
        assert_eq!(Operator::from_token(op.token()), Some(op));
    }
    assert_eq!(Operator::from_token("ne"), None);
    assert_eq!(Operator::from_token("AND"), None);
}

#[test]
fn test_empty_call_is_malformed() {
    let err = parse(json!([])).unwrap_err();
    assert!(matches!(err, QueryError::MalformedQuery(_)));

    let err = parse(json!(["not", []])).unwrap_err();
    assert!(matches!(err, QueryError::MalformedQuery(_)));
}

#[test]
fn test_unknown_operator() {
    let err = parse(json!(["xor", true, false])).unwrap_err();
    assert_eq!(err, QueryError::UnknownOperator("xor".into()));
}

#[test]
fn test_non_string_head_is_unknown_operator() {
    let err = parse(json!([1, 2])).unwrap_err();
    assert!(matches!(err, QueryError::UnknownOperator(_)));

    let err = parse(json!([["eq", 1, 1], true])).unwrap_err();
    assert!(matches!(err, QueryError::UnknownOperator(_)));
}

#[test]
fn test_wrong_arity() {
    for doc in [
        json!(["and", true]),
        json!(["eq", 1, 2, 3]),
        json!(["not"]),
        json!(["not", true, false]),
        json!(["co", "abc"]),
    ] {
        let err = parse(doc.clone()).unwrap_err();
        assert!(
            matches!(err, QueryError::MalformedQuery(_)),
            "{} should be malformed, got {:?}",
            doc,
            err
        );
    }
}

#[test]
fn test_resolve_segments_must_be_strings() {
    let err = parse(json!(["resolve", "items", 0])).unwrap_err();
    assert!(matches!(err, QueryError::MalformedQuery(_)));
}

#[test]
fn test_depth_limit() {
    let mut doc = json!(["eq", 1, 1]);
    for _ in 0..10 {
        doc = json!(["not", doc]);
    }

    let err = Parser::new(&EvalLimits::default().with_max_depth(8))
        .parse(&doc)
        .unwrap_err();
    assert!(matches!(err, QueryError::QueryTooComplex(_)));

    assert!(Parser::new(&EvalLimits::default().with_max_depth(12)).parse(&doc).is_ok());
}

#[test]
fn test_parse_str() {
    let expr = Parser::default().parse_str(r#"["gt", ["resolve", "n"], 1]"#).unwrap();
    assert_eq!(expr, QueryExpr::gt(QueryExpr::resolve(["n"]), 1i64));

    let err = Parser::default().parse_str("[\"gt\", ").unwrap_err();
    assert!(matches!(err, QueryError::MalformedQuery(_)));
}

#[test]
fn test_to_json_uses_bare_tokens() {
    let expr = parse(json!(["#or", ["#resolve", "a", "[item]"], false])).unwrap();
    assert_eq!(expr.to_json().unwrap(), json!(["or", ["resolve", "a", "[item]"], false]));
}

#[test]
fn test_to_json_rejects_array_literals() {
    let expr = QueryExpr::contains(Value::Array(vec![Value::Integer(1)]), 1i64);
    assert!(matches!(expr.to_json(), Err(QueryError::MalformedQuery(_))));
}

#[test]
fn test_depth_of_decoded_query() {
    let expr = parse(json!(["not", ["and", ["eq", 1, 1], true]])).unwrap();
    assert_eq!(expr.depth(), 4);
    assert_eq!(expr.operator(), Some(Operator::Not));
}
