use schema_query::{
    EvalLimits, Parser, Predicate, QueryError, QueryExpr, SchemaNode, ValidationFailure, Value,
    matches,
};
use serde_json::json;

fn phenopacket_schema() -> SchemaNode {
    SchemaNode::from_json(&json!({
        "type": "object",
        "properties": {
            "subject": {
                "type": "object",
                "properties": {"karyotypic_sex": {"type": "string"}}
            },
            "biosamples": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "procedure": {
                            "type": "object",
                            "properties": {
                                "code": {
                                    "type": "object",
                                    "properties": {
                                        "id": {"type": "string"},
                                        "label": {"type": "string"}
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }))
    .unwrap()
}

fn phenopacket() -> Value {
    Value::from(json!({
        "subject": {"karyotypic_sex": "XO"},
        "biosamples": [{"procedure": {"code": {"id": "TEST", "label": "TEST LABEL"}}}]
    }))
}

fn check(query: serde_json::Value) -> Result<bool, QueryError> {
    let query = Parser::default().parse(&query)?;
    matches(&query, &phenopacket(), &phenopacket_schema())
}

#[test]
fn test_end_to_end_match() {
    let result = check(json!(["and",
        ["eq", ["resolve", "subject", "karyotypic_sex"], "XO"],
        ["co", ["resolve", "biosamples", "[item]", "procedure", "code", "id"], "TE"]]));
    assert_eq!(result, Ok(true));
}

#[test]
fn test_end_to_end_no_match() {
    let result = check(json!(["and",
        ["eq", ["resolve", "subject", "karyotypic_sex"], "XY"],
        ["co", ["resolve", "biosamples", "[item]", "procedure", "code", "id"], "TE"]]));
    assert_eq!(result, Ok(false));
}

#[test]
fn test_not_inverts_match() {
    let inner = json!(["eq", ["resolve", "subject", "karyotypic_sex"], "XO"]);
    assert_eq!(check(inner.clone()), Ok(true));
    assert_eq!(check(json!(["not", inner])), Ok(false));

    let inner = json!(["eq", ["resolve", "subject", "karyotypic_sex"], "XY"]);
    assert_eq!(check(inner.clone()), Ok(false));
    assert_eq!(check(json!(["not", inner])), Ok(true));
}

#[test]
fn test_broadcast_match_on_second_element() {
    let schema = SchemaNode::object([(
        "items",
        SchemaNode::array(SchemaNode::object([("v", SchemaNode::integer())])),
    )]);
    let data = Value::from(json!({"items": [{"v": 1}, {"v": 2}]}));

    let second = QueryExpr::eq(QueryExpr::resolve(["items", "[item]", "v"]), 2i64);
    assert_eq!(matches(&second, &data, &schema), Ok(true));

    let first_only = QueryExpr::eq(QueryExpr::resolve(["items", "[item]", "v"]), 1i64);
    assert_eq!(matches(&first_only, &data, &schema), Ok(true));

    let none = QueryExpr::eq(QueryExpr::resolve(["items", "[item]", "v"]), 3i64);
    assert_eq!(matches(&none, &data, &schema), Ok(false));
}

#[test]
fn test_contains_literal_container() {
    let container = Value::from(json!(["a", "b"]));
    let schema = SchemaNode::object(Vec::<(&str, SchemaNode)>::new());
    let data = Value::from(json!({}));

    let hit = QueryExpr::contains(container.clone(), "b");
    assert_eq!(matches(&hit, &data, &schema), Ok(true));

    let miss = QueryExpr::contains(container, "c");
    assert_eq!(matches(&miss, &data, &schema), Ok(false));
}

#[test]
fn test_non_boolean_root_is_no_match() {
    assert_eq!(check(json!(["resolve", "subject", "karyotypic_sex"])), Ok(false));
    assert_eq!(check(json!("XO")), Ok(false));
    assert_eq!(check(json!(1)), Ok(false));
}

#[test]
fn test_boolean_literal_root() {
    assert_eq!(check(json!(true)), Ok(true));
    assert_eq!(check(json!(false)), Ok(false));
}

#[test]
fn test_invalid_data_rejected_before_evaluation() {
    let data = Value::from(json!({"subject": {"karyotypic_sex": 46}}));
    // the query itself is fine; validation fails first
    let query = QueryExpr::literal(true);
    let err = matches(&query, &data, &phenopacket_schema()).unwrap_err();
    assert!(matches!(err, QueryError::InvalidDataStructure(_)));
    assert!(!err.is_input_error());
}

#[test]
fn test_validation_runs_before_query_errors() {
    let data = Value::from(json!({"biosamples": {}}));
    let query = QueryExpr::resolve(["nope"]);
    let err = matches(&query, &data, &phenopacket_schema()).unwrap_err();
    assert!(matches!(err, QueryError::InvalidDataStructure(_)));
}

#[test]
fn test_query_errors_are_input_errors() {
    let err = check(json!(["eq", ["resolve", "subject", "sex"], "XO"])).unwrap_err();
    assert_eq!(err, QueryError::UnknownProperty("sex".into()));
    assert!(err.is_input_error());
}

#[test]
fn test_custom_validator() {
    let reject_all = |_: &Value, _: &SchemaNode| -> Result<(), ValidationFailure> {
        Err(ValidationFailure {
            path: "/subject".into(),
            message: "quarantined".into(),
        })
    };
    let predicate = Predicate::with_validator(EvalLimits::default(), reject_all);

    let err = predicate
        .matches(&QueryExpr::literal(true), &phenopacket(), &phenopacket_schema())
        .unwrap_err();
    assert_eq!(
        err,
        QueryError::InvalidDataStructure("/subject: quarantined".into())
    );
}

#[test]
fn test_predicate_limits() {
    let predicate = Predicate::new(EvalLimits::default().with_max_depth(2));
    let deep = QueryExpr::not(QueryExpr::not(QueryExpr::literal(true)));

    let err = predicate
        .matches(&deep, &phenopacket(), &phenopacket_schema())
        .unwrap_err();
    assert!(matches!(err, QueryError::QueryTooComplex(_)));
}

#[test]
fn test_predicate_evaluate_returns_raw_value() {
    let predicate = Predicate::new(EvalLimits::default());
    let value = predicate
        .evaluate(
            &QueryExpr::resolve(["biosamples", "[item]", "procedure", "code", "label"]),
            &phenopacket(),
            &phenopacket_schema(),
        )
        .unwrap();
    assert_eq!(value.values(), &[Value::String("TEST LABEL".into())]);
}

#[test]
fn test_absent_labels_do_not_depend_on_sample_order() {
    let sample = |label: Option<&str>| match label {
        Some(label) => json!({"procedure": {"code": {"id": "TEST", "label": label}}}),
        None => json!({"procedure": {"code": {"id": "OTHER"}}}),
    };
    let labelled_first = Value::from(json!({
        "subject": {"karyotypic_sex": "XO"},
        "biosamples": [sample(Some("TEST LABEL")), sample(None)]
    }));
    let labelled_last = Value::from(json!({
        "subject": {"karyotypic_sex": "XO"},
        "biosamples": [sample(None), sample(Some("TEST LABEL"))]
    }));

    let label = || json!(["resolve", "biosamples", "[item]", "procedure", "code", "label"]);
    for query in [
        json!(["co", "TEST LABEL", label()]),
        json!(["and", ["co", label(), "LABEL"], ["eq", ["resolve", "subject", "karyotypic_sex"], "XO"]]),
    ] {
        let query = Parser::default().parse(&query).unwrap();
        assert_eq!(matches(&query, &labelled_first, &phenopacket_schema()), Ok(true));
        assert_eq!(matches(&query, &labelled_last, &phenopacket_schema()), Ok(true));
    }
}

#[test]
fn test_predicate_exposes_its_limits() {
    let limits = EvalLimits::default().with_max_depth(7);
    let predicate = Predicate::new(limits);
    assert_eq!(predicate.evaluator().limits(), &limits);
}
