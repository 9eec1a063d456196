//! Checked entry point: validate, evaluate, extract a boolean.

use tracing::{debug, warn};

use crate::{
    ast::QueryExpr,
    config::EvalLimits,
    error::QueryError,
    eval_value::EvalValue,
    evaluator::Evaluator,
    schema::SchemaNode,
    validate::{StructuralValidator, Validator},
    value::Value,
};

/// Decides whether data satisfies a query.
///
/// The data is validated against the schema before evaluation starts, so a
/// query never runs against malformed data.
#[derive(Debug, Clone, Default)]
pub struct Predicate<V = StructuralValidator> {
    evaluator: Evaluator,
    validator: V,
}

impl Predicate {
    pub fn new(limits: EvalLimits) -> Self {
        Predicate {
            evaluator: Evaluator::new(limits),
            validator: StructuralValidator,
        }
    }
}

impl<V: Validator> Predicate<V> {
    /// Uses a caller-supplied validator instead of [`StructuralValidator`].
    pub fn with_validator(limits: EvalLimits, validator: V) -> Self {
        Predicate {
            evaluator: Evaluator::new(limits),
            validator,
        }
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    /// Validates `data` against `schema`, then evaluates `query`.
    pub fn evaluate(
        &self,
        query: &QueryExpr,
        data: &Value,
        schema: &SchemaNode,
    ) -> Result<EvalValue, QueryError> {
        self.validator
            .validate(data, schema)
            .map_err(|e| QueryError::InvalidDataStructure(e.to_string()))?;

        self.evaluator.evaluate(query, data, schema)
    }

    /// Returns true if the query holds for `data`.
    ///
    /// The query holds when its value, or any element of its broadcast value,
    /// is the boolean `true`. A root value with no booleans at all (a bare
    /// `resolve` or a string literal, say) is not an error: it simply does
    /// not match.
    ///
    /// # Errors
    ///
    /// [`QueryError::InvalidDataStructure`] when `data` does not conform to
    /// `schema`; any other variant when the query itself is invalid.
    pub fn matches(
        &self,
        query: &QueryExpr,
        data: &Value,
        schema: &SchemaNode,
    ) -> Result<bool, QueryError> {
        debug!(operator = ?query.operator(), "checking query against data");

        let value = self.evaluate(query, data, schema)?;
        if !value.has_boolean() {
            warn!(
                operator = ?query.operator(),
                "query produced no boolean value; treating as no match"
            );
        }

        let matched = value.any_true();
        debug!(matched, "query checked");
        Ok(matched)
    }
}

/// Checks `query` against `data` with the default validator and limits.
///
/// # Examples
///
/// ```
/// use schema_query::{matches, Parser, SchemaNode, Value};
/// use serde_json::json;
///
/// let schema = SchemaNode::from_json(&json!({
///     "type": "object",
///     "properties": {
///         "subject": {"type": "object", "properties": {"karyotypic_sex": {"type": "string"}}}
///     }
/// }))
/// .unwrap();
/// let data = Value::from(json!({"subject": {"karyotypic_sex": "XO"}}));
/// let query = Parser::default()
///     .parse(&json!(["eq", ["resolve", "subject", "karyotypic_sex"], "XO"]))
///     .unwrap();
///
/// assert!(matches(&query, &data, &schema).unwrap());
/// ```
pub fn matches(query: &QueryExpr, data: &Value, schema: &SchemaNode) -> Result<bool, QueryError> {
    Predicate::new(EvalLimits::default()).matches(query, data, schema)
}
