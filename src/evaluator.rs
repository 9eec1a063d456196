use tracing::trace;

use crate::{
    ast::{CompareOp, Operator, QueryExpr},
    config::EvalLimits,
    error::QueryError,
    eval_value::{EvalValue, broadcast_any},
    resolve::PathResolver,
    schema::SchemaNode,
    value::{Value, type_name},
};

/// The query evaluator.
///
/// Evaluation is a pure function of the query, the data and the schema. The
/// evaluator holds only its limits and can be shared freely between threads.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator {
    limits: EvalLimits,
    resolver: PathResolver,
}

impl Default for Evaluator {
    fn default() -> Self {
        Evaluator::new(EvalLimits::default())
    }
}

impl Evaluator {
    pub fn new(limits: EvalLimits) -> Self {
        Evaluator {
            limits,
            resolver: PathResolver::new(&limits),
        }
    }

    pub fn limits(&self) -> &EvalLimits {
        &self.limits
    }

    /// Evaluates a query expression against data described by `schema`.
    ///
    /// Literals evaluate to themselves; `resolve` calls walk `data`; every
    /// other operator produces a boolean scalar.
    ///
    /// The data is not validated here, use [`crate::Predicate`] for the
    /// checked entry point.
    ///
    /// # Examples
    ///
    /// ```
    /// use schema_query::{EvalValue, Evaluator, QueryExpr, SchemaNode, Value};
    /// use serde_json::json;
    ///
    /// let schema = SchemaNode::object([("price", SchemaNode::integer())]);
    /// let data = Value::from(json!({"price": 100}));
    ///
    /// let result = Evaluator::default()
    ///     .evaluate(&QueryExpr::gt(QueryExpr::resolve(["price"]), 50i64), &data, &schema)
    ///     .unwrap();
    /// assert_eq!(result, EvalValue::Scalar(Value::Boolean(true)));
    /// ```
    pub fn evaluate(
        &self,
        expr: &QueryExpr,
        data: &Value,
        schema: &SchemaNode,
    ) -> Result<EvalValue, QueryError> {
        self.eval_expr(expr, data, schema, 1)
    }

    fn eval_expr(
        &self,
        expr: &QueryExpr,
        data: &Value,
        schema: &SchemaNode,
        depth: usize,
    ) -> Result<EvalValue, QueryError> {
        if depth > self.limits.max_depth {
            return Err(QueryError::QueryTooComplex(format!(
                "expression nesting exceeds the maximum depth of {}",
                self.limits.max_depth
            )));
        }

        if let Some(op) = expr.operator() {
            trace!(operator = %op, depth, "evaluating call");
        }

        match expr {
            QueryExpr::Literal(v) => Ok(EvalValue::Scalar(v.clone())),
            QueryExpr::And(left, right) => {
                self.eval_binary(Operator::And, left, right, data, schema, depth)
            }
            QueryExpr::Or(left, right) => {
                self.eval_binary(Operator::Or, left, right, data, schema, depth)
            }
            QueryExpr::Not(operand) => {
                // Negates the boolean outcome, not each broadcast element.
                let value = self.eval_expr(operand, data, schema, depth + 1)?;
                Ok(EvalValue::from(!value.any_true()))
            }
            QueryExpr::Compare { op, left, right } => {
                self.eval_binary(op.operator(), left, right, data, schema, depth)
            }
            QueryExpr::Contains { container, element } => {
                self.eval_binary(Operator::Co, container, element, data, schema, depth)
            }
            QueryExpr::Resolve(path) => self.resolver.resolve(path, data, schema),
        }
    }

    fn eval_binary(
        &self,
        op: Operator,
        left: &QueryExpr,
        right: &QueryExpr,
        data: &Value,
        schema: &SchemaNode,
        depth: usize,
    ) -> Result<EvalValue, QueryError> {
        let left_val = self.eval_expr(left, data, schema, depth + 1)?;
        let right_val = self.eval_expr(right, data, schema, depth + 1)?;
        let matched = broadcast_any(&left_val, &right_val, |l, r| apply_binop(op, l, r))?;
        Ok(EvalValue::from(matched))
    }
}

/// Applies a binary operator to one left/right pair of broadcast values.
///
/// `null` stands for an absent property. It is false as a logical operand and
/// never takes part in an ordering or membership match, so a broadcast over
/// partially filled elements does not fail on the empty ones.
fn apply_binop(op: Operator, left: &Value, right: &Value) -> Result<bool, QueryError> {
    match op {
        Operator::And | Operator::Or => {
            let (a, b) = (logical_operand(op, left)?, logical_operand(op, right)?);
            Ok(if op == Operator::And { a && b } else { a || b })
        }
        Operator::Eq => Ok(left.equals(right)),
        Operator::Lt => apply_ordering(CompareOp::Lt, left, right),
        Operator::Le => apply_ordering(CompareOp::Le, left, right),
        Operator::Gt => apply_ordering(CompareOp::Gt, left, right),
        Operator::Ge => apply_ordering(CompareOp::Ge, left, right),
        Operator::Co if *left == Value::Null || *right == Value::Null => Ok(false),
        Operator::Co => match left.contains(right) {
            Some(found) => Ok(found),
            None => Err(QueryError::TypeMismatch(format!(
                "'co' cannot look for {} in {}",
                type_name(right),
                type_name(left)
            ))),
        },
        Operator::Not | Operator::Resolve => Err(QueryError::MalformedQuery(format!(
            "'{}' is not a binary operator",
            op
        ))),
    }
}

fn logical_operand(op: Operator, value: &Value) -> Result<bool, QueryError> {
    match value {
        Value::Null => Ok(false),
        other => other.as_bool().ok_or_else(|| {
            QueryError::TypeMismatch(format!(
                "'{}' requires boolean operands, got {}",
                op,
                type_name(other)
            ))
        }),
    }
}

fn apply_ordering(op: CompareOp, left: &Value, right: &Value) -> Result<bool, QueryError> {
    if *left == Value::Null || *right == Value::Null {
        return Ok(false);
    }
    match left.compare(right) {
        Some(ordering) => Ok(op.accepts(ordering)),
        None => Err(QueryError::TypeMismatch(format!(
            "cannot compare {} and {} with '{}'",
            type_name(left),
            type_name(right),
            op.operator()
        ))),
    }
}
