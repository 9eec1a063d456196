//! Results of evaluating a query expression.

use std::slice;

use crate::{error::QueryError, value::Value};

/// The value of an evaluated expression.
///
/// A resolve path that crosses an array yields a [`EvalValue::Broadcast`]
/// holding one value per element. Operators treat a scalar as a broadcast
/// of one, see [`EvalValue::values`].
#[derive(Debug, Clone, PartialEq)]
pub enum EvalValue {
    Scalar(Value),

    /// One value per array element, in element order.
    /// Empty when the crossed array is empty.
    Broadcast(Vec<Value>),
}

impl EvalValue {
    /// Values this result stands for: one for a scalar, every element for a broadcast.
    pub fn values(&self) -> &[Value] {
        match self {
            EvalValue::Scalar(v) => slice::from_ref(v),
            EvalValue::Broadcast(items) => items,
        }
    }

    pub fn is_broadcast(&self) -> bool {
        matches!(self, EvalValue::Broadcast(_))
    }

    /// True if any value is the boolean `true`.
    ///
    /// Non-boolean values never count as a match.
    pub fn any_true(&self) -> bool {
        self.values().iter().any(|v| matches!(v, Value::Boolean(true)))
    }

    /// True if at least one value is a boolean.
    pub fn has_boolean(&self) -> bool {
        self.values().iter().any(|v| matches!(v, Value::Boolean(_)))
    }
}

impl From<Value> for EvalValue {
    fn from(v: Value) -> Self {
        EvalValue::Scalar(v)
    }
}

impl From<bool> for EvalValue {
    fn from(b: bool) -> Self {
        EvalValue::Scalar(Value::Boolean(b))
    }
}

/// Broadcast results serialize as JSON arrays.
impl From<EvalValue> for serde_json::Value {
    fn from(v: EvalValue) -> Self {
        match v {
            EvalValue::Scalar(v) => v.into(),
            EvalValue::Broadcast(items) => {
                serde_json::Value::Array(items.into_iter().map(serde_json::Value::from).collect())
            }
        }
    }
}

/// Tests `pred` on every (left, right) combination and returns whether any
/// combination holds.
///
/// Combinations are visited left-major and the walk stops at the first
/// `true` or the first error.
pub fn broadcast_any<F>(left: &EvalValue, right: &EvalValue, mut pred: F) -> Result<bool, QueryError>
where
    F: FnMut(&Value, &Value) -> Result<bool, QueryError>,
{
    for l in left.values() {
        for r in right.values() {
            if pred(l, r)? {
                return Ok(true);
            }
        }
    }
    Ok(false)
}
