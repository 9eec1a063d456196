use std::cmp::Ordering;
use std::collections::HashMap;

/// A data value evaluated by a query.
///
/// This mirrors JSON, but keeps integers and floats apart so that schema
/// validation can tell an `integer` field from a `number` field.
///
/// # Examples
///
/// ```
/// use schema_query::Value;
/// use std::collections::HashMap;
///
/// let sex = Value::String("XO".to_string());
/// let ages = Value::Array(vec![Value::Integer(31), Value::Float(31.5)]);
///
/// let mut subject = HashMap::new();
/// subject.insert("karyotypic_sex".to_string(), sex);
/// let subject = Value::Object(subject);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// JSON null
    Null,

    /// JSON boolean (true/false)
    Boolean(bool),

    /// Integer number (preserved separately from floats)
    Integer(i64),

    /// Floating-point number
    Float(f64),

    /// UTF-8 string
    String(String),

    /// Ordered sequence of values
    Array(Vec<Value>),

    /// Keyed record
    Object(HashMap<String, Value>),
}

/// Returns a human-readable type name for a Value
pub fn type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Boolean(_) => "boolean",
        Value::Integer(_) => "integer",
        Value::Float(_) => "float",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl Value {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Integer(_) | Value::Float(_))
    }

    /// Query equality.
    ///
    /// Same as `==` except that integers and floats compare by numeric value,
    /// at any depth: `1 == 1.0` and `[1] == [1.0]`.
    pub fn equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Integer(_) | Value::Float(_), Value::Integer(_) | Value::Float(_)) => {
                compare_numbers(self, other) == Some(Ordering::Equal)
            }
            (Value::Array(a), Value::Array(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.equals(y))
            }
            (Value::Object(a), Value::Object(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .all(|(k, v)| b.get(k).is_some_and(|w| v.equals(w)))
            }
            _ => self == other,
        }
    }

    /// Ordering used by `lt`, `le`, `gt` and `ge`.
    ///
    /// Numbers order numerically, strings lexicographically and booleans
    /// with `false < true`. Any other pairing returns `None`.
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Integer(_) | Value::Float(_), Value::Integer(_) | Value::Float(_)) => {
                compare_numbers(self, other)
            }
            (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
            (Value::Boolean(a), Value::Boolean(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    /// Membership test used by `co`.
    ///
    /// - string haystack: substring test, needle must be a string
    /// - array haystack: element equality (see [`Value::equals`])
    /// - object haystack: key membership, needle must be a string
    ///
    /// Returns `None` when the haystack is not a container or the needle
    /// cannot be a member of it.
    pub fn contains(&self, needle: &Value) -> Option<bool> {
        match (self, needle) {
            (Value::String(s), _) => needle.as_str().map(|sub| s.contains(sub)),
            (Value::Array(items), _) => Some(items.iter().any(|item| item.equals(needle))),
            (Value::Object(map), _) => needle.as_str().map(|key| map.contains_key(key)),
            _ => None,
        }
    }
}

/// Compares two numeric values exactly.
///
/// Mixed integer/float pairs never round either side: see
/// [`compare_int_float`].
fn compare_numbers(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Integer(x), Value::Integer(y)) => Some(x.cmp(y)),
        (Value::Float(x), Value::Float(y)) => x.partial_cmp(y),
        (Value::Integer(x), Value::Float(y)) => compare_int_float(*x, *y),
        (Value::Float(_), Value::Integer(_)) => compare_numbers(b, a).map(Ordering::reverse),
        _ => None,
    }
}

/// 2^63, the first float past `i64::MAX`. Exactly representable.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

/// Orders an integer against a float without converting the integer.
///
/// The float is split at its floor, which is a whole number and fits in an
/// `i64` once the out-of-range cases are handled. Equal integer parts are
/// broken by the fraction.
fn compare_int_float(x: i64, y: f64) -> Option<Ordering> {
    if y.is_nan() {
        return None;
    }
    if y >= I64_BOUND {
        return Some(Ordering::Less);
    }
    if y < -I64_BOUND {
        return Some(Ordering::Greater);
    }
    let floor = y.floor();
    match x.cmp(&(floor as i64)) {
        Ordering::Equal if y > floor => Some(Ordering::Less),
        ordering => Some(ordering),
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Boolean(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Integer(i),
                // u64 above i64::MAX, or a real float
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(arr) => Value::Array(arr.into_iter().map(Value::from).collect()),
            serde_json::Value::Object(obj) => {
                Value::Object(obj.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(v: Value) -> Self {
        match v {
            Value::Null => serde_json::Value::Null,
            Value::Boolean(b) => serde_json::Value::Bool(b),
            Value::Integer(i) => serde_json::Value::Number(i.into()),
            Value::Float(f) => serde_json::Number::from_f64(f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::String(s) => serde_json::Value::String(s),
            Value::Array(arr) => {
                serde_json::Value::Array(arr.into_iter().map(serde_json::Value::from).collect())
            }
            Value::Object(obj) => serde_json::Value::Object(
                obj.into_iter()
                    .map(|(k, v)| (k, serde_json::Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}
