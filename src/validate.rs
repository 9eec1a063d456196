//! Schema validation run before any query is evaluated.
//!
//! The predicate checker only needs the [`Validator`] trait; services that
//! already validate records with a full JSON-Schema engine can plug that in
//! instead of [`StructuralValidator`].

use std::fmt;

use crate::{
    schema::{ScalarKind, SchemaNode},
    value::{Value, type_name},
};

/// Reason a data value does not conform to its schema.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationFailure {
    /// JSON-pointer-style location of the offending value (`/biosamples/0/procedure`)
    pub path: String,
    pub message: String,
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = if self.path.is_empty() { "/" } else { &self.path };
        write!(f, "{}: {}", path, self.message)
    }
}

impl std::error::Error for ValidationFailure {}

/// Checks that a data value conforms to a schema.
pub trait Validator {
    fn validate(&self, data: &Value, schema: &SchemaNode) -> Result<(), ValidationFailure>;
}

impl<F> Validator for F
where
    F: Fn(&Value, &SchemaNode) -> Result<(), ValidationFailure>,
{
    fn validate(&self, data: &Value, schema: &SchemaNode) -> Result<(), ValidationFailure> {
        self(data, schema)
    }
}

/// Default validator: checks structural conformance against the schema tree.
///
/// - `number` accepts integers and floats; `integer` accepts integers and
///   floats with no fractional part
/// - every array element is validated against the item schema
/// - declared properties are validated when present, `required` ones must be
///   present, undeclared properties are allowed
#[derive(Debug, Default, Clone, Copy)]
pub struct StructuralValidator;

impl Validator for StructuralValidator {
    fn validate(&self, data: &Value, schema: &SchemaNode) -> Result<(), ValidationFailure> {
        let mut path = String::new();
        check(data, schema, &mut path)
    }
}

fn check(data: &Value, schema: &SchemaNode, path: &mut String) -> Result<(), ValidationFailure> {
    match (schema, data) {
        (SchemaNode::Object { properties, required }, Value::Object(map)) => {
            for name in required {
                if !map.contains_key(name) {
                    return Err(failure(path, format!("missing required property '{}'", name)));
                }
            }
            for (name, child) in properties {
                if let Some(value) = map.get(name) {
                    with_segment(path, name, |path| check(value, child, path))?;
                }
            }
            Ok(())
        }
        (SchemaNode::Array(items), Value::Array(elements)) => {
            for (i, element) in elements.iter().enumerate() {
                with_segment(path, &i.to_string(), |path| check(element, items, path))?;
            }
            Ok(())
        }
        (SchemaNode::Scalar(kind), value) if scalar_matches(*kind, value) => Ok(()),
        (schema, value) => Err(failure(
            path,
            format!("expected {}, got {}", schema.kind_name(), type_name(value)),
        )),
    }
}

fn scalar_matches(kind: ScalarKind, value: &Value) -> bool {
    match (kind, value) {
        (ScalarKind::String, Value::String(_)) => true,
        (ScalarKind::Boolean, Value::Boolean(_)) => true,
        (ScalarKind::Number, v) => v.is_number(),
        (ScalarKind::Integer, Value::Integer(_)) => true,
        (ScalarKind::Integer, Value::Float(f)) => f.is_finite() && f.fract() == 0.0,
        _ => false,
    }
}

fn with_segment<T>(path: &mut String, segment: &str, f: impl FnOnce(&mut String) -> T) -> T {
    let len = path.len();
    path.push('/');
    // JSON pointer escaping: '~' first, so "~1" in a name stays literal
    path.push_str(&segment.replace('~', "~0").replace('/', "~1"));
    let result = f(path);
    path.truncate(len);
    result
}

fn failure(path: &str, message: String) -> ValidationFailure {
    ValidationFailure {
        path: path.to_string(),
        message,
    }
}
