//! The `resolve` operator: schema-guided navigation into the data.
//!
//! Object nodes are entered by property name, array nodes by the `[item]`
//! wildcard. Crossing an array turns the result into a broadcast with one
//! value per element; later property steps apply to every element.
//!
//! Only one array level may be crossed per path. The result shape for arrays
//! nested inside arrays has no agreed meaning yet, so such paths are rejected
//! with [`QueryError::QueryTooComplex`].

use tracing::trace;

use crate::{
    ast::PathToken,
    config::EvalLimits,
    error::QueryError,
    eval_value::EvalValue,
    schema::SchemaNode,
    value::{Value, type_name},
};

static NULL: Value = Value::Null;

/// Borrowed position of the walk: one value, or one value per array element.
enum Cursor<'a> {
    One(&'a Value),
    Many(Vec<&'a Value>),
}

impl<'a> Cursor<'a> {
    fn into_eval_value(self) -> EvalValue {
        match self {
            Cursor::One(v) => EvalValue::Scalar(v.clone()),
            Cursor::Many(items) => EvalValue::Broadcast(items.into_iter().cloned().collect()),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PathResolver {
    max_path_len: usize,
}

impl Default for PathResolver {
    fn default() -> Self {
        PathResolver::new(&EvalLimits::default())
    }
}

impl PathResolver {
    pub fn new(limits: &EvalLimits) -> Self {
        PathResolver {
            max_path_len: limits.max_path_len,
        }
    }

    /// Resolves `path` starting at `data`, described by `schema`.
    ///
    /// An empty path returns `data` itself. `data` is assumed to have been
    /// validated against `schema`; if it was not, shape disagreements surface
    /// as [`QueryError::InvalidDataStructure`]. A property that the schema
    /// declares but the data omits resolves to null, and so does every step
    /// below it.
    ///
    /// # Examples
    ///
    /// ```
    /// use schema_query::{EvalValue, PathResolver, PathToken, SchemaNode, Value};
    /// use serde_json::json;
    ///
    /// let schema = SchemaNode::object([(
    ///     "items",
    ///     SchemaNode::array(SchemaNode::object([("v", SchemaNode::integer())])),
    /// )]);
    /// let data = Value::from(json!({"items": [{"v": 1}, {"v": 2}]}));
    /// let path: Vec<PathToken> = ["items", "[item]", "v"].into_iter().map(Into::into).collect();
    ///
    /// let result = PathResolver::default().resolve(&path, &data, &schema).unwrap();
    /// assert_eq!(result, EvalValue::Broadcast(vec![Value::Integer(1), Value::Integer(2)]));
    /// ```
    pub fn resolve(
        &self,
        path: &[PathToken],
        data: &Value,
        schema: &SchemaNode,
    ) -> Result<EvalValue, QueryError> {
        if path.len() > self.max_path_len {
            return Err(QueryError::QueryTooComplex(format!(
                "resolve path has {} segments, the maximum is {}",
                path.len(),
                self.max_path_len
            )));
        }

        let mut cursor = Cursor::One(data);
        let mut node = schema;

        for (i, token) in path.iter().enumerate() {
            let at = display_prefix(&path[..i]);
            trace!(step = i, token = %token, schema = node.kind_name(), "resolve step");

            match (node, token) {
                (SchemaNode::Object { .. }, PathToken::Property(name)) => {
                    node = node
                        .property(name)
                        .ok_or_else(|| QueryError::UnknownProperty(name.clone()))?;
                    cursor = match cursor {
                        Cursor::One(v) => Cursor::One(field(v, name, &at)?),
                        Cursor::Many(items) => Cursor::Many(
                            items
                                .into_iter()
                                .map(|v| field(v, name, &at))
                                .collect::<Result<_, _>>()?,
                        ),
                    };
                }
                (SchemaNode::Array(items), PathToken::Wildcard) => {
                    cursor = match cursor {
                        Cursor::One(v) => Cursor::Many(elements(v, &at)?),
                        Cursor::Many(_) => {
                            return Err(QueryError::QueryTooComplex(format!(
                                "'{}' at {} crosses an array nested inside an array",
                                token, at
                            )));
                        }
                    };
                    node = items.as_ref();
                }
                (SchemaNode::Array(_), PathToken::Property(name)) => {
                    return Err(QueryError::InvalidArrayAccess(format!(
                        "cannot get property '{}' of the array at {}; use '{}'",
                        name,
                        at,
                        PathToken::Wildcard
                    )));
                }
                (SchemaNode::Object { .. } | SchemaNode::Scalar(_), PathToken::Wildcard) => {
                    return Err(QueryError::InvalidArrayAccess(format!(
                        "'{}' used on the {} at {}, which is not an array",
                        token,
                        node.kind_name(),
                        at
                    )));
                }
                (SchemaNode::Scalar(_), PathToken::Property(name)) => {
                    return Err(QueryError::CannotDescendIntoScalar(name.clone()));
                }
            }
        }

        Ok(cursor.into_eval_value())
    }
}

fn field<'a>(v: &'a Value, name: &str, at: &str) -> Result<&'a Value, QueryError> {
    match v {
        Value::Object(map) => Ok(map.get(name).unwrap_or(&NULL)),
        Value::Null => Ok(&NULL),
        other => Err(QueryError::InvalidDataStructure(format!(
            "expected an object at {}, got {}",
            at,
            type_name(other)
        ))),
    }
}

fn elements<'a>(v: &'a Value, at: &str) -> Result<Vec<&'a Value>, QueryError> {
    match v {
        Value::Array(items) => Ok(items.iter().collect()),
        // absent optional array
        Value::Null => Ok(Vec::new()),
        other => Err(QueryError::InvalidDataStructure(format!(
            "expected an array at {}, got {}",
            at,
            type_name(other)
        ))),
    }
}

fn display_prefix(prefix: &[PathToken]) -> String {
    if prefix.is_empty() {
        return "the root".to_string();
    }
    let joined: Vec<&str> = prefix.iter().map(PathToken::as_str).collect();
    format!("'{}'", joined.join("/"))
}
