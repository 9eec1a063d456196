//! Schema model used to guide path resolution and validation.
//!
//! A schema is a finite tree of [`SchemaNode`]s. It is usually read from the
//! JSON-Schema subset services already publish for their records:
//!
//! ```
//! use schema_query::{ScalarKind, SchemaNode};
//! use serde_json::json;
//!
//! let schema = SchemaNode::from_json(&json!({
//!     "type": "object",
//!     "properties": {
//!         "subject": {
//!             "type": "object",
//!             "properties": {"karyotypic_sex": {"type": "string"}}
//!         }
//!     }
//! }))
//! .unwrap();
//!
//! let sex = schema.property("subject").and_then(|s| s.property("karyotypic_sex"));
//! assert_eq!(sex, Some(&SchemaNode::Scalar(ScalarKind::String)));
//! ```

use std::fmt;

use crate::error::SchemaError;

/// Primitive kinds a scalar schema node can describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    String,
    /// Any number, integer or float
    Number,
    Integer,
    Boolean,
}

impl ScalarKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScalarKind::String => "string",
            ScalarKind::Number => "number",
            ScalarKind::Integer => "integer",
            ScalarKind::Boolean => "boolean",
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A type descriptor for one node of a nested data structure.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
    /// Keyed record with declared properties, in declaration order
    Object {
        properties: Vec<(String, SchemaNode)>,
        /// Properties that must be present in conforming data
        required: Vec<String>,
    },

    /// Sequence whose elements all conform to the item schema
    Array(Box<SchemaNode>),

    /// Primitive value
    Scalar(ScalarKind),
}

impl SchemaNode {
    /// Object node with no required properties.
    pub fn object<I, K>(properties: I) -> Self
    where
        I: IntoIterator<Item = (K, SchemaNode)>,
        K: Into<String>,
    {
        SchemaNode::Object {
            properties: properties.into_iter().map(|(k, v)| (k.into(), v)).collect(),
            required: Vec::new(),
        }
    }

    pub fn array(items: SchemaNode) -> Self {
        SchemaNode::Array(Box::new(items))
    }

    pub fn string() -> Self {
        SchemaNode::Scalar(ScalarKind::String)
    }

    pub fn number() -> Self {
        SchemaNode::Scalar(ScalarKind::Number)
    }

    pub fn integer() -> Self {
        SchemaNode::Scalar(ScalarKind::Integer)
    }

    pub fn boolean() -> Self {
        SchemaNode::Scalar(ScalarKind::Boolean)
    }

    /// Marks properties of an object node as required. No-op on other nodes.
    pub fn with_required<I, K>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        if let SchemaNode::Object { required, .. } = &mut self {
            required.extend(names.into_iter().map(Into::into));
        }
        self
    }

    /// Looks up a declared property of an object node.
    pub fn property(&self, name: &str) -> Option<&SchemaNode> {
        match self {
            SchemaNode::Object { properties, .. } => properties
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, node)| node),
            _ => None,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            SchemaNode::Object { .. } => "object",
            SchemaNode::Array(_) => "array",
            SchemaNode::Scalar(kind) => kind.as_str(),
        }
    }

    /// Reads a JSON-Schema document.
    ///
    /// Only `type`, `properties`, `required` and `items` are interpreted;
    /// other keywords (`description`, `$id`, ...) are ignored.
    pub fn from_json(doc: &serde_json::Value) -> Result<Self, SchemaError> {
        Self::from_json_at(doc, "")
    }

    fn from_json_at(doc: &serde_json::Value, path: &str) -> Result<Self, SchemaError> {
        let obj = doc.as_object().ok_or_else(|| SchemaError::Malformed {
            path: display_path(path),
            message: "schema must be a JSON object".into(),
        })?;

        let ty = match obj.get("type") {
            Some(serde_json::Value::String(ty)) => ty.as_str(),
            Some(other) => {
                return Err(SchemaError::UnsupportedType {
                    path: display_path(path),
                    found: other.to_string(),
                });
            }
            None => {
                return Err(SchemaError::MissingType {
                    path: display_path(path),
                });
            }
        };

        match ty {
            "object" => {
                let mut properties = Vec::new();
                if let Some(props) = obj.get("properties") {
                    let props = props.as_object().ok_or_else(|| SchemaError::Malformed {
                        path: display_path(path),
                        message: "\"properties\" must be an object".into(),
                    })?;
                    for (name, child) in props {
                        let child_path = format!("{}/properties/{}", path, name);
                        properties.push((name.clone(), Self::from_json_at(child, &child_path)?));
                    }
                }

                let mut required = Vec::new();
                if let Some(req) = obj.get("required") {
                    let names = req.as_array().ok_or_else(|| SchemaError::Malformed {
                        path: display_path(path),
                        message: "\"required\" must be an array of strings".into(),
                    })?;
                    for name in names {
                        match name.as_str() {
                            Some(n) => required.push(n.to_string()),
                            None => {
                                return Err(SchemaError::Malformed {
                                    path: display_path(path),
                                    message: "\"required\" must be an array of strings".into(),
                                });
                            }
                        }
                    }
                }

                Ok(SchemaNode::Object { properties, required })
            }
            "array" => {
                let items = obj.get("items").ok_or_else(|| SchemaError::Malformed {
                    path: display_path(path),
                    message: "array schema needs an \"items\" schema".into(),
                })?;
                let child_path = format!("{}/items", path);
                Ok(SchemaNode::array(Self::from_json_at(items, &child_path)?))
            }
            "string" => Ok(SchemaNode::string()),
            "number" => Ok(SchemaNode::number()),
            "integer" => Ok(SchemaNode::integer()),
            "boolean" => Ok(SchemaNode::boolean()),
            other => Err(SchemaError::UnsupportedType {
                path: display_path(path),
                found: other.to_string(),
            }),
        }
    }
}

fn display_path(path: &str) -> String {
    if path.is_empty() { "/".to_string() } else { path.to_string() }
}
