//! Error types for query decoding and evaluation.
//!
//! Every failure is deterministic: evaluating the same query against the same
//! data always yields the same error, so nothing here is retryable.

use thiserror::Error;

/// Errors raised while decoding or evaluating a query.
///
/// All variants except [`QueryError::InvalidDataStructure`] describe a problem
/// with the query itself. Callers serving queries over HTTP should map all of
/// them to a 4xx response.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
    /// The data does not conform to the schema it is evaluated against
    #[error("Invalid data structure: {0}")]
    InvalidDataStructure(String),

    /// Empty call, wrong arity, or a badly typed argument
    #[error("Malformed query: {0}")]
    MalformedQuery(String),

    /// First element of a call is not a registered operator token
    #[error("Unknown operator: {0}")]
    UnknownOperator(String),

    /// Resolve path names a property the object schema does not declare
    #[error("Unknown property: '{0}' is not declared in the object schema")]
    UnknownProperty(String),

    /// Wildcard used on a non-array node, or a property name used on an array
    #[error("Invalid array access: {0}")]
    InvalidArrayAccess(String),

    /// Resolve path continues past a scalar node
    #[error("Cannot descend into scalar: '{0}' follows a scalar value")]
    CannotDescendIntoScalar(String),

    /// Operand types are not valid for the operator
    #[error("Type mismatch: {0}")]
    TypeMismatch(String),

    /// Query nesting, path length, or array nesting exceeds the configured limits
    #[error("Query too complex: {0}")]
    QueryTooComplex(String),
}

impl QueryError {
    /// Returns true when the error is caused by the query rather than the data.
    pub fn is_input_error(&self) -> bool {
        !matches!(self, QueryError::InvalidDataStructure(_))
    }
}

/// Errors raised while reading a JSON-Schema document into a [`crate::SchemaNode`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    #[error("Schema at '{path}' has no \"type\" keyword")]
    MissingType { path: String },

    #[error("Schema at '{path}' has unsupported type '{found}'")]
    UnsupportedType { path: String, found: String },

    #[error("Schema at '{path}' is malformed: {message}")]
    Malformed { path: String, message: String },
}

/// Errors raised while loading evaluator limits.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid limit: {0}")]
    InvalidLimit(String),
}
