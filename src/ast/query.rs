use std::fmt;

use crate::{
    ast::{CompareOp, Operator},
    error::QueryError,
    value::Value,
};

/// Reserved resolve-path token that steps into every element of an array.
pub const WILDCARD: &str = "[item]";

/// One step of a resolve path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathToken {
    /// Named property of an object node
    Property(String),

    /// `[item]`: every element of an array node
    Wildcard,
}

impl PathToken {
    pub fn as_str(&self) -> &str {
        match self {
            PathToken::Property(name) => name,
            PathToken::Wildcard => WILDCARD,
        }
    }
}

impl From<&str> for PathToken {
    fn from(s: &str) -> Self {
        if s == WILDCARD {
            PathToken::Wildcard
        } else {
            PathToken::Property(s.to_string())
        }
    }
}

impl From<String> for PathToken {
    fn from(s: String) -> Self {
        if s == WILDCARD {
            PathToken::Wildcard
        } else {
            PathToken::Property(s)
        }
    }
}

impl fmt::Display for PathToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A decoded query expression.
///
/// Build one with [`crate::Parser`] from the JSON wire form, or directly:
///
/// ```
/// use schema_query::QueryExpr;
///
/// let query = QueryExpr::and(
///     QueryExpr::eq(QueryExpr::resolve(["subject", "karyotypic_sex"]), "XO"),
///     QueryExpr::contains(
///         QueryExpr::resolve(["biosamples", "[item]", "procedure", "code", "id"]),
///         "TE",
///     ),
/// );
/// assert_eq!(query.depth(), 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum QueryExpr {
    /// Constant, evaluates to itself
    Literal(Value),

    And(Box<QueryExpr>, Box<QueryExpr>),

    Or(Box<QueryExpr>, Box<QueryExpr>),

    /// Negation of the boolean outcome of the operand
    Not(Box<QueryExpr>),

    Compare {
        op: CompareOp,
        left: Box<QueryExpr>,
        right: Box<QueryExpr>,
    },

    /// `co`: `element` is a member or substring of `container`
    Contains {
        container: Box<QueryExpr>,
        element: Box<QueryExpr>,
    },

    /// Path resolution from the current data node
    Resolve(Vec<PathToken>),
}

macro_rules! literal_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for QueryExpr {
                fn from(v: $ty) -> Self {
                    QueryExpr::Literal(Value::from(v))
                }
            }
        )*
    };
}

literal_from!(Value, bool, i64, f64, &str, String);

impl QueryExpr {
    pub fn literal(v: impl Into<Value>) -> Self {
        QueryExpr::Literal(v.into())
    }

    pub fn and(left: impl Into<QueryExpr>, right: impl Into<QueryExpr>) -> Self {
        QueryExpr::And(Box::new(left.into()), Box::new(right.into()))
    }

    pub fn or(left: impl Into<QueryExpr>, right: impl Into<QueryExpr>) -> Self {
        QueryExpr::Or(Box::new(left.into()), Box::new(right.into()))
    }

    pub fn not(operand: impl Into<QueryExpr>) -> Self {
        QueryExpr::Not(Box::new(operand.into()))
    }

    pub fn compare(op: CompareOp, left: impl Into<QueryExpr>, right: impl Into<QueryExpr>) -> Self {
        QueryExpr::Compare {
            op,
            left: Box::new(left.into()),
            right: Box::new(right.into()),
        }
    }

    pub fn lt(left: impl Into<QueryExpr>, right: impl Into<QueryExpr>) -> Self {
        Self::compare(CompareOp::Lt, left, right)
    }

    pub fn le(left: impl Into<QueryExpr>, right: impl Into<QueryExpr>) -> Self {
        Self::compare(CompareOp::Le, left, right)
    }

    pub fn eq(left: impl Into<QueryExpr>, right: impl Into<QueryExpr>) -> Self {
        Self::compare(CompareOp::Eq, left, right)
    }

    pub fn gt(left: impl Into<QueryExpr>, right: impl Into<QueryExpr>) -> Self {
        Self::compare(CompareOp::Gt, left, right)
    }

    pub fn ge(left: impl Into<QueryExpr>, right: impl Into<QueryExpr>) -> Self {
        Self::compare(CompareOp::Ge, left, right)
    }

    pub fn contains(container: impl Into<QueryExpr>, element: impl Into<QueryExpr>) -> Self {
        QueryExpr::Contains {
            container: Box::new(container.into()),
            element: Box::new(element.into()),
        }
    }

    /// `resolve` call; `"[item]"` segments become [`PathToken::Wildcard`].
    pub fn resolve<I, T>(path: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<PathToken>,
    {
        QueryExpr::Resolve(path.into_iter().map(Into::into).collect())
    }

    /// Operator at the root of this expression, `None` for literals.
    pub fn operator(&self) -> Option<Operator> {
        match self {
            QueryExpr::Literal(_) => None,
            QueryExpr::And(..) => Some(Operator::And),
            QueryExpr::Or(..) => Some(Operator::Or),
            QueryExpr::Not(_) => Some(Operator::Not),
            QueryExpr::Compare { op, .. } => Some(op.operator()),
            QueryExpr::Contains { .. } => Some(Operator::Co),
            QueryExpr::Resolve(_) => Some(Operator::Resolve),
        }
    }

    /// Nesting depth; a literal or a resolve call has depth 1.
    pub fn depth(&self) -> usize {
        match self {
            QueryExpr::Literal(_) | QueryExpr::Resolve(_) => 1,
            QueryExpr::Not(operand) => 1 + operand.depth(),
            QueryExpr::And(l, r)
            | QueryExpr::Or(l, r)
            | QueryExpr::Compare { left: l, right: r, .. }
            | QueryExpr::Contains {
                container: l,
                element: r,
            } => 1 + l.depth().max(r.depth()),
        }
    }

    /// Serializes back to the canonical JSON wire form (bare tokens).
    ///
    /// Array literals have no wire form, since every JSON array is a call, so
    /// they are rejected with [`QueryError::MalformedQuery`].
    pub fn to_json(&self) -> Result<serde_json::Value, QueryError> {
        let call = |op: Operator, args: Vec<serde_json::Value>| {
            let mut items = Vec::with_capacity(args.len() + 1);
            items.push(serde_json::Value::String(op.token().to_string()));
            items.extend(args);
            serde_json::Value::Array(items)
        };

        Ok(match self {
            QueryExpr::Literal(Value::Array(_)) => {
                return Err(QueryError::MalformedQuery(
                    "array literals cannot be serialized; JSON arrays are operator calls".into(),
                ));
            }
            QueryExpr::Literal(v) => serde_json::Value::from(v.clone()),
            QueryExpr::And(l, r) => call(Operator::And, vec![l.to_json()?, r.to_json()?]),
            QueryExpr::Or(l, r) => call(Operator::Or, vec![l.to_json()?, r.to_json()?]),
            QueryExpr::Not(operand) => call(Operator::Not, vec![operand.to_json()?]),
            QueryExpr::Compare { op, left, right } => {
                call(op.operator(), vec![left.to_json()?, right.to_json()?])
            }
            QueryExpr::Contains { container, element } => {
                call(Operator::Co, vec![container.to_json()?, element.to_json()?])
            }
            QueryExpr::Resolve(path) => call(
                Operator::Resolve,
                path.iter()
                    .map(|t| serde_json::Value::String(t.as_str().to_string()))
                    .collect(),
            ),
        })
    }
}
