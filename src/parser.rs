//! Decoder from the JSON wire form into [`QueryExpr`].
//!
//! A JSON array is a call `[token, arg...]`; every other JSON value is a
//! literal. Arity and argument shape are checked here, so the evaluator only
//! ever sees well-formed trees.

use tracing::trace;

use crate::{
    ast::{CompareOp, Operator, PathToken, QueryExpr},
    config::EvalLimits,
    error::QueryError,
    value::Value,
};

pub struct Parser {
    max_depth: usize,
}

impl Default for Parser {
    fn default() -> Self {
        Parser::new(&EvalLimits::default())
    }
}

impl Parser {
    pub fn new(limits: &EvalLimits) -> Self {
        Parser {
            max_depth: limits.max_depth,
        }
    }

    /// Decodes a query from its JSON wire form.
    ///
    /// # Examples
    ///
    /// ```
    /// use schema_query::{Parser, QueryExpr};
    /// use serde_json::json;
    ///
    /// let query = Parser::default()
    ///     .parse(&json!(["#eq", ["#resolve", "subject", "karyotypic_sex"], "XO"]))
    ///     .unwrap();
    /// assert_eq!(
    ///     query,
    ///     QueryExpr::eq(QueryExpr::resolve(["subject", "karyotypic_sex"]), "XO")
    /// );
    /// ```
    pub fn parse(&self, doc: &serde_json::Value) -> Result<QueryExpr, QueryError> {
        self.parse_expr(doc, 1)
    }

    /// Decodes a query from JSON text.
    pub fn parse_str(&self, text: &str) -> Result<QueryExpr, QueryError> {
        let doc: serde_json::Value = serde_json::from_str(text)
            .map_err(|e| QueryError::MalformedQuery(format!("query is not valid JSON: {}", e)))?;
        self.parse(&doc)
    }

    fn parse_expr(&self, doc: &serde_json::Value, depth: usize) -> Result<QueryExpr, QueryError> {
        if depth > self.max_depth {
            return Err(QueryError::QueryTooComplex(format!(
                "expression nesting exceeds the maximum depth of {}",
                self.max_depth
            )));
        }

        let items = match doc {
            serde_json::Value::Array(items) => items,
            literal => return Ok(QueryExpr::Literal(Value::from(literal.clone()))),
        };

        let (head, args) = items
            .split_first()
            .ok_or_else(|| QueryError::MalformedQuery("empty expression: []".into()))?;

        let op = match head {
            serde_json::Value::String(token) => Operator::from_token(token)
                .ok_or_else(|| QueryError::UnknownOperator(token.clone()))?,
            other => return Err(QueryError::UnknownOperator(other.to_string())),
        };
        trace!(operator = %op, args = args.len(), "decoding call");

        if let Some(arity) = op.arity()
            && args.len() != arity
        {
            return Err(QueryError::MalformedQuery(format!(
                "'{}' takes {} argument{}, got {}",
                op,
                arity,
                if arity == 1 { "" } else { "s" },
                args.len()
            )));
        }

        let arg = |i: usize| self.parse_expr(&args[i], depth + 1).map(Box::new);
        let compare = |op: CompareOp| -> Result<QueryExpr, QueryError> {
            Ok(QueryExpr::Compare {
                op,
                left: arg(0)?,
                right: arg(1)?,
            })
        };

        let expr = match op {
            Operator::And => QueryExpr::And(arg(0)?, arg(1)?),
            Operator::Or => QueryExpr::Or(arg(0)?, arg(1)?),
            Operator::Not => QueryExpr::Not(arg(0)?),
            Operator::Lt => compare(CompareOp::Lt)?,
            Operator::Le => compare(CompareOp::Le)?,
            Operator::Eq => compare(CompareOp::Eq)?,
            Operator::Gt => compare(CompareOp::Gt)?,
            Operator::Ge => compare(CompareOp::Ge)?,
            Operator::Co => QueryExpr::Contains {
                container: arg(0)?,
                element: arg(1)?,
            },
            Operator::Resolve => QueryExpr::Resolve(parse_path(args)?),
        };

        Ok(expr)
    }
}

fn parse_path(args: &[serde_json::Value]) -> Result<Vec<PathToken>, QueryError> {
    args.iter()
        .map(|arg| match arg {
            serde_json::Value::String(s) => Ok(PathToken::from(s.as_str())),
            other => Err(QueryError::MalformedQuery(format!(
                "resolve path segments must be strings, got {}",
                other
            ))),
        })
        .collect()
}
