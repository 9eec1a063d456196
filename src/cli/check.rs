//! Check JSON records against queries

use tracing::debug;

use super::CliError;
use crate::{EvalLimits, Parser, Predicate, SchemaNode, Value};

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The query, in its JSON wire form
    pub query: String,
    /// JSON-Schema document describing the input
    pub schema: String,
    /// JSON input string
    pub input: Option<String>,
    /// Return the raw evaluation value instead of a match decision
    pub raw: bool,
    /// Only decode the query, don't execute
    pub syntax_only: bool,
    pub limits: EvalLimits,
}

/// Result of a check operation
#[derive(Debug, PartialEq)]
pub enum CheckResult {
    /// Query decoded; carries its canonical wire form
    SyntaxValid(serde_json::Value),
    /// Whether the input matched
    Matched(bool),
    /// Raw evaluation value (broadcast values become JSON arrays)
    Evaluated(serde_json::Value),
}

/// Execute a check operation
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    let limits = options.limits.validated()?;
    let query = Parser::new(&limits).parse_str(&options.query)?;
    debug!(depth = query.depth(), "query decoded");

    if options.syntax_only {
        return Ok(CheckResult::SyntaxValid(query.to_json()?));
    }

    let schema_doc: serde_json::Value = serde_json::from_str(&options.schema)?;
    let schema = SchemaNode::from_json(&schema_doc)?;

    let json_str = options.input.as_ref().ok_or(CliError::NoInput)?;
    let data = Value::from(serde_json::from_str::<serde_json::Value>(json_str)?);

    let predicate = Predicate::new(limits);
    if options.raw {
        let value = predicate.evaluate(&query, &data, &schema)?;
        return Ok(CheckResult::Evaluated(value.into()));
    }

    Ok(CheckResult::Matched(predicate.matches(&query, &data, &schema)?))
}
