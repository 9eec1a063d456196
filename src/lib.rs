pub mod ast;
pub mod cli;
pub mod config;
pub mod error;
pub mod eval_value;
pub mod evaluator;
pub mod parser;
pub mod predicate;
pub mod resolve;
pub mod schema;
pub mod validate;
pub mod value;

pub use ast::{CompareOp, Operator, PathToken, QueryExpr, WILDCARD};
pub use config::EvalLimits;
pub use error::{ConfigError, QueryError, SchemaError};
pub use eval_value::{EvalValue, broadcast_any};
pub use evaluator::Evaluator;
pub use parser::Parser;
pub use predicate::{Predicate, matches};
pub use resolve::PathResolver;
pub use schema::{ScalarKind, SchemaNode};
pub use validate::{StructuralValidator, ValidationFailure, Validator};
pub use value::Value;
